/// Physics tuning, in play-field units per tick.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
#[serde(rename_all = "camelCase")]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub walk_acceleration: f64,
    pub max_walk_speed: f64,
    pub max_fall_speed: f64,
    pub wall_slide_acceleration: f64,
    pub max_wall_slide_speed: f64,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f64,
    /// Horizontal push away from a wall on a wall jump
    pub wall_jump_velocity: f64,
    pub max_jumps: u32,
    /// Reach of the left/right wall probes
    pub wall_check_tolerance: f64,
    /// Half height of the ground probe
    pub ground_check_tolerance: f64,
    pub field_width: f64,
    pub field_height: f64,
    pub fighter_width: f64,
    pub fighter_height: f64,
    pub spawn_x: f64,
    pub spawn_y: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.5,
            walk_acceleration: 6.0,
            max_walk_speed: 8.0,
            max_fall_speed: 25.0,
            wall_slide_acceleration: 0.5,
            max_wall_slide_speed: 2.5,
            jump_velocity: -12.0,
            wall_jump_velocity: 10.0,
            max_jumps: 2,
            wall_check_tolerance: 7.0,
            ground_check_tolerance: 5.0,
            field_width: 480.0,
            field_height: 270.0,
            fighter_width: 24.0,
            fighter_height: 48.0,
            spawn_x: 100.0,
            spawn_y: 0.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("gravity", self.gravity),
            ("walk_acceleration", self.walk_acceleration),
            ("max_walk_speed", self.max_walk_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("wall_slide_acceleration", self.wall_slide_acceleration),
            ("max_wall_slide_speed", self.max_wall_slide_speed),
            ("wall_jump_velocity", self.wall_jump_velocity),
            ("wall_check_tolerance", self.wall_check_tolerance),
            ("ground_check_tolerance", self.ground_check_tolerance),
            ("fighter_width", self.fighter_width),
            ("fighter_height", self.fighter_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be finite and >= 0", name));
            }
        }
        if !self.jump_velocity.is_finite() || self.jump_velocity > 0.0 {
            return Err("jump_velocity must be finite and <= 0".to_string());
        }
        if !self.field_width.is_finite() || self.field_width <= 0.0 {
            return Err("field_width must be finite and > 0".to_string());
        }
        if !self.field_height.is_finite() || self.field_height <= 0.0 {
            return Err("field_height must be finite and > 0".to_string());
        }
        if !self.spawn_x.is_finite() || !self.spawn_y.is_finite() {
            return Err("spawn position must be finite".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_physics_config_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_gravity_invalid() {
        let config = PhysicsConfig {
            gravity: -1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn upward_jump_must_be_negative() {
        let config = PhysicsConfig {
            jump_velocity: 12.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_field_invalid() {
        let config = PhysicsConfig {
            field_width: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&PhysicsConfig::default()).unwrap();
        assert!(json.contains("\"maxWalkSpeed\":8.0"));
        assert!(json.contains("\"maxJumps\":2"));
    }
}
