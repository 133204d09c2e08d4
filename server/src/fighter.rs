use crate::geometry::{overlaps_any, Rect};
use crate::vec2::Vec2;
use crate::world::Level;
use rand::seq::SliceRandom;
use rand::Rng;
use skirmish_shared::config::PhysicsConfig;
use skirmish_shared::protocol::PressedKeys;

/// Hitbox colors handed out to new fighters.
pub const PALETTE: [&str; 6] = ["blue", "red", "green", "yellow", "purple", "orange"];

pub const DEFAULT_CHARACTER: &str = "Nerd";

/// Which sides of a fighter are touching solid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    None,
    Left,
    Right,
    Both,
}

impl WallContact {
    fn from_sides(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => WallContact::None,
            (true, false) => WallContact::Left,
            (false, true) => WallContact::Right,
            (true, true) => WallContact::Both,
        }
    }

    pub fn is_touching(self) -> bool {
        self != WallContact::None
    }

    pub fn touches_left(self) -> bool {
        matches!(self, WallContact::Left | WallContact::Both)
    }

    pub fn touches_right(self) -> bool {
        matches!(self, WallContact::Right | WallContact::Both)
    }
}

/// A player-controlled fighter. The hitbox is always derived from
/// `position`, never stored.
#[derive(Debug, Clone)]
pub struct Fighter {
    pub id: u32,
    pub character_type: String,
    pub color: &'static str,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Latest input snapshot from the client
    pub pressed_keys: PressedKeys,
    pub performed_jumps: u32,
    pub width: f64,
    pub height: f64,
}

impl Fighter {
    pub fn new(id: u32, color: &'static str, physics: &PhysicsConfig) -> Self {
        Self {
            id,
            character_type: DEFAULT_CHARACTER.to_string(),
            color,
            position: Vec2::new(physics.spawn_x, physics.spawn_y),
            velocity: Vec2::ZERO,
            pressed_keys: PressedKeys::default(),
            performed_jumps: 0,
            width: physics.fighter_width,
            height: physics.fighter_height,
        }
    }

    /// Pick a hitbox color uniformly from the palette.
    pub fn random_color(rng: &mut impl Rng) -> &'static str {
        PALETTE.choose(rng).copied().unwrap_or(PALETTE[0])
    }

    pub fn hitbox(&self) -> Rect {
        Rect {
            position: self.position,
            width: self.width,
            height: self.height,
        }
    }

    /// Probe thin strips along both vertical edges against solid geometry.
    pub fn wall_contact(&self, level: &Level, physics: &PhysicsConfig) -> WallContact {
        let hitbox = self.hitbox();
        let tolerance = physics.wall_check_tolerance;
        let left_probe = Rect::new(
            hitbox.left() - tolerance,
            hitbox.top(),
            tolerance * 2.0,
            hitbox.height,
        );
        let right_probe = Rect::new(hitbox.right(), hitbox.top(), tolerance * 2.0, hitbox.height);

        WallContact::from_sides(
            overlaps_any(&left_probe, level.solids()),
            overlaps_any(&right_probe, level.solids()),
        )
    }

    /// Probe a strip straddling the bottom edge against solid geometry.
    pub fn is_grounded(&self, level: &Level, physics: &PhysicsConfig) -> bool {
        let hitbox = self.hitbox();
        let tolerance = physics.ground_check_tolerance;
        let probe = Rect::new(
            hitbox.left(),
            hitbox.bottom() - tolerance,
            hitbox.width,
            tolerance * 2.0,
        );
        overlaps_any(&probe, level.solids())
    }

    pub fn recharge_jumps(&mut self, level: &Level, physics: &PhysicsConfig) {
        if self.is_grounded(level, physics) || self.wall_contact(level, physics).is_touching() {
            self.performed_jumps = 0;
        }
    }

    /// Consume a jump if one is left. Returns whether the fighter jumped.
    ///
    /// A wall jump pushes away from the touched wall. With walls on both
    /// sides there is no horizontal push.
    pub fn jump(&mut self, level: &Level, physics: &PhysicsConfig) -> bool {
        if self.performed_jumps >= physics.max_jumps {
            return false;
        }
        match self.wall_contact(level, physics) {
            WallContact::Left => self.velocity.x = physics.wall_jump_velocity,
            WallContact::Right => self.velocity.x = -physics.wall_jump_velocity,
            WallContact::Both | WallContact::None => {}
        }
        self.velocity.y = physics.jump_velocity;
        self.performed_jumps += 1;
        // Holding the key must not chain jumps
        self.pressed_keys.jump = false;
        true
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Put the fighter back at spawn with no momentum. Input is kept.
    pub fn respawn(&mut self, physics: &PhysicsConfig) {
        self.position = Vec2::new(physics.spawn_x, physics.spawn_y);
        self.velocity = Vec2::ZERO;
        self.performed_jumps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Obstacle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter_at(x: f64, y: f64) -> Fighter {
        let mut f = Fighter::new(1, "red", &PhysicsConfig::default());
        f.position = Vec2::new(x, y);
        f
    }

    fn platform() -> Level {
        Level::new(vec![Obstacle::solid(100.0, 200.0, 280.0, 20.0, "black")])
    }

    #[test]
    fn new_fighter_starts_at_spawn() {
        let f = Fighter::new(7, "blue", &PhysicsConfig::default());
        assert_eq!(f.position, Vec2::new(100.0, 0.0));
        assert_eq!(f.velocity, Vec2::ZERO);
        assert_eq!(f.performed_jumps, 0);
        assert_eq!(f.character_type, "Nerd");
        assert_eq!(f.hitbox(), Rect::new(100.0, 0.0, 24.0, 48.0));
    }

    #[test]
    fn random_color_comes_from_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            assert!(PALETTE.contains(&Fighter::random_color(&mut rng)));
        }
    }

    #[test]
    fn standing_on_platform_is_grounded() {
        let physics = PhysicsConfig::default();
        let level = platform();
        // Bottom edge resting on the platform top at y = 200
        let f = fighter_at(100.0, 152.0);
        assert!(f.is_grounded(&level, &physics));
    }

    #[test]
    fn hovering_above_platform_is_not_grounded() {
        let physics = PhysicsConfig::default();
        let level = platform();
        let f = fighter_at(100.0, 140.0);
        assert!(!f.is_grounded(&level, &physics));
        assert!(!fighter_at(100.0, 0.0).is_grounded(&level, &physics));
    }

    #[test]
    fn sensors_are_idempotent() {
        let physics = PhysicsConfig::default();
        let level = Level::arena();
        for (x, y) in [(100.0, 152.0), (196.0, 120.0), (240.0, 120.0), (10.0, 10.0)] {
            let f = fighter_at(x, y);
            assert_eq!(f.is_grounded(&level, &physics), f.is_grounded(&level, &physics));
            assert_eq!(f.wall_contact(&level, &physics), f.wall_contact(&level, &physics));
        }
    }

    #[test]
    fn wall_contact_reports_each_side() {
        let physics = PhysicsConfig::default();
        // Pillar occupies x 220..240, y 100..200
        let level = Level::new(vec![Obstacle::solid(220.0, 100.0, 20.0, 100.0, "black")]);

        assert_eq!(fighter_at(196.0, 120.0).wall_contact(&level, &physics), WallContact::Right);
        assert_eq!(fighter_at(240.0, 120.0).wall_contact(&level, &physics), WallContact::Left);
        assert_eq!(fighter_at(100.0, 120.0).wall_contact(&level, &physics), WallContact::None);
    }

    #[test]
    fn wall_contact_both_in_narrow_gap() {
        let physics = PhysicsConfig::default();
        let level = Level::new(vec![
            Obstacle::solid(0.0, 0.0, 20.0, 100.0, "black"),
            Obstacle::solid(44.0, 0.0, 20.0, 100.0, "black"),
        ]);
        let f = fighter_at(20.0, 10.0);
        assert_eq!(f.wall_contact(&level, &physics), WallContact::Both);
    }

    #[test]
    fn passable_geometry_is_ignored_by_sensors() {
        let physics = PhysicsConfig::default();
        let level = Level::new(vec![Obstacle::passable(100.0, 200.0, 280.0, 20.0, "gray")]);
        let f = fighter_at(100.0, 152.0);
        assert!(!f.is_grounded(&level, &physics));
    }

    #[test]
    fn jump_consumes_charge_and_clears_flag() {
        let physics = PhysicsConfig::default();
        let level = Level::default();
        let mut f = fighter_at(0.0, 0.0);
        f.pressed_keys.jump = true;

        assert!(f.jump(&level, &physics));
        assert_eq!(f.velocity.y, -12.0);
        assert_eq!(f.performed_jumps, 1);
        assert!(!f.pressed_keys.jump);
    }

    #[test]
    fn no_third_jump_in_the_air() {
        let physics = PhysicsConfig::default();
        let level = Level::default();
        let mut f = fighter_at(0.0, 0.0);
        assert!(f.jump(&level, &physics));
        assert!(f.jump(&level, &physics));

        f.pressed_keys.jump = true;
        f.velocity.y = 3.0;
        assert!(!f.jump(&level, &physics));
        assert_eq!(f.performed_jumps, 2);
        assert_eq!(f.velocity.y, 3.0);
        // Unused press stays buffered
        assert!(f.pressed_keys.jump);
    }

    #[test]
    fn wall_jump_pushes_away_from_wall() {
        let physics = PhysicsConfig::default();
        let level = Level::new(vec![Obstacle::solid(220.0, 100.0, 20.0, 100.0, "black")]);

        let mut on_right_wall = fighter_at(196.0, 120.0);
        on_right_wall.jump(&level, &physics);
        assert_eq!(on_right_wall.velocity.x, -10.0);

        let mut on_left_wall = fighter_at(240.0, 120.0);
        on_left_wall.jump(&level, &physics);
        assert_eq!(on_left_wall.velocity.x, 10.0);
    }

    #[test]
    fn jump_between_two_walls_has_no_push() {
        let physics = PhysicsConfig::default();
        let level = Level::new(vec![
            Obstacle::solid(0.0, 0.0, 20.0, 100.0, "black"),
            Obstacle::solid(44.0, 0.0, 20.0, 100.0, "black"),
        ]);
        let mut f = fighter_at(20.0, 10.0);
        f.velocity.x = 1.5;
        f.jump(&level, &physics);
        assert_eq!(f.velocity.x, 1.5);
        assert_eq!(f.velocity.y, -12.0);
    }

    #[test]
    fn respawn_resets_motion() {
        let physics = PhysicsConfig::default();
        let mut f = fighter_at(f64::NAN, 3.0);
        f.velocity = Vec2::new(1.0, f64::INFINITY);
        f.performed_jumps = 2;
        assert!(!f.is_finite());

        f.respawn(&physics);
        assert!(f.is_finite());
        assert_eq!(f.position, Vec2::new(100.0, 0.0));
        assert_eq!(f.performed_jumps, 0);
    }
}
