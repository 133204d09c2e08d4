use crate::config::ServerConfig;
use crate::fighter::Fighter;
use crate::physics;
use crate::protocol::{
    ObstacleWire, PlayerWire, PressedKeys, UpdateMsg, WelcomeMsg, PROTOCOL_VERSION,
};
use crate::world::Level;
use rand_chacha::ChaCha8Rng;
use skirmish_shared::config::PhysicsConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Central game state owned by the game loop task.
///
/// Fighters are keyed by connection id. Iteration is in ascending id order,
/// so every tick processes fighters in the same order.
pub struct GameState {
    pub fighters: BTreeMap<u32, Fighter>,
    pub level: Arc<Level>,
    pub physics: PhysicsConfig,
    pub rng: ChaCha8Rng,
    next_player_id: u32,
    /// The level never changes, so its wire form is built once
    map_wire: Vec<ObstacleWire>,
}

impl GameState {
    pub fn new(server_config: &ServerConfig, physics: PhysicsConfig, level: Level) -> Self {
        use rand::SeedableRng;
        let rng = ChaCha8Rng::seed_from_u64(server_config.rng_seed);
        let map_wire = level.obstacles().iter().map(ObstacleWire::from).collect();

        Self {
            fighters: BTreeMap::new(),
            level: Arc::new(level),
            physics,
            rng,
            next_player_id: 1,
            map_wire,
        }
    }

    /// Spawn a fighter for a new connection, returns its id
    pub fn add_player(&mut self) -> u32 {
        let id = self.next_player_id;
        self.next_player_id += 1;

        let color = Fighter::random_color(&mut self.rng);
        self.fighters.insert(id, Fighter::new(id, color, &self.physics));
        id
    }

    /// Remove a fighter. Unknown ids are ignored.
    pub fn remove_player(&mut self, id: u32) -> bool {
        self.fighters.remove(&id).is_some()
    }

    /// Replace a fighter's held keys wholesale. Unknown ids are ignored.
    pub fn set_input(&mut self, id: u32, keys: PressedKeys) -> bool {
        match self.fighters.get_mut(&id) {
            Some(fighter) => {
                fighter.pressed_keys = keys;
                true
            }
            None => false,
        }
    }

    /// Advance every fighter by one tick. Returns how many fighters had to be
    /// respawned because their state stopped being finite.
    pub fn tick(&mut self) -> usize {
        let mut respawned = 0;
        for fighter in self.fighters.values_mut() {
            physics::step(fighter, &self.level, &self.physics);
            if !fighter.is_finite() {
                tracing::warn!(
                    "Fighter {} reached non-finite state {:?} / {:?}, respawning",
                    fighter.id,
                    fighter.position,
                    fighter.velocity
                );
                fighter.respawn(&self.physics);
                respawned += 1;
            }
        }
        respawned
    }

    /// Snapshot of all fighters and the level for broadcasting
    pub fn get_update(&self) -> UpdateMsg {
        UpdateMsg {
            players: self.fighters.values().map(PlayerWire::from).collect(),
            map: self.map_wire.clone(),
        }
    }

    pub fn welcome(&self, self_id: u32) -> WelcomeMsg {
        WelcomeMsg {
            protocol_version: PROTOCOL_VERSION,
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            self_id,
            physics: self.physics,
        }
    }

    pub fn player_count(&self) -> usize {
        self.fighters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fighter::PALETTE;
    use crate::vec2::Vec2;

    fn test_state() -> GameState {
        let server_config = ServerConfig {
            rng_seed: 12345,
            ..Default::default()
        };
        GameState::new(&server_config, PhysicsConfig::default(), Level::arena())
    }

    #[test]
    fn players_get_unique_ids_and_spawn() {
        let mut state = test_state();
        let a = state.add_player();
        let b = state.add_player();
        assert_ne!(a, b);
        assert_eq!(state.player_count(), 2);

        let fighter = &state.fighters[&a];
        assert_eq!(fighter.position, Vec2::new(100.0, 0.0));
        assert!(PALETTE.contains(&fighter.color));
    }

    #[test]
    fn removed_player_disappears_from_update() {
        let mut state = test_state();
        let a = state.add_player();
        let b = state.add_player();

        assert!(state.remove_player(a));
        let update = state.get_update();
        assert_eq!(update.players.len(), 1);
        assert_eq!(update.players[0].id, b);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut state = test_state();
        state.add_player();
        assert!(!state.remove_player(99));
        assert!(!state.set_input(99, PressedKeys::default()));
        assert_eq!(state.player_count(), 1);
    }

    #[test]
    fn input_replaces_previous_snapshot() {
        let mut state = test_state();
        let id = state.add_player();
        state.set_input(
            id,
            PressedKeys {
                left: true,
                jump: true,
                ..Default::default()
            },
        );
        state.set_input(
            id,
            PressedKeys {
                right: true,
                ..Default::default()
            },
        );
        let keys = state.fighters[&id].pressed_keys;
        assert!(keys.right);
        assert!(!keys.left);
        assert!(!keys.jump);
    }

    #[test]
    fn tick_moves_every_fighter() {
        let mut state = test_state();
        let a = state.add_player();
        let b = state.add_player();
        state.set_input(
            b,
            PressedKeys {
                right: true,
                ..Default::default()
            },
        );

        state.tick();
        assert!(state.fighters[&a].position.y > 0.0);
        assert_eq!(state.fighters[&a].position.x, 100.0);
        assert!(state.fighters[&b].position.x > 100.0);
    }

    #[test]
    fn broken_fighter_is_respawned_without_affecting_others() {
        let mut state = test_state();
        let broken = state.add_player();
        let healthy = state.add_player();
        state.fighters.get_mut(&broken).unwrap().velocity = Vec2::new(f64::NAN, 0.0);

        assert_eq!(state.tick(), 1);
        assert_eq!(state.fighters[&broken].position, Vec2::new(100.0, 0.0));
        assert!(state.fighters[&healthy].position.y > 0.0);
    }

    #[test]
    fn update_includes_full_map() {
        let mut state = test_state();
        state.add_player();
        let update = state.get_update();
        assert_eq!(update.map.len(), 3);
        assert_eq!(update.map[2].x, 440.0);
        assert_eq!(update.map[2].height, 400.0);
    }

    #[test]
    fn welcome_carries_physics() {
        let state = test_state();
        let welcome = state.welcome(5);
        assert_eq!(welcome.self_id, 5);
        assert_eq!(welcome.protocol_version, PROTOCOL_VERSION);
        assert_eq!(welcome.physics, PhysicsConfig::default());
    }
}
