use crate::config::ServerConfig;
use crate::protocol::{PressedKeys, ServerMsg, WelcomeMsg};
use crate::scheduler::TickClock;
use crate::state::GameState;
use crate::world::Level;
use axum::extract::ws::Utf8Bytes;
use skirmish_shared::config::PhysicsConfig;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

/// Commands from client connections to the game loop
pub enum GameCommand {
    PlayerJoin {
        response: oneshot::Sender<(u32, WelcomeMsg)>,
    },
    PlayerLeave {
        id: u32,
    },
    Input {
        id: u32,
        keys: PressedKeys,
    },
}

/// Broadcasts from game loop to all clients
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    /// Serialized `update` frame, shared by every connection
    Update(Utf8Bytes),
}

/// Run the main game loop. Owns all game state.
///
/// Commands are handled between ticks, so joins and leaves never land in
/// the middle of a simulation step.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameBroadcast>,
    server_config: ServerConfig,
) {
    let mut state = GameState::new(&server_config, PhysicsConfig::default(), Level::arena());
    let mut clock = TickClock::new(server_config.tick_rate_hz, Instant::now());

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(clock.deadline()) => {
                let timing = clock.advance(Instant::now());
                if timing.skipped > 0 {
                    tracing::warn!(
                        "Tick {} ran {:?} late, skipped {} ticks",
                        timing.tick,
                        timing.drift,
                        timing.skipped
                    );
                }

                state.tick();

                // Nobody to send to
                if broadcast_tx.receiver_count() == 0 {
                    continue;
                }
                match serde_json::to_string(&ServerMsg::Update(state.get_update())) {
                    Ok(json) => {
                        let _ = broadcast_tx.send(GameBroadcast::Update(json.into()));
                    }
                    Err(e) => tracing::error!("Failed to serialize update: {}", e),
                }
            }

            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    GameCommand::PlayerJoin { response } => {
                        let player_id = state.add_player();
                        let welcome = state.welcome(player_id);
                        if response.send((player_id, welcome)).is_err() {
                            // Connection went away before the welcome
                            state.remove_player(player_id);
                        } else {
                            tracing::info!(
                                "Player {} joined ({} online)",
                                player_id,
                                state.player_count()
                            );
                        }
                    }
                    GameCommand::PlayerLeave { id } => {
                        if state.remove_player(id) {
                            tracing::info!("Player {} left ({} online)", id, state.player_count());
                        }
                    }
                    GameCommand::Input { id, keys } => {
                        if !state.set_input(id, keys) {
                            tracing::debug!("Input for unknown player {}", id);
                        }
                    }
                }
            }
        }
    }

    tracing::info!(
        "Game loop ended after {} ticks ({} skipped, {:?} elapsed)",
        clock.tick_count(),
        clock.skipped_total(),
        clock.elapsed(Instant::now())
    );
}
