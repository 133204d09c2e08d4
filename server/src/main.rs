use axum::routing::get;
use axum::Router;
use clap::Parser;
use skirmish_server::config::ServerConfig;
use skirmish_server::game_loop::{run_game_loop, GameBroadcast, GameCommand};
use skirmish_server::ws::{ws_handler, AppState};
use skirmish_shared::config::PhysicsConfig;
use tokio::sync::{broadcast, mpsc};
use tower_http::cors::CorsLayer;

/// Authoritative platform-fighter server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,
    /// Port to listen on
    #[arg(short, long, default_value_t = 8443)]
    port: u16,
    /// Simulation ticks per second
    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,
    /// Seed for fighter color selection
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = ServerConfig {
        listen_addr: format!("{}:{}", args.host, args.port),
        tick_rate_hz: args.tick_rate,
        rng_seed: args.seed,
        ..Default::default()
    };

    // Validate configuration before starting
    if let Err(e) = config.validate() {
        tracing::error!("Invalid server configuration: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = PhysicsConfig::default().validate() {
        tracing::error!("Invalid physics configuration: {}", e);
        std::process::exit(1);
    }

    let listen_addr = config.listen_addr.clone();
    let max_message_bytes = config.max_message_bytes;

    let (game_tx, game_rx) = mpsc::channel::<GameCommand>(256);
    let (broadcast_tx, _) = broadcast::channel::<GameBroadcast>(config.broadcast_capacity);

    // Spawn game loop
    let bc_tx = broadcast_tx.clone();
    tokio::spawn(async move {
        run_game_loop(game_rx, bc_tx, config).await;
    });

    let app_state = AppState {
        game_tx,
        broadcast_tx,
        max_message_bytes,
    };
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", listen_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Skirmish server listening on {}", listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
