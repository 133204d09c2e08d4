//! Load test for the skirmish server.
//!
//! Spawns multiple fake WebSocket clients that:
//! - Connect to the server and wait for the welcome
//! - Periodically send random key snapshots
//! - Receive and count `update` broadcasts
//!
//! Usage: cargo run --bin loadtest -- [--clients N] [--duration S] [--input-rate R] [--url URL]

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_shared::protocol::{ClientMsg, PressedKeys, ServerMsg};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Parser, Debug)]
#[command(about = "Load test for the skirmish server")]
struct Args {
    /// Number of clients to spawn
    #[arg(long, default_value_t = 100)]
    clients: u32,
    /// Test duration in seconds
    #[arg(long, default_value_t = 30)]
    duration: u64,
    /// Key snapshots per second per client
    #[arg(long, default_value_t = 4.0)]
    input_rate: f64,
    /// Server URL
    #[arg(long, default_value = "ws://127.0.0.1:8443/ws")]
    url: String,
}

// === Metrics ===

#[derive(Default)]
struct Metrics {
    connected: AtomicU64,
    updates_received: AtomicU64,
    players_seen: AtomicU64,
    inputs_sent: AtomicU64,
    errors: AtomicU64,
    latency_sum_ms: AtomicU64,
    latency_count: AtomicU64,
}

// === Client task ===

async fn run_client(
    client_id: u32,
    url: String,
    input_rate: f64,
    duration: Duration,
    metrics: Arc<Metrics>,
) {
    let connect_start = Instant::now();

    let (mut ws, _) = match connect_async(&url).await {
        Ok(conn) => conn,
        Err(e) => {
            if client_id < 5 {
                eprintln!("Client {} failed to connect: {}", client_id, e);
            }
            metrics.errors.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    metrics
        .latency_sum_ms
        .fetch_add(connect_start.elapsed().as_millis() as u64, Ordering::Relaxed);
    metrics.latency_count.fetch_add(1, Ordering::Relaxed);
    metrics.connected.fetch_add(1, Ordering::Relaxed);

    // Wait for welcome message before doing anything else
    let got_welcome = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(msg) = ws.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Ok(ServerMsg::Welcome(_)) = serde_json::from_str::<ServerMsg>(&text) {
                        return true;
                    }
                }
                Ok(Message::Close(_)) | Err(_) => return false,
                _ => {}
            }
        }
        false
    })
    .await
    .unwrap_or(false);

    if !got_welcome {
        if client_id < 3 {
            eprintln!("Client {} failed to get welcome", client_id);
        }
        metrics.errors.fetch_add(1, Ordering::Relaxed);
        metrics.connected.fetch_sub(1, Ordering::Relaxed);
        return;
    }

    let input_interval = if input_rate > 0.0 {
        Duration::from_secs_f64(1.0 / input_rate)
    } else {
        Duration::from_secs(3600) // Effectively never
    };
    let mut input_timer = tokio::time::interval(input_interval);
    input_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let test_end = Instant::now() + duration;
    let mut rng = ChaCha8Rng::seed_from_u64(client_id as u64 * 12345 + 67890);

    while Instant::now() < test_end {
        tokio::select! {
            _ = input_timer.tick() => {
                let keys = PressedKeys {
                    left: rng.gen_bool(0.3),
                    right: rng.gen_bool(0.3),
                    jump: rng.gen_bool(0.2),
                    ..Default::default()
                };
                let json = match serde_json::to_string(&ClientMsg::KeyPressUpdate(keys)) {
                    Ok(json) => json,
                    Err(_) => continue,
                };
                if ws.send(Message::Text(json.into())).await.is_ok() {
                    metrics.inputs_sent.fetch_add(1, Ordering::Relaxed);
                } else {
                    metrics.errors.fetch_add(1, Ordering::Relaxed);
                    break;
                }
            }

            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Ok(ServerMsg::Update(update)) = serde_json::from_str::<ServerMsg>(&text) {
                            metrics.updates_received.fetch_add(1, Ordering::Relaxed);
                            metrics.players_seen.fetch_add(update.players.len() as u64, Ordering::Relaxed);
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        if client_id < 3 {
                            eprintln!("Client {} error: {}", client_id, e);
                        }
                        metrics.errors.fetch_add(1, Ordering::Relaxed);
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let _ = ws.close(None).await;
    metrics.connected.fetch_sub(1, Ordering::Relaxed);
}

// === Main ===

#[tokio::main]
async fn main() {
    let args = Args::parse();

    println!("=== Skirmish Server Load Test ===");
    println!("Clients: {}", args.clients);
    println!("Duration: {}s", args.duration);
    println!("Input rate: {}/s per client", args.input_rate);
    println!("URL: {}", args.url);
    println!();

    let metrics = Arc::new(Metrics::default());
    let duration = Duration::from_secs(args.duration);
    let mut handles = Vec::with_capacity(args.clients as usize);

    let input_rate = args.input_rate;
    let spawn_start = Instant::now();
    for client_id in 0..args.clients {
        let url = args.url.clone();
        let metrics = Arc::clone(&metrics);
        handles.push(tokio::spawn(async move {
            run_client(client_id, url, input_rate, duration, metrics).await;
        }));

        // Stagger spawns slightly to avoid thundering herd
        if client_id % 50 == 49 {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
    println!("All clients spawned in {:?}", spawn_start.elapsed());

    // Print stats periodically
    let metrics_clone = Arc::clone(&metrics);
    let stats_handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        let start = Instant::now();
        loop {
            interval.tick().await;
            println!(
                "[{:3}s] connected={}, updates={}, inputs={}, errors={}",
                start.elapsed().as_secs(),
                metrics_clone.connected.load(Ordering::Relaxed),
                metrics_clone.updates_received.load(Ordering::Relaxed),
                metrics_clone.inputs_sent.load(Ordering::Relaxed),
                metrics_clone.errors.load(Ordering::Relaxed),
            );
        }
    });

    for handle in handles {
        let _ = handle.await;
    }
    stats_handle.abort();

    let updates = metrics.updates_received.load(Ordering::Relaxed);
    let players_seen = metrics.players_seen.load(Ordering::Relaxed);
    let latency_count = metrics.latency_count.load(Ordering::Relaxed);

    println!();
    println!("=== Final Results ===");
    println!("Total updates received: {}", updates);
    println!("Total inputs sent: {}", metrics.inputs_sent.load(Ordering::Relaxed));
    println!("Total errors: {}", metrics.errors.load(Ordering::Relaxed));
    if updates > 0 {
        println!("Average players per update: {}", players_seen / updates);
    }
    if latency_count > 0 {
        println!(
            "Average connect latency: {}ms",
            metrics.latency_sum_ms.load(Ordering::Relaxed) / latency_count
        );
    }

    // 60 Hz broadcast
    let expected_per_client = args.duration as f64 * 60.0;
    let per_client = updates as f64 / args.clients.max(1) as f64;
    println!("Updates per client: {:.1} (expected {:.1})", per_client, expected_per_client);
    println!("Delivery rate: {:.1}%", per_client / expected_per_client * 100.0);
}
