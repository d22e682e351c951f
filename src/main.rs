//! GatiIO - Streaming ingestion daemon for phone IMU telemetry
//!
//! Accepts TCP connections from phone sensor-streaming apps and runs one
//! independent ingestion session per client: each connection gets its own
//! framer, estimator pair, and recent-state buffer, created on connect and
//! discarded on close.

use gati_io::config::AppConfig;
use gati_io::error::{self, Result};
use gati_io::session::IngestionLoop;
use gati_io::sink::LoggingSink;
use gati_io::transport::TcpChunkSource;
use std::env;
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `gati-io <path>` (positional)
/// - `gati-io --config <path>` (flag-based)
/// - `gati-io -c <path>` (short flag)
///
/// Defaults to `/etc/gatiio.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/gatiio.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let config = if Path::new(&config_path).exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    // Initialize logger; RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    log::info!("GatiIO starting...");
    if Path::new(&config_path).exists() {
        log::info!("Using config: {}", config_path);
    } else {
        log::warn!("Config {} not found, using defaults", config_path);
    }
    log::info!(
        "Orientation mode: {:?}, gyro dt: {}s, damping: 1/{}",
        config.estimator.orientation_mode,
        config.estimator.gyro_dt,
        config.estimator.position_damping
    );

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);

    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| error::Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let listener = TcpListener::bind(&config.network.bind_address).map_err(|e| {
        error::Error::Other(format!(
            "Failed to bind to {}: {}",
            config.network.bind_address, e
        ))
    })?;
    if let Err(e) = listener.set_nonblocking(true) {
        log::warn!("Failed to set nonblocking mode: {}", e);
    }

    log::info!("Listening on {}", config.network.bind_address);
    log::info!("GatiIO running. Press Ctrl-C to stop.");

    // Accept loop: one session thread per client, each with independent
    // framer/estimator/sink state
    while running.load(Ordering::Relaxed) {
        match listener.accept() {
            Ok((stream, addr)) => {
                log::info!("Client connected: {}", addr);

                if let Err(e) = stream.set_nonblocking(false) {
                    log::error!("Failed to set socket to blocking mode: {}", e);
                    continue;
                }

                let session_config = config.estimator.clone();
                let read_buffer_size = config.network.read_buffer_size;

                let spawned = thread::Builder::new()
                    .name(format!("session-{}", addr))
                    .spawn(move || {
                        let source = TcpChunkSource::new(stream, read_buffer_size);
                        let sink = LoggingSink::new(session_config.history_depth);
                        let mut session = IngestionLoop::new(source, sink, &session_config);
                        match session.run() {
                            Ok(stats) => log::info!(
                                "Client {} disconnected: {} records, {} routed, {} decode failures",
                                addr,
                                stats.records,
                                stats.routed,
                                stats.decode_failures
                            ),
                            Err(e) => log::error!("Session for {} failed: {}", addr, e),
                        }
                    });
                if let Err(e) = spawned {
                    log::error!("Failed to spawn session thread: {}", e);
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // No connection pending, sleep briefly
                thread::sleep(Duration::from_millis(10));
            }
            Err(e) => {
                log::error!("Accept error: {}", e);
            }
        }
    }

    log::info!("GatiIO stopped");
    Ok(())
}
