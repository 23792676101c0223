//! SparshIO - virtual touch pointer daemon
//!
//! Locates the rangefinder, connects, and drives the polling loop until a
//! shutdown signal arrives. All calibration values come from the TOML
//! configuration file.

use sparsh_io::app::PointerRunner;
use sparsh_io::calibration::{Calibration, CalibrationHandle};
use sparsh_io::config::AppConfig;
use sparsh_io::cursor::LogCursor;
use sparsh_io::error::{Error, Result};
use sparsh_io::pipeline::ScanWindow;
use sparsh_io::scanner::{find_scanner_port, Scanner, UrgScanner};
use sparsh_io::transport::SerialTransport;
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `sparsh-io <path>` (positional)
/// - `sparsh-io --config <path>` (flag-based)
/// - `sparsh-io -c <path>` (short flag)
///
/// Defaults to `/etc/sparshio.toml` if not specified.
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

    "/etc/sparshio.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let config = if Path::new(&config_path).exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::urg04lx_defaults()
    };

    // Initialize logger from config, overridable via RUST_LOG
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    );
    if config.logging.output == "stdout" {
        builder.target(env_logger::Target::Stdout);
    }
    builder.init();

    log::info!("SparshIO v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!("Using config: {}", config_path);

    // Reject degenerate calibration before any hardware is touched
    config.validate()?;
    log::info!(
        "Screen size: {}x{}",
        config.screen.width,
        config.screen.height
    );

    let port = if config.hardware.port == "auto" {
        match find_scanner_port() {
            Ok(port) => port,
            Err(e) => {
                log::error!("Device not found");
                return Err(e);
            }
        }
    } else {
        config.hardware.port.clone()
    };
    log::info!("Rangefinder: {} at {} baud", port, config.hardware.baud_rate);

    let transport = SerialTransport::open(&port, config.hardware.baud_rate)?;
    let scanner = match UrgScanner::connect(
        transport,
        Duration::from_millis(config.hardware.frame_timeout_ms),
    ) {
        Ok(scanner) => scanner,
        Err(e) => {
            log::error!("Device not found: {}", e);
            return Err(e);
        }
    };

    let window = ScanWindow::from_resolution(
        config.window.start_index,
        config.window.count,
        scanner.info().steps_per_rev,
    );
    let calibration = CalibrationHandle::new(Calibration::from_config(&config)?)?;
    let mut runner = PointerRunner::new(
        calibration,
        window,
        config.screen,
        Duration::from_millis(config.pointer.poll_interval_ms),
    );
    runner.start(Box::new(scanner), Box::new(LogCursor))?;

    // Set up shutdown signal handler
    let shutdown = Arc::new(AtomicBool::new(false));
    let s = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        s.store(true, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    log::info!("SparshIO running. Press Ctrl-C to stop.");
    while !shutdown.load(Ordering::Relaxed) && runner.is_running() {
        thread::sleep(Duration::from_millis(100));
    }

    runner.stop();
    log::info!("SparshIO stopped");
    Ok(())
}
