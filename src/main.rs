//! Face tracking head controller over the stdio transport.

use anyhow::Result;
use clap::Parser;
use face_tracking::app::App;
use face_tracking::config::Config;
use face_tracking::transport::{self, StdioSink};
use log::info;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face Tracking - Pan-Tilt Head Controller");

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Wire the stdio transport into the application
    let (detections, feedback, router) = transport::spawn_stdin_router();

    let mut app = App::new(config, Arc::new(StdioSink::new()))?;
    app.attach_detections(detections);
    app.attach_feedback(feedback);
    app.start_search();

    // Run until the input stream ends
    if router.join().is_err() {
        log::error!("Input router thread panicked");
    }
    app.shutdown();

    Ok(())
}
