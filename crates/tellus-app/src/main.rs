//! The binary entry point for the Tellus globe viewer.

mod fps;
mod hud;
mod platform;
mod rotation;
mod window;

use clap::Parser;
use tellus_config::{CliArgs, Config};
use tracing::{info, warn};

use crate::platform::PlatformDirs;

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.as_deref() {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => match PlatformDirs::resolve_and_create() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to initialize platform directories: {e}");
                std::process::exit(1);
            }
        },
    };

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error, falling back to defaults: {e}");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    tellus_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Tellus starting (config: {})", dirs.config_dir.display());

    if let Err(e) = window::run(config) {
        warn!("Event loop terminated with error: {e}");
        std::process::exit(1);
    }
}
