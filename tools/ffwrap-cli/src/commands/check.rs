//! Check that the configured binary can be started.

use ffwrap_command::{FfmpegRunner, Runner};
use ffwrap_common::config::{config_file_path, AppConfig, BINARY_ENV_VAR};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("ffwrap System Check");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config file: {}", config_path.display());
    } else {
        println!("[INFO] Config file: none (defaults in use)");
    }

    if let Ok(binary) = std::env::var(BINARY_ENV_VAR) {
        println!("[INFO] {BINARY_ENV_VAR} is set: {binary}");
    }

    let runner = FfmpegRunner::from_config(&config.runner);
    let available = runner.is_available();
    if available {
        println!("[OK] ffmpeg binary: {}", runner.binary().display());
    } else {
        println!("[MISSING] ffmpeg binary: {}", runner.binary().display());
    }

    println!();
    if available {
        println!("ffwrap is ready.");
    } else {
        println!("Install ffmpeg, or set {BINARY_ENV_VAR} / --ffmpeg to its path.");
    }

    Ok(())
}
