//! Assemble a request and run ffmpeg with it.

use std::io::Write;
use std::path::{Path, PathBuf};

use ffwrap_command::{FfmpegRunner, Runner};
use ffwrap_common::config::AppConfig;

pub fn run(config: &AppConfig, request: PathBuf) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    run_to(config, &request, &mut stdout)
}

/// Status lines go to stderr; `out` receives nothing but the child's stdout,
/// so piped outputs (e.g. `pipe:1`) stay byte-exact.
fn run_to(config: &AppConfig, request: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let cmd = super::assemble(request)?;
    let runner = runner_for(config);

    if !runner.is_available() {
        anyhow::bail!(
            "{} cannot be started. Install ffmpeg or point --ffmpeg at it.",
            runner.binary().display()
        );
    }

    eprintln!("Running: {}", cmd.command_line(runner.binary()));
    let output = cmd.run_with(&runner)?;

    if !output.stdout.is_empty() {
        out.write_all(&output.stdout)?;
        out.flush()?;
    }

    eprintln!("Done.");
    Ok(())
}

/// The returned `RunError` already carries ffmpeg's diagnostics.
fn runner_for(config: &AppConfig) -> FfmpegRunner {
    FfmpegRunner::from_config(&config.runner).with_echo_stderr(false)
}
