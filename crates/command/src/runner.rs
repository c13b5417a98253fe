//! Process runner: launches the external binary with an assembled argument
//! vector and captures its diagnostics.

use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};

use ffwrap_common::config::RunnerConfig;

use crate::error::RunError;

/// Output of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Something that can execute an argument vector.
pub trait Runner {
    /// Run to completion, blocking the calling thread.
    fn run(&self, args: &[String], env: &[(String, String)]) -> Result<RunOutput, RunError>;

    /// Check if the runner can start its binary on this system.
    fn is_available(&self) -> bool;

    /// Runner name, for logs.
    fn name(&self) -> &str;
}

/// Runs a local binary through [`std::process::Command`].
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    binary: PathBuf,
    echo_stderr: bool,
}

impl FfmpegRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            echo_stderr: true,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            echo_stderr: config.echo_stderr,
        }
    }

    /// Whether diagnostics of a failed run are also written to our stderr.
    pub fn with_echo_stderr(mut self, echo: bool) -> Self {
        self.echo_stderr = echo;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn echoes_stderr(&self) -> bool {
        self.echo_stderr
    }
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::from_config(&RunnerConfig::from_env())
    }
}

impl Runner for FfmpegRunner {
    fn run(&self, args: &[String], env: &[(String, String)]) -> Result<RunOutput, RunError> {
        tracing::debug!(binary = %self.binary.display(), args = ?args, "Running process");
        let started = std::time::Instant::now();

        let output = ProcessCommand::new(&self.binary)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|source| RunError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let elapsed_ms = started.elapsed().as_millis();

        if !output.status.success() {
            tracing::error!(
                binary = %self.binary.display(),
                status = %output.status,
                elapsed_ms,
                stderr_bytes = stderr.len(),
                "Process exited unsuccessfully"
            );
            if self.echo_stderr && !stderr.trim().is_empty() {
                eprintln!("{}", stderr.trim_end());
            }
            return Err(RunError::Exit {
                binary: self.binary.clone(),
                status: output.status,
                stderr,
            });
        }

        tracing::info!(
            binary = %self.binary.display(),
            elapsed_ms,
            stdout_bytes = output.stdout.len(),
            "Process finished"
        );

        Ok(RunOutput {
            stdout: output.stdout,
            stderr,
        })
    }

    fn is_available(&self) -> bool {
        ProcessCommand::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}
