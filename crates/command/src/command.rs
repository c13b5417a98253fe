//! Command assembly.
//!
//! [`Command::build`] turns global options and a set of files into one
//! argument vector, in a fixed order:
//!
//! ```text
//! -hide_banner  <global flags>  <input 1> ... <input n>  <output 1> ... <output m>
//! ```
//!
//! Inputs and outputs keep the relative order they were supplied in. Any
//! configuration error, on a file or on the global options, aborts the build
//! and every error is reported.

use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

use crate::error::{BuildError, RunError};
use crate::file::{File, Role};
use crate::global::GlobalOptions;
use crate::runner::{FfmpegRunner, RunOutput, Runner};

/// Banner suppression flag; always the first argument.
pub const HIDE_BANNER: &str = "-hide_banner";

/// Environment override that keeps diagnostics free of ANSI colour codes.
pub const NO_COLOR_ENV: (&str, &str) = ("AV_LOG_FORCE_NOCOLOR", "TRUE");

/// A fully assembled invocation, ready to hand to a [`Runner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl Command {
    pub fn build<I>(global: &GlobalOptions, files: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Borrow<File>,
    {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut file_errors = Vec::new();

        for file in files {
            let file = file.borrow();
            if let Some(err) = file.error() {
                file_errors.push(err.clone());
                continue;
            }
            match file.role() {
                Role::Input => inputs.push(file.flags()),
                Role::Output => outputs.push(file.flags()),
            }
        }

        let (global_flags, global_errors) = match global.flags() {
            Ok(flags) => (flags, None),
            Err(errors) => (Vec::new(), Some(errors)),
        };

        if global_errors.is_some() || !file_errors.is_empty() {
            let err = BuildError::new(global_errors, file_errors);
            tracing::warn!(
                errors = err.error_count(),
                files = err.files().len(),
                "Rejected command with configuration errors"
            );
            return Err(err);
        }

        let mut args = vec![HIDE_BANNER.to_string()];
        args.extend(global_flags);
        args.extend(inputs.iter().flatten().cloned());
        args.extend(outputs.iter().flatten().cloned());

        tracing::debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            args = ?args,
            "Command assembled"
        );

        Ok(Self {
            args,
            env: vec![(NO_COLOR_ENV.0.to_string(), NO_COLOR_ENV.1.to_string())],
        })
    }

    /// Argument vector, banner flag first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Environment overrides for the process.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Shell-quoted invocation of `binary`, for logs and dry runs.
    pub fn command_line(&self, binary: &Path) -> String {
        format!("{} {}", shell_quote(&binary.display().to_string()), self)
    }

    /// Run with the default runner, blocking until the process exits.
    pub fn run(&self) -> Result<RunOutput, RunError> {
        self.run_with(&FfmpegRunner::default())
    }

    pub fn run_with<R: Runner + ?Sized>(&self, runner: &R) -> Result<RunOutput, RunError> {
        tracing::info!(runner = runner.name(), args_len = self.args.len(), "Starting command");
        runner.run(&self.args, &self.env)
    }
}

impl fmt::Display for Command {
    /// Arguments only, shell-quoted where needed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_+=/.,:@%^".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::with_overwrite;
    use crate::options::{with_codec, with_stream_loop};
    use crate::stream::StreamSpecifier;
    use crate::values::Codec;

    #[test]
    fn test_build_without_globals() {
        let input = File::input("in.mkv", []);
        let output = File::output("out.mp4", [with_codec(StreamSpecifier::audio(None), Codec::Aac)]);
        let cmd = Command::build(&GlobalOptions::new(), [input, output]).unwrap();
        assert_eq!(
            cmd.args(),
            ["-hide_banner", "-i", "in.mkv", "-c:a", "aac", "out.mp4"]
        );
        assert_eq!(
            cmd.env(),
            [("AV_LOG_FORCE_NOCOLOR".to_string(), "TRUE".to_string())]
        );
    }

    #[test]
    fn test_inputs_precede_outputs_regardless_of_supply_order() {
        let files = vec![
            File::output("o1.mp4", []),
            File::input("i1.mkv", []),
            File::output("o2.mp4", []),
            File::input("i2.mkv", []),
        ];
        let global = GlobalOptions::from([with_overwrite(true)]);
        let cmd = Command::build(&global, &files).unwrap();
        assert_eq!(
            cmd.args(),
            ["-hide_banner", "-y", "-i", "i1.mkv", "-i", "i2.mkv", "o1.mp4", "o2.mp4"]
        );
    }

    #[test]
    fn test_every_file_error_is_reported() {
        let files = [
            File::output("a.mp4", [with_stream_loop(1)]),
            File::input("ok.mkv", []),
            File::output("b.mp4", [with_stream_loop(2)]),
        ];
        let err = Command::build(&GlobalOptions::new(), files).unwrap_err();
        let paths: Vec<_> = err.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["a.mp4", "b.mp4"]);
        assert!(err.global().is_none());
        assert_eq!(err.error_count(), 2);
    }

    #[test]
    fn test_display_quotes_only_when_needed() {
        let cmd = Command::build(
            &GlobalOptions::new(),
            [File::input("my clip's.mov", []), File::output("out.mp4", [])],
        )
        .unwrap();
        assert_eq!(
            cmd.to_string(),
            r"-hide_banner -i 'my clip'\''s.mov' out.mp4"
        );
        assert!(cmd
            .command_line(Path::new("ffmpeg"))
            .starts_with("ffmpeg -hide_banner "));
    }
}
