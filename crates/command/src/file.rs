//! Input and output files with their per-file options.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FileError, OptionError, OptionErrors};

/// Whether a file is read or written by the external process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Input,
    Output,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Input => "input",
            Role::Output => "output",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file under construction, handed to each [`FileOption`] in turn.
#[derive(Debug)]
pub struct PendingFile {
    path: String,
    role: Role,
    options: Vec<String>,
}

impl PendingFile {
    fn new(path: String, role: Role) -> Self {
        Self {
            path,
            role,
            options: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Tokens appended so far.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Append a flag without a value.
    pub fn push_flag(&mut self, flag: impl Into<String>) {
        self.options.push(flag.into());
    }

    /// Append a `flag value` pair.
    pub fn push_pair(&mut self, flag: impl Into<String>, value: impl Into<String>) {
        self.options.push(flag.into());
        self.options.push(value.into());
    }

    /// Fail with a role mismatch unless this file has `role`.
    pub fn require_role(&self, flag: &str, role: Role) -> Result<(), OptionError> {
        if self.role == role {
            Ok(())
        } else {
            Err(OptionError::role_mismatch(flag, role))
        }
    }
}

type ApplyFn = Box<dyn FnOnce(&mut PendingFile) -> Result<(), OptionError> + Send>;

/// One unit of per-file configuration.
///
/// Built by the `with_*` factories in [`crate::options`], or by
/// [`FileOption::new`] for flags the factories do not cover.
pub struct FileOption {
    flag: String,
    apply: ApplyFn,
}

impl FileOption {
    pub fn new<F>(flag: impl Into<String>, apply: F) -> Self
    where
        F: FnOnce(&mut PendingFile) -> Result<(), OptionError> + Send + 'static,
    {
        Self {
            flag: flag.into(),
            apply: Box::new(apply),
        }
    }

    /// Flag this option emits, used for diagnostics.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn apply(self, file: &mut PendingFile) -> Result<(), OptionError> {
        (self.apply)(file)
    }
}

impl fmt::Debug for FileOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOption")
            .field("flag", &self.flag)
            .finish_non_exhaustive()
    }
}

/// One input or output of the external process.
///
/// Options are applied in the order given; a failing option contributes no
/// tokens and its error is kept on the file until the command is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: String,
    role: Role,
    options: Vec<String>,
    error: Option<FileError>,
}

impl File {
    pub fn new(
        path: impl Into<String>,
        role: Role,
        options: impl IntoIterator<Item = FileOption>,
    ) -> Self {
        let mut pending = PendingFile::new(path.into(), role);
        let mut errors = OptionErrors::new();

        for option in options {
            let before = pending.options.len();
            if let Err(err) = option.apply(&mut pending) {
                pending.options.truncate(before);
                errors.push(err);
            }
        }

        let PendingFile {
            path,
            role,
            options,
        } = pending;

        let error = if errors.is_empty() {
            None
        } else {
            tracing::debug!(
                path = %path,
                role = %role,
                errors = errors.len(),
                "File options rejected"
            );
            Some(FileError {
                path: path.clone(),
                role,
                errors,
            })
        };

        Self {
            path,
            role,
            options,
            error,
        }
    }

    pub fn input(path: impl Into<String>, options: impl IntoIterator<Item = FileOption>) -> Self {
        Self::new(path, Role::Input, options)
    }

    pub fn output(path: impl Into<String>, options: impl IntoIterator<Item = FileOption>) -> Self {
        Self::new(path, Role::Output, options)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Option tokens, without the trailing path.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Aggregated configuration error, if any option failed.
    pub fn error(&self) -> Option<&FileError> {
        self.error.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Option tokens followed by `-i <path>` for inputs or `<path>` for outputs.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = self.options.clone();
        match self.role {
            Role::Input => {
                flags.push("-i".to_string());
                flags.push(self.path.clone());
            }
            Role::Output => flags.push(self.path.clone()),
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(flag: &'static str, value: &'static str) -> FileOption {
        FileOption::new(flag, move |f: &mut PendingFile| {
            f.push_pair(flag, value);
            Ok(())
        })
    }

    fn failing(flag: &'static str) -> FileOption {
        FileOption::new(flag, move |f: &mut PendingFile| {
            f.push_flag(flag);
            Err(OptionError::invalid_value(flag, "always fails"))
        })
    }

    #[test]
    fn test_input_flags_end_with_dash_i_path() {
        let file = File::input("in.mkv", [pair("-f", "matroska")]);
        assert_eq!(file.flags(), ["-f", "matroska", "-i", "in.mkv"]);
        assert!(file.is_valid());
    }

    #[test]
    fn test_output_flags_end_with_path() {
        let file = File::output("out.mp4", [pair("-f", "mp4")]);
        assert_eq!(file.flags(), ["-f", "mp4", "out.mp4"]);
    }

    #[test]
    fn test_options_keep_application_order_and_duplicates() {
        let file = File::output(
            "out.mp4",
            [pair("-b", "1"), pair("-a", "2"), pair("-b", "1")],
        );
        assert_eq!(file.options(), ["-b", "1", "-a", "2", "-b", "1"]);
    }

    #[test]
    fn test_failed_option_leaves_no_tokens_and_later_options_still_run() {
        let file = File::output(
            "out.mp4",
            [pair("-a", "1"), failing("-x"), pair("-b", "2"), failing("-y")],
        );
        assert_eq!(file.options(), ["-a", "1", "-b", "2"]);

        let err = file.error().unwrap();
        assert_eq!(err.path, "out.mp4");
        assert_eq!(err.role, Role::Output);
        let flags: Vec<_> = err.errors.iter().map(|e| e.flag()).collect();
        assert_eq!(flags, ["-x", "-y"]);
    }

    #[test]
    fn test_require_role() {
        let pending = PendingFile::new("a".to_string(), Role::Output);
        assert!(pending.require_role("-fs", Role::Output).is_ok());
        assert_eq!(
            pending.require_role("-stream_loop", Role::Input),
            Err(OptionError::role_mismatch("-stream_loop", Role::Input))
        );
    }

    #[test]
    fn test_no_options() {
        let file = File::input("pipe:0", []);
        assert_eq!(file.flags(), ["-i", "pipe:0"]);
    }
}
