//! Error types for option configuration, command assembly, and execution.
//!
//! Configuration problems are collected rather than returned one at a time:
//! every configurator of a file runs, failures land in [`OptionErrors`], and
//! the assembler reports all of them at once through [`BuildError`].

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use crate::file::Role;

/// A single configurator failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    /// The option cannot be used on a file of this role.
    #[error("unable to apply {flag} flag: not {required} file")]
    RoleMismatch { flag: String, required: Role },

    /// The option was given a value the binary would reject.
    #[error("invalid value for {flag} flag: {message}")]
    InvalidValue { flag: String, message: String },
}

impl OptionError {
    pub fn role_mismatch(flag: impl Into<String>, required: Role) -> Self {
        Self::RoleMismatch {
            flag: flag.into(),
            required,
        }
    }

    pub fn invalid_value(flag: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidValue {
            flag: flag.into(),
            message: msg.into(),
        }
    }

    /// The flag the failing option would have produced.
    pub fn flag(&self) -> &str {
        match self {
            Self::RoleMismatch { flag, .. } | Self::InvalidValue { flag, .. } => flag,
        }
    }
}

/// Every failure collected while applying a set of options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionErrors {
    errors: Vec<OptionError>,
}

impl OptionErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: OptionError) {
        self.errors.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[OptionError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for OptionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no errors"),
            1 => write!(f, "1 error occurred: {}", self.errors[0]),
            n => {
                write!(f, "{n} errors occurred: ")?;
                for (i, err) in self.errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for OptionErrors {}

impl From<OptionError> for OptionErrors {
    fn from(err: OptionError) -> Self {
        Self { errors: vec![err] }
    }
}

impl FromIterator<OptionError> for OptionErrors {
    fn from_iter<I: IntoIterator<Item = OptionError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for OptionErrors {
    type Item = OptionError;
    type IntoIter = std::vec::IntoIter<OptionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a OptionErrors {
    type Item = &'a OptionError;
    type IntoIter = std::slice::Iter<'a, OptionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// The aggregated configuration error attached to one file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{role} file {path}: {errors}")]
pub struct FileError {
    pub path: String,
    pub role: Role,
    pub errors: OptionErrors,
}

/// Assembly refused because the request carries configuration errors.
///
/// Lists the global option failures and every offending file; nothing is
/// dropped after the first problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildError {
    global: Option<OptionErrors>,
    files: Vec<FileError>,
}

impl BuildError {
    pub(crate) fn new(global: Option<OptionErrors>, files: Vec<FileError>) -> Self {
        Self { global, files }
    }

    pub fn global(&self) -> Option<&OptionErrors> {
        self.global.as_ref()
    }

    pub fn files(&self) -> &[FileError] {
        &self.files
    }

    /// Total number of underlying option failures.
    pub fn error_count(&self) -> usize {
        self.global.as_ref().map_or(0, OptionErrors::len)
            + self.files.iter().map(|f| f.errors.len()).sum::<usize>()
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command has {} configuration error(s)",
            self.error_count()
        )?;
        if let Some(global) = &self.global {
            write!(f, "\n  global options: {global}")?;
        }
        for file in &self.files {
            write!(f, "\n  {file}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

/// Failure to run the external binary.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The process could not be started at all (missing binary, permissions).
    #[error("failed to start {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{} exited with {status}: {}", .binary.display(), .stderr.trim())]
    Exit {
        binary: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

impl RunError {
    /// True when the binary itself could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// Diagnostics captured from a process that ran.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Exit { stderr, .. } => Some(stderr),
            Self::Spawn { .. } => None,
        }
    }

    /// Exit code of a process that ran, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { status, .. } => status.code(),
            Self::Spawn { .. } => None,
        }
    }
}

/// A string that does not name a known table value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
