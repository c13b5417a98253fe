//! Global options: flags that configure the process as a whole.
//!
//! A [`GlobalOption`] produces its tokens on demand. [`GlobalOptions::flags`]
//! runs every member, keeps their tokens in order, and returns every failure
//! together instead of dropping any of them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::duration::format_duration;
use crate::error::{OptionError, OptionErrors};
use crate::values::LogLevel;

type ProduceFn = Box<dyn Fn() -> Result<Vec<String>, OptionError> + Send + Sync>;

/// One unit of global configuration.
pub struct GlobalOption {
    flag: String,
    produce: ProduceFn,
}

impl GlobalOption {
    pub fn new<F>(flag: impl Into<String>, produce: F) -> Self
    where
        F: Fn() -> Result<Vec<String>, OptionError> + Send + Sync + 'static,
    {
        Self {
            flag: flag.into(),
            produce: Box::new(produce),
        }
    }

    /// A fixed list of tokens.
    fn tokens<I, S>(flag: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        Self::new(flag, move || Ok(tokens.clone()))
    }

    /// Always fails with an invalid-value error.
    fn rejected(flag: &str, message: impl Into<String>) -> Self {
        let err = OptionError::invalid_value(flag, message);
        Self::new(flag, move || Err(err.clone()))
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Tokens this option contributes.
    pub fn produce(&self) -> Result<Vec<String>, OptionError> {
        (self.produce)()
    }
}

impl fmt::Debug for GlobalOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalOption")
            .field("flag", &self.flag)
            .finish_non_exhaustive()
    }
}

/// Ordered list of global options.
#[derive(Debug, Default)]
pub struct GlobalOptions {
    options: Vec<GlobalOption>,
}

impl GlobalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`GlobalOptions::push`].
    pub fn with(mut self, option: GlobalOption) -> Self {
        self.push(option);
        self
    }

    pub fn push(&mut self, option: GlobalOption) {
        self.options.push(option);
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlobalOption> {
        self.options.iter()
    }

    /// Tokens of every member in order, or every member's failure.
    pub fn flags(&self) -> Result<Vec<String>, OptionErrors> {
        let mut flags = Vec::new();
        let mut errors = OptionErrors::new();
        for option in &self.options {
            match option.produce() {
                Ok(tokens) => flags.extend(tokens),
                Err(err) => errors.push(err),
            }
        }
        errors.into_result().map(|()| flags)
    }
}

impl FromIterator<GlobalOption> for GlobalOptions {
    fn from_iter<I: IntoIterator<Item = GlobalOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl Extend<GlobalOption> for GlobalOptions {
    fn extend<I: IntoIterator<Item = GlobalOption>>(&mut self, iter: I) {
        self.options.extend(iter);
    }
}

impl<const N: usize> From<[GlobalOption; N]> for GlobalOptions {
    fn from(options: [GlobalOption; N]) -> Self {
        options.into_iter().collect()
    }
}

/// Logging level of the binary (`-loglevel`).
pub fn with_log_level(level: LogLevel) -> GlobalOption {
    GlobalOption::tokens("-loglevel", ["-loglevel", level.as_str()])
}

/// Overwrite outputs without asking (`-y`), or exit immediately if an output
/// already exists (`-n`).
pub fn with_overwrite(overwrite: bool) -> GlobalOption {
    let flag = if overwrite { "-y" } else { "-n" };
    GlobalOption::tokens(flag, [flag])
}

/// Threads used by each simple filter pipeline (`-filter_threads`).
pub fn with_num_filter_threads(threads: u32) -> GlobalOption {
    GlobalOption::tokens("-filter_threads", ["-filter_threads".to_string(), threads.to_string()])
}

/// Threads used by `-filter_complex` graphs (`-filter_complex_threads`).
pub fn with_num_filter_complex_threads(threads: u32) -> GlobalOption {
    GlobalOption::tokens(
        "-filter_complex_threads",
        ["-filter_complex_threads".to_string(), threads.to_string()],
    )
}

/// Exit after the binary has run for `limit` (`-timelimit`).
pub fn with_timelimit(limit: Duration) -> GlobalOption {
    GlobalOption::tokens("-timelimit", ["-timelimit".to_string(), format_duration(limit)])
}

/// Read a complex filtergraph from a file (`-filter_complex_script`).
pub fn with_filter_complex_script(path: impl Into<PathBuf>) -> GlobalOption {
    const FLAG: &str = "-filter_complex_script";
    let path = path.into();
    if path.as_os_str().is_empty() {
        return GlobalOption::rejected(FLAG, "script path is empty");
    }
    GlobalOption::tokens(FLAG, [FLAG.to_string(), path.display().to_string()])
}

/// OpenCL device options (`-opencl_options k=v:k=v`), in key order.
///
/// Only meaningful when the binary was built with OpenCL support.
pub fn with_opencl_options(options: BTreeMap<String, String>) -> GlobalOption {
    const FLAG: &str = "-opencl_options";
    for (key, value) in &options {
        if key.is_empty() {
            return GlobalOption::rejected(FLAG, "option key is empty");
        }
        if key.contains([':', '=']) || value.contains([':', '=']) {
            return GlobalOption::rejected(
                FLAG,
                format!("`{key}={value}` contains a reserved separator"),
            );
        }
    }
    let joined = options
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(":");
    GlobalOption::tokens(FLAG, [FLAG.to_string(), joined])
}

/// Print encoding statistics (`-stats`) or suppress them (`-nostats`).
pub fn with_stats(enabled: bool) -> GlobalOption {
    let flag = if enabled { "-stats" } else { "-nostats" };
    GlobalOption::tokens(flag, [flag])
}

/// Send machine-readable progress to `url` (`-progress`), e.g. `pipe:1`.
pub fn with_progress(url: impl Into<String>) -> GlobalOption {
    const FLAG: &str = "-progress";
    let url = url.into();
    if url.is_empty() {
        return GlobalOption::rejected(FLAG, "progress url is empty");
    }
    GlobalOption::tokens(FLAG, [FLAG.to_string(), url])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_concatenate_in_order() {
        let global = GlobalOptions::from([
            with_overwrite(true),
            with_log_level(LogLevel::Error),
            with_num_filter_threads(4),
        ]);
        assert_eq!(
            global.flags().unwrap(),
            ["-y", "-loglevel", "error", "-filter_threads", "4"]
        );
    }

    #[test]
    fn test_empty_global_options_produce_nothing() {
        assert!(GlobalOptions::new().flags().unwrap().is_empty());
    }

    #[test]
    fn test_failures_are_aggregated_not_dropped() {
        let global = GlobalOptions::new()
            .with(with_filter_complex_script(""))
            .with(with_stats(false))
            .with(with_progress(""));
        let errors = global.flags().unwrap_err();
        let flags: Vec<_> = errors.iter().map(|e| e.flag()).collect();
        assert_eq!(flags, ["-filter_complex_script", "-progress"]);
    }

    #[test]
    fn test_flags_can_be_produced_repeatedly() {
        let global = GlobalOptions::from([with_overwrite(false)]);
        assert_eq!(global.flags().unwrap(), global.flags().unwrap());
    }

    #[test]
    fn test_timelimit_uses_duration_format() {
        let global = GlobalOptions::from([with_timelimit(Duration::from_secs(90))]);
        assert_eq!(global.flags().unwrap(), ["-timelimit", "00:01:30.000000"]);
    }

    #[test]
    fn test_opencl_options_are_key_ordered() {
        let mut options = BTreeMap::new();
        options.insert("platform_idx".to_string(), "0".to_string());
        options.insert("device_idx".to_string(), "1".to_string());
        let global = GlobalOptions::from([with_opencl_options(options)]);
        assert_eq!(
            global.flags().unwrap(),
            ["-opencl_options", "device_idx=1:platform_idx=0"]
        );
    }

    #[test]
    fn test_opencl_options_reject_separators() {
        let mut options = BTreeMap::new();
        options.insert("device".to_string(), "a:b".to_string());
        let global = GlobalOptions::from([with_opencl_options(options)]);
        assert!(global.flags().is_err());
    }

    #[test]
    fn test_custom_global_option() {
        let global = GlobalOptions::from([GlobalOption::new("-benchmark", || {
            Ok(vec!["-benchmark".to_string()])
        })]);
        assert_eq!(global.flags().unwrap(), ["-benchmark"]);
        assert_eq!(global.iter().next().unwrap().flag(), "-benchmark");
    }
}
