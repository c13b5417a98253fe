//! JSON request files.
//!
//! A request describes global options and files the same way the library
//! does, one tagged object per option:
//!
//! ```json
//! {
//!   "global": [{ "option": "overwrite", "enabled": true }],
//!   "files": [
//!     { "role": "input", "path": "in.mkv", "options": [{ "option": "duration", "secs": 10 }] },
//!     { "role": "output", "path": "out.mp4",
//!       "options": [{ "option": "codec", "stream": "a", "codec": "aac" }] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ffwrap_common::error::{FfwrapError, FfwrapResult};
use ffwrap_command::global::{self, GlobalOption};
use ffwrap_command::options;
use ffwrap_command::{
    BuildError, Codec, Command, File, FileFormat, FileOption, GlobalOptions, LogLevel,
    OptionError, PendingFile, PixelFormat, Role, StreamSpecifier,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub global: Vec<GlobalOptionSpec>,
    pub files: Vec<FileSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSpec {
    pub role: Role,
    pub path: String,
    #[serde(default)]
    pub options: Vec<FileOptionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "option", rename_all = "snake_case")]
pub enum GlobalOptionSpec {
    LogLevel { level: LogLevel },
    Overwrite { enabled: bool },
    FilterThreads { threads: u32 },
    FilterComplexThreads { threads: u32 },
    Timelimit { secs: f64 },
    FilterComplexScript { path: PathBuf },
    OpenclOptions { options: BTreeMap<String, String> },
    Stats { enabled: bool },
    Progress { url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "option", rename_all = "snake_case")]
pub enum FileOptionSpec {
    StreamLoop {
        count: i32,
    },
    Format {
        format: FileFormat,
    },
    Codec {
        #[serde(default)]
        stream: StreamSpecifier,
        codec: Codec,
    },
    Duration {
        secs: f64,
    },
    Seek {
        secs: f64,
    },
    StopPosition {
        secs: f64,
    },
    InputOffset {
        secs: f64,
    },
    FileSizeLimit {
        bytes: u64,
    },
    Timestamp {
        date: DateTime<Utc>,
    },
    Metadata {
        key: String,
        value: String,
    },
    Shortest,
    NoSubtitles,
    NoVideo,
    NoAudio,
    Bitrate {
        #[serde(default)]
        stream: StreamSpecifier,
        bits_per_second: u64,
    },
    Map {
        spec: String,
    },
    Size {
        #[serde(default)]
        stream: StreamSpecifier,
        width: u32,
        height: u32,
    },
    Framerate {
        rate: u32,
    },
    FrameRate {
        #[serde(default)]
        stream: StreamSpecifier,
        rate: u32,
    },
    PixelFormat {
        #[serde(default)]
        stream: StreamSpecifier,
        format: PixelFormat,
    },
    VideoFrames {
        count: u64,
    },
    AudioSampleRate {
        #[serde(default)]
        stream: StreamSpecifier,
        hz: u32,
    },
    AudioChannels {
        #[serde(default)]
        stream: StreamSpecifier,
        channels: u32,
    },
    /// Escape hatch for flags without a typed option.
    Raw {
        flag: String,
        value: Option<String>,
    },
}

impl Request {
    pub fn load(path: &Path) -> FfwrapResult<Self> {
        if !path.exists() {
            return Err(FfwrapError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> FfwrapResult<Self> {
        let request: Self = serde_json::from_str(content)?;
        if request.files.is_empty() {
            return Err(FfwrapError::invalid_argument("request lists no files"));
        }
        Ok(request)
    }

    pub fn build(self) -> Result<Command, BuildError> {
        let global: GlobalOptions = self
            .global
            .into_iter()
            .map(GlobalOptionSpec::into_option)
            .collect();
        let files: Vec<File> = self.files.into_iter().map(FileSpec::into_file).collect();
        Command::build(&global, files)
    }
}

impl FileSpec {
    pub fn into_file(self) -> File {
        let options = self.options.into_iter().map(FileOptionSpec::into_option);
        File::new(self.path, self.role, options)
    }
}

/// Seconds from a request as a [`Duration`], or the message explaining why not.
fn secs(value: f64) -> Result<Duration, String> {
    Duration::try_from_secs_f64(value).map_err(|e| format!("{value} seconds: {e}"))
}

fn timed_file_option(flag: &str, value: f64, make: fn(Duration) -> FileOption) -> FileOption {
    match secs(value) {
        Ok(d) => make(d),
        Err(msg) => {
            let flag = flag.to_string();
            FileOption::new(flag.clone(), move |_: &mut PendingFile| {
                Err(OptionError::invalid_value(flag, msg))
            })
        }
    }
}

impl FileOptionSpec {
    pub fn into_option(self) -> FileOption {
        match self {
            Self::StreamLoop { count } => options::with_stream_loop(count),
            Self::Format { format } => options::with_format(format),
            Self::Codec { stream, codec } => options::with_codec(stream, codec),
            Self::Duration { secs } => timed_file_option("-t", secs, options::with_duration),
            Self::Seek { secs } => timed_file_option("-ss", secs, options::with_seek),
            Self::StopPosition { secs } => {
                timed_file_option("-to", secs, options::with_stop_position)
            }
            Self::InputOffset { secs } => {
                timed_file_option("-itsoffset", secs, options::with_input_offset)
            }
            Self::FileSizeLimit { bytes } => options::with_file_size_limit(bytes),
            Self::Timestamp { date } => options::with_timestamp(date),
            Self::Metadata { key, value } => options::with_metadata(key, value),
            Self::Shortest => options::with_shortest(),
            Self::NoSubtitles => options::with_no_subtitles(),
            Self::NoVideo => options::with_no_video(),
            Self::NoAudio => options::with_no_audio(),
            Self::Bitrate {
                stream,
                bits_per_second,
            } => options::with_bitrate(stream, bits_per_second),
            Self::Map { spec } => options::with_map(spec),
            Self::Size {
                stream,
                width,
                height,
            } => options::with_size(stream, width, height),
            Self::Framerate { rate } => options::with_framerate(rate),
            Self::FrameRate { stream, rate } => options::with_frame_rate(stream, rate),
            Self::PixelFormat { stream, format } => options::with_pixel_format(stream, format),
            Self::VideoFrames { count } => options::with_video_frames(count),
            Self::AudioSampleRate { stream, hz } => options::with_audio_sample_rate(stream, hz),
            Self::AudioChannels { stream, channels } => {
                options::with_audio_channels(stream, channels)
            }
            Self::Raw { flag, value } => FileOption::new(flag.clone(), move |f: &mut PendingFile| {
                if flag.is_empty() {
                    return Err(OptionError::invalid_value(flag, "flag is empty"));
                }
                match value {
                    Some(value) => f.push_pair(flag, value),
                    None => f.push_flag(flag),
                }
                Ok(())
            }),
        }
    }
}

impl GlobalOptionSpec {
    pub fn into_option(self) -> GlobalOption {
        match self {
            Self::LogLevel { level } => global::with_log_level(level),
            Self::Overwrite { enabled } => global::with_overwrite(enabled),
            Self::FilterThreads { threads } => global::with_num_filter_threads(threads),
            Self::FilterComplexThreads { threads } => {
                global::with_num_filter_complex_threads(threads)
            }
            Self::Timelimit { secs: value } => match secs(value) {
                Ok(d) => global::with_timelimit(d),
                Err(msg) => GlobalOption::new("-timelimit", move || {
                    Err(OptionError::invalid_value("-timelimit", msg.clone()))
                }),
            },
            Self::FilterComplexScript { path } => global::with_filter_complex_script(path),
            Self::OpenclOptions { options } => global::with_opencl_options(options),
            Self::Stats { enabled } => global::with_stats(enabled),
            Self::Progress { url } => global::with_progress(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builds_command() {
        let request = Request::parse(
            r#"{
                "global": [{ "option": "overwrite", "enabled": true }],
                "files": [
                    { "role": "output", "path": "out.mp4",
                      "options": [{ "option": "codec", "stream": "a", "codec": "aac" }] },
                    { "role": "input", "path": "in.mkv",
                      "options": [{ "option": "duration", "secs": 4.1 }] }
                ]
            }"#,
        )
        .unwrap();

        let cmd = request.build().unwrap();
        assert_eq!(
            cmd.args(),
            [
                "-hide_banner",
                "-y",
                "-t",
                "00:00:4.100000",
                "-i",
                "in.mkv",
                "-c:a",
                "aac",
                "out.mp4"
            ]
        );
    }

    #[test]
    fn test_stream_defaults_to_all() {
        let spec: FileOptionSpec =
            serde_json::from_str(r#"{ "option": "codec", "codec": "copy" }"#).unwrap();
        let file = File::output("out.mkv", [spec.into_option()]);
        assert_eq!(file.options(), ["-c:", "copy"]);
    }

    #[test]
    fn test_negative_seconds_become_option_errors() {
        let request = Request::parse(
            r#"{
                "global": [{ "option": "timelimit", "secs": -1 }],
                "files": [{ "role": "input", "path": "in.mkv",
                            "options": [{ "option": "seek", "secs": -5 }] }]
            }"#,
        )
        .unwrap();

        let err = request.build().unwrap_err();
        assert!(err.global().is_some());
        assert_eq!(err.files()[0].errors.errors()[0].flag(), "-ss");
    }

    #[test]
    fn test_raw_option() {
        let spec: FileOptionSpec =
            serde_json::from_str(r#"{ "option": "raw", "flag": "-movflags", "value": "+faststart" }"#)
                .unwrap();
        let file = File::output("out.mp4", [spec.into_option()]);
        assert_eq!(file.options(), ["-movflags", "+faststart"]);
    }

    #[test]
    fn test_empty_file_list_is_rejected() {
        assert!(Request::parse(r#"{ "files": [] }"#).is_err());
    }

    #[test]
    fn test_unknown_codec_is_a_parse_error() {
        let result = Request::parse(
            r#"{ "files": [{ "role": "output", "path": "o",
                 "options": [{ "option": "codec", "codec": "h266" }] }] }"#,
        );
        assert!(matches!(result, Err(FfwrapError::Json(_))));
    }
}
