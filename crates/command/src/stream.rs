//! Stream specifiers.
//!
//! A specifier selects a stream, or a class of streams, inside a file. It is
//! appended directly to per-stream flags: `-c` + `:a:0` gives `-c:a:0`.
//!
//! | type  | index | rendered |
//! |-------|-------|----------|
//! | all   | none  | `:`      |
//! | all   | `N`   | `:N`     |
//! | typed | none  | `:t`     |
//! | typed | `N`   | `:t:N`   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;

/// Class of stream a specifier selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    #[default]
    All,
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
}

impl StreamType {
    /// Letter used inside a specifier; empty for [`StreamType::All`].
    pub fn as_str(self) -> &'static str {
        match self {
            StreamType::All => "",
            StreamType::Video => "v",
            StreamType::Audio => "a",
            StreamType::Subtitle => "s",
            StreamType::Data => "d",
            StreamType::Attachment => "t",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(StreamType::All),
            "v" => Ok(StreamType::Video),
            "a" => Ok(StreamType::Audio),
            "s" => Ok(StreamType::Subtitle),
            "d" => Ok(StreamType::Data),
            "t" => Ok(StreamType::Attachment),
            other => Err(ParseValueError::new("stream type", other)),
        }
    }
}

/// Reference to a stream or stream subset within a file.
///
/// `index: None` selects every stream of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamSpecifier {
    pub stream_type: StreamType,
    pub index: Option<u32>,
}

impl StreamSpecifier {
    pub fn new(stream_type: StreamType, index: impl Into<Option<u32>>) -> Self {
        Self {
            stream_type,
            index: index.into(),
        }
    }

    /// Every stream in the file.
    pub fn all() -> Self {
        Self::new(StreamType::All, None)
    }

    /// The `idx`-th stream regardless of type.
    pub fn nth(idx: u32) -> Self {
        Self::new(StreamType::All, idx)
    }

    pub fn video(index: impl Into<Option<u32>>) -> Self {
        Self::new(StreamType::Video, index)
    }

    pub fn audio(index: impl Into<Option<u32>>) -> Self {
        Self::new(StreamType::Audio, index)
    }

    pub fn subtitle(index: impl Into<Option<u32>>) -> Self {
        Self::new(StreamType::Subtitle, index)
    }

    pub fn data(index: impl Into<Option<u32>>) -> Self {
        Self::new(StreamType::Data, index)
    }

    pub fn attachment(index: impl Into<Option<u32>>) -> Self {
        Self::new(StreamType::Attachment, index)
    }

    /// `base` with this specifier appended, e.g. `-c` -> `-c:v:0`.
    pub fn flag(&self, base: &str) -> String {
        format!("{base}{self}")
    }
}

impl fmt::Display for StreamSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.stream_type, self.index) {
            (stream_type, None) => write!(f, ":{stream_type}"),
            (StreamType::All, Some(idx)) => write!(f, ":{idx}"),
            (stream_type, Some(idx)) => write!(f, ":{stream_type}:{idx}"),
        }
    }
}

impl FromStr for StreamSpecifier {
    type Err = ParseValueError;

    /// Accepts the rendered form with or without the leading `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseValueError::new("stream specifier", s);
        let body = s.strip_prefix(':').unwrap_or(s);
        if body.is_empty() {
            return Ok(Self::all());
        }

        let mut parts = body.split(':');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        match (first.parse::<u32>(), second) {
            (Ok(idx), None) => Ok(Self::nth(idx)),
            (Ok(_), Some(_)) => Err(invalid()),
            (Err(_), rest) => {
                let stream_type = first.parse::<StreamType>().map_err(|_| invalid())?;
                let index = rest
                    .map(|idx| idx.parse::<u32>().map_err(|_| invalid()))
                    .transpose()?;
                Ok(Self::new(stream_type, index))
            }
        }
    }
}

impl TryFrom<String> for StreamSpecifier {
    type Error = ParseValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StreamSpecifier> for String {
    fn from(spec: StreamSpecifier) -> Self {
        spec.to_string()
    }
}
