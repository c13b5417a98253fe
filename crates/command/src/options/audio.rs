//! Audio options.

use super::{pair, rejected, restricted_flag};
use crate::file::{FileOption, Role};
use crate::stream::StreamSpecifier;

/// Sample rate in Hz for the given streams (`-ar`).
pub fn with_audio_sample_rate(stream: StreamSpecifier, hz: u32) -> FileOption {
    let flag = stream.flag("-ar");
    if hz == 0 {
        return rejected(flag, "sample rate must be positive");
    }
    pair(flag, hz.to_string())
}

/// Channel count for the given streams (`-ac`).
pub fn with_audio_channels(stream: StreamSpecifier, channels: u32) -> FileOption {
    let flag = stream.flag("-ac");
    if channels == 0 {
        return rejected(flag, "channel count must be positive");
    }
    pair(flag, channels.to_string())
}

/// Drop audio streams. Outputs only.
pub fn with_no_audio() -> FileOption {
    restricted_flag("-an", Role::Output)
}
