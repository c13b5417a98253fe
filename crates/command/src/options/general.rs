//! Main options: format, codec, timing, size limits, metadata, mapping.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{pair, rejected, restricted_flag, restricted_pair};
use crate::duration::format_duration;
use crate::error::OptionError;
use crate::file::{FileOption, PendingFile, Role};
use crate::stream::StreamSpecifier;
use crate::values::{Codec, FileFormat};

/// Number of times an input is looped (`-stream_loop`).
///
/// `0` means no loop and `-1` loops forever. Inputs only.
pub fn with_stream_loop(count: i32) -> FileOption {
    const FLAG: &str = "-stream_loop";
    FileOption::new(FLAG, move |f: &mut PendingFile| {
        f.require_role(FLAG, Role::Input)?;
        if count < -1 {
            return Err(OptionError::invalid_value(
                FLAG,
                format!("loop count {count} is below -1"),
            ));
        }
        f.push_pair(FLAG, count.to_string());
        Ok(())
    })
}

/// Force the container format (`-f`).
///
/// Normally auto-detected for inputs and guessed from the extension for
/// outputs.
pub fn with_format(format: FileFormat) -> FileOption {
    pair("-f", format.as_str())
}

/// Select a decoder (inputs) or encoder (outputs) for the given streams.
pub fn with_codec(stream: StreamSpecifier, codec: Codec) -> FileOption {
    pair(stream.flag("-c"), codec.as_str())
}

/// Limit the duration read from an input or written to an output (`-t`).
pub fn with_duration(duration: Duration) -> FileOption {
    pair("-t", format_duration(duration))
}

/// Seek to a position (`-ss`). On inputs this seeks before decoding; on
/// outputs frames are decoded and discarded until the position.
pub fn with_seek(position: Duration) -> FileOption {
    pair("-ss", format_duration(position))
}

/// Stop writing at a position (`-to`). Outputs only.
pub fn with_stop_position(position: Duration) -> FileOption {
    restricted_pair("-to", Role::Output, format_duration(position))
}

/// Shift input timestamps by `offset` (`-itsoffset`). Inputs only.
pub fn with_input_offset(offset: Duration) -> FileOption {
    restricted_pair("-itsoffset", Role::Input, format_duration(offset))
}

/// Stop writing once the output reaches `bytes` (`-fs`). Outputs only.
pub fn with_file_size_limit(bytes: u64) -> FileOption {
    restricted_pair("-fs", Role::Output, bytes.to_string())
}

/// Recording timestamp stored in the container (`-timestamp`). Outputs only.
pub fn with_timestamp(date: DateTime<Utc>) -> FileOption {
    restricted_pair(
        "-timestamp",
        Role::Output,
        date.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
    )
}

/// Global metadata entry (`-metadata key=value`). Outputs only.
pub fn with_metadata(key: impl Into<String>, value: impl Into<String>) -> FileOption {
    const FLAG: &str = "-metadata";
    let key = key.into();
    let value = value.into();
    FileOption::new(FLAG, move |f: &mut PendingFile| {
        f.require_role(FLAG, Role::Output)?;
        if key.is_empty() {
            return Err(OptionError::invalid_value(FLAG, "metadata key is empty"));
        }
        f.push_pair(FLAG, format!("{key}={value}"));
        Ok(())
    })
}

/// Finish encoding when the shortest input stream ends. Outputs only.
pub fn with_shortest() -> FileOption {
    restricted_flag("-shortest", Role::Output)
}

/// Drop subtitle streams. Outputs only.
pub fn with_no_subtitles() -> FileOption {
    restricted_flag("-sn", Role::Output)
}

/// Target bitrate in bits per second for the given streams. Outputs only.
pub fn with_bitrate(stream: StreamSpecifier, bits_per_second: u64) -> FileOption {
    let flag = stream.flag("-b");
    if bits_per_second == 0 {
        return rejected(flag, "bitrate must be positive");
    }
    restricted_pair(flag, Role::Output, bits_per_second.to_string())
}

/// Route input streams into this output (`-map`). Outputs only.
///
/// The argument is passed through verbatim, e.g. `0:v:0` or `[vout]`.
pub fn with_map(spec: impl Into<String>) -> FileOption {
    let spec = spec.into();
    if spec.is_empty() {
        return rejected("-map", "map specifier is empty");
    }
    restricted_pair("-map", Role::Output, spec)
}
