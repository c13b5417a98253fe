//! Video options.

use super::{pair, rejected, restricted_flag};
use crate::error::OptionError;
use crate::file::{FileOption, PendingFile, Role};
use crate::stream::StreamSpecifier;
use crate::values::PixelFormat;

/// Frame size `WxH` for the given streams (`-s`).
pub fn with_size(stream: StreamSpecifier, width: u32, height: u32) -> FileOption {
    let flag = stream.flag("-s");
    if width == 0 || height == 0 {
        return rejected(flag, format!("frame size {width}x{height} has a zero dimension"));
    }
    pair(flag, format!("{width}x{height}"))
}

/// Capture frame rate of an input device or raw stream (`-framerate`).
/// Inputs only.
pub fn with_framerate(rate: u32) -> FileOption {
    const FLAG: &str = "-framerate";
    FileOption::new(FLAG, move |f: &mut PendingFile| {
        f.require_role(FLAG, Role::Input)?;
        if rate == 0 {
            return Err(OptionError::invalid_value(FLAG, "frame rate must be positive"));
        }
        f.push_pair(FLAG, rate.to_string());
        Ok(())
    })
}

/// Frame rate for the given streams (`-r`).
pub fn with_frame_rate(stream: StreamSpecifier, rate: u32) -> FileOption {
    let flag = stream.flag("-r");
    if rate == 0 {
        return rejected(flag, "frame rate must be positive");
    }
    pair(flag, rate.to_string())
}

/// Pixel format for the given streams (`-pix_fmt`).
pub fn with_pixel_format(stream: StreamSpecifier, format: PixelFormat) -> FileOption {
    pair(stream.flag("-pix_fmt"), format.as_str())
}

/// Number of video frames to write (`-frames:v`). Outputs only.
pub fn with_video_frames(count: u64) -> FileOption {
    const FLAG: &str = "-frames:v";
    FileOption::new(FLAG, move |f: &mut PendingFile| {
        f.require_role(FLAG, Role::Output)?;
        f.push_pair(FLAG, count.to_string());
        Ok(())
    })
}

/// Drop video streams. Outputs only.
pub fn with_no_video() -> FileOption {
    restricted_flag("-vn", Role::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::File;

    #[test]
    fn test_size_and_pixel_format_use_stream_suffix() {
        let file = File::output(
            "out.mp4",
            [
                with_size(StreamSpecifier::video(None), 1280, 720),
                with_pixel_format(StreamSpecifier::video(0), PixelFormat::Yuv420p),
            ],
        );
        assert_eq!(
            file.options(),
            ["-s:v", "1280x720", "-pix_fmt:v:0", "yuv420p"]
        );
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let file = File::output("out.mp4", [with_size(StreamSpecifier::all(), 0, 720)]);
        assert!(file.options().is_empty());
        assert_eq!(file.error().unwrap().errors.errors()[0].flag(), "-s:");
    }

    #[test]
    fn test_framerate_is_input_only() {
        let file = File::input("/dev/video0", [with_framerate(30)]);
        assert_eq!(file.options(), ["-framerate", "30"]);

        let file = File::output("out.mp4", [with_framerate(30)]);
        assert!(matches!(
            file.error().unwrap().errors.errors()[0],
            OptionError::RoleMismatch { required: Role::Input, .. }
        ));
        assert!(!File::input("in", [with_framerate(0)]).is_valid());
    }

    #[test]
    fn test_frame_rate_and_frames() {
        let file = File::output(
            "out.mp4",
            [with_frame_rate(StreamSpecifier::video(None), 24), with_video_frames(100)],
        );
        assert_eq!(file.options(), ["-r:v", "24", "-frames:v", "100"]);
        assert!(!File::output("out.mp4", [with_frame_rate(StreamSpecifier::all(), 0)]).is_valid());
    }

    #[test]
    fn test_no_video_is_output_only() {
        assert_eq!(File::output("out.m4a", [with_no_video()]).options(), ["-vn"]);
        assert!(!File::input("in.mp4", [with_no_video()]).is_valid());
        assert!(!File::input("in.mp4", [with_video_frames(1)]).is_valid());
    }
}
