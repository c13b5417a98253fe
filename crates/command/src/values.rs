//! Closed value tables used as option arguments.
//!
//! Each table maps a variant to the canonical string ffmpeg expects. The
//! tables are declared through [`value_table!`] so adding a codec, format, or
//! pixel format is a one-line change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;

macro_rules! value_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Canonical string passed on the command line.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(ParseValueError::new($kind, other)),
                }
            }
        }
    };
}

value_table! {
    /// Verbosity of the binary's own diagnostics (`-loglevel`).
    ///
    /// Ordered from silent to most verbose.
    #[derive(PartialOrd, Ord)]
    pub enum LogLevel ("log level") {
        /// Show nothing at all.
        Quiet => "quiet",
        /// Only errors that could lead the process to crash.
        Panic => "panic",
        /// Only errors after which the process cannot continue.
        Fatal => "fatal",
        /// All errors, including recoverable ones.
        Error => "error",
        Warning => "warning",
        /// The binary's default.
        Info => "info",
        Verbose => "verbose",
        Debug => "debug",
        Trace => "trace",
    }
}

value_table! {
    /// Encoder or decoder selected with `-c`.
    pub enum Codec ("codec") {
        /// Stream copy, no re-encoding.
        Copy => "copy",
        H264 => "h264",
        Hevc => "hevc",
        Mpeg2Video => "mpeg2video",
        Mpeg4 => "mpeg4",
        Vp8 => "vp8",
        Vp9 => "vp9",
        Av1 => "av1",
        Prores => "prores",
        Ffv1 => "ffv1",
        Mjpeg => "mjpeg",
        Png => "png",
        Gif => "gif",
        RawVideo => "rawvideo",
        LibX264 => "libx264",
        LibX265 => "libx265",
        LibVpxVp9 => "libvpx-vp9",
        LibAomAv1 => "libaom-av1",
        LibSvtAv1 => "libsvtav1",
        H264Nvenc => "h264_nvenc",
        HevcNvenc => "hevc_nvenc",
        Av1Nvenc => "av1_nvenc",
        H264Vaapi => "h264_vaapi",
        Aac => "aac",
        Mp3 => "mp3",
        LibMp3Lame => "libmp3lame",
        Opus => "opus",
        LibOpus => "libopus",
        Vorbis => "vorbis",
        LibVorbis => "libvorbis",
        Flac => "flac",
        Alac => "alac",
        Ac3 => "ac3",
        Eac3 => "eac3",
        PcmS16le => "pcm_s16le",
        PcmS24le => "pcm_s24le",
        PcmF32le => "pcm_f32le",
        Subrip => "subrip",
        Ass => "ass",
        Webvtt => "webvtt",
        MovText => "mov_text",
        DvdSub => "dvdsub",
    }
}

value_table! {
    /// Pixel layout selected with `-pix_fmt`.
    pub enum PixelFormat ("pixel format") {
        Yuv420p => "yuv420p",
        Yuv422p => "yuv422p",
        Yuv444p => "yuv444p",
        Yuv420p10le => "yuv420p10le",
        Yuv422p10le => "yuv422p10le",
        Yuv444p10le => "yuv444p10le",
        Yuvj420p => "yuvj420p",
        Nv12 => "nv12",
        P010le => "p010le",
        Rgb24 => "rgb24",
        Bgr24 => "bgr24",
        Rgba => "rgba",
        Bgra => "bgra",
        Argb => "argb",
        Gray => "gray",
        Gray16le => "gray16le",
        Pal8 => "pal8",
    }
}

value_table! {
    /// Container or device format forced with `-f`.
    pub enum FileFormat ("file format") {
        Mp4 => "mp4",
        Mov => "mov",
        Matroska => "matroska",
        Webm => "webm",
        Avi => "avi",
        Flv => "flv",
        MpegTs => "mpegts",
        Hls => "hls",
        Dash => "dash",
        Segment => "segment",
        Ogg => "ogg",
        Wav => "wav",
        Mp3 => "mp3",
        Flac => "flac",
        Adts => "adts",
        Gif => "gif",
        Image2 => "image2",
        Image2Pipe => "image2pipe",
        RawVideo => "rawvideo",
        S16le => "s16le",
        F32le => "f32le",
        Concat => "concat",
        Lavfi => "lavfi",
        Null => "null",
    }
}
