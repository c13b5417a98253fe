//! ffwrap Command
//!
//! Typed option model for the ffmpeg command line:
//! - **Files:** inputs and outputs, each configured by a list of [`FileOption`]s
//! - **Global options:** process-wide flags collected in [`GlobalOptions`]
//! - **Assembly:** [`Command::build`] validates everything and produces one
//!   argument vector in a fixed order
//! - **Execution:** a [`Runner`] launches the binary and captures diagnostics
//!
//! ```no_run
//! use std::time::Duration;
//! use ffwrap_command::{options::*, global::*, Codec, Command, File, GlobalOptions, StreamSpecifier};
//!
//! let input = File::input("in.mkv", [with_duration(Duration::from_secs(10))]);
//! let output = File::output("out.mp4", [with_codec(StreamSpecifier::audio(None), Codec::Aac)]);
//! let global = GlobalOptions::from([with_overwrite(true)]);
//!
//! let cmd = Command::build(&global, [input, output])?;
//! cmd.run()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod command;
pub mod duration;
pub mod error;
pub mod file;
pub mod global;
pub mod options;
pub mod runner;
pub mod stream;
pub mod values;

pub use command::*;
pub use duration::format_duration;
pub use error::*;
pub use file::{File, FileOption, PendingFile, Role};
pub use global::{GlobalOption, GlobalOptions};
pub use runner::*;
pub use stream::*;
pub use values::*;
