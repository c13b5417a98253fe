//! Per-file option factories.
//!
//! Every factory returns a [`FileOption`] that appends a `flag value` pair
//! (or a lone flag) when applied. Role-restricted factories refuse files of
//! the wrong role; value-checked factories refuse values the binary would
//! reject. A refused option appends nothing.

mod audio;
mod general;
mod video;

pub use audio::*;
pub use general::*;
pub use video::*;

use crate::error::OptionError;
use crate::file::{FileOption, PendingFile, Role};

/// `flag value` on any file.
fn pair(flag: impl Into<String>, value: impl Into<String>) -> FileOption {
    let flag = flag.into();
    let value = value.into();
    FileOption::new(flag.clone(), move |f: &mut PendingFile| {
        f.push_pair(flag, value);
        Ok(())
    })
}

/// `flag value` on files of `role` only.
fn restricted_pair(flag: impl Into<String>, role: Role, value: impl Into<String>) -> FileOption {
    let flag = flag.into();
    let value = value.into();
    FileOption::new(flag.clone(), move |f: &mut PendingFile| {
        f.require_role(&flag, role)?;
        f.push_pair(flag, value);
        Ok(())
    })
}

/// Lone `flag` on files of `role` only.
fn restricted_flag(flag: &'static str, role: Role) -> FileOption {
    FileOption::new(flag, move |f: &mut PendingFile| {
        f.require_role(flag, role)?;
        f.push_flag(flag);
        Ok(())
    })
}

/// An option that fails on every file it is applied to.
fn rejected(flag: impl Into<String>, message: impl Into<String>) -> FileOption {
    let flag = flag.into();
    let message = message.into();
    FileOption::new(flag.clone(), move |_: &mut PendingFile| {
        Err(OptionError::invalid_value(flag, message))
    })
}
