//! I/O log session paths.
//!
//! [`PathExpander`] turns a pattern such as `%{seq}` or
//! `%{user}/%{command}-%Y%m%d` into a concrete storage path. Escapes are
//! looked up in a fixed [`PathEscape`] table; `%{seq}` draws a session id
//! from the [`SequenceAllocator`], which is allocated once per process and
//! shared safely between processes through the log root's `seq` file.

/// Escape generators for sudoers I/O log paths.
pub mod escapes;
/// The template engine.
pub mod path;
/// Session id allocation.
pub mod seq;
/// I/O log storage settings.
pub mod settings;

pub use escapes::{EscapeContext, OFFLINE_ESCAPES, SUDOERS_ESCAPES};
pub use path::{PATH_MAX, PathEscape, PathExpander, TemplateError};
pub use seq::{SequenceAllocator, SequenceError, SessionId};
pub use settings::{IologSettings, SESSID_MAX};
