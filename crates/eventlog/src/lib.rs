//! Event log configuration.
//!
//! The policy runtime does not write event logs itself; it only pushes
//! directive values into an [`EventLogConfig`]. [`EventLogSettings`] records
//! them for the logger, [`NullEventLog`] discards them for tools that parse
//! policy without logging.

mod config;
mod types;

pub use config::{EventLogConfig, EventLogSettings, NullEventLog};
pub use types::{LogDestination, LogFormat, TimeFormat};
