//! Small types shared by every sudoers runtime crate.

/// Fallible string duplication.
pub mod alloc;
/// Policy source positions used for diagnostics.
pub mod location;

pub use alloc::{AllocationError, try_dup};
pub use location::SourceLocation;
