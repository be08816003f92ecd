//! Defaults directives and the side effects they trigger.
//!
//! The policy parser stores each `Defaults` setting in [`Defaults`] and then
//! calls [`Registry::invoke`]. Handlers registered for a directive update the
//! identity contexts, push values into the event log configuration, change
//! timestamp ownership or I/O log settings. A handler returning `false` only
//! reports failure; whether that aborts policy evaluation is up to the caller.
//!
//! [`Policy`] bundles a registry with the [`PolicyState`] its handlers act on.

mod callbacks;
/// External services handlers call into.
pub mod collaborators;
/// Diagnostic reporting.
pub mod diagnostics;
/// Directive id to handler table.
pub mod registry;
/// Directive ids, types and built-in defaults.
pub mod schema;
/// Mutable state handlers operate on.
pub mod state;
/// Current directive values.
pub mod store;
/// Directive values and operators.
pub mod value;

pub use collaborators::{
	Collaborators, CommandResolver, NotFoundCommandResolver, PathCommandResolver,
};
pub use diagnostics::{
	Diagnostic, DiagnosticFlags, DiagnosticSink, MemoryDiagnostics, TracingDiagnostics,
};
pub use registry::{DirectiveCall, DirectiveHandler, Registry};
pub use schema::{DIRECTIVES, DefaultValue, DirectiveId, DirectiveSpec, DirectiveType, Tuple};
pub use state::{Policy, PolicyState, TimestampSettings};
pub use store::Defaults;
pub use value::{DirectiveValue, Operator};
