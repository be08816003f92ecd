use std::cell::RefCell;
use std::rc::Rc;

use sudoers_primitives::SourceLocation;

bitflags::bitflags! {
	/// Severity and routing of a diagnostic.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct DiagnosticFlags: u32 {
		/// Relevant to the security audit trail.
		const AUDIT = 1 << 0;
		/// Caused by the policy text.
		const PARSE_ERROR = 1 << 1;
		/// Message is complete; do not prefix it.
		const RAW_MSG = 1 << 2;
		/// Show to the user but keep out of the event log.
		const NO_LOG = 1 << 3;
	}
}

/// A reported problem, tied to the policy source when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub location: Option<SourceLocation>,
	pub flags: DiagnosticFlags,
	pub message: String,
}

/// Receives warnings raised while directives are applied.
pub trait DiagnosticSink {
	fn warn(&self, location: Option<&SourceLocation>, flags: DiagnosticFlags, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Rc<T> {
	fn warn(&self, location: Option<&SourceLocation>, flags: DiagnosticFlags, message: &str) {
		(**self).warn(location, flags, message);
	}
}

/// Emits each diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
	fn warn(&self, location: Option<&SourceLocation>, flags: DiagnosticFlags, message: &str) {
		match location {
			Some(loc) => tracing::warn!(
				file = %loc.file,
				line = loc.line,
				column = loc.column,
				?flags,
				"{message}"
			),
			None => tracing::warn!(?flags, "{message}"),
		}
	}
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
	entries: RefCell<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn entries(&self) -> Vec<Diagnostic> {
		self.entries.borrow().clone()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl DiagnosticSink for MemoryDiagnostics {
	fn warn(&self, location: Option<&SourceLocation>, flags: DiagnosticFlags, message: &str) {
		self.entries.borrow_mut().push(Diagnostic {
			location: location.cloned(),
			flags,
			message: message.to_string(),
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_sink_keeps_order() {
		let sink = Rc::new(MemoryDiagnostics::new());
		let shared: Box<dyn DiagnosticSink> = Box::new(Rc::clone(&sink));
		let loc = SourceLocation::new("/etc/sudoers", 3, 9);

		shared.warn(Some(&loc), DiagnosticFlags::PARSE_ERROR, "first");
		shared.warn(None, DiagnosticFlags::RAW_MSG, "second");

		let entries = sink.entries();
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].location.as_ref(), Some(&loc));
		assert_eq!(entries[0].message, "first");
		assert_eq!(entries[1].flags, DiagnosticFlags::RAW_MSG);
	}

	#[test]
	fn tracing_sink_does_not_panic() {
		let _ = tracing_subscriber::fmt::try_init();
		let loc = SourceLocation::new("/etc/sudoers", 1, 1);
		TracingDiagnostics.warn(Some(&loc), DiagnosticFlags::AUDIT, "audited");
		TracingDiagnostics.warn(None, DiagnosticFlags::empty(), "plain");
	}
}
