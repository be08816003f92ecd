use sudoers_primitives::SourceLocation;

use crate::callbacks::HANDLERS;
use crate::diagnostics::DiagnosticFlags;
use crate::schema::{DIRECTIVES, DirectiveId};
use crate::state::PolicyState;
use crate::value::{DirectiveValue, Operator};

/// Arguments passed to a directive handler.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveCall<'a> {
	pub id: DirectiveId,
	/// Where the setting appeared, for diagnostics.
	pub location: &'a SourceLocation,
	pub value: &'a DirectiveValue,
	pub op: Operator,
}

/// Side effect run when a directive is set. Returns false on failure.
pub type DirectiveHandler = fn(&mut PolicyState, &DirectiveCall<'_>) -> bool;

/// Directive id to handler table.
#[derive(Clone)]
pub struct Registry {
	handlers: Vec<Option<DirectiveHandler>>,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let registered: Vec<&str> = DIRECTIVES
			.iter()
			.filter(|d| self.handler(d.id).is_some())
			.map(|d| d.name)
			.collect();
		f.debug_struct("Registry")
			.field("registered", &registered)
			.finish()
	}
}

impl Registry {
	/// A table with every built-in handler registered.
	pub fn new() -> Self {
		let mut registry = Self::empty();
		registry.register();
		registry
	}

	/// A table with no handlers, for tools that only parse policy.
	pub fn empty() -> Self {
		Self {
			handlers: vec![None; DIRECTIVES.len()],
		}
	}

	/// Installs the built-in handlers. Running it again changes nothing.
	pub fn register(&mut self) {
		for &(id, handler) in HANDLERS {
			self.handlers[id as usize] = Some(handler);
		}
	}

	pub fn handler(&self, id: DirectiveId) -> Option<DirectiveHandler> {
		self.handlers[id as usize]
	}

	/// Runs the handler for `id`, if any.
	///
	/// Directives without a handler succeed. A value whose type does not
	/// match the directive is reported and fails without running the handler.
	pub fn invoke(
		&self,
		state: &mut PolicyState,
		id: DirectiveId,
		location: &SourceLocation,
		value: &DirectiveValue,
		op: Operator,
	) -> bool {
		let Some(handler) = self.handler(id) else {
			return true;
		};
		if let Err(reason) = id.check(value) {
			state.warn(location, DiagnosticFlags::PARSE_ERROR, &reason);
			return false;
		}

		let call = DirectiveCall {
			id,
			location,
			value,
			op,
		};
		let ok = handler(state, &call);
		tracing::debug!(directive = id.name(), %location, ?op, ok, "ran directive handler");
		ok
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_registry_has_no_handlers() {
		let registry = Registry::empty();
		assert!(DIRECTIVES.iter().all(|d| registry.handler(d.id).is_none()));
	}

	#[test]
	fn register_is_idempotent() {
		let mut registry = Registry::new();
		let before: Vec<_> = DIRECTIVES
			.iter()
			.map(|d| registry.handler(d.id).map(|h| h as usize))
			.collect();
		registry.register();
		let after: Vec<_> = DIRECTIVES
			.iter()
			.map(|d| registry.handler(d.id).map(|h| h as usize))
			.collect();
		assert_eq!(before, after);
	}

	#[test]
	fn handlers_cover_side_effect_directives() {
		let registry = Registry::new();
		for id in [
			DirectiveId::Fqdn,
			DirectiveId::Logfile,
			DirectiveId::Syslog,
			DirectiveId::Timestampowner,
			DirectiveId::TtyTickets,
			DirectiveId::Runchroot,
			DirectiveId::Maxseq,
		] {
			assert!(registry.handler(id).is_some(), "{} has no handler", id.name());
		}
		assert!(registry.handler(DirectiveId::IologDir).is_none());
	}
}
