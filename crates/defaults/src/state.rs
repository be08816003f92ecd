use std::path::Path;

use regex::Regex;
use sudoers_identity::IdentityContext;
use sudoers_iolog::{EscapeContext, IologSettings, SequenceAllocator, TemplateError};
use sudoers_primitives::SourceLocation;

use crate::collaborators::Collaborators;
use crate::diagnostics::DiagnosticFlags;
use crate::registry::Registry;
use crate::schema::{DIRECTIVES, DirectiveId};
use crate::store::Defaults;
use crate::value::{DirectiveValue, Operator};

/// Owner of the per-user authentication timestamp files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimestampSettings {
	pub owner_uid: u32,
	pub owner_gid: u32,
}

impl TimestampSettings {
	pub fn set_owner(&mut self, uid: u32, gid: u32) {
		tracing::debug!(uid, gid, "timestamp owner");
		self.owner_uid = uid;
		self.owner_gid = gid;
	}
}

/// Everything directive handlers read or change.
pub struct PolicyState {
	pub defaults: Defaults,
	pub user: IdentityContext,
	pub runas: IdentityContext,
	pub timestamp: TimestampSettings,
	/// The process's session id source, with the I/O log storage settings.
	pub sequence: SequenceAllocator,
	/// Compiled `passprompt_regex` patterns.
	pub passprompt: Vec<Regex>,
	pub collaborators: Collaborators,
	pub(crate) override_umask: bool,
}

impl PolicyState {
	pub fn new(
		user: IdentityContext,
		runas: IdentityContext,
		collaborators: Collaborators,
	) -> Self {
		let defaults = Defaults::new();
		let passprompt = defaults
			.list(DirectiveId::PasspromptRegex)
			.iter()
			.filter_map(|pattern| Regex::new(pattern).ok())
			.collect();
		Self {
			defaults,
			user,
			runas,
			timestamp: TimestampSettings::default(),
			sequence: SequenceAllocator::default(),
			passprompt,
			collaborators,
			override_umask: false,
		}
	}

	/// True when the policy set a umask other than `0777`.
	pub fn override_umask(&self) -> bool {
		self.override_umask
	}

	pub fn iolog(&self) -> &IologSettings {
		self.sequence.settings()
	}

	/// Sends a diagnostic tied to `location`.
	pub fn warn(&self, location: &SourceLocation, flags: DiagnosticFlags, message: &str) {
		self.collaborators
			.diagnostics
			.warn(Some(location), flags, message);
	}

	/// The session id allocator. Every log session of this policy shares it,
	/// so all of them see the same id.
	pub fn sequence_allocator(&self) -> &SequenceAllocator {
		&self.sequence
	}

	/// Inputs for expanding an I/O log path template under `log_dir`.
	pub fn escape_context<'a>(&'a self, log_dir: &'a Path) -> EscapeContext<'a> {
		EscapeContext {
			user: &self.user,
			runas: &self.runas,
			accounts: self.collaborators.accounts.as_ref(),
			sequence: &self.sequence,
			log_dir,
		}
	}

	/// Expands an I/O log path template with the configured escape table.
	pub fn expand_path(&self, pattern: &str, log_dir: &Path) -> Result<String, TemplateError> {
		self.collaborators
			.paths
			.expand(pattern, &self.escape_context(log_dir))
	}
}

/// A handler registry together with the state its handlers act on.
pub struct Policy {
	pub registry: Registry,
	pub state: PolicyState,
}

impl Policy {
	pub fn new(state: PolicyState) -> Self {
		Self {
			registry: Registry::new(),
			state,
		}
	}

	pub fn with_registry(state: PolicyState, registry: Registry) -> Self {
		Self { registry, state }
	}

	/// Runs every registered handler on the directive's current value, as
	/// supplied by the runtime rather than the policy.
	///
	/// Pushes the built-in defaults out to the collaborators before any
	/// policy text is applied. Every handler runs even if an earlier one
	/// fails; the result is false if any failed.
	pub fn apply_runtime_defaults(&mut self) -> bool {
		let location = SourceLocation::runtime();
		let mut ok = true;
		for spec in DIRECTIVES {
			if self.registry.handler(spec.id).is_none() {
				continue;
			}
			let value = self.state.defaults.get(spec.id).clone();
			ok &= self.registry.invoke(
				&mut self.state,
				spec.id,
				&location,
				&value,
				Operator::Runtime,
			);
		}
		ok
	}

	/// Applies one `Defaults` setting by name.
	///
	/// Stores the value and runs the directive's handler. Unknown names and
	/// values the directive does not accept are reported and leave the
	/// stored value unchanged.
	pub fn set_default(
		&mut self,
		name: &str,
		value: DirectiveValue,
		location: &SourceLocation,
		op: Operator,
	) -> bool {
		let Some(id) = DirectiveId::from_name(name) else {
			let message = match DirectiveId::suggest(name) {
				Some(hint) => format!("unknown defaults entry \"{name}\"; did you mean \"{hint}\"?"),
				None => format!("unknown defaults entry \"{name}\""),
			};
			self.state
				.warn(location, DiagnosticFlags::PARSE_ERROR, &message);
			return false;
		};

		if let Err(reason) = id.check(&value) {
			self.state
				.warn(location, DiagnosticFlags::PARSE_ERROR, &reason);
			return false;
		}
		self.state.defaults.set(id, value.clone());
		self.registry
			.invoke(&mut self.state, id, location, &value, op)
	}
}
