use std::cell::Cell;
use std::collections::HashMap;

use sudoers_primitives::AllocationError;
use thiserror::Error;

use crate::context::IdentityContext;
use crate::hosts::HostNames;

mod system;

pub use system::SystemNameService;

/// Failure classification reported by the name service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
	#[error("temporary failure in name resolution")]
	Transient,
	#[error("name or service not known")]
	NotFound,
	#[error("memory allocation failure")]
	MemoryExhausted,
	/// Any other resolver code, passed through untouched.
	#[error("{message}")]
	Failed { code: i32, message: String },
}

/// Source of canonical host names.
pub trait NameService {
	/// Returns the canonical (fully qualified) form of `host`.
	fn canonical_name(&self, host: &str) -> Result<String, ResolutionError>;
}

/// Resolves `host` into a long/short pair.
pub fn resolve_host(names: &dyn NameService, host: &str) -> Result<HostNames, ResolutionError> {
	let long = names.canonical_name(host)?;
	HostNames::from_long(long).map_err(|_| ResolutionError::MemoryExhausted)
}

#[derive(Debug, Error)]
pub enum FqdnError {
	/// Neither the invoking nor the runas host resolved.
	#[error("unable to resolve host {host}: {source}")]
	Invoking {
		host: String,
		source: ResolutionError,
	},
	/// The runas host differs from the invoking host and did not resolve.
	#[error("unable to resolve host {host}: {source}")]
	Target {
		host: String,
		source: ResolutionError,
	},
	#[error("update_fqdn: {0}")]
	Alloc(#[from] AllocationError),
}

/// Replaces identity host names with their fully qualified forms.
pub struct HostResolver<'a> {
	names: &'a dyn NameService,
}

impl<'a> HostResolver<'a> {
	pub fn new(names: &'a dyn NameService) -> Self {
		Self { names }
	}

	/// Resolves the invoking and runas host names.
	///
	/// Does nothing when `enabled` is false. If the invoking host does not
	/// resolve, the runas host name is tried in its place. When both contexts
	/// name the same host only one lookup is made and the runas context gets
	/// a copy of the invoking pair. On error the context being updated is
	/// left as it was; an invoking context updated before a runas failure
	/// keeps its new names.
	pub fn update_fqdn(
		&self,
		enabled: bool,
		user: &mut IdentityContext,
		runas: &mut IdentityContext,
	) -> Result<(), FqdnError> {
		if !enabled {
			return Ok(());
		}

		// A host given on the command line means both names need a lookup.
		let remote = runas.host() != user.host();

		let resolved = match resolve_host(self.names, user.host()) {
			Ok(hosts) => hosts,
			Err(first) => {
				tracing::debug!(host = user.host(), error = %first, "retrying with runas host");
				resolve_host(self.names, runas.host()).map_err(|source| FqdnError::Invoking {
					host: user.host().to_string(),
					source,
				})?
			}
		};
		user.set_hosts(resolved);

		let target = if remote {
			resolve_host(self.names, runas.host()).map_err(|source| FqdnError::Target {
				host: runas.host().to_string(),
				source,
			})?
		} else {
			user.hosts().try_duplicate()?
		};
		runas.set_hosts(target);

		tracing::debug!(
			host = user.host(),
			shost = user.shost(),
			runas_host = runas.host(),
			runas_shost = runas.shost(),
			"resolved fully qualified host names"
		);
		Ok(())
	}
}

/// Name service backed by a fixed table; counts lookups.
#[derive(Debug, Default)]
pub struct MapNameService {
	entries: HashMap<String, Result<String, ResolutionError>>,
	lookups: Cell<usize>,
}

impl MapNameService {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_name(mut self, host: &str, canonical: &str) -> Self {
		self.entries
			.insert(host.to_string(), Ok(canonical.to_string()));
		self
	}

	pub fn with_error(mut self, host: &str, err: ResolutionError) -> Self {
		self.entries.insert(host.to_string(), Err(err));
		self
	}

	/// Number of lookups served so far.
	pub fn lookups(&self) -> usize {
		self.lookups.get()
	}
}

impl NameService for MapNameService {
	fn canonical_name(&self, host: &str) -> Result<String, ResolutionError> {
		self.lookups.set(self.lookups.get() + 1);
		self.entries
			.get(host)
			.cloned()
			.unwrap_or(Err(ResolutionError::NotFound))
	}
}
