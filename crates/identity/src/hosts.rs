use sudoers_primitives::{AllocationError, try_dup};


/// Short form of a host name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortHost {
	/// The long name has no domain part, so the short name is the long name.
	Alias,
	/// Text of the long name before its first `.`.
	Owned(String),
}

/// A long (canonical) host name and its derived short name.
///
/// The short name never allocates when it would equal the long name. Callers
/// replacing a pair simply drop the old value; [`ShortHost::Alias`] keeps
/// ownership with the long name so nothing is released twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNames {
	long: String,
	short: ShortHost,
}

impl HostNames {
	/// Builds a pair from a long name, splitting at the first `.`.
	pub fn from_long(long: String) -> Result<Self, AllocationError> {
		let short = match long.find('.') {
			Some(dot) => ShortHost::Owned(try_dup(&long[..dot])?),
			None => ShortHost::Alias,
		};
		Ok(Self { long, short })
	}

	/// Builds the startup pair from the system host name.
	///
	/// Falls back to `localhost` when no host name is available. Allocation
	/// failure this early leaves nothing to degrade to, so it ends the process.
	pub fn bootstrap(hostname: Option<String>) -> Self {
		let long = hostname
			.filter(|h| !h.is_empty())
			.unwrap_or_else(|| "localhost".to_string());
		match Self::from_long(long) {
			Ok(hosts) => hosts,
			Err(err) => {
				tracing::error!(error = %err, "bootstrap_hosts");
				std::process::exit(1);
			}
		}
	}

	pub fn host(&self) -> &str {
		&self.long
	}

	pub fn shost(&self) -> &str {
		match &self.short {
			ShortHost::Alias => &self.long,
			ShortHost::Owned(short) => short,
		}
	}

	/// Returns true when the short name shares the long name's storage.
	pub fn is_alias(&self) -> bool {
		matches!(self.short, ShortHost::Alias)
	}

	pub fn short(&self) -> &ShortHost {
		&self.short
	}

	/// Copies both names into new allocations, keeping the alias relationship.
	pub fn try_duplicate(&self) -> Result<Self, AllocationError> {
		let long = try_dup(&self.long)?;
		let short = match &self.short {
			ShortHost::Alias => ShortHost::Alias,
			ShortHost::Owned(short) => ShortHost::Owned(try_dup(short)?),
		};
		Ok(Self { long, short })
	}
}

/// Returns the system host name, if it can be read and is valid UTF-8.
pub fn system_hostname() -> Option<String> {
	match nix::unistd::gethostname() {
		Ok(name) => name.into_string().ok(),
		Err(errno) => {
			tracing::debug!(%errno, "gethostname failed");
			None
		}
	}
}
