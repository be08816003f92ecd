//! Identity contexts for the invoking user and the runas target.
//!
//! Each context owns a long/short host name pair. The short name is either an
//! independent string or an explicit alias of the long name when the long
//! name carries no domain part; see [`HostNames`]. [`HostResolver`] replaces
//! both pairs with fully qualified names when the `fqdn` directive is on.

/// User and group database lookups.
pub mod accounts;
/// Identity context records.
pub mod context;
/// Long/short host name pairs.
pub mod hosts;
/// Name-service resolution and the fqdn update.
pub mod resolver;

pub use accounts::{
	AccountDb, GroupRecord, LookupError, StaticAccounts, SystemAccounts, UserRecord, parse_id,
	resolve_user_spec,
};
pub use context::{CommandStatus, ContextFlags, IdentityContext};
pub use hosts::{HostNames, ShortHost, system_hostname};
pub use resolver::{
	FqdnError, HostResolver, MapNameService, NameService, ResolutionError, SystemNameService,
	resolve_host,
};
