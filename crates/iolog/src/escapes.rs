use std::path::Path;

use sudoers_identity::{AccountDb, IdentityContext};

use crate::path::{PathEscape, TemplateError};
use crate::seq::SequenceAllocator;

/// State the sudoers escapes read from.
pub struct EscapeContext<'a> {
	pub user: &'a IdentityContext,
	pub runas: &'a IdentityContext,
	pub accounts: &'a dyn AccountDb,
	pub sequence: &'a SequenceAllocator,
	/// Log root the session id is allocated under.
	pub log_dir: &'a Path,
}

fn group_name(accounts: &dyn AccountDb, gid: u32) -> String {
	match accounts.group_by_gid(gid) {
		Some(group) => group.name,
		None => format!("#{gid}"),
	}
}

fn fill_seq(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	let id = ctx.sequence.next(ctx.log_dir)?;
	Ok(id.path_fragment())
}

/// Leaves the escape in place; no id is allocated and nothing is written.
fn fill_seq_offline(_: &EscapeContext<'_>) -> Result<String, TemplateError> {
	Ok("%{seq}".to_string())
}

fn fill_user(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	Ok(ctx.user.name.clone())
}

fn fill_group(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	Ok(group_name(ctx.accounts, ctx.user.gid))
}

fn fill_runas_user(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	Ok(ctx.runas.name.clone())
}

fn fill_runas_group(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	match &ctx.runas.group {
		Some(group) => Ok(group.name.clone()),
		None => Ok(group_name(ctx.accounts, ctx.runas.gid)),
	}
}

fn fill_hostname(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	Ok(ctx.user.shost().to_string())
}

fn fill_command(ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
	Ok(ctx.user.cmnd_base().unwrap_or_default().to_string())
}

/// Escapes understood in sudoers `iolog_dir` and `iolog_file`.
///
/// `seq` is listed first by convention; lookup does not depend on order.
pub static SUDOERS_ESCAPES: &[PathEscape] = &[
	PathEscape {
		name: "seq",
		fill: fill_seq,
	},
	PathEscape {
		name: "user",
		fill: fill_user,
	},
	PathEscape {
		name: "group",
		fill: fill_group,
	},
	PathEscape {
		name: "runas_user",
		fill: fill_runas_user,
	},
	PathEscape {
		name: "runas_group",
		fill: fill_runas_group,
	},
	PathEscape {
		name: "hostname",
		fill: fill_hostname,
	},
	PathEscape {
		name: "command",
		fill: fill_command,
	},
];

/// [`SUDOERS_ESCAPES`] for tools that never start a session, such as a
/// policy checker. `%{seq}` is kept literally.
pub static OFFLINE_ESCAPES: &[PathEscape] = &[
	PathEscape {
		name: "seq",
		fill: fill_seq_offline,
	},
	PathEscape {
		name: "user",
		fill: fill_user,
	},
	PathEscape {
		name: "group",
		fill: fill_group,
	},
	PathEscape {
		name: "runas_user",
		fill: fill_runas_user,
	},
	PathEscape {
		name: "runas_group",
		fill: fill_runas_group,
	},
	PathEscape {
		name: "hostname",
		fill: fill_hostname,
	},
	PathEscape {
		name: "command",
		fill: fill_command,
	},
];
