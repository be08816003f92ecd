use regex::Regex;
use sudoers_identity::{CommandStatus, ContextFlags, resolve_user_spec};

use crate::diagnostics::DiagnosticFlags;
use crate::registry::DirectiveCall;
use crate::state::PolicyState;

const ACCESSPERMS: u32 = 0o777;

pub(super) fn umask(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	state.override_umask = call.value.as_mode() != Some(ACCESSPERMS);
	true
}

/// Re-resolves an already resolved command against the new root.
pub(super) fn runchroot(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let chroot = call.value.as_str();
	tracing::debug!(?chroot, "runchroot changed");
	let Some(cmnd) = state.user.cmnd.clone() else {
		return true;
	};

	match state.collaborators.commands.resolve(&cmnd, chroot) {
		Some(path) => {
			state.user.cmnd = Some(path);
			state.user.cmnd_status = Some(CommandStatus::Found);
		}
		None => state.user.cmnd_status = Some(CommandStatus::NotFound),
	}
	tracing::debug!(cmnd = ?state.user.cmnd, status = ?state.user.cmnd_status, "command re-resolved");
	true
}

/// Ignored when the command line named a runas user.
pub(super) fn runas_default(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	if state.user.flags.contains(ContextFlags::RUNAS_USER_SPECIFIED) {
		return true;
	}
	let Some(spec) = call.value.as_str() else {
		return true;
	};
	match resolve_user_spec(state.collaborators.accounts.as_ref(), spec) {
		Ok(target) => {
			state.runas.set_user(&target);
			true
		}
		Err(err) => {
			state.warn(
				call.location,
				DiagnosticFlags::PARSE_ERROR,
				&format!("runas_default: {err}"),
			);
			false
		}
	}
}

/// All patterns must compile or none are installed.
pub(super) fn passprompt_regex(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let patterns = call.value.as_list().unwrap_or_default();
	let compiled: Result<Vec<Regex>, _> = patterns.iter().map(|p| Regex::new(p)).collect();
	match compiled {
		Ok(compiled) => {
			state.passprompt = compiled;
			true
		}
		Err(err) => {
			state.warn(
				call.location,
				DiagnosticFlags::PARSE_ERROR,
				&format!("passprompt_regex: {err}"),
			);
			false
		}
	}
}
