use sudoers_identity::LookupError;

use super::int_arg;
use crate::diagnostics::DiagnosticFlags;
use crate::registry::DirectiveCall;
use crate::schema::DirectiveId;
use crate::state::PolicyState;

fn set_flags(state: &mut PolicyState, call: &DirectiveCall<'_>, ids: &[DirectiveId]) -> bool {
	let on = call.value.as_flag().unwrap_or(false);
	for &id in ids {
		state.defaults.set(id, on.into());
	}
	true
}

pub(super) fn log_input(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	set_flags(state, call, &[DirectiveId::LogStdin, DirectiveId::LogTtyin])
}

pub(super) fn log_output(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	set_flags(
		state,
		call,
		&[
			DirectiveId::LogStdout,
			DirectiveId::LogStderr,
			DirectiveId::LogTtyout,
		],
	)
}

pub(super) fn maxseq(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(max) = int_arg::<u64>(state, call) else {
		return false;
	};
	state.sequence.settings_mut().set_max_seq(max);
	true
}

fn unknown(state: &PolicyState, call: &DirectiveCall<'_>, err: LookupError) -> bool {
	state.warn(
		call.location,
		DiagnosticFlags::PARSE_ERROR,
		&format!("{}: {err}", call.id.name()),
	);
	false
}

/// Unset means root.
pub(super) fn iolog_user(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(name) = call.value.as_str() else {
		let settings = state.sequence.settings_mut();
		settings.uid = 0;
		settings.gid = 0;
		return true;
	};
	match state.collaborators.accounts.user_by_name(name) {
		Some(user) => {
			let settings = state.sequence.settings_mut();
			settings.uid = user.uid;
			settings.gid = user.gid;
			true
		}
		None => unknown(state, call, LookupError::UnknownUser(name.to_string())),
	}
}

pub(super) fn iolog_group(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(name) = call.value.as_str() else {
		state.sequence.settings_mut().gid = 0;
		return true;
	};
	match state.collaborators.accounts.group_by_name(name) {
		Some(group) => {
			state.sequence.settings_mut().gid = group.gid;
			true
		}
		None => unknown(state, call, LookupError::UnknownGroup(name.to_string())),
	}
}

pub(super) fn iolog_mode(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	if let Some(mode) = call.value.as_mode() {
		state.sequence.settings_mut().mode = mode;
	}
	true
}
