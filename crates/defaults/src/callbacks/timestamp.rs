use sudoers_identity::resolve_user_spec;

use crate::diagnostics::DiagnosticFlags;
use crate::registry::DirectiveCall;
use crate::schema::{DirectiveId, Tuple};
use crate::state::PolicyState;

/// Accepts `#uid` or a login name.
pub(super) fn timestampowner(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(spec) = call.value.as_str() else {
		return true;
	};
	match resolve_user_spec(state.collaborators.accounts.as_ref(), spec) {
		Ok(owner) => {
			state.timestamp.set_owner(owner.uid, owner.gid);
			true
		}
		Err(err) => {
			state.warn(
				call.location,
				DiagnosticFlags::AUDIT | DiagnosticFlags::PARSE_ERROR,
				&format!("{} timestampowner: {err}", call.location),
			);
			false
		}
	}
}

pub(super) fn tty_tickets(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let scope = if call.value.as_flag().unwrap_or(false) {
		Tuple::Tty
	} else {
		Tuple::Global
	};
	state
		.defaults
		.set(DirectiveId::TimestampType, scope.into())
}
