use sudoers_identity::ContextFlags;

use crate::registry::DirectiveCall;
use crate::schema::{DirectiveId, Tuple};
use crate::state::PolicyState;

pub(super) fn intercept_type(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let mode = match call.value.as_tuple() {
		Some(mode @ (Tuple::Dso | Tuple::Trace)) => mode,
		_ => return false,
	};
	// An explicit dso mode disables setid commands unless the policy
	// allowed them itself.
	if call.op.is_explicit()
		&& mode == Tuple::Dso
		&& !state.user.flags.contains(ContextFlags::INTERCEPT_SETID)
	{
		tracing::debug!("resetting intercept_allow_setid");
		state
			.defaults
			.set(DirectiveId::InterceptAllowSetid, false.into());
	}
	true
}

pub(super) fn intercept_allow_setid(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	if call.op.is_explicit() {
		state.user.flags.insert(ContextFlags::INTERCEPT_SETID);
	}
	true
}
