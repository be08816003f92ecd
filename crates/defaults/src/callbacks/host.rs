use sudoers_identity::{FqdnError, HostResolver};

use crate::diagnostics::DiagnosticFlags;
use crate::registry::DirectiveCall;
use crate::state::PolicyState;

/// Replaces both contexts' host names with their fully qualified forms.
pub(super) fn fqdn(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let enabled = call.value.as_flag().unwrap_or(false);
	let PolicyState {
		user,
		runas,
		collaborators,
		..
	} = state;

	let resolver = HostResolver::new(collaborators.names.as_ref());
	let Err(err) = resolver.update_fqdn(enabled, user, runas) else {
		return true;
	};

	let flags = match err {
		FqdnError::Invoking { .. } => DiagnosticFlags::PARSE_ERROR | DiagnosticFlags::RAW_MSG,
		FqdnError::Target { .. } | FqdnError::Alloc(_) => {
			DiagnosticFlags::NO_LOG | DiagnosticFlags::RAW_MSG
		}
	};
	collaborators
		.diagnostics
		.warn(Some(call.location), flags, &err.to_string());
	false
}
