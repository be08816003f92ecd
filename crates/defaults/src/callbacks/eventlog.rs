use sudoers_eventlog::{LogDestination, LogFormat, TimeFormat};

use super::int_arg;
use crate::registry::DirectiveCall;
use crate::schema::{DirectiveId, Tuple};
use crate::state::PolicyState;

// The two destination handlers rebuild the mask from both settings so
// neither clears the bit owned by the other.

pub(super) fn logfile(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let mut mask = LogDestination::empty();
	if state.defaults.string(DirectiveId::Syslog).is_some() {
		mask |= LogDestination::SYSLOG;
	}
	let path = call.value.as_str();
	if path.is_some() {
		mask |= LogDestination::FILE;
	}
	let log = &mut state.collaborators.eventlog;
	log.set_destinations(mask);
	log.set_log_path(path);
	true
}

pub(super) fn syslog(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let mut mask = LogDestination::empty();
	if state.defaults.string(DirectiveId::Logfile).is_some() {
		mask |= LogDestination::FILE;
	}
	if call.value.as_str().is_some() {
		mask |= LogDestination::SYSLOG;
	}
	state.collaborators.eventlog.set_destinations(mask);
	true
}

pub(super) fn log_format(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let format = match call.value.as_tuple() {
		Some(Tuple::Sudo) => LogFormat::Sudo,
		Some(Tuple::Json) => LogFormat::Json,
		// Other tuples never reach the handler.
		_ => return false,
	};
	state.collaborators.eventlog.set_format(format);
	true
}

pub(super) fn syslog_goodpri(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(pri) = int_arg::<i32>(state, call) else {
		return false;
	};
	state.collaborators.eventlog.set_syslog_accept_priority(pri);
	true
}

/// Rejections and alerts share one priority.
pub(super) fn syslog_badpri(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(pri) = int_arg::<i32>(state, call) else {
		return false;
	};
	let log = &mut state.collaborators.eventlog;
	log.set_syslog_reject_priority(pri);
	log.set_syslog_alert_priority(pri);
	true
}

pub(super) fn syslog_maxlen(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(len) = int_arg::<usize>(state, call) else {
		return false;
	};
	state.collaborators.eventlog.set_syslog_max_len(len);
	true
}

pub(super) fn loglinelen(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let Some(len) = int_arg::<usize>(state, call) else {
		return false;
	};
	state.collaborators.eventlog.set_file_max_len(len);
	true
}

pub(super) fn log_year(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let format = if call.value.as_flag().unwrap_or(false) {
		TimeFormat::WithYear
	} else {
		TimeFormat::WithoutYear
	};
	state.collaborators.eventlog.set_time_format(format);
	true
}

pub(super) fn log_host(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	let include = call.value.as_flag().unwrap_or(false);
	state.collaborators.eventlog.set_omit_hostname(!include);
	true
}

pub(super) fn mailerpath(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	state.collaborators.eventlog.set_mailer_path(call.value.as_str());
	true
}

pub(super) fn mailerflags(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	state.collaborators.eventlog.set_mailer_flags(call.value.as_str());
	true
}

pub(super) fn mailfrom(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	state.collaborators.eventlog.set_mail_from(call.value.as_str());
	true
}

pub(super) fn mailto(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	state.collaborators.eventlog.set_mail_to(call.value.as_str());
	true
}

pub(super) fn mailsub(state: &mut PolicyState, call: &DirectiveCall<'_>) -> bool {
	state.collaborators.eventlog.set_mail_subject(call.value.as_str());
	true
}
