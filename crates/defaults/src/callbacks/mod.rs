//! Built-in directive handlers.

use crate::diagnostics::DiagnosticFlags;
use crate::registry::{DirectiveCall, DirectiveHandler};
use crate::schema::DirectiveId;
use crate::state::PolicyState;

mod command;
mod eventlog;
mod host;
mod intercept;
mod iolog;
mod timestamp;

/// Every directive with a side effect, paired with its handler.
pub(crate) static HANDLERS: &[(DirectiveId, DirectiveHandler)] = &[
	(DirectiveId::Fqdn, host::fqdn),
	(DirectiveId::RunasDefault, command::runas_default),
	(DirectiveId::Maxseq, iolog::maxseq),
	(DirectiveId::IologUser, iolog::iolog_user),
	(DirectiveId::IologGroup, iolog::iolog_group),
	(DirectiveId::IologMode, iolog::iolog_mode),
	(DirectiveId::Timestampowner, timestamp::timestampowner),
	(DirectiveId::TtyTickets, timestamp::tty_tickets),
	(DirectiveId::Umask, command::umask),
	(DirectiveId::Runchroot, command::runchroot),
	(DirectiveId::Syslog, eventlog::syslog),
	(DirectiveId::SyslogGoodpri, eventlog::syslog_goodpri),
	(DirectiveId::SyslogBadpri, eventlog::syslog_badpri),
	(DirectiveId::SyslogMaxlen, eventlog::syslog_maxlen),
	(DirectiveId::Loglinelen, eventlog::loglinelen),
	(DirectiveId::LogHost, eventlog::log_host),
	(DirectiveId::Logfile, eventlog::logfile),
	(DirectiveId::LogFormat, eventlog::log_format),
	(DirectiveId::LogYear, eventlog::log_year),
	(DirectiveId::Mailerpath, eventlog::mailerpath),
	(DirectiveId::Mailerflags, eventlog::mailerflags),
	(DirectiveId::Mailfrom, eventlog::mailfrom),
	(DirectiveId::Mailto, eventlog::mailto),
	(DirectiveId::Mailsub, eventlog::mailsub),
	(DirectiveId::PasspromptRegex, command::passprompt_regex),
	(DirectiveId::InterceptType, intercept::intercept_type),
	(DirectiveId::InterceptAllowSetid, intercept::intercept_allow_setid),
	(DirectiveId::LogInput, iolog::log_input),
	(DirectiveId::LogOutput, iolog::log_output),
];

/// Converts an integer directive value, reporting values the target type
/// cannot hold.
fn int_arg<T: TryFrom<i64>>(state: &PolicyState, call: &DirectiveCall<'_>) -> Option<T> {
	let value = call.value.as_int()?;
	match T::try_from(value) {
		Ok(v) => Some(v),
		Err(_) => {
			state.warn(
				call.location,
				DiagnosticFlags::PARSE_ERROR,
				&format!("{}: value {value} is out of range", call.id.name()),
			);
			None
		}
	}
}
