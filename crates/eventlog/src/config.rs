use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{LogDestination, LogFormat, TimeFormat};

/// Configuration surface of the event logger.
pub trait EventLogConfig {
	fn destinations(&self) -> LogDestination;
	fn set_destinations(&mut self, mask: LogDestination);
	fn set_log_path(&mut self, path: Option<&str>);
	fn set_format(&mut self, format: LogFormat);
	fn set_syslog_accept_priority(&mut self, priority: i32);
	fn set_syslog_reject_priority(&mut self, priority: i32);
	fn set_syslog_alert_priority(&mut self, priority: i32);
	fn set_syslog_max_len(&mut self, len: usize);
	fn set_file_max_len(&mut self, len: usize);
	fn set_time_format(&mut self, format: TimeFormat);
	fn set_omit_hostname(&mut self, omit: bool);
	fn set_mailer_path(&mut self, path: Option<&str>);
	fn set_mailer_flags(&mut self, flags: Option<&str>);
	fn set_mail_from(&mut self, from: Option<&str>);
	fn set_mail_to(&mut self, to: Option<&str>);
	fn set_mail_subject(&mut self, subject: Option<&str>);
}

// syslog(3) priorities
const LOG_ALERT: i32 = 1;
const LOG_NOTICE: i32 = 5;

/// Recorded event log configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogSettings {
	pub destinations: LogDestination,
	pub log_path: Option<String>,
	pub format: LogFormat,
	pub syslog_accept_priority: i32,
	pub syslog_reject_priority: i32,
	pub syslog_alert_priority: i32,
	pub syslog_max_len: usize,
	pub file_max_len: usize,
	pub time_format: TimeFormat,
	pub omit_hostname: bool,
	pub mailer_path: Option<String>,
	pub mailer_flags: Option<String>,
	pub mail_from: Option<String>,
	pub mail_to: Option<String>,
	pub mail_subject: Option<String>,
}

impl Default for EventLogSettings {
	fn default() -> Self {
		Self {
			destinations: LogDestination::SYSLOG,
			log_path: None,
			format: LogFormat::Sudo,
			syslog_accept_priority: LOG_NOTICE,
			syslog_reject_priority: LOG_ALERT,
			syslog_alert_priority: LOG_ALERT,
			syslog_max_len: 960,
			file_max_len: 80,
			time_format: TimeFormat::WithoutYear,
			omit_hostname: false,
			mailer_path: None,
			mailer_flags: None,
			mail_from: None,
			mail_to: None,
			mail_subject: None,
		}
	}
}

fn owned(value: Option<&str>) -> Option<String> {
	value.map(str::to_string)
}

impl EventLogConfig for EventLogSettings {
	fn destinations(&self) -> LogDestination {
		self.destinations
	}

	fn set_destinations(&mut self, mask: LogDestination) {
		tracing::debug!(?mask, "event log destinations");
		self.destinations = mask;
	}

	fn set_log_path(&mut self, path: Option<&str>) {
		self.log_path = owned(path);
	}

	fn set_format(&mut self, format: LogFormat) {
		self.format = format;
	}

	fn set_syslog_accept_priority(&mut self, priority: i32) {
		self.syslog_accept_priority = priority;
	}

	fn set_syslog_reject_priority(&mut self, priority: i32) {
		self.syslog_reject_priority = priority;
	}

	fn set_syslog_alert_priority(&mut self, priority: i32) {
		self.syslog_alert_priority = priority;
	}

	fn set_syslog_max_len(&mut self, len: usize) {
		self.syslog_max_len = len;
	}

	fn set_file_max_len(&mut self, len: usize) {
		self.file_max_len = len;
	}

	fn set_time_format(&mut self, format: TimeFormat) {
		self.time_format = format;
	}

	fn set_omit_hostname(&mut self, omit: bool) {
		self.omit_hostname = omit;
	}

	fn set_mailer_path(&mut self, path: Option<&str>) {
		self.mailer_path = owned(path);
	}

	fn set_mailer_flags(&mut self, flags: Option<&str>) {
		self.mailer_flags = owned(flags);
	}

	fn set_mail_from(&mut self, from: Option<&str>) {
		self.mail_from = owned(from);
	}

	fn set_mail_to(&mut self, to: Option<&str>) {
		self.mail_to = owned(to);
	}

	fn set_mail_subject(&mut self, subject: Option<&str>) {
		self.mail_subject = owned(subject);
	}
}

/// Event log configuration that ignores every setting.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventLog;

impl EventLogConfig for NullEventLog {
	fn destinations(&self) -> LogDestination {
		LogDestination::empty()
	}
	fn set_destinations(&mut self, _: LogDestination) {}
	fn set_log_path(&mut self, _: Option<&str>) {}
	fn set_format(&mut self, _: LogFormat) {}
	fn set_syslog_accept_priority(&mut self, _: i32) {}
	fn set_syslog_reject_priority(&mut self, _: i32) {}
	fn set_syslog_alert_priority(&mut self, _: i32) {}
	fn set_syslog_max_len(&mut self, _: usize) {}
	fn set_file_max_len(&mut self, _: usize) {}
	fn set_time_format(&mut self, _: TimeFormat) {}
	fn set_omit_hostname(&mut self, _: bool) {}
	fn set_mailer_path(&mut self, _: Option<&str>) {}
	fn set_mailer_flags(&mut self, _: Option<&str>) {}
	fn set_mail_from(&mut self, _: Option<&str>) {}
	fn set_mail_to(&mut self, _: Option<&str>) {}
	fn set_mail_subject(&mut self, _: Option<&str>) {}
}

/// A configuration shared with the logger that reads it.
impl<T: EventLogConfig + ?Sized> EventLogConfig for Rc<RefCell<T>> {
	fn destinations(&self) -> LogDestination {
		self.borrow().destinations()
	}
	fn set_destinations(&mut self, mask: LogDestination) {
		self.borrow_mut().set_destinations(mask);
	}
	fn set_log_path(&mut self, path: Option<&str>) {
		self.borrow_mut().set_log_path(path);
	}
	fn set_format(&mut self, format: LogFormat) {
		self.borrow_mut().set_format(format);
	}
	fn set_syslog_accept_priority(&mut self, priority: i32) {
		self.borrow_mut().set_syslog_accept_priority(priority);
	}
	fn set_syslog_reject_priority(&mut self, priority: i32) {
		self.borrow_mut().set_syslog_reject_priority(priority);
	}
	fn set_syslog_alert_priority(&mut self, priority: i32) {
		self.borrow_mut().set_syslog_alert_priority(priority);
	}
	fn set_syslog_max_len(&mut self, len: usize) {
		self.borrow_mut().set_syslog_max_len(len);
	}
	fn set_file_max_len(&mut self, len: usize) {
		self.borrow_mut().set_file_max_len(len);
	}
	fn set_time_format(&mut self, format: TimeFormat) {
		self.borrow_mut().set_time_format(format);
	}
	fn set_omit_hostname(&mut self, omit: bool) {
		self.borrow_mut().set_omit_hostname(omit);
	}
	fn set_mailer_path(&mut self, path: Option<&str>) {
		self.borrow_mut().set_mailer_path(path);
	}
	fn set_mailer_flags(&mut self, flags: Option<&str>) {
		self.borrow_mut().set_mailer_flags(flags);
	}
	fn set_mail_from(&mut self, from: Option<&str>) {
		self.borrow_mut().set_mail_from(from);
	}
	fn set_mail_to(&mut self, to: Option<&str>) {
		self.borrow_mut().set_mail_to(to);
	}
	fn set_mail_subject(&mut self, subject: Option<&str>) {
		self.borrow_mut().set_mail_subject(subject);
	}
}
