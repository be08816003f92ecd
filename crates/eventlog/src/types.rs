bitflags::bitflags! {
	/// Where events are written. Destinations combine.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct LogDestination: u8 {
		const SYSLOG = 1 << 0;
		const FILE = 1 << 1;
	}
}

/// Event record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	/// Traditional single-line sudo format.
	#[default]
	Sudo,
	/// Structured JSON records.
	Json,
}

/// Timestamp layout for file logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
	WithYear,
	#[default]
	WithoutYear,
}

impl TimeFormat {
	/// strftime pattern for this layout.
	pub fn pattern(self) -> &'static str {
		match self {
			TimeFormat::WithYear => "%h %e %T %Y",
			TimeFormat::WithoutYear => "%h %e %T",
		}
	}
}
