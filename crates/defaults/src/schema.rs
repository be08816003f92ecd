use crate::value::DirectiveValue;

/// Declared type of a directive's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveType {
	Flag,
	String,
	Int,
	Mode,
	Tuple,
	List,
}

impl DirectiveType {
	pub fn name(self) -> &'static str {
		match self {
			DirectiveType::Flag => "flag",
			DirectiveType::String => "string",
			DirectiveType::Int => "integer",
			DirectiveType::Mode => "mode",
			DirectiveType::Tuple => "tuple",
			DirectiveType::List => "list",
		}
	}
}

/// Enumerated values of tuple directives.
///
/// Each tuple directive accepts a subset: `log_format` takes `sudo` or
/// `json`, `intercept_type` takes `dso` or `trace`, and `timestamp_type`
/// takes `global`, `ppid`, `tty` or `kernel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tuple {
	Sudo,
	Json,
	Dso,
	Trace,
	Global,
	Ppid,
	Tty,
	Kernel,
}

impl Tuple {
	pub fn name(self) -> &'static str {
		match self {
			Tuple::Sudo => "sudo",
			Tuple::Json => "json",
			Tuple::Dso => "dso",
			Tuple::Trace => "trace",
			Tuple::Global => "global",
			Tuple::Ppid => "ppid",
			Tuple::Tty => "tty",
			Tuple::Kernel => "kernel",
		}
	}
}

/// Built-in value of a directive before any policy text is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
	Flag(bool),
	Str(Option<&'static str>),
	Int(i64),
	Mode(u32),
	Tuple(Tuple),
	List(&'static [&'static str]),
}

impl DefaultValue {
	pub fn to_value(self) -> DirectiveValue {
		match self {
			DefaultValue::Flag(v) => DirectiveValue::Flag(v),
			DefaultValue::Str(v) => DirectiveValue::Str(v.map(str::to_string)),
			DefaultValue::Int(v) => DirectiveValue::Int(v),
			DefaultValue::Mode(v) => DirectiveValue::Mode(v),
			DefaultValue::Tuple(v) => DirectiveValue::Tuple(v),
			DefaultValue::List(v) => {
				DirectiveValue::List(v.iter().map(|s| s.to_string()).collect())
			}
		}
	}
}

/// One row of the directive schema.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveSpec {
	pub id: DirectiveId,
	pub name: &'static str,
	pub ty: DirectiveType,
	pub default: DefaultValue,
	/// Values a tuple directive accepts; empty for other types.
	pub tuples: &'static [Tuple],
}

/// Builds [`DirectiveId`] and [`DIRECTIVES`] from one list so the enum
/// discriminant always equals the row index.
macro_rules! directives {
	($($id:ident => $name:literal: $ty:ident $([$($tuple:ident),*])? = $default:expr),* $(,)?) => {
		/// Stable identifier of a directive.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum DirectiveId {
			$($id),*
		}

		/// The directive schema, indexed by [`DirectiveId`].
		pub static DIRECTIVES: &[DirectiveSpec] = &[
			$(DirectiveSpec {
				id: DirectiveId::$id,
				name: $name,
				ty: DirectiveType::$ty,
				default: $default,
				tuples: &[$($(Tuple::$tuple),*)?],
			}),*
		];
	};
}

directives! {
	Fqdn => "fqdn": Flag = DefaultValue::Flag(false),
	Syslog => "syslog": String = DefaultValue::Str(Some("authpriv")),
	SyslogGoodpri => "syslog_goodpri": Int = DefaultValue::Int(5),
	SyslogBadpri => "syslog_badpri": Int = DefaultValue::Int(1),
	SyslogMaxlen => "syslog_maxlen": Int = DefaultValue::Int(960),
	Logfile => "logfile": String = DefaultValue::Str(None),
	Loglinelen => "loglinelen": Int = DefaultValue::Int(80),
	LogHost => "log_host": Flag = DefaultValue::Flag(false),
	LogYear => "log_year": Flag = DefaultValue::Flag(false),
	LogFormat => "log_format": Tuple [Sudo, Json] = DefaultValue::Tuple(Tuple::Sudo),
	Mailerpath => "mailerpath": String = DefaultValue::Str(Some("/usr/sbin/sendmail")),
	Mailerflags => "mailerflags": String = DefaultValue::Str(Some("-t")),
	Mailfrom => "mailfrom": String = DefaultValue::Str(None),
	Mailto => "mailto": String = DefaultValue::Str(Some("root")),
	Mailsub => "mailsub": String = DefaultValue::Str(Some("*** SECURITY information for %h ***")),
	Timestampowner => "timestampowner": String = DefaultValue::Str(Some("root")),
	TtyTickets => "tty_tickets": Flag = DefaultValue::Flag(true),
	TimestampType => "timestamp_type": Tuple [Global, Ppid, Tty, Kernel] = DefaultValue::Tuple(Tuple::Tty),
	Umask => "umask": Mode = DefaultValue::Mode(0o022),
	Runchroot => "runchroot": String = DefaultValue::Str(None),
	InterceptType => "intercept_type": Tuple [Dso, Trace] = DefaultValue::Tuple(Tuple::Dso),
	InterceptAllowSetid => "intercept_allow_setid": Flag = DefaultValue::Flag(true),
	LogInput => "log_input": Flag = DefaultValue::Flag(false),
	LogOutput => "log_output": Flag = DefaultValue::Flag(false),
	LogStdin => "log_stdin": Flag = DefaultValue::Flag(false),
	LogTtyin => "log_ttyin": Flag = DefaultValue::Flag(false),
	LogStdout => "log_stdout": Flag = DefaultValue::Flag(false),
	LogStderr => "log_stderr": Flag = DefaultValue::Flag(false),
	LogTtyout => "log_ttyout": Flag = DefaultValue::Flag(false),
	Maxseq => "maxseq": Int = DefaultValue::Int(2_176_782_336),
	IologDir => "iolog_dir": String = DefaultValue::Str(Some("/var/log/sudo-io")),
	IologFile => "iolog_file": String = DefaultValue::Str(Some("%{seq}")),
	IologUser => "iolog_user": String = DefaultValue::Str(None),
	IologGroup => "iolog_group": String = DefaultValue::Str(None),
	IologMode => "iolog_mode": Mode = DefaultValue::Mode(0o600),
	RunasDefault => "runas_default": String = DefaultValue::Str(Some("root")),
	PasspromptRegex => "passprompt_regex": List = DefaultValue::List(&["[Pp]assword[: ]*"]),
}

impl DirectiveId {
	pub fn spec(self) -> &'static DirectiveSpec {
		&DIRECTIVES[self as usize]
	}

	pub fn name(self) -> &'static str {
		self.spec().name
	}

	pub fn ty(self) -> DirectiveType {
		self.spec().ty
	}

	/// Checks that `value` has the directive's type and, for tuples, is one
	/// of the values it accepts. The error is the diagnostic text.
	pub fn check(self, value: &DirectiveValue) -> Result<(), String> {
		let spec = self.spec();
		if !value.matches_type(spec.ty) {
			return Err(format!("{}: expected a {} value", spec.name, spec.ty.name()));
		}
		match value.as_tuple() {
			Some(tuple) if !spec.tuples.contains(&tuple) => {
				Err(format!("{}: invalid value \"{}\"", spec.name, tuple.name()))
			}
			_ => Ok(()),
		}
	}

	pub fn accepts(self, value: &DirectiveValue) -> bool {
		self.check(value).is_ok()
	}

	/// Exact lookup by directive name.
	pub fn from_name(name: &str) -> Option<Self> {
		DIRECTIVES.iter().find(|d| d.name == name).map(|d| d.id)
	}

	/// Closest directive name to `name`, if any is within edit distance 3.
	pub fn suggest(name: &str) -> Option<&'static str> {
		DIRECTIVES
			.iter()
			.map(|d| d.name)
			.min_by_key(|k| strsim::levenshtein(name, k))
			.filter(|k| strsim::levenshtein(name, k) <= 3)
	}
}
