use std::fmt::{self, Write as _};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

use crate::escapes::{EscapeContext, SUDOERS_ESCAPES};
use crate::seq::SequenceError;


/// Longest path the expander produces, including the terminator.
pub const PATH_MAX: usize = 4096;

#[derive(Debug, Error)]
pub enum TemplateError {
	#[error("unknown path escape %{{{0}}}")]
	UnknownToken(String),
	#[error("expanded path is {len} bytes, limit is {}", PATH_MAX - 1)]
	TooLong { len: usize },
	#[error("unable to allocate session id: {0}")]
	Sequence(#[from] SequenceError),
	#[error("invalid time conversion in {0:?}")]
	InvalidTimeFormat(String),
}

/// Generator for one `%{name}` escape.
pub type EscapeFn = fn(&EscapeContext<'_>) -> Result<String, TemplateError>;

/// One entry of an escape table.
#[derive(Clone, Copy)]
pub struct PathEscape {
	pub name: &'static str,
	pub fill: EscapeFn,
}

impl fmt::Debug for PathEscape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PathEscape")
			.field("name", &self.name)
			.finish()
	}
}

/// Expands I/O log path patterns against an escape table.
#[derive(Debug, Clone, Copy)]
pub struct PathExpander {
	escapes: &'static [PathEscape],
}

impl Default for PathExpander {
	fn default() -> Self {
		Self::new(SUDOERS_ESCAPES)
	}
}

impl PathExpander {
	pub const fn new(escapes: &'static [PathEscape]) -> Self {
		Self { escapes }
	}

	fn find(&self, name: &str) -> Option<&PathEscape> {
		self.escapes.iter().find(|e| e.name == name)
	}

	/// Expands `pattern` using the current local time for strftime
	/// conversions.
	pub fn expand(&self, pattern: &str, ctx: &EscapeContext<'_>) -> Result<String, TemplateError> {
		self.expand_at(pattern, ctx, &Local::now())
	}

	/// Expands `pattern`, formatting strftime conversions against `now`.
	///
	/// `%{name}` is replaced by the named escape; an unknown name fails the
	/// whole expansion. `%%` is a literal `%` and any other `%` conversion is
	/// handed to strftime. Leading slashes collapse to one and trailing
	/// slashes are dropped. A result that would not fit in [`PATH_MAX`] is an
	/// error, never a truncated path.
	pub fn expand_at<Tz>(
		&self,
		pattern: &str,
		ctx: &EscapeContext<'_>,
		now: &DateTime<Tz>,
	) -> Result<String, TemplateError>
	where
		Tz: TimeZone,
		Tz::Offset: fmt::Display,
	{
		let mut rest = pattern;
		while rest.starts_with("//") {
			rest = &rest[1..];
		}

		// Built as a strftime format: every literal '%' is doubled.
		let mut format = String::with_capacity(rest.len());
		let mut needs_strftime = false;
		while let Some(pos) = rest.find('%') {
			format.push_str(&rest[..pos]);
			let tail = &rest[pos..];

			if let Some(body) = tail.strip_prefix("%{")
				&& let Some(end) = body.find('}')
			{
				let name = &body[..end];
				let escape = self
					.find(name)
					.ok_or_else(|| TemplateError::UnknownToken(name.to_string()))?;
				let value = (escape.fill)(ctx)?;
				format.push_str(&value.replace('%', "%%"));
				rest = &body[end + 1..];
				continue;
			}

			if tail.starts_with("%%") {
				format.push_str("%%");
				rest = &tail[2..];
			} else if tail.len() == 1 || tail.starts_with("%{") {
				format.push_str("%%");
				rest = &tail[1..];
			} else {
				needs_strftime = true;
				format.push('%');
				rest = &tail[1..];
			}
		}
		format.push_str(rest);

		let trimmed = format.trim_end_matches('/').len();
		format.truncate(trimmed);

		let path = if needs_strftime {
			strftime(&format, now)?
		} else {
			format.replace("%%", "%")
		};
		if path.len() >= PATH_MAX {
			return Err(TemplateError::TooLong { len: path.len() });
		}
		Ok(path)
	}
}

fn strftime<Tz>(format: &str, now: &DateTime<Tz>) -> Result<String, TemplateError>
where
	Tz: TimeZone,
	Tz::Offset: fmt::Display,
{
	let invalid = || TemplateError::InvalidTimeFormat(format.to_string());
	let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
	if items.iter().any(|item| matches!(item, Item::Error)) {
		return Err(invalid());
	}
	let mut out = String::with_capacity(format.len());
	write!(out, "{}", now.format_with_items(items.iter())).map_err(|_| invalid())?;
	Ok(out)
}
