use std::fmt;
use std::sync::Arc;

/// Position of a directive in the policy source.
///
/// Runtime-supplied settings have no file and use [`SourceLocation::runtime`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
	pub file: Arc<str>,
	pub line: u32,
	pub column: u32,
}

impl SourceLocation {
	pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
		Self {
			file: file.into(),
			line,
			column,
		}
	}

	/// Location used for values injected by the front end rather than read
	/// from a policy file.
	pub fn runtime() -> Self {
		Self::new("<runtime>", 0, 0)
	}
}

impl fmt::Display for SourceLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file, self.line, self.column)
	}
}
