use crate::schema::{DirectiveType, Tuple};

/// Current value of a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
	Flag(bool),
	/// `None` when the string directive is unset (negated).
	Str(Option<String>),
	Int(i64),
	/// Permission bits.
	Mode(u32),
	Tuple(Tuple),
	List(Vec<String>),
}

impl DirectiveValue {
	pub fn as_flag(&self) -> Option<bool> {
		match self {
			DirectiveValue::Flag(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string if this is a set `Str` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			DirectiveValue::Str(v) => v.as_deref(),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			DirectiveValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_mode(&self) -> Option<u32> {
		match self {
			DirectiveValue::Mode(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_tuple(&self) -> Option<Tuple> {
		match self {
			DirectiveValue::Tuple(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			DirectiveValue::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn ty(&self) -> DirectiveType {
		match self {
			DirectiveValue::Flag(_) => DirectiveType::Flag,
			DirectiveValue::Str(_) => DirectiveType::String,
			DirectiveValue::Int(_) => DirectiveType::Int,
			DirectiveValue::Mode(_) => DirectiveType::Mode,
			DirectiveValue::Tuple(_) => DirectiveType::Tuple,
			DirectiveValue::List(_) => DirectiveType::List,
		}
	}

	/// Returns true if this value matches the given type.
	pub fn matches_type(&self, ty: DirectiveType) -> bool {
		self.ty() == ty
	}
}

impl From<bool> for DirectiveValue {
	fn from(v: bool) -> Self {
		DirectiveValue::Flag(v)
	}
}

impl From<i64> for DirectiveValue {
	fn from(v: i64) -> Self {
		DirectiveValue::Int(v)
	}
}

impl From<&str> for DirectiveValue {
	fn from(v: &str) -> Self {
		DirectiveValue::Str(Some(v.to_string()))
	}
}

impl From<Tuple> for DirectiveValue {
	fn from(v: Tuple) -> Self {
		DirectiveValue::Tuple(v)
	}
}

/// How a setting was applied.
///
/// Parsers pass a raw integer code; [`Operator::from_code`] maps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	/// `name=value` or a bare flag.
	Set,
	/// `!name`.
	Negate,
	/// `name+=value`.
	Add,
	/// `name-=value`.
	Remove,
	/// Supplied by the runtime rather than policy text.
	Runtime,
}

impl Operator {
	pub fn from_code(code: i32) -> Option<Self> {
		match code {
			1 => Some(Operator::Set),
			0 => Some(Operator::Negate),
			0x2b => Some(Operator::Add),
			0x2d => Some(Operator::Remove),
			-1 => Some(Operator::Runtime),
			_ => None,
		}
	}

	pub fn code(self) -> i32 {
		match self {
			Operator::Set => 1,
			Operator::Negate => 0,
			Operator::Add => 0x2b,
			Operator::Remove => 0x2d,
			Operator::Runtime => -1,
		}
	}

	/// True unless the runtime supplied the value.
	pub fn is_explicit(self) -> bool {
		self != Operator::Runtime
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(Operator::Set)]
	#[case(Operator::Negate)]
	#[case(Operator::Add)]
	#[case(Operator::Remove)]
	#[case(Operator::Runtime)]
	fn operator_codes(#[case] op: Operator) {
		assert_eq!(Operator::from_code(op.code()), Some(op));
	}

	#[test]
	fn runtime_sentinel() {
		assert_eq!(Operator::from_code(-1), Some(Operator::Runtime));
		assert!(!Operator::Runtime.is_explicit());
		assert!(Operator::Negate.is_explicit());
		assert_eq!(Operator::from_code(7), None);
	}

	#[test]
	fn unset_string_has_no_text() {
		let value = DirectiveValue::Str(None);
		assert_eq!(value.as_str(), None);
		assert!(value.matches_type(DirectiveType::String));
		assert!(!value.matches_type(DirectiveType::Flag));
	}

	#[test]
	fn accessors_reject_other_variants() {
		let value = DirectiveValue::from(true);
		assert_eq!(value.as_flag(), Some(true));
		assert_eq!(value.as_int(), None);
		assert_eq!(value.as_list(), None);
	}
}
