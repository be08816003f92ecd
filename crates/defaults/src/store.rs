use crate::schema::{DIRECTIVES, DirectiveId, Tuple};
use crate::value::DirectiveValue;

/// Current value of every directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
	values: Vec<DirectiveValue>,
}

impl Default for Defaults {
	fn default() -> Self {
		Self::new()
	}
}

impl Defaults {
	/// Seeds every directive with its built-in default.
	pub fn new() -> Self {
		Self {
			values: DIRECTIVES.iter().map(|d| d.default.to_value()).collect(),
		}
	}

	pub fn get(&self, id: DirectiveId) -> &DirectiveValue {
		&self.values[id as usize]
	}

	/// Stores `value`, returning false if it does not match the directive type.
	pub fn set(&mut self, id: DirectiveId, value: DirectiveValue) -> bool {
		if !id.accepts(&value) {
			return false;
		}
		self.values[id as usize] = value;
		true
	}

	/// Flag value; false for non-flag directives.
	pub fn flag(&self, id: DirectiveId) -> bool {
		self.get(id).as_flag().unwrap_or(false)
	}

	pub fn string(&self, id: DirectiveId) -> Option<&str> {
		self.get(id).as_str()
	}

	pub fn int(&self, id: DirectiveId) -> Option<i64> {
		self.get(id).as_int()
	}

	pub fn mode(&self, id: DirectiveId) -> Option<u32> {
		self.get(id).as_mode()
	}

	pub fn tuple(&self, id: DirectiveId) -> Option<Tuple> {
		self.get(id).as_tuple()
	}

	pub fn list(&self, id: DirectiveId) -> &[String] {
		self.get(id).as_list().unwrap_or_default()
	}
}
