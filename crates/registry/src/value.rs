use capdex_registry_spec::ValueSpec;

/// Default payload carried by a resolved capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
	Bool(bool),
	Int(i64),
	String(String),
}

/// Payload reported for unknown, unavailable or valueless keys.
pub static EMPTY_VALUE: Value = Value::String(String::new());

impl Value {
	/// Returns the boolean payload, if this is one.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer payload, if this is one.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string payload, if this is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns true for the defined empty payload.
	pub fn is_empty(&self) -> bool {
		matches!(self, Value::String(s) if s.is_empty())
	}
}

impl Default for Value {
	fn default() -> Self {
		EMPTY_VALUE.clone()
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<ValueSpec> for Value {
	fn from(spec: ValueSpec) -> Self {
		match spec {
			ValueSpec::Bool(v) => Value::Bool(v),
			ValueSpec::Int(v) => Value::Int(v),
			ValueSpec::String(v) => Value::String(v),
		}
	}
}
