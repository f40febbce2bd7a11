//! User identity payloads and the stable Clef user identifier.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, provider::JsonObject};

/// User details returned by the `info` endpoint, passed through verbatim.
///
/// Clef documents fields such as `id`, `first_name`, and `email`, but the payload is kept as a
/// JSON object so hosts see every field the provider sends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(JsonObject);
impl UserIdentity {
	/// Wraps a decoded `info` object.
	pub fn new(info: JsonObject) -> Self {
		Self(info)
	}

	/// Returns a string field, if present and a string.
	pub fn str_field(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str)
	}

	/// Clef user identifier.
	pub fn id(&self) -> Option<&str> {
		self.str_field("id")
	}

	/// First name shared by the user.
	pub fn first_name(&self) -> Option<&str> {
		self.str_field("first_name")
	}

	/// Email address shared by the user.
	pub fn email(&self) -> Option<&str> {
		self.str_field("email")
	}

	/// Consumes the identity and returns the raw JSON object.
	pub fn into_inner(self) -> JsonObject {
		self.0
	}
}
impl Deref for UserIdentity {
	type Target = JsonObject;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl From<UserIdentity> for JsonObject {
	fn from(value: UserIdentity) -> Self {
		value.0
	}
}

/// Stable identifier of a Clef user, as reported by the logout endpoint.
///
/// Clef has sent this value both as a JSON string and as a number; both decode to the same
/// textual form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub struct ClefId(String);
impl ClefId {
	/// Wraps an identifier.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Borrows the identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ClefId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ClefId> for String {
	fn from(value: ClefId) -> Self {
		value.0
	}
}
impl TryFrom<Value> for ClefId {
	type Error = ClefIdError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::String(text) => Ok(Self(text)),
			Value::Number(number) => Ok(Self(number.to_string())),
			_ => Err(ClefIdError::UnexpectedType),
		}
	}
}
impl Debug for ClefId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ClefId({})", self.0)
	}
}
impl Display for ClefId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Error returned when a `clef_id` value is neither a string nor a number.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClefIdError {
	/// The JSON value had an unsupported type.
	#[error("clef_id must be a string or a number.")]
	UnexpectedType,
}
