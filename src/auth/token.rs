//! Bearer token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted bearer token keeping the credential out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the API handed back an empty token.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
