use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key naming one identity in the identity provider.
///
/// The key is the only index used by both the staging cache and the record
/// store, so it is compared and ordered as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
	/// Creates a key from anything string-like.
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Consumes the key, returning the owned string.
	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for IdentityKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for IdentityKey {
	fn from(key: &str) -> Self {
		Self(key.to_string())
	}
}

impl From<String> for IdentityKey {
	fn from(key: String) -> Self {
		Self(key)
	}
}

impl Borrow<str> for IdentityKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for IdentityKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
