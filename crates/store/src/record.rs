use std::collections::BTreeMap;

use roster_primitives::{IdentityKey, PropertyValue};
use serde::{Deserialize, Serialize};

/// Durable form of a member record: its key and explicit overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecordData {
	pub key: IdentityKey,
	#[serde(default)]
	pub overrides: BTreeMap<String, PropertyValue>,
}

impl MemberRecordData {
	/// Creates a record with no overrides.
	pub fn new(key: impl Into<IdentityKey>) -> Self {
		Self {
			key: key.into(),
			overrides: BTreeMap::new(),
		}
	}

	/// Adds an override.
	pub fn with_override(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
		self.overrides.insert(name.into(), value.into());
		self
	}
}
