//! Administrative operations over persisted member records.
//!
//! None of these run on their own; prune in particular is only ever called
//! explicitly.

use std::collections::HashSet;

use roster_identity::IdentityKey;
use roster_primitives::PropertyValue;
use tracing::info;

use crate::{MemberDataTool, Result};

/// Record counts reported by [`MemberDataTool::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberDataStats {
	/// Persisted records.
	pub total: usize,
	/// Persisted records whose identity no longer exists.
	pub orphaned: usize,
}

/// One match from [`MemberDataTool::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
	pub key: IdentityKey,
	/// Value of the searched field.
	pub value: PropertyValue,
	/// Stored email override, or an empty string.
	pub email: String,
}

impl MemberDataTool {
	/// Counts persisted and orphaned records. Read-only.
	pub fn stats(&self) -> Result<MemberDataStats> {
		let known: HashSet<IdentityKey> = self.provider().list_keys().into_iter().collect();
		let keys = self.store().keys()?;
		let orphaned = keys.iter().filter(|key| !known.contains(*key)).count();
		Ok(MemberDataStats {
			total: keys.len(),
			orphaned,
		})
	}

	/// Finds persisted records whose `field` contains `term`.
	///
	/// Matching is a case-sensitive substring test on the field's textual form.
	/// `id` and its alias `username` match the key; any other field is read from
	/// the stored overrides, and records without it are skipped.
	pub fn search(&self, field: &str, term: &str) -> Result<Vec<SearchHit>> {
		let field = if field == "username" { "id" } else { field };
		let mut hits = Vec::new();

		for key in self.store().keys()? {
			let Some(data) = self.store().get(&key)? else {
				continue;
			};
			let value = match field {
				"id" => Some(PropertyValue::from(key.as_str())),
				_ => data.overrides.get(field).cloned(),
			};
			let Some(value) = value else {
				continue;
			};
			if !value.to_string().contains(term) {
				continue;
			}

			let email = data
				.overrides
				.get("email")
				.map(ToString::to_string)
				.unwrap_or_default();
			hits.push(SearchHit { key, value, email });
		}
		Ok(hits)
	}

	/// Deletes every persisted record whose identity the provider no longer
	/// knows. Returns the number removed.
	pub fn prune(&self) -> Result<usize> {
		self.prune_keys(self.provider().list_keys())
	}

	/// Deletes every persisted record whose key is not in `valid_keys`.
	/// Returns the number removed.
	pub fn prune_keys(&self, valid_keys: impl IntoIterator<Item = IdentityKey>) -> Result<usize> {
		let valid: HashSet<IdentityKey> = valid_keys.into_iter().collect();
		let mut removed = 0;

		for key in self.store().keys()? {
			if valid.contains(&key) {
				continue;
			}
			let deleted = self.locks().with_lock(&key, || -> Result<bool> {
				let mut entries = self.staging().lock();
				let deleted = self.store().delete(&key)?;
				entries.forget_loaded(&key);
				Ok(deleted)
			})?;
			if deleted {
				removed += 1;
			}
		}

		info!(removed, "orphaned member records pruned");
		Ok(removed)
	}
}
