use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use roster_primitives::{IdentityKey, PropertyValue};
use roster_store::MemberRecordData;

/// Shared handle to a member record.
///
/// Lookups of a key receive clones of the same handle while any is alive, so
/// `Arc::ptr_eq` identifies the record instance.
pub type MemberHandle = Arc<MemberRecord>;

/// Where a member record currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
	/// Held only by the staging cache; never written.
	Staged,
	/// Written to the record store.
	Persisted,
}

/// Explicit property overrides for one identity.
///
/// A record never refers back to its tool or identity; both are paired with
/// it per access through a [`View`](crate::View).
#[derive(Debug)]
pub struct MemberRecord {
	key: IdentityKey,
	overrides: RwLock<BTreeMap<String, PropertyValue>>,
	lifecycle: Mutex<Lifecycle>,
}

impl MemberRecord {
	pub(crate) fn staged(key: IdentityKey) -> Self {
		Self {
			key,
			overrides: RwLock::new(BTreeMap::new()),
			lifecycle: Mutex::new(Lifecycle::Staged),
		}
	}

	pub(crate) fn hydrated(data: MemberRecordData) -> Self {
		Self {
			key: data.key,
			overrides: RwLock::new(data.overrides),
			lifecycle: Mutex::new(Lifecycle::Persisted),
		}
	}

	pub fn key(&self) -> &IdentityKey {
		&self.key
	}

	pub fn lifecycle(&self) -> Lifecycle {
		*self.lifecycle.lock()
	}

	pub fn is_staged(&self) -> bool {
		self.lifecycle() == Lifecycle::Staged
	}

	pub fn is_persisted(&self) -> bool {
		self.lifecycle() == Lifecycle::Persisted
	}

	/// Returns the explicit override for `name`, if one was written.
	pub fn override_value(&self, name: &str) -> Option<PropertyValue> {
		self.overrides.read().get(name).cloned()
	}

	pub fn has_override(&self, name: &str) -> bool {
		self.overrides.read().contains_key(name)
	}

	/// Returns a copy of every explicit override.
	pub fn overrides(&self) -> BTreeMap<String, PropertyValue> {
		self.overrides.read().clone()
	}

	/// Returns the durable form of this record.
	pub fn to_data(&self) -> MemberRecordData {
		MemberRecordData {
			key: self.key.clone(),
			overrides: self.overrides(),
		}
	}

	pub(crate) fn set_override(&self, name: String, value: PropertyValue) {
		self.overrides.write().insert(name, value);
	}

	pub(crate) fn replace_overrides(&self, overrides: BTreeMap<String, PropertyValue>) {
		*self.overrides.write() = overrides;
	}

	/// Marks the record persisted, returning `true` if it was staged.
	pub(crate) fn mark_persisted(&self) -> bool {
		let mut lifecycle = self.lifecycle.lock();
		let was_staged = *lifecycle == Lifecycle::Staged;
		*lifecycle = Lifecycle::Persisted;
		was_staged
	}
}
