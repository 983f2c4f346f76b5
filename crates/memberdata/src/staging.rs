use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};
use roster_primitives::IdentityKey;

use crate::{MemberHandle, MemberRecord};

/// Loaded-handle count below which dead entries are not swept.
const SWEEP_FLOOR: usize = 64;

/// Record handles currently in memory, guarded by one lock.
#[derive(Debug)]
pub(crate) struct Entries {
	/// Staged records, owned here until promoted.
	pub(crate) staged: HashMap<IdentityKey, MemberHandle>,
	/// Persisted records some caller still holds.
	loaded: HashMap<IdentityKey, Weak<MemberRecord>>,
	sweep_at: usize,
}

impl Default for Entries {
	fn default() -> Self {
		Self {
			staged: HashMap::new(),
			loaded: HashMap::new(),
			sweep_at: SWEEP_FLOOR,
		}
	}
}

impl Entries {
	/// Returns the live persisted handle for `key`, if any caller holds one.
	pub(crate) fn loaded(&self, key: &IdentityKey) -> Option<MemberHandle> {
		self.loaded.get(key).and_then(Weak::upgrade)
	}

	/// Registers a persisted handle unless a live one is already registered.
	pub(crate) fn register_loaded(&mut self, record: &MemberHandle) {
		if self.loaded(record.key()).is_some() {
			return;
		}
		self.loaded.insert(record.key().clone(), Arc::downgrade(record));
		if self.loaded.len() >= self.sweep_at {
			self.loaded.retain(|_, handle| handle.strong_count() > 0);
			self.sweep_at = (self.loaded.len() * 2).max(SWEEP_FLOOR);
		}
	}

	/// Forgets the persisted handle for `key`.
	pub(crate) fn forget_loaded(&mut self, key: &IdentityKey) {
		self.loaded.remove(key);
	}
}

/// Process-scoped registry of member records held in memory.
///
/// Staged records (never written) are owned here until their first write
/// promotes them. Persisted records are tracked weakly while some caller
/// holds them, so every lookup of a key hands out the same instance.
///
/// Created alongside a [`MemberDataTool`](crate::MemberDataTool) (or injected
/// through [`MemberDataTool::with_staging`](crate::MemberDataTool::with_staging)
/// to share it between tools). Nothing here is durable.
#[derive(Debug, Default)]
pub struct StagingCache {
	entries: Mutex<Entries>,
}

impl StagingCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the staged record for `key`, if any.
	pub fn get(&self, key: &IdentityKey) -> Option<MemberHandle> {
		self.entries.lock().staged.get(key).cloned()
	}

	pub fn contains(&self, key: &IdentityKey) -> bool {
		self.entries.lock().staged.contains_key(key)
	}

	/// Returns the staged keys in no particular order.
	pub fn keys(&self) -> Vec<IdentityKey> {
		self.entries.lock().staged.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().staged.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().staged.is_empty()
	}

	/// Drops every staged record.
	///
	/// Handles already given out stay usable; writing through one still
	/// promotes it, on top of whatever the store holds by then.
	pub fn clear(&self) {
		self.entries.lock().staged.clear();
	}

	/// Locks the registry. Population, promotion and eviction happen under
	/// this lock so a key is never staged and stored at the same time.
	pub(crate) fn lock(&self) -> MutexGuard<'_, Entries> {
		self.entries.lock()
	}
}
