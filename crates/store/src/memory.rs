use std::collections::BTreeMap;

use parking_lot::RwLock;
use roster_primitives::IdentityKey;

use crate::{MemberRecordData, RecordStore, Result};

/// In-process record store.
///
/// Thread-safe; concurrent readers share the lock, writers are serialized.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
	records: RwLock<BTreeMap<IdentityKey, MemberRecordData>>,
}

impl MemoryRecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store pre-populated with `records`.
	pub fn with_records(records: impl IntoIterator<Item = MemberRecordData>) -> Self {
		let records = records.into_iter().map(|r| (r.key.clone(), r)).collect();
		Self {
			records: RwLock::new(records),
		}
	}
}

impl RecordStore for MemoryRecordStore {
	fn get(&self, key: &IdentityKey) -> Result<Option<MemberRecordData>> {
		Ok(self.records.read().get(key).cloned())
	}

	fn put(&self, record: MemberRecordData) -> Result<()> {
		self.records.write().insert(record.key.clone(), record);
		Ok(())
	}

	fn delete(&self, key: &IdentityKey) -> Result<bool> {
		Ok(self.records.write().remove(key).is_some())
	}

	fn keys(&self) -> Result<Vec<IdentityKey>> {
		Ok(self.records.read().keys().cloned().collect())
	}

	fn len(&self) -> Result<usize> {
		Ok(self.records.read().len())
	}
}
