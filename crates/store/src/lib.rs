//! Durable record store for member data.
//!
//! A [`RecordStore`] maps identity keys to [`MemberRecordData`]. `put` is an
//! idempotent upsert, so promoting the same record twice never yields two
//! entries. [`MemoryRecordStore`] keeps everything in process;
//! [`FileRecordStore`] additionally writes a snapshot file on every mutation.

mod error;
mod file;
mod memory;
mod record;

pub use error::{Result, StoreError};
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use record::MemberRecordData;
use roster_primitives::IdentityKey;

/// Durable mapping from identity key to member record data.
pub trait RecordStore: Send + Sync {
	/// Returns the stored record for `key`, if any.
	fn get(&self, key: &IdentityKey) -> Result<Option<MemberRecordData>>;

	/// Inserts or replaces the record stored under `record.key`.
	fn put(&self, record: MemberRecordData) -> Result<()>;

	/// Deletes the record for `key`, returning whether one existed.
	fn delete(&self, key: &IdentityKey) -> Result<bool>;

	/// Returns every stored key in key order.
	fn keys(&self) -> Result<Vec<IdentityKey>>;

	/// Returns the number of stored records.
	fn len(&self) -> Result<usize> {
		Ok(self.keys()?.len())
	}

	/// Returns `true` if no record is stored.
	fn is_empty(&self) -> Result<bool> {
		Ok(self.len()? == 0)
	}
}
