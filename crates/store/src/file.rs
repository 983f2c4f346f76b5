use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use roster_primitives::IdentityKey;
use tracing::debug;

use crate::{MemberRecordData, RecordStore, Result, StoreError};

#[cfg(test)]
mod tests;

/// Record store persisted as a single `postcard` snapshot file.
///
/// Every mutation rewrites the snapshot through a sibling temporary file and
/// a rename, so a crash leaves either the old or the new snapshot on disk.
/// The in-memory map is only updated once the snapshot has been written.
#[derive(Debug)]
pub struct FileRecordStore {
	path: PathBuf,
	records: RwLock<BTreeMap<IdentityKey, MemberRecordData>>,
}

impl FileRecordStore {
	/// Opens the snapshot at `path`, starting empty if the file does not exist.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let records = match fs::read(&path) {
			Ok(bytes) => decode(&bytes)?,
			Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
			Err(error) => return Err(StoreError::Io { path, error }),
		};
		debug!(path = %path.display(), count = records.len(), "record snapshot loaded");
		Ok(Self {
			path,
			records: RwLock::new(records),
		})
	}

	/// Path of the snapshot file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn persist(&self, records: &BTreeMap<IdentityKey, MemberRecordData>) -> Result<()> {
		let snapshot: Vec<&MemberRecordData> = records.values().collect();
		let bytes = postcard::to_stdvec(&snapshot)?;

		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).map_err(|error| self.io_error(parent, error))?;
		}
		let tmp = self.path.with_extension("tmp");
		fs::write(&tmp, bytes).map_err(|error| self.io_error(&tmp, error))?;
		fs::rename(&tmp, &self.path).map_err(|error| self.io_error(&self.path, error))
	}

	fn io_error(&self, path: &Path, error: std::io::Error) -> StoreError {
		StoreError::Io {
			path: path.to_path_buf(),
			error,
		}
	}
}

fn decode(bytes: &[u8]) -> Result<BTreeMap<IdentityKey, MemberRecordData>> {
	let snapshot: Vec<MemberRecordData> = postcard::from_bytes(bytes)?;
	Ok(snapshot.into_iter().map(|r| (r.key.clone(), r)).collect())
}

impl RecordStore for FileRecordStore {
	fn get(&self, key: &IdentityKey) -> Result<Option<MemberRecordData>> {
		Ok(self.records.read().get(key).cloned())
	}

	fn put(&self, record: MemberRecordData) -> Result<()> {
		let mut records = self.records.write();
		let mut next = records.clone();
		next.insert(record.key.clone(), record);
		self.persist(&next)?;
		*records = next;
		Ok(())
	}

	fn delete(&self, key: &IdentityKey) -> Result<bool> {
		let mut records = self.records.write();
		if !records.contains_key(key) {
			return Ok(false);
		}
		let mut next = records.clone();
		next.remove(key);
		self.persist(&next)?;
		*records = next;
		Ok(true)
	}

	fn keys(&self) -> Result<Vec<IdentityKey>> {
		Ok(self.records.read().keys().cloned().collect())
	}

	fn len(&self) -> Result<usize> {
		Ok(self.records.read().len())
	}
}
