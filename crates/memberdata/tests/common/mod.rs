#![allow(dead_code)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use roster_identity::{Identity, IdentityError, MemoryIdentityProvider};
use roster_memberdata::{IdentityKey, IdentityProvider, MemberDataTool};
use roster_store::{MemberRecordData, MemoryRecordStore, RecordStore, StoreError};

pub struct Fixture {
	pub provider: Arc<MemoryIdentityProvider>,
	pub store: Arc<MemoryRecordStore>,
	pub tool: MemberDataTool,
}

pub fn fixture(identities: impl IntoIterator<Item = Identity>) -> Fixture {
	fixture_with_records(identities, Vec::<MemberRecordData>::new())
}

pub fn empty_fixture() -> Fixture {
	fixture(Vec::<Identity>::new())
}

pub fn fixture_with_records(
	identities: impl IntoIterator<Item = Identity>,
	records: impl IntoIterator<Item = MemberRecordData>,
) -> Fixture {
	let provider = Arc::new(MemoryIdentityProvider::with_identities(identities));
	let store = Arc::new(MemoryRecordStore::with_records(records));
	let tool = MemberDataTool::new(provider.clone(), store.clone());
	Fixture { provider, store, tool }
}

pub fn key(name: &str) -> IdentityKey {
	IdentityKey::from(name)
}

/// Provider that fails the test if it is ever consulted.
pub struct UnreachableProvider;

impl IdentityProvider for UnreachableProvider {
	fn lookup(&self, key: &IdentityKey) -> Option<Identity> {
		panic!("identity provider queried for {key}")
	}

	fn list_keys(&self) -> Vec<IdentityKey> {
		panic!("identity provider listed")
	}

	fn set_credential(&self, _: &IdentityKey, _: &str) -> Result<(), IdentityError> {
		panic!("identity provider mutated")
	}

	fn set_roles(&self, _: &IdentityKey, _: Vec<String>) -> Result<(), IdentityError> {
		panic!("identity provider mutated")
	}

	fn set_domains(&self, _: &IdentityKey, _: Vec<String>) -> Result<(), IdentityError> {
		panic!("identity provider mutated")
	}
}

/// In-memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
	inner: MemoryRecordStore,
	failing: AtomicBool,
}

impl FlakyStore {
	pub fn fail_writes(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	fn check(&self) -> Result<(), StoreError> {
		if self.failing.load(Ordering::SeqCst) {
			return Err(StoreError::Io {
				path: PathBuf::from("flaky"),
				error: io::Error::other("write refused"),
			});
		}
		Ok(())
	}
}

impl RecordStore for FlakyStore {
	fn get(&self, key: &IdentityKey) -> Result<Option<MemberRecordData>, StoreError> {
		self.inner.get(key)
	}

	fn put(&self, record: MemberRecordData) -> Result<(), StoreError> {
		self.check()?;
		self.inner.put(record)
	}

	fn delete(&self, key: &IdentityKey) -> Result<bool, StoreError> {
		self.check()?;
		self.inner.delete(key)
	}

	fn keys(&self) -> Result<Vec<IdentityKey>, StoreError> {
		self.inner.keys()
	}
}
