use std::collections::BTreeMap;
use std::fmt::Write as _;

use parking_lot::RwLock;
use roster_primitives::{IdentityKey, PropertyValue};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{Identity, IdentityError, IdentityProvider};


/// Hex-encoded SHA-256 digest of a password, as stored by
/// [`MemoryIdentityProvider`].
pub fn hash_credential(password: &str) -> String {
	let digest = Sha256::digest(password.as_bytes());
	let mut hex = String::with_capacity(digest.len() * 2);
	for byte in digest {
		let _ = write!(hex, "{byte:02x}");
	}
	hex
}

/// Process-local identity provider.
///
/// Thread-safe; share it via `Arc<MemoryIdentityProvider>`. Every lookup
/// returns a fresh snapshot, so later changes are never visible through an
/// identity obtained earlier.
#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
	identities: RwLock<BTreeMap<IdentityKey, Identity>>,
}

impl MemoryIdentityProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a provider holding `identities`.
	pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
		let provider = Self::new();
		for identity in identities {
			provider.insert(identity);
		}
		provider
	}

	/// Adds or replaces an identity.
	pub fn insert(&self, identity: Identity) {
		self.identities.write().insert(identity.key().clone(), identity);
	}

	/// Removes an identity, returning its last snapshot.
	pub fn remove(&self, key: &IdentityKey) -> Option<Identity> {
		self.identities.write().remove(key)
	}

	/// Sets a provider attribute on an existing identity.
	pub fn set_attribute(
		&self,
		key: &IdentityKey,
		name: impl Into<String>,
		value: impl Into<PropertyValue>,
	) -> Result<(), IdentityError> {
		self.with_identity(key, |identity| identity.set_attribute(name.into(), value.into()))
	}

	pub fn len(&self) -> usize {
		self.identities.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.identities.read().is_empty()
	}

	fn with_identity(&self, key: &IdentityKey, f: impl FnOnce(&mut Identity)) -> Result<(), IdentityError> {
		let mut identities = self.identities.write();
		let identity = identities
			.get_mut(key)
			.ok_or_else(|| IdentityError::NotFound(key.clone()))?;
		f(identity);
		Ok(())
	}
}

impl IdentityProvider for MemoryIdentityProvider {
	fn lookup(&self, key: &IdentityKey) -> Option<Identity> {
		self.identities.read().get(key).cloned()
	}

	fn list_keys(&self) -> Vec<IdentityKey> {
		self.identities.read().keys().cloned().collect()
	}

	fn set_credential(&self, key: &IdentityKey, password: &str) -> Result<(), IdentityError> {
		let hash = hash_credential(password);
		self.with_identity(key, |identity| identity.set_credential_hash(hash))?;
		debug!(key = %key, "credential replaced");
		Ok(())
	}

	fn set_roles(&self, key: &IdentityKey, roles: Vec<String>) -> Result<(), IdentityError> {
		self.with_identity(key, |identity| identity.set_roles(roles))
	}

	fn set_domains(&self, key: &IdentityKey, domains: Vec<String>) -> Result<(), IdentityError> {
		self.with_identity(key, |identity| identity.set_domains(domains))
	}
}
