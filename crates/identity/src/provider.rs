use roster_primitives::IdentityKey;

use crate::{Identity, IdentityError};

/// Source of identities consumed by the member data tool.
///
/// `lookup` returns a snapshot; callers must not hold on to it across
/// operations, since the provider may change the identity at any time.
pub trait IdentityProvider: Send + Sync {
	/// Resolves a key to its current identity.
	fn lookup(&self, key: &IdentityKey) -> Option<Identity>;

	/// Lists every key the provider currently knows.
	fn list_keys(&self) -> Vec<IdentityKey>;

	/// Replaces the identity's credential with one derived from `password`.
	fn set_credential(&self, key: &IdentityKey, password: &str) -> Result<(), IdentityError>;

	/// Replaces the identity's roles.
	fn set_roles(&self, key: &IdentityKey, roles: Vec<String>) -> Result<(), IdentityError>;

	/// Replaces the identity's domain restrictions.
	fn set_domains(&self, key: &IdentityKey, domains: Vec<String>) -> Result<(), IdentityError>;
}
