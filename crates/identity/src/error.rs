use roster_primitives::IdentityKey;
use thiserror::Error;

/// Errors reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
	/// No identity exists for the key.
	#[error("identity not found: {0}")]
	NotFound(IdentityKey),

	/// The provider refuses to change the security profile.
	#[error("identity provider is read-only")]
	ReadOnly,
}
