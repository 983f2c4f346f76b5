use roster_identity::{IdentityError, IdentityKey};
use roster_schema::CoercionError;
use roster_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the member data tool.
#[derive(Debug, Error)]
pub enum MemberDataError {
	/// The identity backing a member record cannot be found, or a view was
	/// composed with an identity that does not belong to the record.
	#[error("can't find user data for {0}")]
	IdentityUnavailable(IdentityKey),

	/// The property is neither defined in the schema nor supplied by the identity.
	#[error("property not found: {0}")]
	PropertyNotFound(String),

	/// A security-profile declaration could not be parsed.
	#[error("invalid security declaration: {0}")]
	InvalidSecurityDeclaration(String),

	/// A written value could not be converted to its declared type.
	#[error(transparent)]
	Coercion(#[from] CoercionError),

	/// The record store failed.
	#[error(transparent)]
	Store(#[from] StoreError),

	/// The identity provider rejected a security-profile change.
	#[error(transparent)]
	Identity(IdentityError),
}

impl From<IdentityError> for MemberDataError {
	fn from(err: IdentityError) -> Self {
		match err {
			IdentityError::NotFound(key) => MemberDataError::IdentityUnavailable(key),
			other => MemberDataError::Identity(other),
		}
	}
}

/// Result type for member data operations.
pub type Result<T> = std::result::Result<T, MemberDataError>;
