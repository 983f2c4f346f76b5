//! Identity provider contract.
//!
//! The provider is the system of record for login identities: keys, roles,
//! domains, credentials, and open-ended attributes. Member data is layered on
//! top of it and never writes attributes back; only the security profile
//! (credential, roles, domains) is mutable through [`IdentityProvider`].

mod error;
mod identity;
mod memory;
mod provider;

pub use error::IdentityError;
pub use identity::Identity;
pub use memory::{MemoryIdentityProvider, hash_credential};
pub use provider::IdentityProvider;
pub use roster_primitives::IdentityKey;
