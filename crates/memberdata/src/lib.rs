//! Member data layered over an identity provider.
//!
//! [`MemberDataTool`] attaches profile properties to identities without
//! touching the provider. Each identity gets at most one [`MemberRecord`]:
//!
//! - first access stages an empty record in the [`StagingCache`] (in memory
//!   only, so read-only identities never cost a store write);
//! - the first property write promotes it into the
//!   [`RecordStore`](roster_store::RecordStore);
//! - [`MemberDataTool::prune`] removes stored records whose identity is gone.
//!
//! Property reads merge the record's overrides, the schema defaults, and the
//! live identity; see [`resolve`] for the precedence rules. A [`View`] pairs
//! a record with its current identity for the span of one operation.

mod error;
mod locks;
mod maintenance;
mod record;
pub mod resolve;
mod security;
mod staging;
mod tool;
mod view;

pub use error::{MemberDataError, Result};
pub use maintenance::{MemberDataStats, SearchHit};
pub use record::{Lifecycle, MemberHandle, MemberRecord};
pub use resolve::{merge_layers, resolve_property};
pub use roster_identity::{Identity, IdentityKey, IdentityProvider};
pub use roster_primitives::{PropertyType, PropertyValue};
pub use roster_schema::PropertySchema;
pub use security::SecurityProfile;
pub use staging::StagingCache;
pub use tool::{MemberDataTool, WriteReport};
pub use view::{RESERVED_FIELDS, View, is_reserved, resolve_view};
