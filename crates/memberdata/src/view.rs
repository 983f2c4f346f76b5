use roster_identity::Identity;
use roster_primitives::{IdentityKey, PropertyValue};

use crate::resolve::resolve_property;
use crate::{MemberDataError, MemberDataTool, MemberHandle, Result};

/// Names owned by the identity provider. Reads of these never consult the
/// record's overrides, and writes never store them.
pub const RESERVED_FIELDS: &[&str] = &[
	"id",
	"key",
	"username",
	"roles",
	"domains",
	"credential",
	"password",
];

/// Returns true if `name` is owned by the identity provider.
pub fn is_reserved(name: &str) -> bool {
	RESERVED_FIELDS.contains(&name)
}

/// A member record paired with its tool and current identity.
///
/// Built per access by [`resolve_view`] or [`MemberDataTool::view`] and meant
/// to be dropped when the operation that asked for it ends: the identity is a
/// snapshot and goes stale as soon as the provider changes it.
#[derive(Debug)]
pub struct View<'a> {
	tool: &'a MemberDataTool,
	record: MemberHandle,
	identity: Identity,
}

/// Composes a view from its parts.
///
/// Fails with [`MemberDataError::IdentityUnavailable`] when `identity` is
/// missing or belongs to a different key than `record`.
pub fn resolve_view(
	tool: &MemberDataTool,
	record: MemberHandle,
	identity: Option<Identity>,
) -> Result<View<'_>> {
	let identity = identity
		.filter(|identity| identity.key() == record.key())
		.ok_or_else(|| MemberDataError::IdentityUnavailable(record.key().clone()))?;

	Ok(View {
		tool,
		record,
		identity,
	})
}

impl<'a> View<'a> {
	pub fn key(&self) -> &IdentityKey {
		self.record.key()
	}

	/// Returns the login name, which is the identity key.
	pub fn username(&self) -> &str {
		self.identity.key().as_str()
	}

	pub fn record(&self) -> &MemberHandle {
		&self.record
	}

	pub fn identity(&self) -> &Identity {
		&self.identity
	}

	pub fn tool(&self) -> &'a MemberDataTool {
		self.tool
	}

	pub fn roles(&self) -> &[String] {
		self.identity.roles()
	}

	pub fn domains(&self) -> &[String] {
		self.identity.domains()
	}

	pub fn has_role(&self, role: &str) -> bool {
		self.identity.has_role(role)
	}

	pub fn credential_hash(&self) -> Option<&str> {
		self.identity.credential_hash()
	}

	/// Attribute-style lookup: the record's override, then the identity's
	/// attribute. Provider-owned names go straight to the identity.
	pub fn get(&self, name: &str) -> Option<PropertyValue> {
		match name {
			"roles" => Some(PropertyValue::Lines(self.roles().to_vec())),
			"domains" => Some(PropertyValue::Lines(self.domains().to_vec())),
			"credential" | "password" => self.credential_hash().map(PropertyValue::from),
			"key" => Some(PropertyValue::from(self.key().as_str())),
			_ if is_reserved(name) => self.identity.get_attribute(name),
			_ => self
				.record
				.override_value(name)
				.or_else(|| self.identity.get_attribute(name)),
		}
	}

	/// Resolves a property through all three layers.
	pub fn property(&self, name: &str, fallback: Option<PropertyValue>) -> Result<PropertyValue> {
		let schema = self.tool.schema();
		resolve_property(&self.record, &schema, &self.identity, name, fallback)
	}

	/// Resolves every schema property, in schema order.
	pub fn properties(&self) -> Result<Vec<(String, PropertyValue)>> {
		let schema = self.tool.schema();
		schema
			.iter()
			.map(|def| {
				let value = resolve_property(&self.record, &schema, &self.identity, &def.name, None)?;
				Ok((def.name.clone(), value))
			})
			.collect()
	}
}
