use std::collections::BTreeMap;

use roster_primitives::{IdentityKey, PropertyValue};

/// Snapshot of one identity as the provider sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
	key: IdentityKey,
	roles: Vec<String>,
	domains: Vec<String>,
	credential_hash: Option<String>,
	attributes: BTreeMap<String, PropertyValue>,
}

impl Identity {
	/// Creates an identity with no roles, domains, credential, or attributes.
	pub fn new(key: impl Into<IdentityKey>) -> Self {
		Self {
			key: key.into(),
			roles: Vec::new(),
			domains: Vec::new(),
			credential_hash: None,
			attributes: BTreeMap::new(),
		}
	}

	/// Sets the roles.
	pub fn with_roles<I, S>(mut self, roles: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.roles = roles.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the domain restrictions.
	pub fn with_domains<I, S>(mut self, domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.domains = domains.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the stored credential hash.
	pub fn with_credential_hash(mut self, hash: impl Into<String>) -> Self {
		self.credential_hash = Some(hash.into());
		self
	}

	/// Adds a provider attribute.
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}

	pub fn key(&self) -> &IdentityKey {
		&self.key
	}

	pub fn roles(&self) -> &[String] {
		&self.roles
	}

	pub fn domains(&self) -> &[String] {
		&self.domains
	}

	pub fn credential_hash(&self) -> Option<&str> {
		self.credential_hash.as_deref()
	}

	/// Returns true if the identity holds `role`.
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r == role)
	}

	/// Looks up a named attribute.
	///
	/// `id` and `username` always answer with the key; every other name is
	/// read from the provider's attribute map.
	pub fn get_attribute(&self, name: &str) -> Option<PropertyValue> {
		match name {
			"id" | "username" => Some(PropertyValue::String(self.key.to_string())),
			_ => self.attributes.get(name).cloned(),
		}
	}

	/// Like [`Identity::get_attribute`], substituting `default` when absent.
	pub fn get_attribute_or(&self, name: &str, default: Option<PropertyValue>) -> Option<PropertyValue> {
		self.get_attribute(name).or(default)
	}

	/// Iterates over provider attributes in name order.
	pub fn attributes(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
		self.attributes.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub(crate) fn set_attribute(&mut self, name: String, value: PropertyValue) {
		self.attributes.insert(name, value);
	}

	pub(crate) fn set_credential_hash(&mut self, hash: String) {
		self.credential_hash = Some(hash);
	}

	pub(crate) fn set_roles(&mut self, roles: Vec<String>) {
		self.roles = roles;
	}

	pub(crate) fn set_domains(&mut self, domains: Vec<String>) {
		self.domains = domains;
	}
}
