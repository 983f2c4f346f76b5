//! Configuration for roster.
//!
//! A single TOML file describes where member records live, which properties
//! members carry, and (for the in-memory provider) which identities exist:
//!
//! ```toml
//! [store]
//! path = "members.bin"
//!
//! [[property]]
//! name = "email"
//! type = "string"
//! default = ""
//!
//! [[identity]]
//! key = "jdoe"
//! roles = ["Member"]
//! password = "secret"
//! attributes = { fullname = "J. Doe" }
//! ```
//!
//! Without any `[[property]]` tables the standard member properties are used.
//! A relative store path is resolved against the directory of the file it
//! was read from.

pub mod error;
mod value;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
use roster_identity::{Identity, MemoryIdentityProvider, hash_credential};
use roster_primitives::PropertyType;
use roster_schema::{PropertySchema, SchemaError, standard_schema};
use serde::Deserialize;
use tracing::debug;

/// Parsed configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
	/// Record store settings.
	pub store: StoreConfig,
	/// Property definitions, in schema order.
	#[serde(rename = "property")]
	pub properties: Vec<PropertyConfig>,
	/// Identities seeded into the in-memory provider.
	#[serde(rename = "identity")]
	pub identities: Vec<IdentityConfig>,
	#[serde(skip)]
	base_dir: Option<PathBuf>,
}

/// `[store]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	/// Snapshot file for member records.
	pub path: Option<PathBuf>,
}

/// One `[[property]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyConfig {
	pub name: String,
	#[serde(rename = "type")]
	pub value_type: PropertyType,
	/// Raw default; the type's empty value when omitted.
	#[serde(default)]
	pub default: Option<toml::Value>,
}

/// One `[[identity]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
	pub key: String,
	#[serde(default)]
	pub roles: Vec<String>,
	#[serde(default)]
	pub domains: Vec<String>,
	/// Plain-text password; hashed before it reaches the provider.
	#[serde(default)]
	pub password: Option<String>,
	#[serde(default)]
	pub attributes: BTreeMap<String, toml::Value>,
}

impl RosterConfig {
	/// Parses a TOML string into a [`RosterConfig`].
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let mut config = Self::parse(&content)?;
		config.base_dir = path.parent().map(Path::to_path_buf);
		debug!(
			path = %path.display(),
			properties = config.properties.len(),
			identities = config.identities.len(),
			"config loaded"
		);
		Ok(config)
	}

	/// Loads `path`, or the default location when `None`.
	///
	/// A missing file at the default location yields an empty configuration;
	/// an explicitly named file must exist.
	pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
		if let Some(path) = path {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.exists() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}

	/// Builds the property schema this configuration declares.
	pub fn schema(&self) -> Result<PropertySchema> {
		if self.properties.is_empty() {
			return Ok(standard_schema());
		}

		let mut schema = PropertySchema::new();
		for prop in &self.properties {
			let default = match &prop.default {
				Some(raw) => value::typed(&prop.name, prop.value_type, raw)?,
				None => value::empty(prop.value_type),
			};
			schema
				.define(prop.name.as_str(), prop.value_type, default)
				.map_err(|err| match err {
					SchemaError::Default(error) => ConfigError::InvalidDefault {
						name: prop.name.clone(),
						error,
					},
					other => ConfigError::Schema(other),
				})?;
		}
		Ok(schema)
	}

	/// Converts the `[[identity]]` tables into provider identities.
	pub fn identities(&self) -> Result<Vec<Identity>> {
		self.identities.iter().map(IdentityConfig::to_identity).collect()
	}

	/// Builds an in-memory provider seeded with [`Self::identities`].
	pub fn provider(&self) -> Result<MemoryIdentityProvider> {
		Ok(MemoryIdentityProvider::with_identities(self.identities()?))
	}

	/// Snapshot path for the record store, if configured.
	pub fn store_path(&self) -> Option<PathBuf> {
		let path = self.store.path.as_ref()?;
		match &self.base_dir {
			Some(base) if path.is_relative() => Some(base.join(path)),
			_ => Some(path.clone()),
		}
	}
}

impl IdentityConfig {
	fn to_identity(&self) -> Result<Identity> {
		let mut identity = Identity::new(self.key.as_str())
			.with_roles(self.roles.iter().cloned())
			.with_domains(self.domains.iter().cloned());
		if let Some(password) = &self.password {
			identity = identity.with_credential_hash(hash_credential(password));
		}
		for (name, raw) in &self.attributes {
			identity = identity.with_attribute(name.as_str(), value::untyped(name, raw)?);
		}
		Ok(identity)
	}
}

/// `$XDG_CONFIG_HOME/roster/config.toml` or the platform equivalent.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("roster").join("config.toml"))
}

/// Store location used when the configuration names none.
pub fn default_store_path() -> Option<PathBuf> {
	dirs::data_dir().map(|dir| dir.join("roster").join("members.bin"))
}

#[cfg(test)]
mod tests;
