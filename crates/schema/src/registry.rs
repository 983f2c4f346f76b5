use indexmap::IndexMap;
use roster_primitives::{PropertyType, PropertyValue};
use tracing::debug;

use crate::coerce::coerce_value;
use crate::{PropertyDef, SchemaError};


/// Ordered registry of member property definitions.
///
/// Lookup is by name; iteration follows definition order, which is only
/// meaningful for listings.
#[derive(Debug, Clone, Default)]
pub struct PropertySchema {
	defs: IndexMap<String, PropertyDef>,
}

impl PropertySchema {
	/// Creates an empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Defines a new property.
	///
	/// The default is coerced to `value_type`, so string defaults such as
	/// `"2000/01/01"` for a date property are accepted.
	pub fn define(
		&mut self,
		name: impl Into<String>,
		value_type: PropertyType,
		default: impl Into<PropertyValue>,
	) -> Result<&PropertyDef, SchemaError> {
		let name = name.into();
		if self.defs.contains_key(&name) {
			return Err(SchemaError::Duplicate(name));
		}
		let default = coerce_value(&name, value_type, default.into())?;
		debug!(name = %name, value_type = %value_type, "property defined");

		let def = PropertyDef::new(name.clone(), value_type, default);
		let entry = self.defs.entry(name).or_insert(def);
		Ok(entry)
	}

	/// Replaces the default value of an existing property.
	pub fn set_default(&mut self, name: &str, default: impl Into<PropertyValue>) -> Result<(), SchemaError> {
		let def = self
			.defs
			.get_mut(name)
			.ok_or_else(|| SchemaError::NotDefined(name.to_string()))?;
		def.default = coerce_value(name, def.value_type, default.into())?;
		Ok(())
	}

	/// Removes a property definition, preserving the order of the rest.
	pub fn remove(&mut self, name: &str) -> Option<PropertyDef> {
		self.defs.shift_remove(name)
	}

	/// Looks a definition up by name; `None` means not defined.
	pub fn lookup(&self, name: &str) -> Option<&PropertyDef> {
		self.defs.get(name)
	}

	/// Returns true if `name` is defined.
	pub fn contains(&self, name: &str) -> bool {
		self.defs.contains_key(name)
	}

	/// Returns the property names in definition order.
	pub fn list_names(&self) -> Vec<&str> {
		self.defs.keys().map(String::as_str).collect()
	}

	/// Iterates over definitions in definition order.
	pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
		self.defs.values()
	}

	/// Returns the number of defined properties.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Returns `true` if no property is defined.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}
}
