//! TOML values to property values.

use roster_primitives::{PropertyType, PropertyValue};
use roster_schema::builtins::EPOCH_DATE;

use crate::{ConfigError, Result};

/// Converts a default for a property of type `ty`.
///
/// Integers widen to floats for float properties; dates and strings pass
/// through as text so the schema's coercion table decides.
pub(crate) fn typed(name: &str, ty: PropertyType, raw: &toml::Value) -> Result<PropertyValue> {
	match (ty, raw) {
		(PropertyType::Float, toml::Value::Integer(n)) => Ok(PropertyValue::Float(*n as f64)),
		_ => untyped(name, raw),
	}
}

/// Converts a value with no declared type.
pub(crate) fn untyped(name: &str, raw: &toml::Value) -> Result<PropertyValue> {
	let unsupported = || ConfigError::UnsupportedValue {
		name: name.to_string(),
		kind: raw.type_str(),
	};
	Ok(match raw {
		toml::Value::String(s) => PropertyValue::String(s.clone()),
		toml::Value::Boolean(b) => PropertyValue::Bool(*b),
		toml::Value::Integer(n) => PropertyValue::Int(*n),
		toml::Value::Float(f) => PropertyValue::Float(*f),
		toml::Value::Datetime(dt) => PropertyValue::String(dt.to_string()),
		toml::Value::Array(items) => PropertyValue::Lines(
			items
				.iter()
				.map(|item| item.as_str().map(str::to_string))
				.collect::<Option<Vec<_>>>()
				.ok_or_else(unsupported)?,
		),
		toml::Value::Table(_) => return Err(unsupported()),
	})
}

/// Default for a property declared without one.
pub(crate) fn empty(ty: PropertyType) -> PropertyValue {
	match ty {
		PropertyType::Int => PropertyValue::Int(0),
		PropertyType::Float => PropertyValue::Float(0.0),
		PropertyType::Date => PropertyValue::from(EPOCH_DATE),
		PropertyType::String | PropertyType::Text | PropertyType::Boolean | PropertyType::Lines | PropertyType::Tokens => {
			PropertyValue::from("")
		}
	}
}
