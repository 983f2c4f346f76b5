use roster_primitives::PropertyType;
use thiserror::Error;

/// A written value could not be converted to its declared property type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
	/// The string form could not be parsed as the declared type.
	#[error("invalid value for property '{property}': {reason}")]
	InvalidValue {
		/// Property being written.
		property: String,
		/// Parser diagnostic.
		reason: String,
	},

	/// A typed value was written to a property of a different type.
	#[error("type mismatch for property '{property}': expected {expected}, got {got}")]
	TypeMismatch {
		/// Property being written.
		property: String,
		/// Declared type.
		expected: PropertyType,
		/// Type name of the offending value.
		got: &'static str,
	},
}

impl CoercionError {
	/// Returns the property the failed value was destined for.
	pub fn property(&self) -> &str {
		match self {
			CoercionError::InvalidValue { property, .. }
			| CoercionError::TypeMismatch { property, .. } => property,
		}
	}
}

/// Errors raised while maintaining the schema registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
	/// A property with this name is already defined.
	#[error("property already defined: {0}")]
	Duplicate(String),

	/// The named property is not defined.
	#[error("property not defined: {0}")]
	NotDefined(String),

	/// A definition's default does not match its declared type.
	#[error(transparent)]
	Default(#[from] CoercionError),
}
