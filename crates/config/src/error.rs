//! Error types for configuration loading.

use std::path::PathBuf;

use roster_schema::{CoercionError, SchemaError};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A property default does not coerce to the declared type.
	#[error("invalid default for property '{name}': {error}")]
	InvalidDefault {
		/// Property name as written in the file.
		name: String,
		/// The coercion failure.
		error: CoercionError,
	},

	/// A property definition was rejected by the schema.
	#[error(transparent)]
	Schema(SchemaError),

	/// A TOML value has no property value equivalent.
	#[error("unsupported value for '{name}': {kind}")]
	UnsupportedValue {
		/// Property or attribute name.
		name: String,
		/// TOML type of the offending value.
		kind: &'static str,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
