use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Reading or writing the snapshot file failed.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path of the snapshot file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The snapshot could not be encoded or decoded.
	#[error("snapshot codec error: {0}")]
	Codec(#[from] postcard::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
