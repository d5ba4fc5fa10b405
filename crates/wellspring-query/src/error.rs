//! Query layer errors

use thiserror::Error;

/// Errors raised while running statements through a query factory
#[derive(Debug, Error)]
pub enum QueryError {
	/// Error surfaced unchanged from the underlying driver
	#[error("database driver error: {0}")]
	Driver(#[from] sqlx::Error),

	/// A requested column is absent from the row
	#[error("column not found: {0}")]
	ColumnNotFound(String),

	/// A column value could not be converted to the requested type
	#[error("type mismatch: {0}")]
	TypeMismatch(String),
}

/// Result alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
