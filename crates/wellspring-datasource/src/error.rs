//! Error types for data-source construction

use thiserror::Error;

/// Errors raised while validating builder configuration
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A required dialect identity parameter was never supplied
	#[error("missing required connection parameter `{field}` for {dialect}")]
	MissingParameter {
		/// Dialect the builder was configuring
		dialect: &'static str,
		/// Name of the absent parameter
		field: &'static str,
	},

	/// Pool parameters do not describe a usable pool
	#[error("invalid pool configuration: {0}")]
	InvalidPool(String),

	/// The assembled connection URL could not be manipulated
	#[error("invalid connection url: {0}")]
	InvalidUrl(String),
}

/// Errors raised while building or using a data source
#[derive(Debug, Error)]
pub enum SourceError {
	/// Builder configuration was incomplete or inconsistent
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Error surfaced unchanged from the wrapped pool or driver
	#[error("database driver error: {0}")]
	Driver(#[from] sqlx::Error),
}

/// Result alias for data-source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;
