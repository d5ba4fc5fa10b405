//! Pool configuration carried through the configuration stage

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Pool-tuning parameters collected by the configuration stage.
///
/// Written incrementally by the stage setters and read exactly once at
/// terminal build time, when the values are copied onto the wrapped pool's
/// options. Credentials live here rather than in the dialect options; they
/// are applied to the connection URL only while building.
#[non_exhaustive]
#[derive(Clone)]
pub struct PoolSettings {
	/// Upper bound on open connections
	pub max_connections: u32,
	/// Number of idle connections the pool tries to keep around
	pub min_connections: u32,
	/// Maximum time to wait for a connection before giving up
	pub acquire_timeout: Duration,
	/// Connections idle longer than this are closed
	pub idle_timeout: Option<Duration>,
	/// Connections older than this are recycled
	pub max_lifetime: Option<Duration>,
	/// Validate connections before handing them out
	pub test_before_acquire: bool,
	/// User name applied to the connection URL at build time
	pub username: Option<String>,
	/// Password applied to the connection URL at build time
	pub password: Option<String>,
	/// Schema selected on every fresh connection
	pub schema: Option<String>,
	/// Label used in log output for this pool
	pub pool_name: Option<String>,
}

impl Default for PoolSettings {
	fn default() -> Self {
		Self {
			max_connections: 10,
			min_connections: 1,
			acquire_timeout: Duration::from_secs(30),
			idle_timeout: Some(Duration::from_secs(600)),
			max_lifetime: Some(Duration::from_secs(1800)),
			test_before_acquire: false,
			username: None,
			password: None,
			schema: None,
			pool_name: None,
		}
	}
}

impl PoolSettings {
	/// Create settings with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Check that the parameters describe a usable pool
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_connections == 0 {
			return Err(ConfigError::InvalidPool(
				"max_connections must be greater than zero".to_string(),
			));
		}
		if self.min_connections > self.max_connections {
			return Err(ConfigError::InvalidPool(
				"min_connections must not exceed max_connections".to_string(),
			));
		}
		Ok(())
	}
}

impl fmt::Debug for PoolSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Redact the password so settings can be logged safely.
		f.debug_struct("PoolSettings")
			.field("max_connections", &self.max_connections)
			.field("min_connections", &self.min_connections)
			.field("acquire_timeout", &self.acquire_timeout)
			.field("idle_timeout", &self.idle_timeout)
			.field("max_lifetime", &self.max_lifetime)
			.field("test_before_acquire", &self.test_before_acquire)
			.field("username", &self.username)
			.field("password", &self.password.as_ref().map(|_| "***"))
			.field("schema", &self.schema)
			.field("pool_name", &self.pool_name)
			.finish()
	}
}
