//! Database type descriptors and dialect connection options
//!
//! A [`DatabaseType`] names a target dialect at compile time and ties it to
//! the sqlx driver plus the dialect-specific option set the builder collects
//! during its first stage. The options know how to assemble the connection
//! URL; missing identity parameters surface only when the URL is resolved at
//! terminal build time.

#[cfg(feature = "sqlite")]
use std::path::PathBuf;

use crate::error::ConfigError;

/// Compile-time descriptor for a target database dialect.
///
/// Chosen once when entering the staged builder and never changed. The
/// descriptor itself is a zero-sized marker; all mutable state lives in its
/// [`DatabaseType::Options`].
pub trait DatabaseType {
	/// sqlx driver targeted by this dialect
	type Database: sqlx::Database;
	/// Dialect-specific connection options owned by the builder
	type Options;
	/// Dialect name used in logs and error messages
	const NAME: &'static str;

	/// Produce the dialect options with their defaults
	fn options() -> Self::Options;

	/// Resolve the connection URL from the collected options
	fn url(options: &Self::Options) -> Result<String, ConfigError>;
}

/// PostgreSQL database type
#[cfg(feature = "postgres")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

#[cfg(feature = "postgres")]
impl DatabaseType for Postgres {
	type Database = sqlx::Postgres;
	type Options = PostgresOptions;
	const NAME: &'static str = "PostgreSQL";

	fn options() -> PostgresOptions {
		PostgresOptions::default()
	}

	fn url(options: &PostgresOptions) -> Result<String, ConfigError> {
		options.url(Self::NAME)
	}
}

/// MySQL database type
#[cfg(feature = "mysql")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

#[cfg(feature = "mysql")]
impl DatabaseType for MySql {
	type Database = sqlx::MySql;
	type Options = MySqlOptions;
	const NAME: &'static str = "MySQL";

	fn options() -> MySqlOptions {
		MySqlOptions::default()
	}

	fn url(options: &MySqlOptions) -> Result<String, ConfigError> {
		options.url(Self::NAME)
	}
}

/// MariaDB database type.
///
/// Shares the MySQL wire scheme and option set; sqlx connects MariaDB
/// through the MySQL driver.
#[cfg(feature = "mysql")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MariaDb;

#[cfg(feature = "mysql")]
impl DatabaseType for MariaDb {
	type Database = sqlx::MySql;
	type Options = MySqlOptions;
	const NAME: &'static str = "MariaDB";

	fn options() -> MySqlOptions {
		MySqlOptions::default()
	}

	fn url(options: &MySqlOptions) -> Result<String, ConfigError> {
		options.url(Self::NAME)
	}
}

/// SQLite database type
#[cfg(feature = "sqlite")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

#[cfg(feature = "sqlite")]
impl DatabaseType for Sqlite {
	type Database = sqlx::Sqlite;
	type Options = SqliteOptions;
	const NAME: &'static str = "SQLite";

	fn options() -> SqliteOptions {
		SqliteOptions::default()
	}

	fn url(options: &SqliteOptions) -> Result<String, ConfigError> {
		options.url(Self::NAME)
	}
}

/// Connection options for PostgreSQL servers.
///
/// Setters return `&mut Self` so they chain inside the `configure` closure
/// of the dialect stage.
#[cfg(feature = "postgres")]
#[derive(Debug, Clone)]
pub struct PostgresOptions {
	host: Option<String>,
	port: u16,
	database: Option<String>,
	parameters: Vec<(String, String)>,
}

#[cfg(feature = "postgres")]
impl Default for PostgresOptions {
	fn default() -> Self {
		Self {
			host: None,
			port: 5432,
			database: None,
			parameters: Vec::new(),
		}
	}
}

#[cfg(feature = "postgres")]
impl PostgresOptions {
	/// Server hostname or address. Required.
	pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
		self.host = Some(host.into());
		self
	}

	/// Server port. Defaults to 5432.
	pub fn port(&mut self, port: u16) -> &mut Self {
		self.port = port;
		self
	}

	/// Database name. Required.
	pub fn database(&mut self, database: impl Into<String>) -> &mut Self {
		self.database = Some(database.into());
		self
	}

	/// Append a driver parameter to the URL query string.
	pub fn parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.parameters.push((key.into(), value.into()));
		self
	}

	fn url(&self, dialect: &'static str) -> Result<String, ConfigError> {
		let host = self.host.as_deref().ok_or(ConfigError::MissingParameter {
			dialect,
			field: "host",
		})?;
		let database = self
			.database
			.as_deref()
			.ok_or(ConfigError::MissingParameter {
				dialect,
				field: "database",
			})?;

		let mut url = format!("postgres://{host}:{port}/{database}", port = self.port);
		append_query(&mut url, &self.parameters);
		Ok(url)
	}
}

/// Connection options for MySQL and MariaDB servers.
#[cfg(feature = "mysql")]
#[derive(Debug, Clone)]
pub struct MySqlOptions {
	host: Option<String>,
	port: u16,
	database: Option<String>,
	parameters: Vec<(String, String)>,
}

#[cfg(feature = "mysql")]
impl Default for MySqlOptions {
	fn default() -> Self {
		Self {
			host: None,
			port: 3306,
			database: None,
			parameters: Vec::new(),
		}
	}
}

#[cfg(feature = "mysql")]
impl MySqlOptions {
	/// Server hostname or address. Required.
	pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
		self.host = Some(host.into());
		self
	}

	/// Server port. Defaults to 3306.
	pub fn port(&mut self, port: u16) -> &mut Self {
		self.port = port;
		self
	}

	/// Database name. Required.
	pub fn database(&mut self, database: impl Into<String>) -> &mut Self {
		self.database = Some(database.into());
		self
	}

	/// Append a driver parameter to the URL query string.
	pub fn parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.parameters.push((key.into(), value.into()));
		self
	}

	fn url(&self, dialect: &'static str) -> Result<String, ConfigError> {
		let host = self.host.as_deref().ok_or(ConfigError::MissingParameter {
			dialect,
			field: "host",
		})?;
		let database = self
			.database
			.as_deref()
			.ok_or(ConfigError::MissingParameter {
				dialect,
				field: "database",
			})?;

		let mut url = format!("mysql://{host}:{port}/{database}", port = self.port);
		append_query(&mut url, &self.parameters);
		Ok(url)
	}
}

/// Connection options for SQLite databases.
///
/// Either a file path or the in-memory flag is required.
#[cfg(feature = "sqlite")]
#[derive(Debug, Clone, Default)]
pub struct SqliteOptions {
	path: Option<PathBuf>,
	in_memory: bool,
	create_if_missing: bool,
	parameters: Vec<(String, String)>,
}

#[cfg(feature = "sqlite")]
impl SqliteOptions {
	/// Path of the database file
	pub fn path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
		self.path = Some(path.into());
		self
	}

	/// Use a transient in-memory database instead of a file
	pub fn in_memory(&mut self) -> &mut Self {
		self.in_memory = true;
		self
	}

	/// Create the database file when it does not exist yet
	pub fn create_if_missing(&mut self, create: bool) -> &mut Self {
		self.create_if_missing = create;
		self
	}

	/// Append a driver parameter to the URL query string.
	pub fn parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.parameters.push((key.into(), value.into()));
		self
	}

	fn url(&self, dialect: &'static str) -> Result<String, ConfigError> {
		let mut url = if self.in_memory {
			"sqlite::memory:".to_string()
		} else {
			let path = self.path.as_ref().ok_or(ConfigError::MissingParameter {
				dialect,
				field: "path",
			})?;
			format!("sqlite://{}", path.display())
		};

		let mut parameters = Vec::new();
		if self.create_if_missing {
			parameters.push(("mode".to_string(), "rwc".to_string()));
		}
		parameters.extend(self.parameters.iter().cloned());
		append_query(&mut url, &parameters);
		Ok(url)
	}
}

/// Append `?k=v&k=v` to a URL, preserving insertion order.
#[cfg(any(feature = "postgres", feature = "mysql", feature = "sqlite"))]
fn append_query(url: &mut String, parameters: &[(String, String)]) {
	for (index, (key, value)) in parameters.iter().enumerate() {
		url.push(if index == 0 { '?' } else { '&' });
		url.push_str(key);
		url.push('=');
		url.push_str(value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(feature = "postgres")]
	#[test]
	fn postgres_url_from_identity_parameters() {
		let mut options = Postgres::options();
		options.host("localhost").database("test");

		let url = Postgres::url(&options).expect("Failed to resolve url");
		assert_eq!(url, "postgres://localhost:5432/test");
	}

	#[cfg(feature = "postgres")]
	#[test]
	fn postgres_url_with_port_and_parameters() {
		let mut options = Postgres::options();
		options
			.host("db.internal")
			.port(6432)
			.database("app")
			.parameter("sslmode", "require")
			.parameter("application_name", "wellspring");

		let url = Postgres::url(&options).expect("Failed to resolve url");
		assert_eq!(
			url,
			"postgres://db.internal:6432/app?sslmode=require&application_name=wellspring"
		);
	}

	#[cfg(feature = "postgres")]
	#[test]
	fn postgres_url_requires_host() {
		let mut options = Postgres::options();
		options.database("test");

		let err = Postgres::url(&options).unwrap_err();
		assert!(matches!(
			err,
			ConfigError::MissingParameter {
				dialect: "PostgreSQL",
				field: "host",
			}
		));
	}

	#[cfg(feature = "postgres")]
	#[test]
	fn postgres_url_requires_database() {
		let mut options = Postgres::options();
		options.host("localhost");

		let err = Postgres::url(&options).unwrap_err();
		assert!(matches!(err, ConfigError::MissingParameter { field: "database", .. }));
	}

	#[cfg(feature = "mysql")]
	#[test]
	fn mysql_url_uses_default_port() {
		let mut options = MySql::options();
		options.host("localhost").database("test");

		let url = MySql::url(&options).expect("Failed to resolve url");
		assert_eq!(url, "mysql://localhost:3306/test");
	}

	#[cfg(feature = "mysql")]
	#[test]
	fn mariadb_errors_name_the_dialect() {
		let options = MariaDb::options();

		let err = MariaDb::url(&options).unwrap_err();
		assert!(matches!(
			err,
			ConfigError::MissingParameter {
				dialect: "MariaDB",
				field: "host",
			}
		));
	}

	#[cfg(feature = "sqlite")]
	#[test]
	fn sqlite_in_memory_url() {
		let mut options = Sqlite::options();
		options.in_memory();

		let url = Sqlite::url(&options).expect("Failed to resolve url");
		assert_eq!(url, "sqlite::memory:");
	}

	#[cfg(feature = "sqlite")]
	#[test]
	fn sqlite_file_url_with_create_mode() {
		let mut options = Sqlite::options();
		options.path("data/app.db").create_if_missing(true);

		let url = Sqlite::url(&options).expect("Failed to resolve url");
		assert_eq!(url, "sqlite://data/app.db?mode=rwc");
	}

	#[cfg(feature = "sqlite")]
	#[test]
	fn sqlite_url_requires_path_or_memory() {
		let options = Sqlite::options();

		let err = Sqlite::url(&options).unwrap_err();
		assert!(matches!(err, ConfigError::MissingParameter { field: "path", .. }));
	}
}
