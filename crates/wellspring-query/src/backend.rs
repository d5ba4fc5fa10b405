//! Type-erased execution seam between query factories and sqlx pools

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExecuteResult, QueryValue, Row};

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "mysql")]
pub use mysql::MySqlQueryBackend;
#[cfg(feature = "postgres")]
pub use postgres::PostgresQueryBackend;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteQueryBackend;

/// Database access used by query factories.
///
/// Implementations delegate to a live sqlx pool; the factory never touches
/// driver types directly. All methods take SQL text plus positional
/// parameters and perform exactly one statement.
#[async_trait]
pub trait QueryBackend: Send + Sync {
	/// Name of the dialect behind this backend, for log output
	fn database(&self) -> &'static str;

	/// Run a statement and collect every result row
	async fn fetch_all(&self, sql: &str, params: &[QueryValue]) -> Result<Vec<Row>>;

	/// Run a statement expected to produce exactly one row
	async fn fetch_one(&self, sql: &str, params: &[QueryValue]) -> Result<Row>;

	/// Run a statement producing at most one row
	async fn fetch_optional(&self, sql: &str, params: &[QueryValue]) -> Result<Option<Row>>;

	/// Run a write-style statement, returning the affected row count
	async fn execute(&self, sql: &str, params: &[QueryValue]) -> Result<ExecuteResult>;
}
