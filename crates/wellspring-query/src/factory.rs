//! Query factories and the holder seam for repository types
//!
//! A [`QueryFactory`] is bound to one connection source and hands out
//! builder stages: [`QueryFactory::query`] begins a typed query for
//! selects, [`QueryFactory::update`] begins an untyped one for writes.
//! Repository types embed a factory and implement [`QuerySource`] to get
//! both entry points as provided methods.
//!
//! The factory performs no I/O of its own; every side effect happens in a
//! terminal statement method, which delegates to the wrapped pool.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::backend::QueryBackend;
use crate::error::Result;
use crate::types::{ExecuteResult, FromRow, QueryValue};

#[cfg(feature = "mysql")]
use crate::backend::MySqlQueryBackend;
#[cfg(feature = "postgres")]
use crate::backend::PostgresQueryBackend;
#[cfg(feature = "sqlite")]
use crate::backend::SqliteQueryBackend;
#[cfg(any(feature = "postgres", feature = "mysql", feature = "sqlite"))]
use wellspring_datasource::DataSource;

/// Default configuration applied to every builder a factory hands out
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
	/// Log every statement at debug level before it runs
	pub log_statements: bool,
}

impl QueryConfig {
	/// Create the default configuration
	pub fn new() -> Self {
		Self::default()
	}

	/// Enable or disable statement logging
	pub fn with_log_statements(mut self, log: bool) -> Self {
		self.log_statements = log;
		self
	}
}

/// Factory handing out query builders bound to one connection source.
///
/// Stateless beyond the shared source reference and its configuration;
/// cloning is cheap and every builder owns its own statement state, so
/// factories and builders never share mutable state.
#[derive(Clone)]
pub struct QueryFactory {
	backend: Arc<dyn QueryBackend>,
	config: QueryConfig,
}

impl QueryFactory {
	/// Create a factory with the default configuration
	pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
		Self::with_config(backend, QueryConfig::default())
	}

	/// Create a factory with an explicit configuration
	pub fn with_config(backend: Arc<dyn QueryBackend>, config: QueryConfig) -> Self {
		Self { backend, config }
	}

	/// Create a factory bound to a PostgreSQL connection source
	#[cfg(feature = "postgres")]
	pub fn postgres(source: &DataSource<sqlx::Postgres>) -> Self {
		Self::new(Arc::new(PostgresQueryBackend::from_source(source)))
	}

	/// Create a factory bound to a MySQL or MariaDB connection source
	#[cfg(feature = "mysql")]
	pub fn mysql(source: &DataSource<sqlx::MySql>) -> Self {
		Self::new(Arc::new(MySqlQueryBackend::from_source(source)))
	}

	/// Create a factory bound to a SQLite connection source
	#[cfg(feature = "sqlite")]
	pub fn sqlite(source: &DataSource<sqlx::Sqlite>) -> Self {
		Self::new(Arc::new(SqliteQueryBackend::from_source(source)))
	}

	/// Begin a typed query. Use it for selects; `T` is the result shape
	/// each row is mapped into.
	pub fn query<T: FromRow>(&self) -> QueryStage<T> {
		QueryStage {
			backend: self.backend.clone(),
			config: self.config.clone(),
			_result: PhantomData,
		}
	}

	/// Begin an untyped query. Use it for updates and other statements
	/// with no expected result shape.
	pub fn update(&self) -> QueryStage<()> {
		QueryStage {
			backend: self.backend.clone(),
			config: self.config.clone(),
			_result: PhantomData,
		}
	}

	/// The backend this factory is bound to
	pub fn backend(&self) -> Arc<dyn QueryBackend> {
		self.backend.clone()
	}

	/// The configuration applied to builders from this factory
	pub fn config(&self) -> &QueryConfig {
		&self.config
	}
}

/// A builder ready to receive SQL text
pub struct QueryStage<T> {
	backend: Arc<dyn QueryBackend>,
	config: QueryConfig,
	_result: PhantomData<T>,
}

impl<T> QueryStage<T> {
	/// Supply the statement text and move to parameter binding
	pub fn sql(self, sql: impl Into<String>) -> StatementStage<T> {
		StatementStage {
			backend: self.backend,
			config: self.config,
			sql: sql.into(),
			params: Vec::new(),
			_result: PhantomData,
		}
	}
}

/// A statement with its parameters, ready to run
pub struct StatementStage<T> {
	backend: Arc<dyn QueryBackend>,
	config: QueryConfig,
	sql: String,
	params: Vec<QueryValue>,
	_result: PhantomData<T>,
}

impl<T> StatementStage<T> {
	/// Append a positional parameter
	pub fn bind(mut self, value: impl Into<QueryValue>) -> Self {
		self.params.push(value.into());
		self
	}

	fn trace(&self) {
		if self.config.log_statements {
			debug!(
				database = self.backend.database(),
				sql = %self.sql,
				params = self.params.len(),
				"executing statement"
			);
		}
	}
}

impl<T: FromRow> StatementStage<T> {
	/// Run the statement and map every result row
	pub async fn fetch_all(self) -> Result<Vec<T>> {
		self.trace();
		let rows = self.backend.fetch_all(&self.sql, &self.params).await?;
		rows.iter().map(T::from_row).collect()
	}

	/// Run the statement, expecting exactly one result row
	pub async fn fetch_one(self) -> Result<T> {
		self.trace();
		let row = self.backend.fetch_one(&self.sql, &self.params).await?;
		T::from_row(&row)
	}

	/// Run the statement, expecting at most one result row
	pub async fn fetch_optional(self) -> Result<Option<T>> {
		self.trace();
		let row = self.backend.fetch_optional(&self.sql, &self.params).await?;
		row.as_ref().map(T::from_row).transpose()
	}
}

impl StatementStage<()> {
	/// Run a write-style statement, returning the affected row count
	pub async fn execute(self) -> Result<ExecuteResult> {
		self.trace();
		self.backend.execute(&self.sql, &self.params).await
	}
}

/// Holder seam for repository-style types.
///
/// Embed a [`QueryFactory`] in the repository, implement `factory`, and the
/// query entry points come as provided methods:
///
/// ```rust,ignore
/// struct TrackRepository {
///     factory: QueryFactory,
/// }
///
/// impl QuerySource for TrackRepository {
///     fn factory(&self) -> &QueryFactory {
///         &self.factory
///     }
/// }
///
/// let titles: Vec<Row> = repository
///     .query::<Row>()
///     .sql("SELECT title FROM tracks")
///     .fetch_all()
///     .await?;
/// ```
pub trait QuerySource {
	/// The factory bound to this holder's connection source
	fn factory(&self) -> &QueryFactory;

	/// Begin a typed query against the held source
	fn query<T: FromRow>(&self) -> QueryStage<T> {
		self.factory().query()
	}

	/// Begin an untyped query against the held source
	fn update(&self) -> QueryStage<()> {
		self.factory().update()
	}
}
