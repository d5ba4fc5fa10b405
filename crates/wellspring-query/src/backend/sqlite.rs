//! SQLite query backend

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row as SqlxRow, SqlitePool, TypeInfo, ValueRef};
use wellspring_datasource::DataSource;

use crate::backend::QueryBackend;
use crate::error::Result;
use crate::types::{ExecuteResult, QueryValue, Row};

/// Query backend delegating to a pooled SQLite connection source
pub struct SqliteQueryBackend {
	pool: SqlitePool,
}

impl SqliteQueryBackend {
	/// Wrap an existing sqlx pool
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Build a backend from a finished connection source
	pub fn from_source(source: &DataSource<sqlx::Sqlite>) -> Self {
		Self::new(source.inner().clone())
	}

	/// The wrapped pool
	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	fn bind_value<'q>(
		query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
		value: &'q QueryValue,
	) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
		match value {
			QueryValue::Null => query.bind(None::<i64>),
			QueryValue::Bool(value) => query.bind(value),
			QueryValue::Int(value) => query.bind(value),
			QueryValue::Float(value) => query.bind(value),
			QueryValue::Text(value) => query.bind(value),
			QueryValue::Bytes(value) => query.bind(value),
			QueryValue::Timestamp(value) => query.bind(value),
		}
	}

	fn convert_row(sqlite_row: &SqliteRow) -> Result<Row> {
		let mut row = Row::new();
		for (index, column) in sqlite_row.columns().iter().enumerate() {
			let name = column.name();

			if sqlite_row.try_get_raw(index)?.is_null() {
				row.insert(name, QueryValue::Null);
				continue;
			}

			// SQLite stores booleans as integers, so the declared column
			// type decides between Bool and Int.
			let type_name = column.type_info().name().to_uppercase();
			let value = if type_name.contains("BOOL") {
				match sqlite_row.try_get::<i64, _>(index) {
					Ok(value) => QueryValue::Bool(value != 0),
					Err(_) => QueryValue::Bool(sqlite_row.try_get::<bool, _>(index)?),
				}
			} else if let Ok(value) = sqlite_row.try_get::<i64, _>(index) {
				QueryValue::Int(value)
			} else if let Ok(value) = sqlite_row.try_get::<f64, _>(index) {
				QueryValue::Float(value)
			} else if let Ok(value) = sqlite_row.try_get::<String, _>(index) {
				QueryValue::Text(value)
			} else if let Ok(value) = sqlite_row.try_get::<Vec<u8>, _>(index) {
				QueryValue::Bytes(value)
			} else {
				QueryValue::Timestamp(
					sqlite_row.try_get::<chrono::DateTime<chrono::Utc>, _>(index)?,
				)
			};
			row.insert(name, value);
		}
		Ok(row)
	}
}

#[async_trait]
impl QueryBackend for SqliteQueryBackend {
	fn database(&self) -> &'static str {
		"SQLite"
	}

	async fn fetch_all(&self, sql: &str, params: &[QueryValue]) -> Result<Vec<Row>> {
		let mut query = sqlx::query(sql);
		for param in params {
			query = Self::bind_value(query, param);
		}
		let rows = query.fetch_all(&self.pool).await?;
		rows.iter().map(Self::convert_row).collect()
	}

	async fn fetch_one(&self, sql: &str, params: &[QueryValue]) -> Result<Row> {
		let mut query = sqlx::query(sql);
		for param in params {
			query = Self::bind_value(query, param);
		}
		let row = query.fetch_one(&self.pool).await?;
		Self::convert_row(&row)
	}

	async fn fetch_optional(&self, sql: &str, params: &[QueryValue]) -> Result<Option<Row>> {
		let mut query = sqlx::query(sql);
		for param in params {
			query = Self::bind_value(query, param);
		}
		let row = query.fetch_optional(&self.pool).await?;
		row.as_ref().map(Self::convert_row).transpose()
	}

	async fn execute(&self, sql: &str, params: &[QueryValue]) -> Result<ExecuteResult> {
		let mut query = sqlx::query(sql);
		for param in params {
			query = Self::bind_value(query, param);
		}
		let result = query.execute(&self.pool).await?;
		Ok(ExecuteResult {
			rows_affected: result.rows_affected(),
		})
	}
}
