//! PostgreSQL query backend

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Column, PgPool, Row as SqlxRow, TypeInfo, ValueRef};
use wellspring_datasource::DataSource;

use crate::backend::QueryBackend;
use crate::error::Result;
use crate::types::{ExecuteResult, QueryValue, Row};

/// Query backend delegating to a pooled PostgreSQL connection source
pub struct PostgresQueryBackend {
	pool: PgPool,
}

impl PostgresQueryBackend {
	/// Wrap an existing sqlx pool
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}

	/// Build a backend from a finished connection source
	pub fn from_source(source: &DataSource<sqlx::Postgres>) -> Self {
		Self::new(source.inner().clone())
	}

	/// The wrapped pool
	pub fn pool(&self) -> &PgPool {
		&self.pool
	}

	fn bind_value<'q>(
		query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
		value: &'q QueryValue,
	) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
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

	fn convert_row(pg_row: &PgRow) -> Result<Row> {
		let mut row = Row::new();
		for (index, column) in pg_row.columns().iter().enumerate() {
			let name = column.name();

			if pg_row.try_get_raw(index)?.is_null() {
				row.insert(name, QueryValue::Null);
				continue;
			}

			// PostgreSQL decoding is strict, so dispatch on the declared
			// type instead of probing.
			let value = match column.type_info().name() {
				"BOOL" => QueryValue::Bool(pg_row.try_get(index)?),
				"INT2" => QueryValue::Int(pg_row.try_get::<i16, _>(index)? as i64),
				"INT4" => QueryValue::Int(pg_row.try_get::<i32, _>(index)? as i64),
				"INT8" => QueryValue::Int(pg_row.try_get::<i64, _>(index)?),
				"FLOAT4" => QueryValue::Float(pg_row.try_get::<f32, _>(index)? as f64),
				"FLOAT8" => QueryValue::Float(pg_row.try_get::<f64, _>(index)?),
				"BYTEA" => QueryValue::Bytes(pg_row.try_get(index)?),
				"TIMESTAMPTZ" => QueryValue::Timestamp(pg_row.try_get(index)?),
				"TIMESTAMP" => {
					let naive: chrono::NaiveDateTime = pg_row.try_get(index)?;
					QueryValue::Timestamp(chrono::DateTime::from_naive_utc_and_offset(
						naive,
						chrono::Utc,
					))
				}
				_ => QueryValue::Text(pg_row.try_get(index)?),
			};
			row.insert(name, value);
		}
		Ok(row)
	}
}

#[async_trait]
impl QueryBackend for PostgresQueryBackend {
	fn database(&self) -> &'static str {
		"PostgreSQL"
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
