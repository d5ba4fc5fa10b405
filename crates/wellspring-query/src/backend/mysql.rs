//! MySQL/MariaDB query backend

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{Column, MySqlPool, Row as SqlxRow, TypeInfo, ValueRef};
use wellspring_datasource::DataSource;

use crate::backend::QueryBackend;
use crate::error::Result;
use crate::types::{ExecuteResult, QueryValue, Row};

/// Query backend delegating to a pooled MySQL or MariaDB connection source
pub struct MySqlQueryBackend {
	pool: MySqlPool,
}

impl MySqlQueryBackend {
	/// Wrap an existing sqlx pool
	pub fn new(pool: MySqlPool) -> Self {
		Self { pool }
	}

	/// Build a backend from a finished connection source
	pub fn from_source(source: &DataSource<sqlx::MySql>) -> Self {
		Self::new(source.inner().clone())
	}

	/// The wrapped pool
	pub fn pool(&self) -> &MySqlPool {
		&self.pool
	}

	fn bind_value<'q>(
		query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
		value: &'q QueryValue,
	) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
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

	fn convert_row(mysql_row: &MySqlRow) -> Result<Row> {
		let mut row = Row::new();
		for (index, column) in mysql_row.columns().iter().enumerate() {
			let name = column.name();

			if mysql_row.try_get_raw(index)?.is_null() {
				row.insert(name, QueryValue::Null);
				continue;
			}

			// TINYINT(1) columns surface as BOOLEAN.
			let type_name = column.type_info().name().to_uppercase();
			let value = if type_name == "BOOLEAN" {
				QueryValue::Bool(mysql_row.try_get::<bool, _>(index)?)
			} else if let Ok(value) = mysql_row.try_get::<i64, _>(index) {
				QueryValue::Int(value)
			} else if let Ok(value) = mysql_row.try_get::<f64, _>(index) {
				QueryValue::Float(value)
			} else if let Ok(value) = mysql_row.try_get::<String, _>(index) {
				QueryValue::Text(value)
			} else if let Ok(value) = mysql_row.try_get::<Vec<u8>, _>(index) {
				QueryValue::Bytes(value)
			} else {
				QueryValue::Timestamp(
					mysql_row.try_get::<chrono::DateTime<chrono::Utc>, _>(index)?,
				)
			};
			row.insert(name, value);
		}
		Ok(row)
	}
}

#[async_trait]
impl QueryBackend for MySqlQueryBackend {
	fn database(&self) -> &'static str {
		"MySQL"
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
