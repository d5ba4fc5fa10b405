//! Common value and row types for the query layer

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// A statement parameter or result value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	Bytes(Vec<u8>),
	Timestamp(chrono::DateTime<chrono::Utc>),
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		QueryValue::Text(value.to_string())
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		QueryValue::Text(value)
	}
}

impl From<i64> for QueryValue {
	fn from(value: i64) -> Self {
		QueryValue::Int(value)
	}
}

impl From<i32> for QueryValue {
	fn from(value: i32) -> Self {
		QueryValue::Int(value as i64)
	}
}

impl From<f64> for QueryValue {
	fn from(value: f64) -> Self {
		QueryValue::Float(value)
	}
}

impl From<bool> for QueryValue {
	fn from(value: bool) -> Self {
		QueryValue::Bool(value)
	}
}

impl From<Vec<u8>> for QueryValue {
	fn from(value: Vec<u8>) -> Self {
		QueryValue::Bytes(value)
	}
}

impl From<chrono::DateTime<chrono::Utc>> for QueryValue {
	fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
		QueryValue::Timestamp(value)
	}
}

/// Result of a write-style statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteResult {
	/// Number of rows the statement changed
	pub rows_affected: u64,
}

/// A single result row keyed by column name
#[derive(Debug, Clone, Default)]
pub struct Row {
	columns: HashMap<String, QueryValue>,
}

impl Row {
	/// Create an empty row
	pub fn new() -> Self {
		Self {
			columns: HashMap::new(),
		}
	}

	/// Insert a column value
	pub fn insert(&mut self, column: impl Into<String>, value: QueryValue) {
		self.columns.insert(column.into(), value);
	}

	/// Raw value of a column, if present
	pub fn value(&self, column: &str) -> Option<&QueryValue> {
		self.columns.get(column)
	}

	/// Typed access to a column value
	pub fn get<T>(&self, column: &str) -> Result<T>
	where
		T: TryFrom<QueryValue, Error = QueryError>,
	{
		self.columns
			.get(column)
			.cloned()
			.ok_or_else(|| QueryError::ColumnNotFound(column.to_string()))
			.and_then(T::try_from)
	}

	/// Number of columns in the row
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Whether the row has no columns
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}
}

impl TryFrom<QueryValue> for i64 {
	type Error = QueryError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Int(value) => Ok(value),
			other => Err(QueryError::TypeMismatch(format!(
				"cannot convert {other:?} to i64"
			))),
		}
	}
}

impl TryFrom<QueryValue> for f64 {
	type Error = QueryError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Float(value) => Ok(value),
			QueryValue::Int(value) => Ok(value as f64),
			other => Err(QueryError::TypeMismatch(format!(
				"cannot convert {other:?} to f64"
			))),
		}
	}
}

impl TryFrom<QueryValue> for bool {
	type Error = QueryError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Bool(value) => Ok(value),
			other => Err(QueryError::TypeMismatch(format!(
				"cannot convert {other:?} to bool"
			))),
		}
	}
}

impl TryFrom<QueryValue> for String {
	type Error = QueryError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Text(value) => Ok(value),
			other => Err(QueryError::TypeMismatch(format!(
				"cannot convert {other:?} to String"
			))),
		}
	}
}

impl TryFrom<QueryValue> for Vec<u8> {
	type Error = QueryError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Bytes(value) => Ok(value),
			other => Err(QueryError::TypeMismatch(format!(
				"cannot convert {other:?} to bytes"
			))),
		}
	}
}

impl TryFrom<QueryValue> for chrono::DateTime<chrono::Utc> {
	type Error = QueryError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Timestamp(value) => Ok(value),
			other => Err(QueryError::TypeMismatch(format!(
				"cannot convert {other:?} to DateTime<Utc>"
			))),
		}
	}
}

/// Conversion from a result row into a typed result shape.
///
/// The typed entry point of a factory ([`crate::factory::QueryFactory::query`])
/// is generic over this trait; implement it on the structs your selects
/// return. Implemented for [`Row`] itself for callers that want the raw
/// column map.
pub trait FromRow: Sized {
	/// Build the result shape from a row
	fn from_row(row: &Row) -> Result<Self>;
}

impl FromRow for Row {
	fn from_row(row: &Row) -> Result<Self> {
		Ok(row.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn conversions_into_query_value() {
		assert_eq!(QueryValue::from("swing"), QueryValue::Text("swing".into()));
		assert_eq!(QueryValue::from(42i32), QueryValue::Int(42));
		assert_eq!(QueryValue::from(42i64), QueryValue::Int(42));
		assert_eq!(QueryValue::from(1.5f64), QueryValue::Float(1.5));
		assert_eq!(QueryValue::from(true), QueryValue::Bool(true));
		assert_eq!(
			QueryValue::from(vec![1u8, 2, 3]),
			QueryValue::Bytes(vec![1, 2, 3])
		);
	}

	#[test]
	fn row_returns_typed_values() {
		let mut row = Row::new();
		row.insert("id", QueryValue::Int(7));
		row.insert("title", QueryValue::Text("Nuages".into()));

		let id: i64 = row.get("id").expect("Failed to read id");
		let title: String = row.get("title").expect("Failed to read title");
		assert_eq!(id, 7);
		assert_eq!(title, "Nuages");
	}

	#[test]
	fn row_reports_missing_columns() {
		let row = Row::new();

		let err = row.get::<i64>("absent").unwrap_err();
		assert!(matches!(err, QueryError::ColumnNotFound(column) if column == "absent"));
	}

	#[test]
	fn row_reports_type_mismatches() {
		let mut row = Row::new();
		row.insert("id", QueryValue::Text("seven".into()));

		let err = row.get::<i64>("id").unwrap_err();
		assert!(matches!(err, QueryError::TypeMismatch(_)));
	}

	#[test]
	fn integers_widen_into_floats() {
		let mut row = Row::new();
		row.insert("rating", QueryValue::Int(4));

		let rating: f64 = row.get("rating").expect("Failed to read rating");
		assert_eq!(rating, 4.0);
	}

	#[test]
	fn identity_from_row_clones_the_row() {
		let mut row = Row::new();
		row.insert("id", QueryValue::Int(1));

		let copy = Row::from_row(&row).expect("Failed to copy row");
		assert_eq!(copy.get::<i64>("id").unwrap(), 1);
	}
}
