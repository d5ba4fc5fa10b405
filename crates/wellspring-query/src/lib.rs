//! # wellspring-query
//!
//! Query factories bound to pooled connection sources.
//!
//! A [`QueryFactory`] holds a reference to one connection source and a
//! default configuration, and hands out builder stages to repository-style
//! types: typed queries for selects, untyped queries for writes. Statement
//! execution itself is delegated to the wrapped sqlx pool through a
//! type-erased [`QueryBackend`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wellspring_query::prelude::*;
//!
//! # async fn example(factory: QueryFactory) -> Result<(), QueryError> {
//! struct Track {
//!     id: i64,
//!     title: String,
//! }
//!
//! impl FromRow for Track {
//!     fn from_row(row: &Row) -> Result<Self, QueryError> {
//!         Ok(Self {
//!             id: row.get("id")?,
//!             title: row.get("title")?,
//!         })
//!     }
//! }
//!
//! let tracks: Vec<Track> = factory
//!     .query::<Track>()
//!     .sql("SELECT id, title FROM tracks WHERE rating > ?")
//!     .bind(4.0)
//!     .fetch_all()
//!     .await?;
//!
//! factory
//!     .update()
//!     .sql("DELETE FROM tracks WHERE id = ?")
//!     .bind(tracks[0].id)
//!     .execute()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `postgres` (default): PostgreSQL backend
//! - `mysql` (default): MySQL/MariaDB backend
//! - `sqlite` (default): SQLite backend

pub mod backend;
pub mod error;
pub mod factory;
pub mod types;

pub use backend::QueryBackend;
pub use error::QueryError;
pub use factory::{QueryConfig, QueryFactory, QuerySource, QueryStage, StatementStage};
pub use types::{ExecuteResult, FromRow, QueryValue, Row};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::backend::QueryBackend;
	#[cfg(feature = "mysql")]
	pub use crate::backend::MySqlQueryBackend;
	#[cfg(feature = "postgres")]
	pub use crate::backend::PostgresQueryBackend;
	#[cfg(feature = "sqlite")]
	pub use crate::backend::SqliteQueryBackend;
	pub use crate::error::QueryError;
	pub use crate::factory::{QueryConfig, QueryFactory, QuerySource, QueryStage, StatementStage};
	pub use crate::types::{ExecuteResult, FromRow, QueryValue, Row};
}
