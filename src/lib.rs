//! # Wellspring
//!
//! Staged construction of pooled database connection sources and query
//! factories for Rust.
//!
//! Wellspring is the setup layer of an application's database access: it
//! shapes *configuration*, not execution. Connection pooling, health checks
//! and statement execution are delegated entirely to sqlx; this crate
//! forwards configuration values verbatim and hands out small, typed entry
//! points for issuing SQL.
//!
//! ## Core Principles
//!
//! - **Compile-time staging**: configuration steps are distinct types, so
//!   calling them out of order does not compile
//! - **Composition over inheritance**: repository types embed a
//!   [`query::QueryFactory`] and implement [`query::QuerySource`] instead of
//!   extending a base class
//! - **Delegation**: no pooling, retry or SQL logic of its own; the wrapped
//!   pool's semantics apply unchanged
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wellspring::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Stage 1: pick a database type and configure the dialect.
//! // Stage 2: tune the pool, then build.
//! let source = DataSourceCreator::database(Postgres)
//!     .configure(|options| {
//!         options.host("localhost").database("app");
//!     })
//!     .create()
//!     .with_maximum_pool_size(10)
//!     .with_minimum_idle(2)
//!     .with_username("app")
//!     .with_password("sw0rdfish")
//!     .build()
//!     .await?;
//!
//! // Bind a query factory to the source and issue statements.
//! let factory = QueryFactory::postgres(&source);
//! let rows: Vec<Row> = factory
//!     .query::<Row>()
//!     .sql("SELECT id, title FROM tracks")
//!     .fetch_all()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `postgres` (default): PostgreSQL support
//! - `mysql` (default): MySQL and MariaDB support
//! - `sqlite` (default): SQLite support

pub mod datasource;
pub mod query;

pub mod prelude;
