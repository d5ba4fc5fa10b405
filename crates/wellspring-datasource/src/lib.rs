//! # wellspring-datasource
//!
//! Staged construction of pooled database connection sources.
//!
//! This crate shapes the setup path of an application's database layer: a
//! database type is selected once, dialect connection parameters and pool
//! parameters are collected in two compile-time-enforced stages, and the
//! terminal build hands back a ready-to-share [`DataSource`] wrapping a live
//! sqlx pool. Pooling, health checks and statement execution stay entirely
//! with sqlx; this layer only forwards configuration.
//!
//! ## Features
//!
//! - **Staged builder**: configuration steps are separate types, so calling
//!   them out of order does not compile
//! - **Dialect descriptors**: PostgreSQL, MySQL, MariaDB and SQLite markers
//!   that resolve dialect-specific connection URLs
//! - **Verbatim pool forwarding**: pool sizes, timeouts and lifetimes are
//!   copied unchanged onto `sqlx::pool::PoolOptions`
//! - **Safe observability**: connection strings and settings are logged and
//!   printed with passwords masked
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wellspring_datasource::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = DataSourceCreator::database(Postgres)
//!     .configure(|options| {
//!         options.host("localhost").database("app");
//!     })
//!     .create()
//!     .with_maximum_pool_size(10)
//!     .build()
//!     .await?;
//!
//! assert_eq!(source.connection_string(), "postgres://localhost:5432/app");
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `postgres` (default): PostgreSQL support
//! - `mysql` (default): MySQL and MariaDB support
//! - `sqlite` (default): SQLite support

pub mod creator;
pub mod databases;
pub mod error;
pub mod settings;
pub mod source;

pub use creator::{DataSourceCreator, DialectStage, PoolStage};
pub use error::{ConfigError, SourceError, SourceResult};
pub use settings::PoolSettings;
pub use source::DataSource;

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::creator::{DataSourceCreator, DialectStage, PoolStage};
	pub use crate::databases::*;
	pub use crate::error::{ConfigError, SourceError, SourceResult};
	pub use crate::settings::PoolSettings;
	pub use crate::source::DataSource;
}
