//! Staged builder integration tests
//! Covers terminal builds over in-memory SQLite, configuration pass-through,
//! and build-time configuration failures.

#![cfg(feature = "sqlite")]

use std::time::Duration;

use wellspring_datasource::prelude::*;

#[tokio::test]
async fn test_build_in_memory_source() {
	let source = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.build()
		.await
		.expect("Failed to build data source");

	assert_eq!(source.connection_string(), "sqlite::memory:");
	assert_eq!(source.database(), "SQLite");
	assert_eq!(source.settings().max_connections, 10);
	assert_eq!(source.settings().min_connections, 1);
}

#[tokio::test]
async fn test_pool_parameters_are_reported_exactly() {
	let source = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.with_maximum_pool_size(5)
		.with_minimum_idle(2)
		.with_connection_timeout(Duration::from_secs(7))
		.with_idle_timeout(Duration::from_secs(90))
		.with_max_lifetime(Duration::from_secs(450))
		.with_test_before_acquire(true)
		.with_pool_name("reporting")
		.build()
		.await
		.expect("Failed to build data source");

	let settings = source.settings();
	assert_eq!(settings.max_connections, 5);
	assert_eq!(settings.min_connections, 2);
	assert_eq!(settings.acquire_timeout, Duration::from_secs(7));
	assert_eq!(settings.idle_timeout, Some(Duration::from_secs(90)));
	assert_eq!(settings.max_lifetime, Some(Duration::from_secs(450)));
	assert!(settings.test_before_acquire);
	assert_eq!(settings.pool_name.as_deref(), Some("reporting"));
}

#[tokio::test]
async fn test_built_source_serves_connections() {
	let source = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.with_maximum_pool_size(1)
		.build()
		.await
		.expect("Failed to build data source");

	let mut conn = source.acquire().await.expect("Failed to acquire connection");

	let result: i64 = sqlx::query_scalar("SELECT 1")
		.fetch_one(&mut *conn)
		.await
		.expect("Failed to execute query");

	assert_eq!(result, 1);
}

#[cfg(feature = "postgres")]
#[tokio::test]
async fn test_missing_host_fails_at_build() {
	let err = DataSourceCreator::database(Postgres)
		.configure(|options| {
			options.database("test");
		})
		.create()
		.build()
		.await
		.unwrap_err();

	match err {
		SourceError::Config(ConfigError::MissingParameter { dialect, field }) => {
			assert_eq!(dialect, "PostgreSQL");
			assert_eq!(field, "host");
		}
		other => panic!("expected missing-parameter error, got {other:?}"),
	}
}

#[cfg(feature = "postgres")]
#[tokio::test]
async fn test_missing_database_fails_at_build() {
	let err = DataSourceCreator::database(Postgres)
		.configure(|options| {
			options.host("localhost");
		})
		.create()
		.build()
		.await
		.unwrap_err();

	assert!(matches!(
		err,
		SourceError::Config(ConfigError::MissingParameter { field: "database", .. })
	));
}

#[tokio::test]
async fn test_missing_sqlite_path_fails_at_build() {
	let err = DataSourceCreator::database(Sqlite)
		.create()
		.build()
		.await
		.unwrap_err();

	assert!(matches!(
		err,
		SourceError::Config(ConfigError::MissingParameter { field: "path", .. })
	));
}

#[tokio::test]
async fn test_invalid_pool_settings_fail_before_connecting() {
	let err = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.with_maximum_pool_size(0)
		.build()
		.await
		.unwrap_err();

	assert!(matches!(
		err,
		SourceError::Config(ConfigError::InvalidPool(_))
	));
}

#[tokio::test]
async fn test_close_stops_serving_connections() {
	let source = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.build()
		.await
		.expect("Failed to build data source");

	source.close().await;

	let result = source.acquire().await;
	assert!(
		result.is_err(),
		"Should not acquire connections from a closed source"
	);
}
