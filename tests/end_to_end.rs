//! End-to-end tests through the facade crate
//! Staged build of a connection source, factory binding, typed and untyped
//! statements, all over an in-memory SQLite database.

#![cfg(feature = "sqlite")]

use wellspring::prelude::*;

#[derive(Debug, PartialEq)]
struct Reservoir {
	name: String,
	volume: i64,
}

impl FromRow for Reservoir {
	fn from_row(row: &Row) -> Result<Self, QueryError> {
		Ok(Self {
			name: row.get("name")?,
			volume: row.get("volume")?,
		})
	}
}

struct ReservoirRepository {
	factory: QueryFactory,
}

impl QuerySource for ReservoirRepository {
	fn factory(&self) -> &QueryFactory {
		&self.factory
	}
}

impl ReservoirRepository {
	async fn create_schema(&self) {
		self.update()
			.sql("CREATE TABLE reservoirs (name TEXT NOT NULL, volume INTEGER NOT NULL)")
			.execute()
			.await
			.expect("Failed to create schema");
	}

	async fn add(&self, name: &str, volume: i64) {
		self.update()
			.sql("INSERT INTO reservoirs (name, volume) VALUES (?, ?)")
			.bind(name)
			.bind(volume)
			.execute()
			.await
			.expect("Failed to insert reservoir");
	}

	async fn largest(&self) -> Reservoir {
		self.query::<Reservoir>()
			.sql("SELECT name, volume FROM reservoirs ORDER BY volume DESC LIMIT 1")
			.fetch_one()
			.await
			.expect("Failed to fetch reservoir")
	}
}

#[tokio::test]
async fn test_staged_build_to_typed_query() {
	let source = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.with_maximum_pool_size(1)
		.with_pool_name("end-to-end")
		.build()
		.await
		.expect("Failed to build data source");

	assert_eq!(source.connection_string(), "sqlite::memory:");
	assert_eq!(source.settings().pool_name.as_deref(), Some("end-to-end"));

	let repository = ReservoirRepository {
		factory: QueryFactory::sqlite(&source),
	};
	repository.create_schema().await;
	repository.add("alpine", 420).await;
	repository.add("karst", 9000).await;

	let largest = repository.largest().await;
	assert_eq!(
		largest,
		Reservoir {
			name: "karst".to_string(),
			volume: 9000,
		}
	);
}

#[tokio::test]
async fn test_source_remains_usable_directly() {
	let source = DataSourceCreator::database(Sqlite)
		.configure(|options| {
			options.in_memory();
		})
		.create()
		.with_maximum_pool_size(1)
		.build()
		.await
		.expect("Failed to build data source");

	// The raw pool stays reachable for callers needing direct access.
	let mut conn = source.acquire().await.expect("Failed to acquire connection");
	let answer: i64 = sqlx::query_scalar("SELECT 41 + 1")
		.fetch_one(&mut *conn)
		.await
		.expect("Failed to run query");

	assert_eq!(answer, 42);
}
