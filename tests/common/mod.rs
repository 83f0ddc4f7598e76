use axum_test::TestServer;
use chrono::{NaiveDate, NaiveDateTime};
use roomboard::clock::Clock;
use roomboard::models::{NewRoom, Room};
use roomboard::{AppState, Config, DbPool, routes};

pub mod wrappers;

mod mock_db;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

/// The instant every test server's clock is pinned to
///
/// All test dates are chosen relative to this.
#[must_use]
pub fn test_now() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap()
}

#[allow(dead_code)]
pub struct TestEnv {
	pub app:      TestServer,
	pub pool:     DbPool,
	pub db_guard: DatabaseGuard,
}

impl TestEnv {
	/// Get a test environment with a temporary database and a fixed clock
	///
	/// # Panics
	/// Panics if building the test server fails
	pub async fn new() -> Self {
		let db_guard = (*DATABASE_PROVIDER).acquire().await;
		let pool = db_guard.create_pool();

		let config = Config {
			database_url: db_guard.database_url.clone(),
			bind_address: "127.0.0.1:0".to_string(),
		};

		let state = AppState {
			config,
			database_pool: pool.clone(),
			clock: Clock::Fixed(test_now()),
		};

		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv { app: test_server, pool, db_guard }
	}

	/// Insert a room to book against
	///
	/// # Panics
	/// Panics if the insert fails
	pub async fn seed_room(&self, name: &str, location: &str) -> Room {
		let conn = self.pool.get().await.unwrap();

		NewRoom {
			name:       name.to_string(),
			location:   location.to_string(),
			capacity:   12,
			facilities: vec!["projector".to_string()],
		}
		.insert(&conn)
		.await
		.unwrap()
	}
}
