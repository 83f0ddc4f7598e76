//! # Roomboard backend library
//!
//! A reservation backend arbitrating shared rooms: requesters submit
//! bookings for a (room, date, slot) triple, administrators approve or
//! reject them, and the engine guarantees at most one approved booking per
//! triple at any time.

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use deadpool_diesel::postgres::{Object, Pool};

mod config;

pub mod clock;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod schemas;
pub mod slots;

pub use config::*;

use clock::Clock;

pub type DbPool = Pool;
pub type DbConn = Object;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
	pub clock:         Clock,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for Clock {
	fn from_ref(input: &AppState) -> Self { input.clock }
}
