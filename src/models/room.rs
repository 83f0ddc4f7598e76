//! Room records
//!
//! Rooms are plain attribute storage owned by an external catalog; the
//! engine only reads them and treats `id` as a foreign key. The insert is
//! used by seeding and tests, there are no CRUD endpoints.

use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schema::room;
use crate::DbConn;

/// A bookable physical room
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(Pg))]
pub struct Room {
	pub id:         i32,
	pub name:       String,
	pub location:   String,
	pub capacity:   i32,
	pub facilities: Vec<String>,
}

impl Room {
	/// Get a [`Room`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let room = conn
			.interact(move |conn| {
				room::table
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await?
			.map_err(|e| {
				match e {
					diesel::result::Error::NotFound => Error::NotFound(
						format!("room {r_id} does not exist"),
					),
					e => Error::from(e),
				}
			})?;

		Ok(room)
	}

	/// Get all [`Room`]s, ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let rooms = conn
			.interact(|conn| {
				room::table
					.order(room::name.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(rooms)
	}
}

/// The insertable shape of a new room
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(Pg))]
pub struct NewRoom {
	pub name:       String,
	pub location:   String,
	pub capacity:   i32,
	pub facilities: Vec<String>,
}

impl NewRoom {
	/// Insert this [`NewRoom`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Room, Error> {
		if self.name.trim().is_empty() {
			return Err(Error::ValidationError(
				"room name must not be empty".to_string(),
			));
		}

		if self.capacity <= 0 {
			return Err(Error::ValidationError(
				"room capacity must be positive".to_string(),
			));
		}

		let room = conn
			.interact(|conn| {
				diesel::insert_into(room::table)
					.values(self)
					.returning(Room::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created room {}", room.id);

		Ok(room)
	}
}
