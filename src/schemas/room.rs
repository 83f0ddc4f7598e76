use serde::{Deserialize, Serialize};

use crate::models::Room;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
	pub id:         i32,
	pub name:       String,
	pub location:   String,
	pub capacity:   i32,
	pub facilities: Vec<String>,
}

impl From<Room> for RoomResponse {
	fn from(room: Room) -> Self {
		Self {
			id:         room.id,
			name:       room.name,
			location:   room.location,
			capacity:   room.capacity,
			facilities: room.facilities,
		}
	}
}
