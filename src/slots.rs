//! The fixed catalog of bookable time windows
//!
//! Slots are compiled in: they are not user-editable and their identifiers
//! are stored as a database enum, so changing this catalog is a migration.

use chrono::NaiveTime;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

/// Identifier of a bookable time window within a day
#[derive(
	Clone, Copy, DbEnum, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingSlot"]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
	Morning,
	Afternoon,
	Evening,
}

/// A bookable time window within a day
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
	pub id:         SlotId,
	pub label:      &'static str,
	pub start_time: NaiveTime,
	pub end_time:   NaiveTime,
}

impl Slot {
	/// All slots, in their stable display order
	#[must_use]
	pub fn all() -> [Self; 3] {
		[
			SlotId::Morning.slot(),
			SlotId::Afternoon.slot(),
			SlotId::Evening.slot(),
		]
	}

	/// Look up the [`Slot`] for a given [`SlotId`]
	#[must_use]
	pub fn get(id: SlotId) -> Self { id.slot() }
}

impl SlotId {
	fn slot(self) -> Slot {
		let (label, start, end) = match self {
			Self::Morning => ("Morning", (7, 0), (10, 0)),
			Self::Afternoon => ("Afternoon", (12, 0), (15, 0)),
			Self::Evening => ("Evening", (17, 0), (19, 0)),
		};

		Slot {
			id: self,
			label,
			start_time: hm(start.0, start.1),
			end_time: hm(end.0, end.1),
		}
	}
}

fn hm(hour: u32, min: u32) -> NaiveTime {
	// The catalog only holds valid clock times
	NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}
