use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::{Booking, BookingStatus, Room};
use crate::schemas::room::RoomResponse;
use crate::slots::SlotId;

/// A booking submission
///
/// Name and email are pre-filled from the requester's profile in the UI but
/// submitted explicitly, since the stored values are a snapshot the
/// requester may still correct before sending.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub date:    NaiveDate,
	pub slot:    SlotId,
	pub name:    String,
	pub email:   String,
	pub phone:   String,
	pub purpose: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
	pub id:              i32,
	pub room_id:         i32,
	pub room:            Option<RoomResponse>,
	pub requester_name:  String,
	pub requester_email: String,
	pub requester_phone: String,
	pub date:            NaiveDate,
	pub slot:            SlotId,
	pub start_time:      NaiveTime,
	pub end_time:        NaiveTime,
	pub purpose:         String,
	pub status:          BookingStatus,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl From<Booking> for BookingResponse {
	fn from(booking: Booking) -> Self {
		Self {
			id:              booking.id,
			room_id:         booking.room_id,
			room:            None,
			requester_name:  booking.requester_name,
			requester_email: booking.requester_email,
			requester_phone: booking.requester_phone,
			date:            booking.booking_date,
			slot:            booking.slot,
			start_time:      booking.start_time,
			end_time:        booking.end_time,
			purpose:         booking.purpose,
			status:          booking.status,
			created_at:      booking.created_at,
			updated_at:      booking.updated_at,
		}
	}
}

impl From<(Booking, Room)> for BookingResponse {
	fn from((booking, room): (Booking, Room)) -> Self {
		let mut response = Self::from(booking);
		response.room = Some(room.into());

		response
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
	pub date: NaiveDate,
	pub slot: SlotId,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub available: bool,
}
