//! Booking records and their approval lifecycle

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::dsl::{exists, select};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::sql_types::Bool;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Error};
use crate::models::Room;
use crate::schema::{booking, room};
use crate::slots::SlotId;
use crate::DbConn;

/// Lifecycle state of a [`Booking`]
///
/// `Pending` is the only non-terminal state; the allowed transitions are
/// exactly pending -> approved and pending -> rejected.
#[derive(
	Clone,
	Copy,
	DbEnum,
	Debug,
	Default,
	Deserialize,
	Eq,
	PartialEq,
	Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingStatus"]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}

impl BookingStatus {
	/// Whether no further transition is permitted out of this state
	#[must_use]
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Approved | Self::Rejected)
	}

	/// Whether the transition from this state to `to` is allowed
	#[must_use]
	pub fn can_transition(self, to: Self) -> bool {
		matches!(
			(self, to),
			(Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
		)
	}
}

impl std::fmt::Display for BookingStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let repr = match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		};

		write!(f, "{repr}")
	}
}

/// A reservation request for a (room, date, slot) triple
///
/// The requester columns are a snapshot taken at submission time; later
/// profile changes do not alter past bookings. `start_time`/`end_time` are
/// likewise denormalized copies of the slot's clock times.
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct Booking {
	pub id:              i32,
	pub room_id:         i32,
	pub requester_id:    String,
	pub requester_name:  String,
	pub requester_email: String,
	pub requester_phone: String,
	pub booking_date:    NaiveDate,
	pub slot:            SlotId,
	pub start_time:      NaiveTime,
	pub end_time:        NaiveTime,
	pub purpose:         String,
	pub status:          BookingStatus,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

type BoxedCondition<S, T> = Box<dyn BoxableExpression<S, Pg, SqlType = T>>;

/// Admin listing filter over the booking/room join
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub status:  Option<BookingStatus>,
	pub room_id: Option<i32>,
	pub from:    Option<NaiveDate>,
	pub until:   Option<NaiveDate>,
	pub query:   Option<String>,
}

impl BookingFilter {
	fn to_condition(
		&self,
	) -> BoxedCondition<
		diesel::dsl::InnerJoinQuerySource<booking::table, room::table>,
		Bool,
	> {
		let mut condition: BoxedCondition<_, Bool> =
			Box::new(true.into_sql::<Bool>());

		if let Some(wanted) = self.status {
			condition = Box::new(condition.and(booking::status.eq(wanted)));
		}

		if let Some(r_id) = self.room_id {
			condition = Box::new(condition.and(booking::room_id.eq(r_id)));
		}

		if let Some(from) = self.from {
			condition = Box::new(condition.and(booking::booking_date.ge(from)));
		}

		if let Some(until) = self.until {
			condition =
				Box::new(condition.and(booking::booking_date.le(until)));
		}

		if let Some(query) = &self.query {
			let pattern = format!("%{}%", query.trim());

			condition = Box::new(
				condition.and(
					booking::requester_name
						.ilike(pattern.clone())
						.or(booking::requester_email.ilike(pattern.clone()))
						.or(room::name.ilike(pattern.clone()))
						.or(room::location.ilike(pattern)),
				),
			);
		}

		condition
	}
}

impl Booking {
	/// Get a [`Booking`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let booking = conn
			.interact(move |conn| {
				booking::table
					.find(b_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await?
			.map_err(|e| not_found(e, b_id))?;

		Ok(booking)
	}

	/// Search bookings and their rooms for the admin approval workflow
	///
	/// Newest submissions come first; ordering is part of the query, there
	/// is no in-process sort fallback.
	#[instrument(skip(conn))]
	pub async fn search(
		filter: BookingFilter,
		conn: &DbConn,
	) -> Result<Vec<(Self, Room)>, Error> {
		let bookings = conn
			.interact(move |conn| {
				booking::table
					.inner_join(room::table)
					.filter(filter.to_condition())
					.order(booking::created_at.desc())
					.select((Self::as_select(), Room::as_select()))
					.get_results(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Get all bookings ever submitted by one requester, newest first
	#[instrument(skip(conn))]
	pub async fn for_requester(
		requester: String,
		conn: &DbConn,
	) -> Result<Vec<(Self, Room)>, Error> {
		let bookings = conn
			.interact(move |conn| {
				booking::table
					.inner_join(room::table)
					.filter(booking::requester_id.eq(requester))
					.order(booking::created_at.desc())
					.select((Self::as_select(), Room::as_select()))
					.get_results(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Whether no approved booking occupies the given (room, date, slot)
	/// triple
	///
	/// This single predicate backs both the advisory pre-submission check
	/// and the authoritative re-check inside [`Booking::approve`]; the two
	/// call sites differ only in how they treat a store failure.
	#[instrument(skip(conn))]
	pub async fn is_slot_available(
		r_id: i32,
		on_date: NaiveDate,
		in_slot: SlotId,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let occupied: bool = conn
			.interact(move |conn| {
				select(exists(approved_triple(r_id, on_date, in_slot)))
					.get_result(conn)
			})
			.await??;

		Ok(!occupied)
	}

	/// Transition a pending [`Booking`] to `approved`
	///
	/// The availability re-check and the status write run in one
	/// transaction, and the partial unique index on approved triples turns
	/// a lost race with a concurrent approval into a conflict error, so two
	/// conflicting approvals can never both succeed. On conflict the
	/// booking is left `pending`; rejecting it remains an explicit admin
	/// action.
	#[instrument(skip(conn))]
	pub async fn approve(
		b_id: i32,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let approved = conn
			.interact(move |conn| {
				conn.transaction(|conn| {
					let current: Self = booking::table
						.find(b_id)
						.for_update()
						.select(Self::as_select())
						.get_result(conn)
						.map_err(|e| not_found(e, b_id))?;

					// A retried approve of an already approved booking is a
					// no-op success so callers can safely retry on timeout
					if current.status == BookingStatus::Approved {
						return Ok(current);
					}

					if !current.status.can_transition(BookingStatus::Approved)
					{
						return Err(BookingError::InvalidTransition {
							from:      current.status,
							attempted: "approve",
						}
						.into());
					}

					let (r_id, on_date, in_slot) =
						(current.room_id, current.booking_date, current.slot);

					let conflict = move || {
						BookingError::SlotConflict {
							room_id: r_id,
							date:    on_date,
							slot:    in_slot,
						}
					};

					let taken: bool = select(exists(
						approved_triple(r_id, on_date, in_slot)
							.filter(booking::id.ne(b_id)),
					))
					.get_result(conn)?;

					if taken {
						return Err(conflict().into());
					}

					diesel::update(
						booking::table.find(b_id).filter(
							booking::status.eq(BookingStatus::Pending),
						),
					)
					.set((
						booking::status.eq(BookingStatus::Approved),
						booking::updated_at.eq(now),
					))
					.returning(Self::as_returning())
					.get_result(conn)
					.map_err(|e| match e {
						diesel::result::Error::DatabaseError(
							DatabaseErrorKind::UniqueViolation,
							_,
						) => conflict().into(),
						e => Error::from(e),
					})
				})
			})
			.await??;

		info!("approved booking {b_id}");

		Ok(approved)
	}

	/// Transition a pending [`Booking`] to `rejected`
	///
	/// Rejection only frees capacity, so no availability check is needed.
	#[instrument(skip(conn))]
	pub async fn reject(
		b_id: i32,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let rejected = conn
			.interact(move |conn| {
				conn.transaction(|conn| {
					let current: Self = booking::table
						.find(b_id)
						.for_update()
						.select(Self::as_select())
						.get_result(conn)
						.map_err(|e| not_found(e, b_id))?;

					if !current.status.can_transition(BookingStatus::Rejected)
					{
						return Err(BookingError::InvalidTransition {
							from:      current.status,
							attempted: "reject",
						}
						.into());
					}

					diesel::update(booking::table.find(b_id))
						.set((
							booking::status.eq(BookingStatus::Rejected),
							booking::updated_at.eq(now),
						))
						.returning(Self::as_returning())
						.get_result(conn)
						.map_err(Error::from)
				})
			})
			.await??;

		info!("rejected booking {b_id}");

		Ok(rejected)
	}
}

/// The query for approved bookings occupying a (room, date, slot) triple
#[diesel::dsl::auto_type]
fn approved_triple(r_id: i32, on_date: NaiveDate, in_slot: SlotId) -> _ {
	let approved: BookingStatus = BookingStatus::Approved;

	booking::table
		.filter(booking::room_id.eq(r_id))
		.filter(booking::booking_date.eq(on_date))
		.filter(booking::slot.eq(in_slot))
		.filter(booking::status.eq(approved))
}

fn not_found(err: diesel::result::Error, b_id: i32) -> Error {
	match err {
		diesel::result::Error::NotFound => {
			Error::NotFound(format!("booking {b_id} does not exist"))
		},
		e => Error::from(e),
	}
}

/// The insertable shape of a new pending booking
#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct NewBooking {
	pub room_id:         i32,
	pub requester_id:    String,
	pub requester_name:  String,
	pub requester_email: String,
	pub requester_phone: String,
	pub booking_date:    NaiveDate,
	pub slot:            SlotId,
	pub start_time:      NaiveTime,
	pub end_time:        NaiveTime,
	pub purpose:         String,
	pub status:          BookingStatus,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl NewBooking {
	/// Insert this [`NewBooking`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Booking, Error> {
		let booking = conn
			.interact(|conn| {
				diesel::insert_into(booking::table)
					.values(self)
					.returning(Booking::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created pending booking {}", booking.id);

		Ok(booking)
	}
}
