//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::BookingStatus;
use crate::slots::SlotId;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Any error related to submitting or transitioning a booking
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// No identity was forwarded with the request
	#[error("unauthorized")]
	Unauthorized,
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

/// Any error related to submitting or transitioning a booking
#[derive(Debug, Error)]
pub enum BookingError {
	/// The composed date + slot start time has already passed
	#[error("the requested slot starts in the past")]
	StartTimeInPast(NaiveDateTime),
	/// A required submission field was empty after trimming
	#[error("'{0}' must not be empty")]
	MissingField(&'static str),
	/// Another booking already holds the approved slot
	#[error("this slot is already booked")]
	SlotConflict { room_id: i32, date: NaiveDate, slot: SlotId },
	/// The booking is in a terminal state and cannot transition
	#[error("cannot {attempted} a booking that is {from}")]
	InvalidTransition { from: BookingStatus, attempted: &'static str },
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function an error code should never be reused
	/// once it is assigned, to avoid unexpectedly breaking API consumers
	fn code(&self) -> i32 {
		match self {
			Self::Forbidden => 1,
			Self::InternalServerError => 2,
			Self::NotFound(_) => 3,
			Self::Unauthorized => 4,
			Self::ValidationError(_) => 5,
			Self::BookingError(e) => {
				match e {
					BookingError::StartTimeInPast(_) => 6,
					BookingError::MissingField(_) => 7,
					BookingError::SlotConflict { .. } => 8,
					BookingError::InvalidTransition { .. } => 9,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::NotFound(m) | Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::StartTimeInPast(starts) => {
						Some(serde_json::json!({ "starts": starts }).to_string())
					},
					BookingError::MissingField(field) => {
						Some(serde_json::json!({ "field": field }).to_string())
					},
					BookingError::SlotConflict { room_id, date, slot } => Some(
						serde_json::json!({
							"roomId": room_id,
							"date": date,
							"slot": slot,
						})
						.to_string(),
					),
					BookingError::InvalidTransition { from, attempted } => {
						Some(
							serde_json::json!({
								"from": from,
								"attempted": attempted,
							})
							.to_string(),
						)
					},
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let data = serde_json::json!({
			"message": self.to_string(),
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::BookingError(
				BookingError::SlotConflict { .. }
				| BookingError::InvalidTransition { .. },
			) => StatusCode::CONFLICT,
			Self::BookingError(_) | Self::ValidationError(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
}

impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			diesel::result::Error::NotFound => {
				Self::NotFound("no such record".to_string())
			},
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
