use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::slots::Slot;

/// Get the fixed slot catalog, in display order
#[instrument]
pub async fn get_slots() -> impl IntoResponse {
	(StatusCode::OK, Json(Slot::all()))
}
