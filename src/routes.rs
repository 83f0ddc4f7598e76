//! HTTP route definitions

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::booking::{
	approve_booking,
	check_availability,
	create_booking,
	get_booking,
	get_bookings,
	get_my_bookings,
	reject_booking,
};
use crate::controllers::healthcheck;
use crate::controllers::room::{get_room, get_rooms};
use crate::controllers::slot::get_slots;
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.route("/slots", get(get_slots))
		.nest("/rooms", room_routes())
		.nest("/bookings", booking_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::with_status_code(
					StatusCode::REQUEST_TIMEOUT,
					Duration::from_secs(10),
				)),
		)
		.with_state(state)
}

/// Room routes; reads are open, submission requires an identity
fn room_routes() -> Router<AppState> {
	let authenticated = Router::new()
		.route("/{id}/availability", get(check_availability))
		.route("/{id}/bookings", post(create_booking))
		.route_layer(AuthLayer);

	Router::new()
		.route("/", get(get_rooms))
		.route("/{id}", get(get_room))
		.merge(authenticated)
}

/// Booking routes; the approval workflow is admin-only
fn booking_routes() -> Router<AppState> {
	let admin = Router::new()
		.route("/", get(get_bookings))
		.route("/{id}/approve", post(approve_booking))
		.route("/{id}/reject", post(reject_booking))
		.route_layer(AdminLayer);

	Router::new()
		.route("/mine", get(get_my_bookings))
		.route("/{id}", get(get_booking))
		.merge(admin)
		.route_layer(AuthLayer)
}
