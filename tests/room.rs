//! End-to-end tests for the read-only room surface

use axum::http::StatusCode;

mod common;

use common::TestEnv;
use roomboard::schemas::room::RoomResponse;

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a postgres database via DATABASE_URL"]
async fn rooms_list_in_name_order() {
	let env = TestEnv::new().await;

	env.seed_room("Workshop", "Building C").await;
	env.seed_room("Auditorium", "Building A").await;

	let response = env.app.get("/rooms").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let rooms = response.json::<Vec<RoomResponse>>();
	let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();

	assert_eq!(names, vec!["Auditorium", "Workshop"]);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a postgres database via DATABASE_URL"]
async fn unknown_rooms_are_not_found() {
	let env = TestEnv::new().await;

	let response = env.app.get("/rooms/999").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let seeded = env.seed_room("Lab-1", "Building A").await;
	let found = env.app.get(&format!("/rooms/{}", seeded.id)).await;

	assert_eq!(found.status_code(), StatusCode::OK);
	assert_eq!(found.json::<RoomResponse>().capacity, 12);
}
