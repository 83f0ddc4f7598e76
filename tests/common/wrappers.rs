//! Request wrappers for forwarding test identities

use axum_test::TestRequest;

/// Attach the identity headers an upstream authenticating proxy would
/// forward
pub trait Identify {
	#[must_use]
	fn as_user(self, id: &str) -> Self;

	#[must_use]
	fn as_admin(self) -> Self;
}

impl Identify for TestRequest {
	fn as_user(self, id: &str) -> Self {
		self.add_header("x-user-id", id)
			.add_header("x-user-name", "Test User")
			.add_header("x-user-email", "test@example.com")
	}

	fn as_admin(self) -> Self {
		self.as_user("admin-1").add_header("x-user-role", "admin")
	}
}
