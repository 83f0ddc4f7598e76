use std::convert::Infallible;
use std::pin::Pin;

use axum::body::Body;
use axum::extract::{FromRequestParts, Request};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use crate::error::Error;

/// The identity the upstream authenticating proxy forwarded with a request
///
/// This is an opaque snapshot from the identity collaborator; the engine
/// never resolves it back to a live profile.
#[derive(Clone, Debug)]
pub struct CurrentUser {
	pub id:    String,
	pub name:  String,
	pub email: String,
	pub admin: bool,
}

impl CurrentUser {
	/// Parse the forwarded identity headers, if present
	fn from_headers(headers: &HeaderMap) -> Option<Self> {
		let header = |name: &str| {
			headers
				.get(name)
				.and_then(|v| v.to_str().ok())
				.map(str::to_owned)
		};

		let id = header("x-user-id").filter(|id| !id.trim().is_empty())?;
		let name = header("x-user-name").unwrap_or_default();
		let email = header("x-user-email").unwrap_or_default();
		let admin = header("x-user-role").is_some_and(|r| r == "admin");

		Some(Self { id, name, email, admin })
	}
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<CurrentUser>()
			.cloned()
			.ok_or(Error::Unauthorized)
	}
}

/// Requires a forwarded identity and stores it in the request extensions
#[derive(Clone)]
pub struct AuthLayer;

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service { AuthMiddleware { inner } }
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>, Error = Infallible>
		+ Clone
		+ Send
		+ 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		Box::pin(async move {
			let Some(user) = CurrentUser::from_headers(req.headers()) else {
				debug!("request carried no forwarded identity");

				return Ok(Error::Unauthorized.into_response());
			};

			req.extensions_mut().insert(user);

			inner.call(req).await
		})
	}
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
		let mut headers = HeaderMap::new();

		for (name, value) in pairs {
			headers.insert(
				axum::http::HeaderName::try_from(*name).unwrap(),
				HeaderValue::from_str(value).unwrap(),
			);
		}

		headers
	}

	#[test]
	fn identity_requires_a_user_id() {
		assert!(CurrentUser::from_headers(&headers(&[])).is_none());
		assert!(
			CurrentUser::from_headers(&headers(&[("x-user-id", "  ")]))
				.is_none()
		);
	}

	#[test]
	fn identity_is_snapshotted_from_headers() {
		let user = CurrentUser::from_headers(&headers(&[
			("x-user-id", "u-1"),
			("x-user-name", "Jo Doe"),
			("x-user-email", "jo@example.com"),
		]))
		.unwrap();

		assert_eq!(user.id, "u-1");
		assert_eq!(user.name, "Jo Doe");
		assert_eq!(user.email, "jo@example.com");
		assert!(!user.admin);
	}

	#[test]
	fn only_the_admin_role_grants_admin() {
		let admin = CurrentUser::from_headers(&headers(&[
			("x-user-id", "u-1"),
			("x-user-role", "admin"),
		]))
		.unwrap();

		let other = CurrentUser::from_headers(&headers(&[
			("x-user-id", "u-2"),
			("x-user-role", "manager"),
		]))
		.unwrap();

		assert!(admin.admin);
		assert!(!other.admin);
	}
}
