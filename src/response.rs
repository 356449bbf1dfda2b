use aide::{gen::GenContext, openapi, OperationOutput};
use axum::{
	body::Body,
	http::{header, Response, StatusCode},
	response::IntoResponse,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::extract::Json;

/// Characters left as-is in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// A `303 See Other` redirect, sent after a form-like `POST` so the client
/// follows up with a `GET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	location: String,
}

impl Redirect {
	pub fn to(location: impl Into<String>) -> Self {
		Self {
			location: location.into(),
		}
	}

	/// Redirects to the profile feed of `username`.
	pub fn profile(username: &str) -> Self {
		Self::to(format!(
			"/profile/{}",
			utf8_percent_encode(username, PATH_SEGMENT)
		))
	}

	/// Redirects to the detail view of a post.
	pub fn post(id: i64) -> Self {
		Self::to(format!("/posts/{id}"))
	}
}

impl IntoResponse for Redirect {
	fn into_response(self) -> Response<Body> {
		(StatusCode::SEE_OTHER, [(header::LOCATION, self.location)]).into_response()
	}
}

impl OperationOutput for Redirect {
	type Inner = Self;
}

/// A JSON body for the caller, or a redirect elsewhere.
pub enum JsonOrRedirect<T> {
	Json(T),
	Redirect(Redirect),
}

impl<T> IntoResponse for JsonOrRedirect<T>
where
	T: serde::Serialize,
{
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Json(body) => Json(body).into_response(),
			Self::Redirect(redirect) => redirect.into_response(),
		}
	}
}

impl<T> OperationOutput for JsonOrRedirect<T>
where
	Json<T>: OperationOutput,
{
	type Inner = T;

	fn operation_response(
		ctx: &mut GenContext,
		operation: &mut openapi::Operation,
	) -> Option<openapi::Response> {
		Json::<T>::operation_response(ctx, operation)
	}

	fn inferred_responses(
		ctx: &mut GenContext,
		operation: &mut openapi::Operation,
	) -> Vec<(Option<u16>, openapi::Response)> {
		Json::<T>::inferred_responses(ctx, operation)
	}
}
