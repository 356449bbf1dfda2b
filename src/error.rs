use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{header, Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{feed, route, store};

pub type Map = serde_json::Map<String, serde_json::Value>;

/// Error type for the application.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("feed error: {0}")]
	Feed(#[from] feed::Error),
	#[error("post error: {0}")]
	Post(#[from] route::post::Error),
	/// The request needs an authenticated user. Holds the login location,
	/// including the path to return to afterwards.
	#[error("login required")]
	LoginRequired(String),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
}

/// A single error message that is sent to the client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// A short, machine-readable description of the error.
	pub content: Cow<'a, str>,
	/// The input field that caused the error, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	/// Additional information about the error.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Cow<'a, Map>>,
}

impl<'a> Message<'a> {
	pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	#[must_use]
	pub fn field(mut self, field: impl Into<Cow<'a, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	#[must_use]
	pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Default::default)
			.to_mut()
			.insert(key.into(), value.into());
		self
	}
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
	pub errors: Vec<Message<'a>>,
}

/// Describes how a module-specific error is presented to the client.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;
	fn errors(&self) -> Vec<Message<'_>>;
}

fn respond(status: StatusCode, errors: Vec<Message<'_>>) -> Response<Body> {
	(status, Json(ErrorResponse { errors })).into_response()
}

fn shaped(error: &impl ErrorShape) -> Response<Body> {
	respond(error.status(), error.errors())
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Validation(errors) => respond(
				StatusCode::BAD_REQUEST,
				errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						errors.iter().map(move |error| {
							Message::new(error.code.clone()).field(field.to_string())
						})
					})
					.collect(),
			),
			Self::Json(error) => respond(
				StatusCode::BAD_REQUEST,
				vec![Message::new(error.body_text())],
			),
			Self::Query(error) => respond(
				StatusCode::BAD_REQUEST,
				vec![Message::new(error.body_text())],
			),
			Self::Path(error) => {
				tracing::debug!(%error, "unmatched path parameter");
				respond(StatusCode::NOT_FOUND, vec![Message::new("not_found")])
			}
			Self::Feed(ref error) => shaped(error),
			Self::Post(ref error) => shaped(error),
			Self::LoginRequired(location) => {
				(StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
			}
			Self::Store(error) => {
				tracing::error!(%error, "store failure");
				respond(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
			}
		}
	}
}

impl OperationOutput for Error {
	type Inner = Self;
}

#[cfg(test)]
mod test {
	use axum::{http::StatusCode, response::IntoResponse};
	use validator::{ValidationError, ValidationErrors};

	use super::{Error, Message};

	#[test]
	fn test_message_details() {
		let message = Message::new("unknown_post").detail("post", 4);

		let value = serde_json::to_value(&message).unwrap();

		assert_eq!(
			value,
			serde_json::json!({ "content": "unknown_post", "details": { "post": 4 } })
		);
	}

	#[test]
	fn test_validation_is_bad_request() {
		let mut errors = ValidationErrors::new();
		errors.add("group", ValidationError::new("unknown_group"));

		let response = Error::from(errors).into_response();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn test_login_required_redirects() {
		let response = Error::LoginRequired("/auth/login/?next=%2Fcreate".into()).into_response();

		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(
			response.headers()["location"],
			"/auth/login/?next=%2Fcreate"
		);
	}
}
