use std::sync::Arc;

use aide::{
	axum::IntoApiResponse,
	openapi::{ApiKeyLocation, OpenApi, SecurityScheme, Tag},
	transform::TransformOpenApi,
};
use axum::{response::IntoResponse, Extension};

use crate::{error, extract::Json, session};

pub const SECURITY_SCHEME_SESSION: &str = "Session";

pub mod tag {
	pub const FEED: &str = "Feed";
	pub const POST: &str = "Post";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Yatube")
		.summary("A small blogging backend")
		.description("Authors write posts, optionally filed under a group. Visitors read them through paginated feeds.")
		.tag(Tag {
			name: tag::FEED.into(),
			description: Some("Paginated post feeds".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Post reading and authoring".into()),
			..Default::default()
		})
		.security_scheme(
			SECURITY_SCHEME_SESSION,
			SecurityScheme::ApiKey {
				location: ApiKeyLocation::Cookie,
				name: session::COOKIE_NAME.into(),
				description: Some("A user session cookie".into()),
				extensions: Default::default(),
			},
		)
		.default_response::<Json<error::ErrorResponse<'static>>>()
}

/// Serves the generated `OpenAPI` document.
pub async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
	Json(api.as_ref()).into_response()
}
