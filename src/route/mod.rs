use std::sync::Arc;

use aide::{
	axum::{routing::get, ApiRouter},
	openapi::OpenApi,
};
use axum::{Extension, Router};
use tower::Layer;
use tower_http::{normalize_path::NormalizePathLayer, trace::TraceLayer};

use crate::{openapi, AppState};

pub mod feed;
pub mod model;
pub mod post;

/// Builds the application router, including the generated `OpenAPI` document
/// at `/docs/api.json`.
pub fn router(state: AppState) -> Router {
	let mut api = OpenApi::default();

	let router = ApiRouter::new()
		.merge(feed::routes())
		.merge(post::routes())
		.route("/docs/api.json", get(openapi::serve_docs))
		.finish_api_with(&mut api, openapi::docs);

	router
		.layer(Extension(Arc::new(api)))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Builds the served application: the router behind trailing-slash
/// normalization, so `/group/s1/` and `/group/s1` reach the same handler.
pub fn app(state: AppState) -> Router {
	let router = NormalizePathLayer::trim_trailing_slash().layer(router(state));

	Router::new().fallback_service(router)
}
