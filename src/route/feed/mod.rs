use aide::axum::{routing::get_with, ApiRouter};

use crate::AppState;

pub mod route;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/", get_with(get_index, get_index_docs))
		.api_route("/group/:slug", get_with(get_group, get_group_docs))
		.api_route("/profile/:username", get_with(get_profile, get_profile_docs))
}
