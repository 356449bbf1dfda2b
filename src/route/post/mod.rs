use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(i64),
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/create", post_with(create_post, create_post_docs))
		.api_route("/posts/:id", get_with(get_post, get_post_docs))
		.api_route(
			"/posts/:id/edit",
			get_with(get_edit_post, get_edit_post_docs).post_with(edit_post, edit_post_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownPost(post) => {
				vec![error::Message::new("unknown_post").detail("post", *post)]
			}
		}
	}
}
