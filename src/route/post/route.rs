use axum::extract::State;
use macros::route;
use validator::{ValidationError, ValidationErrors};

use crate::{
	error,
	extract::{Json, Path, Session},
	model::{Post, PostInput},
	openapi::tag,
	permission,
	response::{JsonOrRedirect, Redirect},
	route::model,
	store::Store,
	AppState,
};

use super::Error;

/// Rejects a group reference that does not resolve, the way field
/// validation rejects blank text.
async fn validate_group(store: &dyn Store, input: &PostInput) -> Result<(), error::Error> {
	let Some(group_id) = input.group else {
		return Ok(());
	};

	if store.group_exists(group_id).await? {
		return Ok(());
	}

	let mut errors = ValidationErrors::new();
	errors.add("group", ValidationError::new("unknown_group"));

	Err(errors.into())
}

/// Get post
/// Returns a single post by its unique id.
#[route(tag = tag::POST, response(status = 404, description = "Unknown post."))]
pub async fn get_post(
	State(state): State<AppState>,
	Path(path): Path<model::PostPath>,
) -> Result<Json<Post>, error::Error> {
	let post = state.database.post(path.id).await?;

	Ok(Json(post.ok_or(Error::UnknownPost(path.id))?))
}

/// Create post
/// Creates a post authored by the authenticated user, then redirects to their profile.
/// Unauthenticated requests are redirected to the login page.
#[route(
	tag = tag::POST,
	response(status = 303, description = "Created, or login required."),
	response(status = 400, description = "Invalid text or group.")
)]
pub async fn create_post(
	State(state): State<AppState>,
	session: Session,
	Json(input): Json<PostInput>,
) -> Result<Redirect, error::Error> {
	validate_group(state.database.as_ref(), &input).await?;

	let post = state.database.create_post(session.user.id, &input).await?;

	tracing::info!(post = post.id, author = %session.user.username, "created post");

	Ok(Redirect::profile(&session.user.username))
}

/// Get post for editing
/// Returns the current text and group of a post to its author. Anyone else is redirected to the
/// post, and unauthenticated requests are redirected to the login page.
#[route(
	tag = tag::POST,
	response(status = 303, description = "Not the author, or login required."),
	response(status = 404, description = "Unknown post.")
)]
pub async fn get_edit_post(
	State(state): State<AppState>,
	session: Session,
	Path(path): Path<model::PostPath>,
) -> Result<JsonOrRedirect<PostInput>, error::Error> {
	let post = state
		.database
		.post(path.id)
		.await?
		.ok_or(Error::UnknownPost(path.id))?;

	if !permission::can_edit(&session.user, &post) {
		return Ok(JsonOrRedirect::Redirect(Redirect::post(post.id)));
	}

	Ok(JsonOrRedirect::Json(PostInput {
		text: post.text,
		group: post.group_id,
	}))
}

/// Edit post
/// Replaces the text and group of a post, then redirects to it. Only the author may edit a post,
/// anyone else is redirected to the post unchanged. Unauthenticated requests are redirected
/// to the login page.
#[route(
	tag = tag::POST,
	response(status = 303, description = "Edited, not the author, or login required."),
	response(status = 400, description = "Invalid text or group."),
	response(status = 404, description = "Unknown post.")
)]
pub async fn edit_post(
	State(state): State<AppState>,
	session: Session,
	Path(path): Path<model::PostPath>,
	Json(input): Json<PostInput>,
) -> Result<Redirect, error::Error> {
	validate_group(state.database.as_ref(), &input).await?;

	let post = state
		.database
		.post(path.id)
		.await?
		.ok_or(Error::UnknownPost(path.id))?;
	let detail = Redirect::post(post.id);

	if !permission::can_edit(&session.user, &post) {
		tracing::info!(
			post = post.id,
			user = %session.user.username,
			"denied edit by someone other than the author"
		);

		return Ok(detail);
	}

	state
		.database
		.update_post(post.id, &input)
		.await?
		.ok_or(Error::UnknownPost(post.id))?;

	tracing::info!(post = post.id, "edited post");

	Ok(detail)
}
