use axum::extract::State;
use macros::route;

use crate::{
	error::Error,
	extract::{Json, Path, Query},
	feed::{self, GroupFeed, ProfileFeed},
	model::Post,
	openapi::tag,
	paginate::Page,
	route::model,
	AppState,
};

/// Get all posts
/// Returns a page of all posts, newest first. Malformed page numbers return the first page,
/// and page numbers past the last page return an empty page.
#[route(tag = tag::FEED)]
pub async fn get_index(
	State(state): State<AppState>,
	Query(query): Query<model::PageQuery>,
) -> Result<Json<Page<Post>>, Error> {
	let page = feed::global(
		state.database.as_ref(),
		state.config.posts_per_page,
		query.number(),
	)
	.await?;

	Ok(Json(page))
}

/// Get group posts
/// Returns a group and a page of the posts filed under it, newest first.
#[route(tag = tag::FEED, response(status = 404, description = "Unknown group."))]
pub async fn get_group(
	State(state): State<AppState>,
	Path(path): Path<model::GroupPath>,
	Query(query): Query<model::PageQuery>,
) -> Result<Json<GroupFeed>, Error> {
	let feed = feed::group(
		state.database.as_ref(),
		&path.slug,
		state.config.posts_per_page,
		query.number(),
	)
	.await?;

	Ok(Json(feed))
}

/// Get profile posts
/// Returns a user and a page of the posts they wrote, newest first.
#[route(tag = tag::FEED, response(status = 404, description = "Unknown user."))]
pub async fn get_profile(
	State(state): State<AppState>,
	Path(path): Path<model::ProfilePath>,
	Query(query): Query<model::PageQuery>,
) -> Result<Json<ProfileFeed>, Error> {
	let feed = feed::profile(
		state.database.as_ref(),
		&path.username,
		state.config.posts_per_page,
		query.number(),
	)
	.await?;

	Ok(Json(feed))
}
