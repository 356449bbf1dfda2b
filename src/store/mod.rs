//! Access to users, groups and posts.
//!
//! Every listing is ordered newest first by creation time, with ties broken by
//! the higher (later inserted) id.

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

use uuid::Uuid;

use crate::model::{Group, Post, PostInput, User};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// Which posts a listing covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostFilter {
	All,
	Group(i64),
	Author(Uuid),
}

#[axum::async_trait]
pub trait Store: Send + Sync {
	/// Resolves the user holding an active session.
	async fn user_by_session(&self, session_id: Uuid) -> Result<Option<User>, Error>;

	async fn user_by_username(&self, username: &str) -> Result<Option<User>, Error>;

	async fn group_by_slug(&self, slug: &str) -> Result<Option<Group>, Error>;

	async fn group_exists(&self, id: i64) -> Result<bool, Error>;

	async fn post(&self, id: i64) -> Result<Option<Post>, Error>;

	async fn count_posts(&self, filter: PostFilter) -> Result<u64, Error>;

	/// Returns at most `limit` posts matching `filter`, skipping the first `offset`.
	async fn posts(&self, filter: PostFilter, offset: u64, limit: u64)
		-> Result<Vec<Post>, Error>;

	async fn create_post(&self, author_id: Uuid, input: &PostInput) -> Result<Post, Error>;

	/// Replaces the text and group of a post. Returns `None` if it does not exist.
	async fn update_post(&self, id: i64, input: &PostInput) -> Result<Option<Post>, Error>;
}
