//! Assembly of the three post feeds.
//!
//! Each feed resolves its filter key, counts the matching posts, and fetches
//! only the slice the requested page covers.

use std::num::NonZeroU64;

use axum::http::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
	error::{self, ErrorShape},
	model::{Group, Post, User},
	paginate::{Page, PageNumber, Paginator},
	store::{PostFilter, Store},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown group {0}")]
	UnknownGroup(String),
	#[error("unknown user {0}")]
	UnknownUser(String),
}

impl ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownGroup(..) | Self::UnknownUser(..) => StatusCode::NOT_FOUND,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		vec![match self {
			Self::UnknownGroup(slug) => {
				error::Message::new("unknown_group").detail("group", slug.as_str())
			}
			Self::UnknownUser(username) => {
				error::Message::new("unknown_user").detail("user", username.as_str())
			}
		}]
	}
}

/// A page of a group's posts.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GroupFeed {
	pub group: Group,
	pub page: Page<Post>,
}

/// A page of a user's posts.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ProfileFeed {
	pub author: User,
	pub page: Page<Post>,
}

async fn page(
	store: &dyn Store,
	filter: PostFilter,
	per_page: NonZeroU64,
	number: PageNumber,
) -> Result<Page<Post>, crate::Error> {
	let count = store.count_posts(filter).await?;
	let meta = Paginator::new(count, per_page).page(number);

	let posts = if meta.limit == 0 {
		Vec::new()
	} else {
		store.posts(filter, meta.offset, meta.limit).await?
	};

	Ok(Page::new(meta, posts))
}

/// Every post, newest first.
pub async fn global(
	store: &dyn Store,
	per_page: NonZeroU64,
	number: PageNumber,
) -> Result<Page<Post>, crate::Error> {
	page(store, PostFilter::All, per_page, number).await
}

/// The posts filed under the group with `slug`, newest first.
pub async fn group(
	store: &dyn Store,
	slug: &str,
	per_page: NonZeroU64,
	number: PageNumber,
) -> Result<GroupFeed, crate::Error> {
	let group = store
		.group_by_slug(slug)
		.await?
		.ok_or_else(|| Error::UnknownGroup(slug.to_owned()))?;
	let page = page(store, PostFilter::Group(group.id), per_page, number).await?;

	Ok(GroupFeed { group, page })
}

/// The posts written by the user with `username`, newest first.
pub async fn profile(
	store: &dyn Store,
	username: &str,
	per_page: NonZeroU64,
	number: PageNumber,
) -> Result<ProfileFeed, crate::Error> {
	let author = store
		.user_by_username(username)
		.await?
		.ok_or_else(|| Error::UnknownUser(username.to_owned()))?;
	let page = page(store, PostFilter::Author(author.id), per_page, number).await?;

	Ok(ProfileFeed { author, page })
}

#[cfg(test)]
mod test {
	use std::num::NonZeroU64;

	use super::*;
	use crate::{model::PostInput, store::MemoryStore};

	const TEN: NonZeroU64 = match NonZeroU64::new(10) {
		Some(n) => n,
		None => unreachable!(),
	};

	fn number(n: &str) -> PageNumber {
		PageNumber::parse(Some(n))
	}

	async fn seed(store: &MemoryStore, author: &User, group: Option<&Group>, count: usize) {
		for i in 0..count {
			store
				.create_post(
					author.id,
					&PostInput {
						text: format!("{} post {i}", author.username),
						group: group.map(|group| group.id),
					},
				)
				.await
				.unwrap();
		}
	}

	#[tokio::test]
	async fn test_global_feed_pages() {
		let store = MemoryStore::new();
		let user = store.create_user("u1").await;
		seed(&store, &user, None, 14).await;

		let first = global(&store, TEN, number("1")).await.unwrap();
		assert_eq!(first.items.len(), 10);
		assert_eq!(first.items[0].text, "u1 post 13");
		assert!(first.has_next);

		let second = global(&store, TEN, number("2")).await.unwrap();
		assert_eq!(second.items.len(), 4);
		assert_eq!(second.items[3].text, "u1 post 0");
		assert!(!second.has_next);

		let third = global(&store, TEN, number("3")).await.unwrap();
		assert!(third.items.is_empty());
		assert_eq!(third.num_pages, 2);
	}

	#[tokio::test]
	async fn test_group_feed_excludes_other_groups() {
		let store = MemoryStore::new();
		let user = store.create_user("u1").await;
		let g1 = store.create_group("g1", "s1", "").await;
		let g2 = store.create_group("g2", "s2", "").await;
		seed(&store, &user, Some(&g1), 3).await;
		seed(&store, &user, Some(&g2), 2).await;
		seed(&store, &user, None, 1).await;

		let feed = group(&store, "s2", TEN, PageNumber::FIRST).await.unwrap();

		assert_eq!(feed.group, g2);
		assert_eq!(feed.page.count, 2);
		assert!(feed.page.items.iter().all(|post| post.group_id == Some(g2.id)));
	}

	#[tokio::test]
	async fn test_profile_feed_excludes_other_authors() {
		let store = MemoryStore::new();
		let u1 = store.create_user("u1").await;
		let u2 = store.create_user("u2").await;
		seed(&store, &u1, None, 4).await;
		seed(&store, &u2, None, 2).await;

		let feed = profile(&store, "u1", TEN, PageNumber::FIRST).await.unwrap();

		assert_eq!(feed.author, u1);
		assert_eq!(feed.page.count, 4);
		assert!(feed.page.items.iter().all(|post| post.author_id == u1.id));
	}

	#[tokio::test]
	async fn test_unknown_keys_are_not_found() {
		let store = MemoryStore::new();

		assert!(matches!(
			group(&store, "missing", TEN, PageNumber::FIRST).await,
			Err(crate::Error::Feed(Error::UnknownGroup(slug))) if slug == "missing"
		));
		assert!(matches!(
			profile(&store, "nobody", TEN, PageNumber::FIRST).await,
			Err(crate::Error::Feed(Error::UnknownUser(username))) if username == "nobody"
		));
	}
}
