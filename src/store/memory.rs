use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Error, PostFilter, Store};
use crate::model::{Group, Post, PostInput, User};

#[derive(Debug)]
struct PostRecord {
	id: i64,
	text: String,
	author_id: Uuid,
	group_id: Option<i64>,
	created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Default)]
struct Inner {
	users: Vec<User>,
	groups: Vec<Group>,
	sessions: HashMap<Uuid, Uuid>,
	posts: Vec<PostRecord>,
}

impl Inner {
	fn hydrate(&self, record: &PostRecord) -> Post {
		let author = self
			.users
			.iter()
			.find(|user| user.id == record.author_id)
			.map(|user| user.username.clone())
			.unwrap_or_default();
		let group = record.group_id.and_then(|group_id| {
			self.groups
				.iter()
				.find(|group| group.id == group_id)
				.map(|group| group.slug.clone())
		});

		Post {
			id: record.id,
			text: record.text.clone(),
			author_id: record.author_id,
			author,
			group_id: record.group_id,
			group,
			created_at: record.created_at,
		}
	}

	/// Matching posts, newest first.
	fn filtered(&self, filter: PostFilter) -> Vec<&PostRecord> {
		let mut posts = self
			.posts
			.iter()
			.filter(|post| match filter {
				PostFilter::All => true,
				PostFilter::Group(group_id) => post.group_id == Some(group_id),
				PostFilter::Author(author_id) => post.author_id == author_id,
			})
			.collect::<Vec<_>>();

		posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
		posts
	}
}

/// A store kept entirely in memory, used to exercise the routes in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn create_user(&self, username: &str) -> User {
		let user = User {
			id: Uuid::new_v4(),
			username: username.into(),
			created_at: chrono::Utc::now(),
		};

		self.inner.write().await.users.push(user.clone());
		user
	}

	pub async fn create_group(&self, title: &str, slug: &str, description: &str) -> Group {
		let mut inner = self.inner.write().await;
		let group = Group {
			id: inner.groups.len() as i64 + 1,
			slug: slug.into(),
			title: title.into(),
			description: description.into(),
		};

		inner.groups.push(group.clone());
		group
	}

	/// Opens a session for `user`, returning its id.
	pub async fn create_session(&self, user: &User) -> Uuid {
		let session_id = Uuid::new_v4();

		self.inner
			.write()
			.await
			.sessions
			.insert(session_id, user.id);

		session_id
	}
}

#[axum::async_trait]
impl Store for MemoryStore {
	async fn user_by_session(&self, session_id: Uuid) -> Result<Option<User>, Error> {
		let inner = self.inner.read().await;
		let user = inner
			.sessions
			.get(&session_id)
			.and_then(|user_id| inner.users.iter().find(|user| user.id == *user_id))
			.cloned();

		Ok(user)
	}

	async fn user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
		let inner = self.inner.read().await;

		Ok(inner
			.users
			.iter()
			.find(|user| user.username == username)
			.cloned())
	}

	async fn group_by_slug(&self, slug: &str) -> Result<Option<Group>, Error> {
		let inner = self.inner.read().await;

		Ok(inner.groups.iter().find(|group| group.slug == slug).cloned())
	}

	async fn group_exists(&self, id: i64) -> Result<bool, Error> {
		let inner = self.inner.read().await;

		Ok(inner.groups.iter().any(|group| group.id == id))
	}

	async fn post(&self, id: i64) -> Result<Option<Post>, Error> {
		let inner = self.inner.read().await;

		Ok(inner
			.posts
			.iter()
			.find(|post| post.id == id)
			.map(|post| inner.hydrate(post)))
	}

	async fn count_posts(&self, filter: PostFilter) -> Result<u64, Error> {
		let inner = self.inner.read().await;

		Ok(inner.filtered(filter).len() as u64)
	}

	async fn posts(
		&self,
		filter: PostFilter,
		offset: u64,
		limit: u64,
	) -> Result<Vec<Post>, Error> {
		let inner = self.inner.read().await;

		Ok(inner
			.filtered(filter)
			.into_iter()
			.skip(usize::try_from(offset).unwrap_or(usize::MAX))
			.take(usize::try_from(limit).unwrap_or(usize::MAX))
			.map(|post| inner.hydrate(post))
			.collect())
	}

	async fn create_post(&self, author_id: Uuid, input: &PostInput) -> Result<Post, Error> {
		let mut inner = self.inner.write().await;
		let record = PostRecord {
			id: inner.posts.len() as i64 + 1,
			text: input.text.clone(),
			author_id,
			group_id: input.group,
			created_at: chrono::Utc::now(),
		};
		let post = inner.hydrate(&record);

		inner.posts.push(record);
		Ok(post)
	}

	async fn update_post(&self, id: i64, input: &PostInput) -> Result<Option<Post>, Error> {
		let mut inner = self.inner.write().await;
		let Some(record) = inner.posts.iter_mut().find(|post| post.id == id) else {
			return Ok(None);
		};

		record.text.clone_from(&input.text);
		record.group_id = input.group;

		let inner = &*inner;
		Ok(inner
			.posts
			.iter()
			.find(|post| post.id == id)
			.map(|post| inner.hydrate(post)))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn input(text: &str, group: Option<i64>) -> PostInput {
		PostInput {
			text: text.into(),
			group,
		}
	}

	#[tokio::test]
	async fn test_posts_are_newest_first() {
		let store = MemoryStore::new();
		let user = store.create_user("u1").await;

		for i in 0..5 {
			store
				.create_post(user.id, &input(&format!("post {i}"), None))
				.await
				.unwrap();
		}

		let posts = store.posts(PostFilter::All, 0, 10).await.unwrap();
		let texts = posts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>();

		assert_eq!(texts, ["post 4", "post 3", "post 2", "post 1", "post 0"]);
		assert!(posts.iter().all(|p| p.author == "u1"));
	}

	#[tokio::test]
	async fn test_filters() {
		let store = MemoryStore::new();
		let u1 = store.create_user("u1").await;
		let u2 = store.create_user("u2").await;
		let g1 = store.create_group("g1", "s1", "").await;
		let g2 = store.create_group("g2", "s2", "").await;

		store.create_post(u1.id, &input("a", Some(g1.id))).await.unwrap();
		store.create_post(u2.id, &input("b", Some(g2.id))).await.unwrap();
		store.create_post(u2.id, &input("c", None)).await.unwrap();

		let in_g1 = store.posts(PostFilter::Group(g1.id), 0, 10).await.unwrap();
		assert_eq!(in_g1.len(), 1);
		assert_eq!(in_g1[0].text, "a");
		assert_eq!(in_g1[0].group.as_deref(), Some("s1"));

		let by_u2 = store.posts(PostFilter::Author(u2.id), 0, 10).await.unwrap();
		assert_eq!(by_u2.len(), 2);
		assert_eq!(store.count_posts(PostFilter::Author(u2.id)).await.unwrap(), 2);
		assert_eq!(store.count_posts(PostFilter::All).await.unwrap(), 3);
	}

	#[tokio::test]
	async fn test_update_replaces_text_and_group() {
		let store = MemoryStore::new();
		let user = store.create_user("u1").await;
		let group = store.create_group("g1", "s1", "").await;
		let post = store
			.create_post(user.id, &input("before", Some(group.id)))
			.await
			.unwrap();

		let updated = store
			.update_post(post.id, &input("after", None))
			.await
			.unwrap()
			.unwrap();

		assert_eq!(updated.text, "after");
		assert_eq!(updated.group_id, None);
		assert_eq!(updated.author_id, user.id);
		assert!(store.update_post(999, &input("x", None)).await.unwrap().is_none());
	}
}
