use uuid::Uuid;

use super::{Error, PostFilter, Store};
use crate::model::{Group, Post, PostInput, User};

pub type Pool = sqlx::Pool<sqlx::Postgres>;

/// Post columns joined with the author's username and the group's slug.
const POST_SELECT: &str = r#"
	SELECT
		post.id, post.text, post.author_id, "user".username AS author,
		post.group_id, "group".slug AS "group", post.created_at
	FROM post
	JOIN "user" ON "user".id = post.author_id
	LEFT JOIN "group" ON "group".id = post.group_id
"#;

/// Matches every post when both binds are null.
const POST_FILTER: &str = r#"
	WHERE ($1::BIGINT IS NULL OR post.group_id = $1)
	AND ($2::UUID IS NULL OR post.author_id = $2)
"#;

fn filter_binds(filter: PostFilter) -> (Option<i64>, Option<Uuid>) {
	match filter {
		PostFilter::All => (None, None),
		PostFilter::Group(group_id) => (Some(group_id), None),
		PostFilter::Author(author_id) => (None, Some(author_id)),
	}
}

fn to_i64(value: u64) -> i64 {
	i64::try_from(value).unwrap_or(i64::MAX)
}

#[derive(Clone)]
pub struct PgStore {
	database: Pool,
}

impl PgStore {
	pub fn new(database: Pool) -> Self {
		Self { database }
	}

	pub async fn connect(url: &str) -> Result<Self, Error> {
		Ok(Self::new(Pool::connect(url).await?))
	}
}

#[axum::async_trait]
impl Store for PgStore {
	async fn user_by_session(&self, session_id: Uuid) -> Result<Option<User>, Error> {
		let user = sqlx::query_as::<_, User>(
			r#"
				SELECT id, username, created_at FROM "user" WHERE id = (
					SELECT user_id FROM session WHERE id = $1
				)
			"#,
		)
		.bind(session_id)
		.fetch_optional(&self.database)
		.await?;

		Ok(user)
	}

	async fn user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
		let user = sqlx::query_as::<_, User>(
			r#"SELECT id, username, created_at FROM "user" WHERE username = $1"#,
		)
		.bind(username)
		.fetch_optional(&self.database)
		.await?;

		Ok(user)
	}

	async fn group_by_slug(&self, slug: &str) -> Result<Option<Group>, Error> {
		let group = sqlx::query_as::<_, Group>(
			r#"SELECT id, slug, title, description FROM "group" WHERE slug = $1"#,
		)
		.bind(slug)
		.fetch_optional(&self.database)
		.await?;

		Ok(group)
	}

	async fn group_exists(&self, id: i64) -> Result<bool, Error> {
		let exists =
			sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS (SELECT 1 FROM "group" WHERE id = $1)"#)
				.bind(id)
				.fetch_one(&self.database)
				.await?;

		Ok(exists)
	}

	async fn post(&self, id: i64) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE post.id = $1"))
			.bind(id)
			.fetch_optional(&self.database)
			.await?;

		Ok(post)
	}

	async fn count_posts(&self, filter: PostFilter) -> Result<u64, Error> {
		let (group_id, author_id) = filter_binds(filter);
		let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM post {POST_FILTER}"))
			.bind(group_id)
			.bind(author_id)
			.fetch_one(&self.database)
			.await?;

		Ok(u64::try_from(count).unwrap_or_default())
	}

	async fn posts(
		&self,
		filter: PostFilter,
		offset: u64,
		limit: u64,
	) -> Result<Vec<Post>, Error> {
		let (group_id, author_id) = filter_binds(filter);
		let posts = sqlx::query_as::<_, Post>(&format!(
			r#"
				{POST_SELECT}
				{POST_FILTER}
				ORDER BY post.created_at DESC, post.id DESC
				LIMIT $3 OFFSET $4
			"#
		))
		.bind(group_id)
		.bind(author_id)
		.bind(to_i64(limit))
		.bind(to_i64(offset))
		.fetch_all(&self.database)
		.await?;

		Ok(posts)
	}

	async fn create_post(&self, author_id: Uuid, input: &PostInput) -> Result<Post, Error> {
		let mut tx = self.database.begin().await?;

		let id = sqlx::query_scalar::<_, i64>(
			r#"
				INSERT INTO post (text, author_id, group_id)
				VALUES ($1, $2, $3)
				RETURNING id
			"#,
		)
		.bind(&input.text)
		.bind(author_id)
		.bind(input.group)
		.fetch_one(&mut *tx)
		.await?;

		let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE post.id = $1"))
			.bind(id)
			.fetch_one(&mut *tx)
			.await?;

		tx.commit().await?;

		Ok(post)
	}

	async fn update_post(&self, id: i64, input: &PostInput) -> Result<Option<Post>, Error> {
		let mut tx = self.database.begin().await?;

		let updated = sqlx::query(r#"UPDATE post SET text = $1, group_id = $2 WHERE id = $3"#)
			.bind(&input.text)
			.bind(input.group)
			.bind(id)
			.execute(&mut *tx)
			.await?;

		if updated.rows_affected() == 0 {
			return Ok(None);
		}

		let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE post.id = $1"))
			.bind(id)
			.fetch_optional(&mut *tx)
			.await?;

		tx.commit().await?;

		Ok(post)
	}
}
