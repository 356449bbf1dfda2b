use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A single user.
///
/// Users are registered and authenticated elsewhere, this service only
/// reads them to resolve authors and session holders.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema, sqlx::FromRow)]
pub struct User {
	/// The unique identifier of the user.
	pub id: Uuid,
	/// The handle that is displayed to the public.
	pub username: String,
	/// The creation time of the user.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A named topic that posts can be filed under.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Group {
	/// The unique identifier of the group, used to file posts under it.
	pub id: i64,
	/// The unique, URL-safe identifier of the group.
	pub slug: String,
	pub title: String,
	pub description: String,
}

/// A single post, created by a user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post.
	pub id: i64,
	/// The content of the post.
	pub text: String,
	/// The user that created the post.
	pub author_id: Uuid,
	/// The username of the author.
	pub author: String,
	/// The group the post is filed under, if any.
	pub group_id: Option<i64>,
	/// The slug of the group the post is filed under, if any.
	pub group: Option<String>,
	/// The creation time of the post, the sole sort key of every feed.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
	if text.trim().is_empty() {
		return Err(ValidationError::new("blank"));
	}

	Ok(())
}

/// The fields a user may set when creating or editing a post.
///
/// Has no author field: the author is always the authenticated user, and an
/// author sent by a client is dropped.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, Validate)]
pub struct PostInput {
	/// The content of the post.
	#[validate(custom(function = "validate_text"))]
	pub text: String,
	/// The id of the group to file the post under.
	#[serde(default)]
	pub group: Option<i64>,
}
