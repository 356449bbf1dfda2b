use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

use crate::paginate::PageNumber;

/// The page of a feed to return.
///
/// The page is kept as the raw string so that malformed values fall back to
/// the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize, Validate, JsonSchema)]
pub struct PageQuery {
	/// The page number to return (1-indexed).
	pub page: Option<String>,
}

impl PageQuery {
	pub fn number(&self) -> PageNumber {
		PageNumber::parse(self.page.as_deref())
	}
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PostPath {
	pub id: i64,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct GroupPath {
	pub slug: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct ProfilePath {
	pub username: String,
}
