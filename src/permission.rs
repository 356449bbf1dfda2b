use crate::model::{Post, User};

/// Whether `actor` may edit `post`. Only the author may.
pub fn can_edit(actor: &User, post: &Post) -> bool {
	actor.id == post.author_id
}
