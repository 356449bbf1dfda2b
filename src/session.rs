use uuid::Uuid;

pub const COOKIE_NAME: &str = "session";

/// Finds the session id among the `Cookie` headers of a request.
///
/// Returns `None` if there is no session cookie or its value is not a valid id.
pub fn find_id<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Uuid> {
	let cookie = headers
		.into_iter()
		.flat_map(cookie::Cookie::split_parse)
		.filter_map(Result::ok)
		.find(|cookie| cookie.name() == COOKIE_NAME)?;

	Uuid::parse_str(cookie.value()).ok()
}

/// Creates a session cookie with no expiry.
#[cfg(test)]
pub fn create_cookie(session_id: Uuid) -> cookie::Cookie<'static> {
	cookie::Cookie::build((COOKIE_NAME, session_id.to_string()))
		.http_only(true)
		.path("/")
		.into()
}
