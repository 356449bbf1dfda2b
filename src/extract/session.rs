use std::sync::Arc;

use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request, Uri},
};
use url::form_urlencoded::Serializer;

use crate::{
	config::Config, error::Error, model, openapi::SECURITY_SCHEME_SESSION, session, Database,
};

/// Extracts the session and related user from the request, acting as the
/// login guard of the routes that take it.
///
/// Without a valid session cookie the request is rejected with
/// [`Error::LoginRequired`], which redirects to the login page with the
/// current path as the `next` parameter. Extractors run in order, so putting
/// this first means nothing else about the request is looked at.
///
/// ```rust,ignore
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub user: model::User,
}

/// Builds the login location that returns to `uri` afterwards.
pub fn login_location(login_url: &str, uri: &Uri) -> String {
	let next = uri
		.path_and_query()
		.map_or_else(|| uri.path(), |path| path.as_str());
	let query = Serializer::new(String::new())
		.append_pair("next", next)
		.finish();
	let separator = if login_url.contains('?') { '&' } else { '?' };

	format!("{login_url}{separator}{query}")
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Database: FromRef<S>,
	Arc<Config>: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let session_id = session::find_id(
			parts
				.headers
				.get_all(header::COOKIE)
				.into_iter()
				.filter_map(|value| value.to_str().ok()),
		);

		let user = match session_id {
			Some(id) => Database::from_ref(state).user_by_session(id).await?,
			None => None,
		};

		match user {
			Some(user) => Ok(Self { user }),
			None => {
				tracing::debug!(uri = %parts.uri, "no valid session, redirecting to login");

				let config = Arc::<Config>::from_ref(state);
				Err(Error::LoginRequired(login_location(
					&config.login_url,
					&parts.uri,
				)))
			}
		}
	}
}

impl OperationInput for Session {
	/// Adds a session cookie requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.push(
			[(SECURITY_SCHEME_SESSION.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		);
	}
}
