use std::{env, num::NonZeroU64};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_POSTS_PER_PAGE: NonZeroU64 = match NonZeroU64::new(10) {
	Some(n) => n,
	None => unreachable!(),
};
pub const DEFAULT_LOGIN_URL: &str = "/auth/login/";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0} must be set")]
	Missing(&'static str),
	#[error("{name} must be {expected}, got {value:?}")]
	Invalid {
		name: &'static str,
		expected: &'static str,
		value: String,
	},
}

/// Runtime configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub port: u16,
	/// The number of posts on every feed page.
	pub posts_per_page: NonZeroU64,
	/// Where unauthenticated users are sent to log in.
	pub login_url: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			database_url: String::new(),
			port: DEFAULT_PORT,
			posts_per_page: DEFAULT_POSTS_PER_PAGE,
			login_url: DEFAULT_LOGIN_URL.into(),
		}
	}
}

impl Config {
	/// Reads the configuration from the process environment.
	///
	/// Call [`dotenvy::dotenv`] first to pick up a `.env` file.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let defaults = Self::default();

		let database_url = lookup("DATABASE_URL").ok_or(Error::Missing("DATABASE_URL"))?;
		let port = parse(&lookup, "PORT", "a port number")?.unwrap_or(defaults.port);
		let posts_per_page = parse(&lookup, "POSTS_PER_PAGE", "a positive integer")?
			.unwrap_or(defaults.posts_per_page);
		let login_url = lookup("LOGIN_URL").unwrap_or(defaults.login_url);

		Ok(Self {
			database_url,
			port,
			posts_per_page,
			login_url,
		})
	}
}

fn parse<T: std::str::FromStr>(
	lookup: &impl Fn(&str) -> Option<String>,
	name: &'static str,
	expected: &'static str,
) -> Result<Option<T>, Error> {
	lookup(name)
		.map(|value| {
			value.trim().parse().map_err(|_| Error::Invalid {
				name,
				expected,
				value,
			})
		})
		.transpose()
}
