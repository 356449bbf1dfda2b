#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod feed;
mod model;
mod openapi;
mod paginate;
mod permission;
mod response;
mod route;
mod session;
mod store;
mod trace;

use std::sync::Arc;

pub use error::Error;

pub type Database = Arc<dyn store::Store>;
pub type AppState = State;

/// The shared application state.
///
/// Handlers reach the store and the configuration through this, either
/// directly or through [`axum::extract::FromRef`].
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub config: Arc<config::Config>,
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();
	trace::init_tracing_subscriber();

	let config = config::Config::from_env().expect("invalid configuration");
	let store = store::PgStore::connect(&config.database_url)
		.await
		.expect("failed to connect to database");

	let port = config.port;
	let state = State {
		database: Arc::new(store),
		config: Arc::new(config),
	};

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(listener, route::app(state))
		.await
		.expect("server error");
}
