pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Create the app router
///
/// Builds the Axum router with all routes and the session guard configured.
/// Integration tests use this directly instead of starting the full server.
pub fn create_app(config: config::Config) -> anyhow::Result<axum::Router> {
    let backend = backend::BackendClient::new(&config.backend)?;

    Ok(routes::router(AppState { backend }))
}
