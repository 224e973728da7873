pub mod assets;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;
pub mod template;

pub use routes::AppState;

/// Create the app router
///
/// Builds the API client from configuration and wires up all routes.
/// Used by the binary and by integration tests, which point the backend
/// base URL at a mock server.
pub fn create_app(config: config::Config) -> anyhow::Result<axum::Router> {
    let api = runhub_client::ApiClient::new(&config.api.base_url)?;
    Ok(routes::router(AppState { config, api }))
}
