pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;
pub mod services;

pub use error::AppError;
pub use routes::AppState;

/// Router with every route, without the transport layers added by `serve`.
pub fn create_app(state: AppState) -> axum::Router {
    routes::router(state)
}
