use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use plant_ai::{Assistant, TranscriptParser};
use plant_requirements::{DataCache, MajorDirectory};
use sqlx::SqlitePool;

mod account;
mod assistant;
mod catalog;
mod health;
mod me;
pub(crate) mod plans;
mod requirements;
mod transcript;

/// Multipart overhead allowed on top of the largest accepted PDF.
const UPLOAD_BODY_LIMIT: usize = plant_ai::transcript::MAX_UPLOAD_BYTES + 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub pool: SqlitePool,
    pub user_command: plant_user::Command,
    pub plan_command: plant_plan::Command,
    pub data: Arc<DataCache>,
    pub majors: Arc<MajorDirectory>,
    /// Absent when no API key is configured.
    pub transcript: Option<TranscriptParser>,
    pub assistant: Option<Assistant>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/signup", post(account::signup))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
        .route(
            "/me/completed-courses",
            get(me::completed_courses).put(me::set_completed_courses),
        )
        .route(
            "/api/parse-courses",
            post(transcript::parse_courses).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/plans", get(plans::list).post(plans::create))
        .route(
            "/plans/{id}",
            get(plans::get).put(plans::update).delete(plans::delete),
        )
        .route("/plans/{id}/edits", post(plans::edits))
        .route("/plans/{id}/summary", get(plans::summary))
        .route("/plans/{id}/requirements", get(requirements::checklist))
        .route("/plans/{id}/requirements/cs", get(requirements::cs))
        .route("/plans/{id}/requirements/major", get(requirements::major))
        .route("/plans/{id}/assistant", post(assistant::ask))
        .route("/plans/{id}/assistant/welcome", get(assistant::welcome))
        .route("/majors", get(catalog::majors))
        .route("/courses/electives", get(catalog::electives))
        .route("/courses/{code}", get(catalog::course))
        .with_state(app_state)
}
