use axum::{Json, extract::State};
use plant_shared::CompletedCourse;
use serde::{Deserialize, Serialize};

use crate::{auth::AuthUser, error::AppError, routes::AppState};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCourses {
    pub completed_courses: Vec<CompletedCourse>,
}

/// GET /me/completed-courses
pub async fn completed_courses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<CompletedCourses>, AppError> {
    let completed_courses = state.user_command.completed_courses(user.id).await?;

    Ok(Json(CompletedCourses { completed_courses }))
}

/// PUT /me/completed-courses - replaces the whole list
pub async fn set_completed_courses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CompletedCourses>,
) -> Result<Json<CompletedCourses>, AppError> {
    state
        .user_command
        .set_completed_courses(user.id.to_owned(), input.completed_courses)
        .await?;

    let completed_courses = state.user_command.completed_courses(user.id).await?;

    Ok(Json(CompletedCourses { completed_courses }))
}
