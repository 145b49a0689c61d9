use axum::{
    Json,
    extract::{Path, Query, State},
};
use plant_requirements::{CourseWithDifficulty, MajorOption};
use serde::Deserialize;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct MajorsQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /majors?q= - every major when the query is blank
pub async fn majors(
    State(state): State<AppState>,
    Query(query): Query<MajorsQuery>,
) -> Json<Vec<MajorOption>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Json(state.majors.majors().await.to_vec());
    }

    Json(state.majors.search(q).await)
}

/// GET /courses/{code}
pub async fn course(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CourseWithDifficulty>, AppError> {
    // Lookups read the cached catalog only; refresh it first.
    state.data.courses_with_difficulty().await;

    state
        .data
        .course_by_code(&code)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("course {code} not found")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectivesQuery {
    #[serde(default)]
    pub career_goal: String,
}

/// GET /courses/electives?careerGoal=
pub async fn electives(
    State(state): State<AppState>,
    Query(query): Query<ElectivesQuery>,
) -> Json<Vec<CourseWithDifficulty>> {
    state.data.courses_with_difficulty().await;

    Json(state.data.electives_for_career_goal(&query.career_goal).await)
}
