use axum::{
    Json,
    extract::{Path, State},
};
use plant_ai::{AssistantContext, AssistantMessage, welcome_message};
use serde::Deserialize;
use validator::Validate;

use crate::{auth::AuthUser, error::AppError, routes::AppState, routes::plans::owned_plan};

/// GET /plans/{id}/assistant/welcome
pub async fn welcome(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<AssistantMessage>, AppError> {
    let plan = owned_plan(&state, &id, &user).await?;
    let courses = state.data.courses_with_difficulty().await;

    Ok(Json(welcome_message(&plan, &courses)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AskInput {
    #[validate(length(min = 1, max = 4000))]
    pub question: String,
}

/// POST /plans/{id}/assistant
pub async fn ask(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(input): Json<AskInput>,
) -> Result<Json<AssistantMessage>, AppError> {
    let question = input.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question must not be empty".to_owned()));
    }
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let Some(assistant) = state.assistant.as_ref() else {
        return Err(AppError::Unavailable("Assistant is not configured".to_owned()));
    };

    let plan = owned_plan(&state, &id, &user).await?;
    let courses = state.data.courses_with_difficulty().await;
    let cs_requirements = state.data.cs_requirements().await;

    let ctx = AssistantContext {
        plan: &plan,
        courses: &courses,
        cs_requirements: cs_requirements.as_deref(),
    };

    Ok(Json(assistant.ask(&ctx, question).await))
}
