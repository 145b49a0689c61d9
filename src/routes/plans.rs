use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use plant_plan::{CreatePlanInput, EditCommand, EditOutcome, PlanPatch, PlanSummary, SemesterEditor};
use plant_requirements::catalog::find_catalog_course;
use plant_shared::Plan;
use serde::{Deserialize, Serialize};

use crate::{auth::AuthUser, error::AppError, routes::AppState};

/// Fetches a plan and checks that the signed-in user owns it.
pub(crate) async fn owned_plan(
    state: &AppState,
    id: &str,
    user: &plant_user::User,
) -> Result<Plan, AppError> {
    let Some(plan) = state.plan_command.find(id).await? else {
        return Err(AppError::NotFound(format!("plan {id} not found")));
    };

    if !plan.is_owned_by(&user.id) {
        tracing::warn!(plan = plan.id, user = user.id, "plan access denied");
        return Err(AppError::Forbidden);
    }

    Ok(plan)
}

async fn reload(state: &AppState, id: &str) -> Result<Plan, AppError> {
    state
        .plan_command
        .find(id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("plan {id} missing after write")))
}

/// GET /plans
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Plan>>, AppError> {
    Ok(Json(state.plan_command.list_for_user(user.id).await?))
}

/// POST /plans
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CreatePlanInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.plan_command.create(user.id, input).await?;

    Ok((StatusCode::CREATED, Json(reload(&state, &id).await?)))
}

/// GET /plans/{id}
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Plan>, AppError> {
    Ok(Json(owned_plan(&state, &id, &user).await?))
}

/// PUT /plans/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<PlanPatch>,
) -> Result<Json<Plan>, AppError> {
    owned_plan(&state, &id, &user).await?;
    state.plan_command.update(id.to_owned(), patch).await?;

    Ok(Json(reload(&state, &id).await?))
}

/// DELETE /plans/{id}
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(plan) = state.plan_command.find(id.to_owned()).await? {
        if !plan.is_owned_by(&user.id) {
            return Err(AppError::Forbidden);
        }
    }

    state.plan_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct EditsInput {
    pub commands: Vec<EditCommand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditsOutput {
    pub changed: bool,
    pub plan: Plan,
}

/// POST /plans/{id}/edits - applies the commands in order and saves the
/// resulting semesters once. Any failing command aborts the whole batch.
pub async fn edits(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(input): Json<EditsInput>,
) -> Result<Json<EditsOutput>, AppError> {
    let plan = owned_plan(&state, &id, &user).await?;

    let needs_catalog = input
        .commands
        .iter()
        .any(|c| matches!(c, EditCommand::AddCatalogCourse { .. }));
    let catalog = if needs_catalog {
        state.data.course_catalog().await
    } else {
        Default::default()
    };

    let now = plant_shared::now_millis();
    let mut editor = SemesterEditor::new(plan.semesters);
    let mut changed = false;

    for command in input.commands {
        let outcome = editor.apply(command, now, |code| {
            find_catalog_course(&catalog, code).map(|(index, course)| course.to_plan_course(index, now))
        })?;

        changed |= outcome != EditOutcome::Unchanged;
    }

    if changed {
        state
            .plan_command
            .update(id.to_owned(), PlanPatch::semesters(editor.into_semesters()))
            .await?;
    }

    Ok(Json(EditsOutput {
        changed,
        plan: reload(&state, &id).await?,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOutput {
    pub summary: PlanSummary,
    pub report: String,
}

/// GET /plans/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SummaryOutput>, AppError> {
    let plan = owned_plan(&state, &id, &user).await?;

    Ok(Json(SummaryOutput {
        summary: PlanSummary::of(&plan),
        report: plant_plan::render_report(&plan),
    }))
}
