use axum::{
    Json,
    extract::{Path, State},
};
use plant_requirements::{
    ChecklistReport, CourseLedger, cs_checklist, major_checklist, map_major_name_to_code,
    uses_cs_checklist,
};
use plant_shared::Plan;

use crate::{auth::AuthUser, error::AppError, routes::AppState, routes::plans::owned_plan};

async fn ledger(state: &AppState, plan: &Plan, user: &plant_user::User) -> Result<CourseLedger, AppError> {
    let completed = state.user_command.completed_courses(user.id.to_owned()).await?;

    Ok(CourseLedger::new(plan, &completed))
}

async fn cs_report(state: &AppState, plan: &Plan, ledger: &CourseLedger) -> Result<ChecklistReport, AppError> {
    let Some(requirements) = state.data.cs_requirements().await else {
        tracing::error!(plan = plan.id, "cs requirements unavailable");
        return Err(AppError::Unavailable("Failed to load CS requirements".to_owned()));
    };

    Ok(cs_checklist(&requirements, ledger))
}

async fn major_report(state: &AppState, plan: &Plan, ledger: &CourseLedger) -> Result<ChecklistReport, AppError> {
    let Some(code) = map_major_name_to_code(&plan.major) else {
        return Err(AppError::NotFound(format!(
            "Requirements not available for {}",
            plan.major
        )));
    };

    let Some(file) = state.data.major_requirements().await else {
        tracing::error!(plan = plan.id, "major requirements unavailable");
        return Err(AppError::Unavailable("Failed to load major requirements".to_owned()));
    };

    let Some(major) = file.major(code) else {
        return Err(AppError::NotFound(format!("Requirements not available for {code}")));
    };

    Ok(major_checklist(major, code, ledger))
}

/// GET /plans/{id}/requirements - CS checklist for majors mapped to the CS
/// tree, the major checklist otherwise
pub async fn checklist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ChecklistReport>, AppError> {
    let plan = owned_plan(&state, &id, &user).await?;
    let ledger = ledger(&state, &plan, &user).await?;

    let report = if uses_cs_checklist(&plan.major) {
        cs_report(&state, &plan, &ledger).await?
    } else {
        major_report(&state, &plan, &ledger).await?
    };

    Ok(Json(report))
}

/// GET /plans/{id}/requirements/cs
pub async fn cs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ChecklistReport>, AppError> {
    let plan = owned_plan(&state, &id, &user).await?;
    let ledger = ledger(&state, &plan, &user).await?;

    Ok(Json(cs_report(&state, &plan, &ledger).await?))
}

/// GET /plans/{id}/requirements/major
pub async fn major(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ChecklistReport>, AppError> {
    let plan = owned_plan(&state, &id, &user).await?;
    let ledger = ledger(&state, &plan, &user).await?;

    Ok(Json(major_report(&state, &plan, &ledger).await?))
}
