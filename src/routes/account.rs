use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use plant_user::{LoginInput, RegisterInput};
use serde_json::json;

use crate::{auth, error::AppError, routes::AppState};

/// POST /signup - creates the account and opens a session
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, AppError> {
    let email = input.email.to_owned();
    let id = state.user_command.register(input).await?;
    let cookie = auth::build_cookie(&state.config.jwt, id.to_owned())?;

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(json!({ "id": id, "email": email })),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, AppError> {
    let email = input.email.to_owned();
    let id = state.user_command.login(input).await?;
    let cookie = auth::build_cookie(&state.config.jwt, id.to_owned())?;

    tracing::info!(user = id, "user logged in");

    Ok((jar.add(cookie), Json(json!({ "id": id, "email": email }))))
}

/// POST /logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(auth::removal_cookie()), StatusCode::NO_CONTENT)
}
