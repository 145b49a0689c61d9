use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use plant_ai::TranscriptError;
use serde_json::json;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("You do not have access to this plan")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Unavailable(String),

    /// Failure of an external processing step whose message is shown as is.
    #[error("{0}")]
    Processing(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Processing(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<plant_shared::Error> for AppError {
    fn from(err: plant_shared::Error) -> Self {
        match err {
            plant_shared::Error::Validate(e) => AppError::Validation(e.to_string()),
            plant_shared::Error::User(msg) => AppError::BadRequest(msg),
            plant_shared::Error::NotFound(_) => AppError::NotFound(err.to_string()),
            plant_shared::Error::Forbidden => AppError::Forbidden,
            plant_shared::Error::Server(msg) => AppError::Internal(msg),
            plant_shared::Error::Unknown(e) => AppError::Internal(format!("{e:#}")),
        }
    }
}

impl From<TranscriptError> for AppError {
    fn from(err: TranscriptError) -> Self {
        AppError::Processing(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(err.body_text()),
            _ => AppError::BadRequest(err.body_text()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{err:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Internal(e) => {
                tracing::error!(err = e, "internal error");
                INTERNAL_MESSAGE.to_owned()
            }
            AppError::Processing(msg) => {
                tracing::error!(err = msg, "processing failed");
                msg
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
