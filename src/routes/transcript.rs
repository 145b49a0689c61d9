use axum::{
    Json,
    extract::{Multipart, State},
};
use plant_ai::ParsedTranscript;

use crate::{error::AppError, routes::AppState};

pub const PDF_FIELD: &str = "pdf";

/// POST /api/parse-courses - multipart upload with a `pdf` field
pub async fn parse_courses(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedTranscript>, AppError> {
    let mut pdf = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }

        pdf = Some(field.bytes().await?.to_vec());
        break;
    }

    let Some(pdf) = pdf else {
        return Err(AppError::BadRequest("No PDF file provided".to_owned()));
    };

    let Some(parser) = state.transcript.as_ref() else {
        tracing::error!("transcript parsing requested without an API key");
        return Err(AppError::Unavailable("Transcript parsing is not configured".to_owned()));
    };

    Ok(Json(parser.parse(pdf).await?))
}
