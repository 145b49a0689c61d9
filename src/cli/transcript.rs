use std::path::{Path, PathBuf};

use anyhow::Context;
use plant_ai::{TranscriptParser, transcript::PDF_MIME_TYPE, validate_upload};

use crate::{config::Config, services};

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

/// Parses a transcript PDF and stores the courses on the user record,
/// replacing whatever was there.
#[tracing::instrument(skip(config))]
pub async fn import(config: Config, user_id: String, file: PathBuf) -> anyhow::Result<()> {
    let size = tokio::fs::metadata(&file)
        .await
        .with_context(|| format!("cannot read {}", file.display()))?
        .len();
    validate_upload(mime_type(&file), usize::try_from(size).unwrap_or(usize::MAX))?;

    let Some(model) = services::generative_model(&config.ai, &config.ai.api_key)? else {
        anyhow::bail!("GEMINI_API_KEY is not set");
    };

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let command = plant_user::Command::new(plant_shared::State::new(pool.clone()));

    if command.find(user_id.to_owned()).await?.is_none() {
        anyhow::bail!("user {user_id} not found");
    }

    let pdf = tokio::fs::read(&file).await?;
    let parsed = TranscriptParser::new(model).parse(pdf).await?;

    command
        .set_completed_courses(user_id.to_owned(), parsed.courses)
        .await?;

    tracing::info!(user = user_id, total = parsed.total_courses, "transcript imported");
    pool.close().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(mime_type(Path::new("transcript.pdf")), PDF_MIME_TYPE);
        assert_eq!(mime_type(Path::new("TRANSCRIPT.PDF")), PDF_MIME_TYPE);
        assert_ne!(mime_type(Path::new("transcript.png")), PDF_MIME_TYPE);
        assert_ne!(mime_type(Path::new("transcript")), PDF_MIME_TYPE);
    }
}
