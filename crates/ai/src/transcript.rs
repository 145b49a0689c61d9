use std::sync::{Arc, LazyLock};

use plant_shared::CompletedCourse;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::client::{GenerativeModel, ModelError, Part};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const EXTRACTION_PROMPT: &str = r#"
Please analyze this Northeastern University transcript/course list PDF and extract all completed courses.

For each course, extract:
- Course code (e.g., CS 2500, MATH 1341)
- Course name/title
- Credits
- Grade (if available)
- Semester/Term (if available)

Return the data in JSON format as an array of objects with these fields:
{
  "courseCode": "string",
  "courseName": "string",
  "credits": number,
  "grade": "string" (optional),
  "semester": "string" (optional)
}
"#;

static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid json array regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PDF file")]
    NotPdf,

    #[error("File size must be less than 10MB")]
    TooLarge,
}

/// Checks a file before it is sent anywhere.
pub fn validate_upload(mime_type: &str, size: usize) -> Result<(), UploadError> {
    if mime_type != PDF_MIME_TYPE {
        return Err(UploadError::NotPdf);
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Failed to parse course data from PDF")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to process PDF")]
    Model(#[from] ModelError),
}

/// The first `[` to the last `]`, or the whole reply when there is none.
pub fn extract_json_array(text: &str) -> &str {
    JSON_ARRAY
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(text)
}

pub fn parse_courses(text: &str) -> Result<Vec<CompletedCourse>, TranscriptError> {
    serde_json::from_str(extract_json_array(text)).map_err(TranscriptError::Parse)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTranscript {
    pub success: bool,
    pub courses: Vec<CompletedCourse>,
    pub total_courses: usize,
}

impl From<Vec<CompletedCourse>> for ParsedTranscript {
    fn from(courses: Vec<CompletedCourse>) -> Self {
        Self {
            success: true,
            total_courses: courses.len(),
            courses,
        }
    }
}

#[derive(Clone)]
pub struct TranscriptParser {
    model: Arc<dyn GenerativeModel>,
}

impl TranscriptParser {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Sends the PDF with the extraction prompt and reads back the course
    /// list. Not retried.
    pub async fn parse(&self, pdf: Vec<u8>) -> Result<ParsedTranscript, TranscriptError> {
        let size = pdf.len();
        let parts = vec![
            Part::text(EXTRACTION_PROMPT),
            Part::InlineData {
                mime_type: PDF_MIME_TYPE.to_owned(),
                data: pdf,
            },
        ];

        let text = self.model.generate(parts).await.inspect_err(|e| {
            tracing::error!(err = %e, size, "transcript extraction failed");
        })?;

        let courses = parse_courses(&text).inspect_err(|e| {
            tracing::error!(err = ?e, "model reply is not a course list");
        })?;

        tracing::info!(courses = courses.len(), "transcript parsed");

        Ok(courses.into())
    }
}
