use serde::{Deserialize, Serialize};

use crate::lenient::{lenient_number, lenient_string};

/// A course recorded on the user profile, usually extracted from a transcript.
/// It is never linked to a specific plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCourse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub credits: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

/// Canonical form used for every course code comparison: whitespace removed,
/// upper-cased. A blank code normalizes to the empty string, which callers
/// must treat as matching nothing.
pub fn normalize_course_code(code: &str) -> String {
    let normalized: String = code
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if normalized.is_empty() {
        tracing::warn!(code, "course code is blank");
    }

    normalized
}
