use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    #[default]
    Core,
    Elective,
    General,
}

/// A course placed inside a plan. Prerequisites are informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub category: CourseCategory,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub credits: u32,
}

impl Semester {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            courses: vec![],
            credits: 0,
        }
    }

    /// Sum of the credits of the courses currently in the semester,
    /// saturating at `u32::MAX`.
    pub fn course_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0, |total: u32, c| total.saturating_add(c.credits))
    }

    pub fn recompute_credits(&mut self) {
        self.credits = self.course_credits();
    }

    pub fn contains_course(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id == course_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub major: String,
    pub career_goal: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub user_id: String,
    pub status: PlanStatus,
    pub semesters: Vec<Semester>,
}

impl Plan {
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
