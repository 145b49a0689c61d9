use std::sync::LazyLock;

use plant_shared::{Course, CourseCategory};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub(crate) use plant_shared::lenient::lenient_string;

static CREDIT_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("valid credit hours regex"));

/// Career-goal keywords and the departments whose electives suit them.
/// The first keyword contained in the goal wins.
pub const CAREER_DEPARTMENTS: &[(&str, &[&str])] = &[
    ("software engineer", &["CS", "IS", "CY", "DS"]),
    ("software engineering", &["CS", "IS", "CY", "DS"]),
    ("data scientist", &["DS", "STAT", "MATH", "CS"]),
    ("data science", &["DS", "STAT", "MATH", "CS"]),
    ("product manager", &["BUSN", "ENTR", "MKTG", "COMM"]),
    ("product management", &["BUSN", "ENTR", "MKTG", "COMM"]),
    ("cybersecurity", &["CY", "CS", "IS", "CRIM"]),
    ("cyber security", &["CY", "CS", "IS", "CRIM"]),
    ("machine learning", &["DS", "CS", "MATH", "STAT"]),
    ("ai", &["DS", "CS", "MATH", "STAT"]),
    ("artificial intelligence", &["DS", "CS", "MATH", "STAT"]),
    ("web developer", &["CS", "IS", "ARTG", "COMM"]),
    ("web development", &["CS", "IS", "ARTG", "COMM"]),
    ("mobile developer", &["CS", "IS", "ARTG"]),
    ("mobile development", &["CS", "IS", "ARTG"]),
    ("game developer", &["CS", "ARTG", "MUSI"]),
    ("game development", &["CS", "ARTG", "MUSI"]),
    ("devops", &["CS", "IS", "CY"]),
    ("cloud engineer", &["CS", "IS", "CY"]),
    ("full stack", &["CS", "IS", "ARTG"]),
    ("frontend", &["CS", "IS", "ARTG"]),
    ("backend", &["CS", "IS", "CY"]),
    ("database", &["CS", "IS", "DS"]),
    ("analyst", &["DS", "STAT", "BUSN", "ECON"]),
    ("consultant", &["BUSN", "COMM", "ECON", "PSYC"]),
    ("entrepreneur", &["ENTR", "BUSN", "MKTG", "COMM"]),
    ("startup", &["ENTR", "BUSN", "MKTG", "COMM"]),
];

pub const DEFAULT_DEPARTMENTS: &[&str] = &["CS", "BUSN", "COMM", "PSYC", "ECON"];

/// A catalog entry as published in the structured course list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits: String,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub attributes: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(default)]
    pub elective: bool,
}

/// Catalog entry annotated with a 1-5 difficulty rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWithDifficulty {
    #[serde(flatten)]
    pub course: CourseDetails,
    #[serde(default)]
    pub difficulty: f64,
}

/// First run of digits in a credit description such as "4 Hours"; 0 when none.
pub fn parse_credit_hours(credits: &str) -> u32 {
    CREDIT_HOURS
        .captures(credits)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

impl CourseDetails {
    /// Turns a catalog entry into a plan course. `index` is the position in
    /// the catalog and `now` disambiguates repeated additions.
    pub fn to_plan_course(&self, index: usize, now: i64) -> Course {
        let code = self
            .course_code
            .split(' ')
            .take(2)
            .collect::<String>();

        let credits = match parse_credit_hours(&self.credits) {
            0 => 3,
            n => n,
        };

        Course {
            id: format!("course-{}-{now}", index + 1),
            code,
            name: self.title.to_owned(),
            credits,
            prerequisites: vec![],
            category: CourseCategory::Core,
            completed: false,
        }
    }
}

/// Exact code lookup in the structured catalog. Returns the position too.
pub fn find_catalog_course<'a>(
    catalog: &'a [CourseDetails],
    code: &str,
) -> Option<(usize, &'a CourseDetails)> {
    catalog
        .iter()
        .enumerate()
        .find(|(_, c)| c.course_code == code)
        .or_else(|| {
            let wanted = plant_shared::normalize_course_code(code);
            catalog
                .iter()
                .enumerate()
                .find(|(_, c)| plant_shared::normalize_course_code(&c.course_code) == wanted)
        })
}

pub fn course_by_code<'a>(
    courses: &'a [CourseWithDifficulty],
    code: &str,
) -> Option<&'a CourseWithDifficulty> {
    let code = code.to_lowercase();
    courses
        .iter()
        .find(|c| c.course.course_code.to_lowercase() == code)
}

pub fn courses_by_difficulty(
    courses: &[CourseWithDifficulty],
    min: f64,
    max: f64,
) -> Vec<CourseWithDifficulty> {
    courses
        .iter()
        .filter(|c| c.difficulty >= min && c.difficulty <= max)
        .cloned()
        .collect()
}

pub fn courses_by_department(
    courses: &[CourseWithDifficulty],
    department: &str,
) -> Vec<CourseWithDifficulty> {
    let department = department.to_lowercase();
    courses
        .iter()
        .filter(|c| c.course.department.to_lowercase() == department)
        .cloned()
        .collect()
}

pub fn departments_for_career_goal(career_goal: &str) -> &'static [&'static str] {
    let goal = career_goal.to_lowercase();

    CAREER_DEPARTMENTS
        .iter()
        .find(|(keyword, _)| goal.contains(keyword))
        .map(|(_, departments)| *departments)
        .unwrap_or(DEFAULT_DEPARTMENTS)
}

/// Electives from the departments matching the career goal, in catalog order.
/// A blank goal suggests nothing.
pub fn electives_for_career_goal(
    courses: &[CourseWithDifficulty],
    career_goal: &str,
) -> Vec<CourseWithDifficulty> {
    if career_goal.trim().is_empty() {
        return vec![];
    }

    let departments = departments_for_career_goal(career_goal)
        .iter()
        .map(|d| d.to_lowercase())
        .collect::<Vec<_>>();

    courses
        .iter()
        .filter(|c| c.course.elective)
        .filter(|c| {
            let department = c.course.department.to_lowercase();
            departments.iter().any(|d| department.contains(d))
        })
        .cloned()
        .collect()
}

/// Up to `limit` career-goal electives, easiest first.
pub fn suggested_electives(
    courses: &[CourseWithDifficulty],
    career_goal: &str,
    limit: usize,
) -> Vec<CourseWithDifficulty> {
    let mut electives = electives_for_career_goal(courses, career_goal);
    electives.sort_by(|a, b| a.difficulty.total_cmp(&b.difficulty));
    electives.truncate(limit);

    electives
}
