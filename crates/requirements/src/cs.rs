use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::catalog::lenient_string;
use crate::reconcile::{
    CategoryReport, ChecklistReport, CompetencyLine, CourseLedger, Progress, RequirementLine,
    count_states,
};

pub const CS_MAJOR_CODE: &str = "BSCS-CSCI";
pub const NUPATH_KEY: &str = "NUPath";

/// Checklist categories of the Computer Science degree, in display order.
pub const CS_CATEGORIES: &[(&str, &str)] = &[
    ("CS_Overview", "CS Overview"),
    ("CS_Fundamental", "CS Fundamentals"),
    ("CS_Required", "CS Required Courses"),
    ("Security_Requirement", "Security Requirement"),
    ("Presentation_Requirement", "Presentation Requirement"),
    ("Khoury_Approved_Electives", "Khoury Approved Electives"),
    ("Mathematics", "Mathematics"),
    ("Computing_and_Social_Issues", "Computing and Social Issues"),
    ("Electrical_Engineering", "Electrical Engineering"),
    ("Science_Requirement", "Science Requirement"),
    ("Writing", "Writing"),
    (NUPATH_KEY, "NU Path Requirements"),
];

const NUPATH_DESCRIPTION: &str = "Northeastern University's core curriculum requirements";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRule {
    #[serde(rename = "minRequired", default, deserialize_with = "lenient_count")]
    pub min_required: usize,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequirementCourse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "creditHours", default, deserialize_with = "lenient_string")]
    pub credit_hours: String,
    #[serde(default)]
    pub prerequisites: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Competency {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "fulfilledByCourses", default)]
    pub fulfilled_by_courses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuPath {
    #[serde(default)]
    pub competencies: Vec<Competency>,
}

/// The Computer Science degree requirement file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsRequirements {
    #[serde(default)]
    pub requirements: HashMap<String, CategoryRule>,
    #[serde(rename = "NUPath", default)]
    pub nupath: Option<NuPath>,
    #[serde(flatten)]
    lists: HashMap<String, serde_json::Value>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0) as usize,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

impl CsRequirements {
    /// Courses listed under a category key; missing or malformed lists are empty.
    pub fn courses(&self, key: &str) -> Vec<RequirementCourse> {
        let Some(value) = self.lists.get(key) else {
            return vec![];
        };

        match serde_json::from_value(value.clone()) {
            Ok(courses) => courses,
            Err(e) => {
                tracing::warn!(category = key, err = %e, "malformed requirement list");
                vec![]
            }
        }
    }

    pub fn rule(&self, key: &str) -> CategoryRule {
        self.requirements.get(key).cloned().unwrap_or_default()
    }

    pub fn competencies(&self) -> &[Competency] {
        self.nupath
            .as_ref()
            .map(|n| n.competencies.as_slice())
            .unwrap_or_default()
    }

    /// Total number of requirement courses across every listed category.
    pub fn course_count(&self) -> usize {
        CS_CATEGORIES
            .iter()
            .filter(|(key, _)| *key != NUPATH_KEY)
            .map(|(key, _)| self.courses(key).len())
            .sum()
    }
}

fn nupath_category(requirements: &CsRequirements, ledger: &CourseLedger, name: &str) -> CategoryReport {
    let competencies = requirements
        .competencies()
        .iter()
        .map(|c| CompetencyLine::new(ledger, &c.code, &c.name, &c.fulfilled_by_courses))
        .collect::<Vec<_>>();

    let total = competencies.len();
    let (fulfilled, planned) = count_states(competencies.iter().map(|c| &c.state));

    CategoryReport {
        key: NUPATH_KEY.to_owned(),
        name: name.to_owned(),
        description: NUPATH_DESCRIPTION.to_owned(),
        progress: Progress::capped(fulfilled, planned, total, total),
        requirements: vec![],
        competencies,
    }
}

/// Computer Science checklist for a plan and the user's transcript.
pub fn cs_checklist(requirements: &CsRequirements, ledger: &CourseLedger) -> ChecklistReport {
    let categories = CS_CATEGORIES
        .iter()
        .map(|(key, name)| {
            if *key == NUPATH_KEY {
                return nupath_category(requirements, ledger, name);
            }

            let rule = requirements.rule(key);
            let lines = requirements
                .courses(key)
                .iter()
                .map(|c| RequirementLine::new(ledger, &c.code, &c.name, &c.credit_hours))
                .collect::<Vec<_>>();

            let (fulfilled, planned) = count_states(lines.iter().map(|l| &l.state));

            CategoryReport {
                key: key.to_string(),
                name: name.to_string(),
                description: rule.description,
                progress: Progress::capped(fulfilled, planned, lines.len(), rule.min_required),
                requirements: lines,
                competencies: vec![],
            }
        })
        .collect();

    ChecklistReport::new("Computer Science", Some(CS_MAJOR_CODE), categories)
}
