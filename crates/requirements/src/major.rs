use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::lenient_string;
use crate::reconcile::{
    CategoryReport, ChecklistReport, CourseLedger, Progress, RequirementLine, count_states,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MajorCourse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MajorRequirements {
    #[serde(default)]
    pub catalog_description: Option<String>,
    #[serde(default)]
    pub total_credits: Option<serde_json::Value>,
    #[serde(default)]
    pub major_credits: Option<serde_json::Value>,
    #[serde(default)]
    pub gpa_requirement: Option<serde_json::Value>,
    #[serde(default)]
    pub core_courses: Vec<MajorCourse>,
    #[serde(default)]
    pub supporting_courses: Vec<MajorCourse>,
    #[serde(default)]
    pub concentrations: Vec<MajorCourse>,
    #[serde(default)]
    pub nupath: Vec<String>,
    /// Every other key, sorted; keys ending in `_courses` are extra categories.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MajorData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cip_code: Option<String>,
    #[serde(default)]
    pub catalog_url: Option<String>,
    #[serde(default)]
    pub requirements: MajorRequirements,
}

/// The requirement tree for every non-CS major, keyed by major code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MajorRequirementsFile {
    #[serde(default)]
    pub majors: HashMap<String, MajorData>,
}

impl MajorRequirementsFile {
    pub fn major(&self, code: &str) -> Option<&MajorData> {
        self.majors.get(code)
    }
}

/// `data_science_courses` becomes `Data Science`.
fn category_name(key: &str) -> String {
    key.trim_end_matches("_courses")
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn category(
    ledger: &CourseLedger,
    key: &str,
    name: &str,
    description: &str,
    courses: &[MajorCourse],
) -> CategoryReport {
    let lines = courses
        .iter()
        .map(|c| RequirementLine::new(ledger, &c.code, &c.title, &c.credits))
        .collect::<Vec<_>>();

    let (fulfilled, planned) = count_states(lines.iter().map(|l| &l.state));

    CategoryReport {
        key: key.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        progress: Progress::proportional(fulfilled, planned, lines.len()),
        requirements: lines,
        competencies: vec![],
    }
}

/// Checklist for a mapped major. Empty course lists are left out.
pub fn major_checklist(major: &MajorData, code: &str, ledger: &CourseLedger) -> ChecklistReport {
    let requirements = &major.requirements;
    let mut categories = vec![];

    for (key, name, description, courses) in [
        (
            "core_courses",
            "Core Courses",
            "Required core courses for the major",
            &requirements.core_courses,
        ),
        (
            "supporting_courses",
            "Supporting Courses",
            "Supporting courses required for the major",
            &requirements.supporting_courses,
        ),
        (
            "concentrations",
            "Concentrations",
            "Concentration courses for the major",
            &requirements.concentrations,
        ),
    ] {
        if !courses.is_empty() {
            categories.push(category(ledger, key, name, description, courses));
        }
    }

    for (key, value) in &requirements.other {
        if !key.ends_with("_courses") {
            continue;
        }

        let courses: Vec<MajorCourse> = match serde_json::from_value(value.clone()) {
            Ok(courses) => courses,
            Err(e) => {
                tracing::warn!(major = code, category = key, err = %e, "malformed course list");
                continue;
            }
        };

        if courses.is_empty() {
            continue;
        }

        let name = category_name(key);
        let description = format!("{name} courses for the major");
        categories.push(category(ledger, key, &name, &description, &courses));
    }

    if !requirements.nupath.is_empty() {
        let courses = requirements
            .nupath
            .iter()
            .map(|requirement| MajorCourse {
                code: requirement.to_owned(),
                ..Default::default()
            })
            .collect::<Vec<_>>();

        categories.push(category(
            ledger,
            "nupath",
            "NU Path Requirements",
            "Northeastern University core curriculum requirements",
            &courses,
        ));
    }

    ChecklistReport::new(&major.title, Some(code), categories)
}
