//! Matching requirement course codes against what a student has done.
//!
//! A requirement can be satisfied by two kinds of records: courses inside a
//! plan that are ticked as completed, and courses recorded on the user
//! profile from a transcript. [`CourseLedger`] holds both behind one type and
//! remembers where each entry came from.
//!
//! Rules:
//! - codes are compared after [`normalize_course_code`], blank codes never match
//! - fulfilled: a completed plan course or any transcript record matches
//! - planned: an uncompleted plan course matches and nothing fulfills it
//! - fulfilled takes precedence over planned

use plant_shared::{CompletedCourse, Plan, normalize_course_code};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Plan,
    Transcript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementState {
    Fulfilled,
    Planned,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    #[serde(skip)]
    pub normalized_code: String,
    pub course_code: String,
    pub course_name: String,
    pub completed: bool,
    pub provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseLedger {
    entries: Vec<LedgerEntry>,
}

impl CourseLedger {
    /// Plan courses come first, then transcript records.
    pub fn new(plan: &Plan, completed: &[CompletedCourse]) -> Self {
        let from_plan = plan.semesters.iter().flat_map(|s| {
            s.courses.iter().map(move |c| LedgerEntry {
                normalized_code: normalize_course_code(&c.code),
                course_code: c.code.to_owned(),
                course_name: c.name.to_owned(),
                completed: c.completed,
                provenance: Provenance::Plan,
                grade: None,
                semester: Some(s.name.to_owned()),
            })
        });

        let from_transcript = completed.iter().map(|c| LedgerEntry {
            normalized_code: normalize_course_code(&c.course_code),
            course_code: c.course_code.to_owned(),
            course_name: c.course_name.to_owned(),
            completed: true,
            provenance: Provenance::Transcript,
            grade: c.grade.to_owned(),
            semester: c.semester.to_owned(),
        });

        Self {
            entries: from_plan.chain(from_transcript).collect(),
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    fn matching(&self, code: &str) -> impl Iterator<Item = &LedgerEntry> {
        let wanted = normalize_course_code(code);

        self.entries
            .iter()
            .filter(move |e| !wanted.is_empty() && e.normalized_code == wanted)
    }

    /// Completed entries matching `code`, plan entries first.
    pub fn fulfilling(&self, code: &str) -> Vec<&LedgerEntry> {
        self.matching(code).filter(|e| e.completed).collect()
    }

    pub fn is_fulfilled(&self, code: &str) -> bool {
        self.matching(code).any(|e| e.completed)
    }

    pub fn is_planned(&self, code: &str) -> bool {
        self.matching(code)
            .any(|e| !e.completed && e.provenance == Provenance::Plan)
    }

    pub fn state_of(&self, code: &str) -> RequirementState {
        if self.is_fulfilled(code) {
            RequirementState::Fulfilled
        } else if self.is_planned(code) {
            RequirementState::Planned
        } else {
            RequirementState::Missing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub fulfilled: usize,
    pub planned: usize,
    pub total: usize,
    /// Threshold the category is measured against.
    pub required: usize,
    /// Fulfilled requirements that count toward `required`.
    pub counted: usize,
    pub percentage: f64,
}

impl Progress {
    /// Progress toward a minimum count; fulfilling more than the minimum
    /// still reports 100.
    pub fn capped(fulfilled: usize, planned: usize, total: usize, min_required: usize) -> Self {
        let counted = fulfilled.min(min_required);

        Self {
            fulfilled,
            planned,
            total,
            required: min_required,
            counted,
            percentage: percentage(counted, min_required),
        }
    }

    /// Progress where every listed requirement is needed.
    pub fn proportional(fulfilled: usize, planned: usize, total: usize) -> Self {
        Self {
            fulfilled,
            planned,
            total,
            required: total,
            counted: fulfilled,
            percentage: percentage(fulfilled, total),
        }
    }
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    part as f64 / whole as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementLine {
    pub code: String,
    pub name: String,
    pub credits: String,
    pub state: RequirementState,
    pub matches: Vec<LedgerEntry>,
}

impl RequirementLine {
    pub fn new(ledger: &CourseLedger, code: &str, name: &str, credits: &str) -> Self {
        if normalize_course_code(code).is_empty() {
            tracing::warn!(name, "requirement has no course code");
        }

        Self {
            code: code.to_owned(),
            name: name.to_owned(),
            credits: credits.to_owned(),
            state: ledger.state_of(code),
            matches: ledger.fulfilling(code).into_iter().cloned().collect(),
        }
    }
}

/// A competency satisfied by any one of several courses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyLine {
    pub code: String,
    pub name: String,
    pub state: RequirementState,
    pub fulfilled_by: Vec<String>,
}

impl CompetencyLine {
    pub fn new(ledger: &CourseLedger, code: &str, name: &str, courses: &[String]) -> Self {
        let fulfilled_by = courses
            .iter()
            .filter(|c| ledger.is_fulfilled(c))
            .cloned()
            .collect::<Vec<_>>();

        let state = if !fulfilled_by.is_empty() {
            RequirementState::Fulfilled
        } else if courses.iter().any(|c| ledger.is_planned(c)) {
            RequirementState::Planned
        } else {
            RequirementState::Missing
        };

        Self {
            code: code.to_owned(),
            name: name.to_owned(),
            state,
            fulfilled_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub key: String,
    pub name: String,
    pub description: String,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<RequirementLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub competencies: Vec<CompetencyLine>,
}

pub(crate) fn count_states<'a>(states: impl Iterator<Item = &'a RequirementState>) -> (usize, usize) {
    states.fold((0, 0), |(fulfilled, planned), state| match state {
        RequirementState::Fulfilled => (fulfilled + 1, planned),
        RequirementState::Planned => (fulfilled, planned + 1),
        RequirementState::Missing => (fulfilled, planned),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistReport {
    pub title: String,
    pub major_code: Option<String>,
    pub categories: Vec<CategoryReport>,
    pub overall_percentage: f64,
}

impl ChecklistReport {
    /// Overall progress is the sum of counted requirements over the sum of
    /// category thresholds.
    pub fn new(title: &str, major_code: Option<&str>, categories: Vec<CategoryReport>) -> Self {
        let counted: usize = categories.iter().map(|c| c.progress.counted).sum();
        let required: usize = categories.iter().map(|c| c.progress.required).sum();

        Self {
            title: title.to_owned(),
            major_code: major_code.map(str::to_owned),
            overall_percentage: percentage(counted, required),
            categories,
        }
    }

    pub fn category(&self, key: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use plant_shared::{Course, CourseCategory, PlanStatus, Semester};

    use super::*;

    pub(crate) fn plan_with(courses: &[(&str, bool)]) -> Plan {
        let mut semester = Semester::new("semester-1", "Fall 2025");
        semester.courses = courses
            .iter()
            .enumerate()
            .map(|(i, (code, completed))| Course {
                id: format!("c{i}"),
                code: code.to_string(),
                name: format!("{code} name"),
                credits: 4,
                prerequisites: vec![],
                category: CourseCategory::Core,
                completed: *completed,
            })
            .collect();

        Plan {
            id: "p1".to_owned(),
            title: "Plan".to_owned(),
            description: String::new(),
            major: "Computer Science".to_owned(),
            career_goal: String::new(),
            created_at: 0,
            updated_at: 0,
            user_id: "u1".to_owned(),
            status: PlanStatus::Draft,
            semesters: vec![semester],
        }
    }

    pub(crate) fn transcript(codes: &[&str]) -> Vec<CompletedCourse> {
        codes
            .iter()
            .map(|code| CompletedCourse {
                course_code: code.to_string(),
                course_name: format!("{code} name"),
                credits: 4.0,
                grade: Some("A".to_owned()),
                semester: Some("Fall 2024".to_owned()),
            })
            .collect()
    }

    #[test]
    fn codes_match_regardless_of_spacing_and_case() {
        let plan = plan_with(&[("cs2500", true)]);
        let ledger = CourseLedger::new(&plan, &transcript(&["Math 1341"]));

        assert_eq!(ledger.state_of("CS 2500"), RequirementState::Fulfilled);
        assert_eq!(ledger.state_of("MATH1341"), RequirementState::Fulfilled);
        assert_eq!(ledger.state_of("CS 3500"), RequirementState::Missing);
    }

    #[test]
    fn planned_course_is_not_fulfilled() {
        let ledger = CourseLedger::new(&plan_with(&[("CS 3500", false)]), &[]);

        assert!(!ledger.is_fulfilled("CS 3500"));
        assert_eq!(ledger.state_of("CS 3500"), RequirementState::Planned);
    }

    #[test]
    fn fulfilled_wins_over_planned() {
        let ledger = CourseLedger::new(&plan_with(&[("CS 3500", false)]), &transcript(&["CS3500"]));

        assert_eq!(ledger.state_of("CS 3500"), RequirementState::Fulfilled);
        assert_eq!(
            ledger
                .fulfilling("CS 3500")
                .iter()
                .map(|e| e.provenance)
                .collect::<Vec<_>>(),
            vec![Provenance::Transcript]
        );
    }

    #[test]
    fn blank_codes_never_match() {
        let ledger = CourseLedger::new(&plan_with(&[("", true)]), &transcript(&["  "]));

        assert_eq!(ledger.state_of(""), RequirementState::Missing);
        assert!(ledger.fulfilling("").is_empty());
    }

    #[test]
    fn capped_progress_never_exceeds_full() {
        let progress = Progress::capped(5, 0, 6, 2);

        assert_eq!(progress.counted, 2);
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(Progress::capped(1, 0, 4, 4).percentage, 25.0);
    }

    #[test]
    fn zero_threshold_reports_zero() {
        assert_eq!(Progress::capped(3, 0, 3, 0).percentage, 0.0);
        assert_eq!(Progress::proportional(0, 0, 0).percentage, 0.0);
    }

    #[test]
    fn competency_fulfilled_by_any_listed_course() {
        let ledger = CourseLedger::new(
            &plan_with(&[("PHIL 1145", false)]),
            &transcript(&["ENGW 1111"]),
        );
        let courses = vec!["ENGW 1111".to_owned(), "ENGW 1102".to_owned()];

        let writing = CompetencyLine::new(&ledger, "WF", "First-Year Writing", &courses);
        let ethics = CompetencyLine::new(&ledger, "ER", "Ethical Reasoning", &["PHIL 1145".to_owned()]);

        assert_eq!(writing.state, RequirementState::Fulfilled);
        assert_eq!(writing.fulfilled_by, vec!["ENGW 1111"]);
        assert_eq!(ethics.state, RequirementState::Planned);
    }
}
