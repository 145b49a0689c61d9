use std::fmt;

use plant_shared::{Plan, Semester};
use serde::Serialize;
use strum::{AsRefStr, Display};

#[derive(Display, AsRefStr, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SemesterStatus {
    Empty,
    Complete,
    Partial,
    Planned,
}

impl SemesterStatus {
    pub fn of(semester: &Semester) -> Self {
        let completed = semester.courses.iter().filter(|c| c.completed).count();

        if semester.courses.is_empty() {
            Self::Empty
        } else if completed == semester.courses.len() {
            Self::Complete
        } else if completed > 0 {
            Self::Partial
        } else {
            Self::Planned
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterSummary {
    pub id: String,
    pub name: String,
    pub credits: u32,
    pub courses: usize,
    pub completed: usize,
    pub status: SemesterStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub total_credits: u32,
    pub total_courses: usize,
    pub completed_courses: usize,
    pub remaining_courses: usize,
    pub semesters: Vec<SemesterSummary>,
}

impl PlanSummary {
    pub fn of(plan: &Plan) -> Self {
        let semesters = plan
            .semesters
            .iter()
            .map(|s| SemesterSummary {
                id: s.id.to_owned(),
                name: s.name.to_owned(),
                credits: s.credits,
                courses: s.courses.len(),
                completed: s.courses.iter().filter(|c| c.completed).count(),
                status: SemesterStatus::of(s),
            })
            .collect::<Vec<_>>();

        let total_courses: usize = semesters.iter().map(|s| s.courses).sum();
        let completed_courses: usize = semesters.iter().map(|s| s.completed).sum();

        Self {
            total_credits: semesters
                .iter()
                .fold(0, |total: u32, s| total.saturating_add(s.credits)),
            total_courses,
            completed_courses,
            remaining_courses: total_courses - completed_courses,
            semesters,
        }
    }
}

/// Plain-text export of a plan, one block per semester.
pub struct PlanReport<'a>(pub &'a Plan);

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        let summary = PlanSummary::of(plan);

        writeln!(f, "{}", plan.title)?;
        writeln!(f, "Major: {}", plan.major)?;
        if !plan.career_goal.is_empty() {
            writeln!(f, "Career Goal: {}", plan.career_goal)?;
        }
        if !plan.description.is_empty() {
            writeln!(f, "{}", plan.description)?;
        }
        writeln!(f, "Status: {}", plan.status.as_ref().to_uppercase())?;
        writeln!(f)?;
        writeln!(f, "Total Credits: {}", summary.total_credits)?;
        writeln!(f, "Total Courses: {}", summary.total_courses)?;
        writeln!(f, "Completed: {}", summary.completed_courses)?;
        writeln!(f, "Remaining: {}", summary.remaining_courses)?;

        for (semester, stats) in plan.semesters.iter().zip(summary.semesters.iter()) {
            writeln!(f)?;
            writeln!(
                f,
                "{} ({} credits) [{}]",
                semester.name, semester.credits, stats.status
            )?;

            if semester.courses.is_empty() {
                writeln!(f, "  No courses planned")?;
                continue;
            }

            for course in &semester.courses {
                let mark = if course.completed { "x" } else { " " };
                writeln!(
                    f,
                    "  [{mark}] {} - {} ({} credits)",
                    course.code, course.name, course.credits
                )?;
            }
        }

        Ok(())
    }
}

pub fn render_report(plan: &Plan) -> String {
    PlanReport(plan).to_string()
}
