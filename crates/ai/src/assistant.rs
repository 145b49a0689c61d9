use std::fmt;
use std::sync::Arc;

use plant_requirements::catalog::suggested_electives;
use plant_requirements::cs::{CS_CATEGORIES, NUPATH_KEY};
use plant_requirements::{CourseWithDifficulty, CsRequirements};
use plant_shared::Plan;
use serde::Serialize;

use crate::client::{GenerativeModel, Part};

pub const ERROR_MESSAGE: &str = "**Error:** Unable to process your request. Please try again.";

const SUGGESTED_ELECTIVES: usize = 5;
const PROMPT_COURSE_SAMPLE: usize = 20;

/// Everything the assistant knows about the student.
pub struct AssistantContext<'a> {
    pub plan: &'a Plan,
    pub courses: &'a [CourseWithDifficulty],
    pub cs_requirements: Option<&'a CsRequirements>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    pub role: &'static str,
    pub content: String,
    pub failed: bool,
}

impl AssistantMessage {
    fn reply(content: String) -> Self {
        Self {
            role: "assistant",
            content,
            failed: false,
        }
    }
}

fn career_goal(plan: &Plan) -> Option<&str> {
    Some(plan.career_goal.trim()).filter(|g| !g.is_empty())
}

/// Markdown block of easy-first electives for the career goal, or nothing.
pub fn elective_suggestions(courses: &[CourseWithDifficulty], career_goal: &str) -> String {
    if career_goal.is_empty() || courses.is_empty() {
        return String::new();
    }

    let electives = suggested_electives(courses, career_goal, SUGGESTED_ELECTIVES);
    if electives.is_empty() {
        return String::new();
    }

    let list = electives
        .iter()
        .map(|c| {
            format!(
                "• **{}** - {} (Difficulty: {}/5)",
                c.course.course_code, c.course.title, c.difficulty
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n\n**🌱 Elective Suggestions for \"{career_goal}\":**\n{list}\n\nThese electives align with your career goals and can help you develop relevant skills!"
    )
}

pub fn welcome_message(plan: &Plan, courses: &[CourseWithDifficulty]) -> AssistantMessage {
    let goal = career_goal(plan);
    let goal_line = goal
        .map(|g| format!(" and your career goal: **\"{g}\"**"))
        .unwrap_or_default();
    let suggestions = goal
        .map(|g| elective_suggestions(courses, g))
        .unwrap_or_default();

    AssistantMessage::reply(format!(
        "Hi! I'm your **academic planning assistant**. I can help you with:

• **Course scheduling** and semester planning
• **Requirement tracking** for your major
• **Balanced course loads** using difficulty ratings
• **Career-focused** course recommendations

I have access to your plan **\"{}\"** ({}){goal_line}.{suggestions}

How can I help you today?",
        plan.title, plan.major
    ))
}

/// The "Student Context" block of the assistant prompt.
pub struct StudentContext<'a, 'p>(pub &'a AssistantContext<'p>);

impl fmt::Display for StudentContext<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.0;
        let plan = ctx.plan;
        let completed = plan
            .courses()
            .filter(|c| c.completed)
            .map(|c| format!("{} - {}", c.code, c.name))
            .collect::<Vec<_>>();
        let completed = if completed.is_empty() {
            "None".to_owned()
        } else {
            completed.join(", ")
        };

        writeln!(f, "Student Context:")?;
        writeln!(f, "- Major: {}", plan.major)?;
        writeln!(f, "- Career Goal: {}", career_goal(plan).unwrap_or("Not specified"))?;
        writeln!(f, "- Plan Status: {}", plan.status)?;
        writeln!(f, "- Completed Courses: {completed}")?;
        writeln!(f, "- Total Planned Courses: {}", plan.courses().count())?;
        write!(f, "- Current Semesters: {}", plan.semesters.len())?;

        if let Some(requirements) = ctx.cs_requirements {
            if plan.major.to_lowercase().contains("computer science") {
                write!(f, "\n\nCS Requirements Summary:")?;
                for (key, name) in CS_CATEGORIES.iter().filter(|(k, _)| *k != NUPATH_KEY) {
                    write!(
                        f,
                        "\n- {name}: {} courses required",
                        requirements.rule(key).min_required
                    )?;
                }
            }
        }

        write!(
            f,
            "\n\nCourse Difficulty Data Available: {} courses with difficulty ratings (1-5 scale)",
            ctx.courses.len()
        )
    }
}

pub fn student_context(ctx: &AssistantContext<'_>) -> String {
    StudentContext(ctx).to_string()
}

pub fn build_prompt(ctx: &AssistantContext<'_>, question: &str) -> String {
    let sample = ctx
        .courses
        .iter()
        .take(PROMPT_COURSE_SAMPLE)
        .map(|c| {
            format!(
                "{}: {} (Difficulty: {}/5, Credits: {})",
                c.course.course_code, c.course.title, c.difficulty, c.course.credits
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an academic planning assistant for Northeastern University students.

{context}

Available Course Difficulty Sample ({total} total courses):
{sample}

**Response Guidelines:**
- Keep responses concise and actionable (2-3 paragraphs max)
- Use **bold** for important course codes, requirements, and key points
- Use bullet points for lists
- Include specific course codes with difficulty ratings when relevant
- Focus on practical, immediate next steps
- Consider course difficulty for balanced semester loads
- When suggesting electives, prioritize courses that align with the student's career goal: \"{goal}\"
- Always mention difficulty ratings (1-5 scale) when recommending courses

Student Question: {question}

Provide concise, formatted advice using markdown. Be specific and actionable.",
        context = student_context(ctx),
        total = ctx.courses.len(),
        goal = career_goal(ctx.plan).unwrap_or("Not specified"),
    )
}

#[derive(Clone)]
pub struct Assistant {
    model: Arc<dyn GenerativeModel>,
}

impl Assistant {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// A model failure becomes an error message in the conversation rather
    /// than an error for the caller.
    pub async fn ask(&self, ctx: &AssistantContext<'_>, question: &str) -> AssistantMessage {
        let prompt = build_prompt(ctx, question);

        match self.model.generate(vec![Part::Text(prompt)]).await {
            Ok(content) => AssistantMessage::reply(content),
            Err(e) => {
                tracing::error!(plan = ctx.plan.id, err = %e, "assistant request failed");

                AssistantMessage {
                    role: "assistant",
                    content: ERROR_MESSAGE.to_owned(),
                    failed: true,
                }
            }
        }
    }
}
