use std::sync::Mutex;

use plant_ai::{GenerativeModel, ModelError, Part};
use plant_requirements::{CourseDetails, CourseWithDifficulty};
use plant_shared::{Course, CourseCategory, Plan, PlanStatus, Semester};

/// Model that answers with a canned reply and records every prompt.
pub struct FakeModel {
    reply: Result<String, u16>,
    pub prompts: Mutex<Vec<Vec<Part>>>,
}

#[allow(dead_code)]
impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_owned()),
            prompts: Mutex::default(),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompts lock").len()
    }

    pub fn last_text(&self) -> String {
        self.prompts
            .lock()
            .expect("prompts lock")
            .last()
            .into_iter()
            .flatten()
            .filter_map(|p| match p {
                Part::Text(text) => Some(text.to_owned()),
                Part::InlineData { .. } => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, parts: Vec<Part>) -> Result<String, ModelError> {
        self.prompts.lock().expect("prompts lock").push(parts);

        self.reply
            .clone()
            .map_err(|status| ModelError::Api(status, "quota exceeded".to_owned()))
    }
}

#[allow(dead_code)]
pub fn catalog_course(code: &str, department: &str, elective: bool, difficulty: f64) -> CourseWithDifficulty {
    CourseWithDifficulty {
        course: CourseDetails {
            course_code: code.to_owned(),
            title: format!("{code} title"),
            description: String::new(),
            credits: "4".to_owned(),
            prerequisites: None,
            attributes: None,
            department: department.to_owned(),
            elective,
        },
        difficulty,
    }
}

#[allow(dead_code)]
pub fn plan(major: &str, career_goal: &str) -> Plan {
    let mut semester = Semester::new("semester-1", "Fall 2025");
    semester.courses = vec![
        Course {
            id: "c1".to_owned(),
            code: "CS 2500".to_owned(),
            name: "Fundamentals of Computer Science 1".to_owned(),
            credits: 4,
            prerequisites: vec![],
            category: CourseCategory::Core,
            completed: true,
        },
        Course {
            id: "c2".to_owned(),
            code: "CS 2510".to_owned(),
            name: "Fundamentals of Computer Science 2".to_owned(),
            credits: 4,
            prerequisites: vec![],
            category: CourseCategory::Core,
            completed: false,
        },
    ];
    semester.recompute_credits();

    Plan {
        id: "plan-1".to_owned(),
        title: "Road to graduation".to_owned(),
        description: String::new(),
        major: major.to_owned(),
        career_goal: career_goal.to_owned(),
        created_at: 0,
        updated_at: 0,
        user_id: "user-1".to_owned(),
        status: PlanStatus::Active,
        semesters: vec![semester],
    }
}
