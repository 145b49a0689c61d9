use plant_shared::{Course, Semester, normalize_course_code};
use serde::Deserialize;

/// Term names used when seeding a plan with the standard four-year layout.
pub const DEFAULT_SEMESTER_NAMES: [&str; 14] = [
    "Fall 2025",
    "Spring 2026",
    "Summer 1 2026",
    "Summer 2 2026",
    "Fall 2026",
    "Spring 2027",
    "Summer 1 2027",
    "Summer 2 2027",
    "Fall 2027",
    "Spring 2028",
    "Summer 1 2028",
    "Summer 2 2028",
    "Fall 2028",
    "Spring 2029",
];

/// One editor operation as sent by clients.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditCommand {
    AddSemester,
    AddDefaultSemesters,
    RenameSemester {
        semester_id: String,
        name: String,
    },
    DeleteSemester {
        semester_id: String,
    },
    AddCourse {
        semester_id: String,
        course: Course,
    },
    AddCatalogCourse {
        semester_id: String,
        course_code: String,
    },
    RemoveCourse {
        semester_id: String,
        course_id: String,
    },
    ToggleCourseCompletion {
        semester_id: String,
        course_id: String,
    },
    ToggleCompletionByCode {
        course_code: String,
    },
    MoveCourse {
        course_id: String,
        over_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Moved { from: String, to: String },
    Unchanged,
}

/// In-memory semester list of a plan. Nothing here touches storage: callers
/// persist `into_semesters()` as a whole once they are done editing.
#[derive(Debug, Clone, Default)]
pub struct SemesterEditor {
    semesters: Vec<Semester>,
}

impl SemesterEditor {
    pub fn new(semesters: Vec<Semester>) -> Self {
        Self { semesters }
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn into_semesters(self) -> Vec<Semester> {
        self.semesters
    }

    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == semester_id)
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.semesters
            .iter()
            .flat_map(|s| s.courses.iter())
            .find(|c| c.id == course_id)
    }

    pub fn semester_of_course(&self, course_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.contains_course(course_id))
    }

    fn semester_mut(&mut self, semester_id: &str) -> plant_shared::Result<&mut Semester> {
        match self.semesters.iter_mut().find(|s| s.id == semester_id) {
            Some(semester) => Ok(semester),
            None => plant_shared::not_found!("semester {}", semester_id),
        }
    }

    /// Appends `Semester N` where N is the new semester count.
    pub fn add_semester(&mut self, now: i64) -> &Semester {
        let mut stamp = now;
        while self
            .semesters
            .iter()
            .any(|s| s.id == format!("semester-{stamp}"))
        {
            stamp += 1;
        }

        let name = format!("Semester {}", self.semesters.len() + 1);
        self.semesters
            .push(Semester::new(format!("semester-{stamp}"), name));

        &self.semesters[self.semesters.len() - 1]
    }

    /// Replaces every semester with the fourteen standard terms.
    pub fn add_default_semesters(&mut self) {
        self.semesters = DEFAULT_SEMESTER_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Semester::new(format!("semester-{}", i + 1), *name))
            .collect();
    }

    pub fn rename_semester(&mut self, semester_id: &str, name: impl Into<String>) -> plant_shared::Result<()> {
        self.semester_mut(semester_id)?.name = name.into();

        Ok(())
    }

    pub fn delete_semester(&mut self, semester_id: &str) -> plant_shared::Result<()> {
        let len = self.semesters.len();
        self.semesters.retain(|s| s.id != semester_id);

        if self.semesters.len() == len {
            plant_shared::not_found!("semester {}", semester_id);
        }

        Ok(())
    }

    pub fn add_course(&mut self, semester_id: &str, course: Course) -> plant_shared::Result<()> {
        if self.find_course(&course.id).is_some() {
            plant_shared::user!("Course {} is already in the plan", course.id);
        }

        let semester = self.semester_mut(semester_id)?;
        semester.courses.push(course);
        semester.recompute_credits();

        Ok(())
    }

    pub fn remove_course(&mut self, semester_id: &str, course_id: &str) -> plant_shared::Result<Course> {
        let semester = self.semester_mut(semester_id)?;
        let Some(pos) = semester.courses.iter().position(|c| c.id == course_id) else {
            plant_shared::not_found!("course {}", course_id);
        };

        let course = semester.courses.remove(pos);
        semester.recompute_credits();

        Ok(course)
    }

    pub fn toggle_course_completion(&mut self, semester_id: &str, course_id: &str) -> plant_shared::Result<bool> {
        let semester = self.semester_mut(semester_id)?;
        let Some(course) = semester.courses.iter_mut().find(|c| c.id == course_id) else {
            plant_shared::not_found!("course {}", course_id);
        };

        course.completed = !course.completed;

        Ok(course.completed)
    }

    /// Flips `completed` on every course whose normalized code matches.
    /// Returns how many courses changed.
    pub fn toggle_completion_by_code(&mut self, course_code: &str) -> usize {
        let target = normalize_course_code(course_code);
        if target.is_empty() {
            return 0;
        }

        let mut changed = 0;
        for course in self.semesters.iter_mut().flat_map(|s| s.courses.iter_mut()) {
            if normalize_course_code(&course.code) == target {
                course.completed = !course.completed;
                changed += 1;
            }
        }

        changed
    }

    /// Moves a course to the semester identified by `over_id`, which may be
    /// a semester id or the id of a course inside the target semester.
    /// Unknown ids and drops onto the source semester leave the plan untouched.
    pub fn move_course(&mut self, course_id: &str, over_id: Option<&str>) -> EditOutcome {
        let Some(over_id) = over_id else {
            return EditOutcome::Unchanged;
        };

        let Some(source) = self.semester_of_course(course_id).map(|s| s.id.to_owned()) else {
            return EditOutcome::Unchanged;
        };

        let target = self
            .semester(over_id)
            .or_else(|| self.semester_of_course(over_id))
            .map(|s| s.id.to_owned());

        let Some(target) = target else {
            return EditOutcome::Unchanged;
        };

        if source == target {
            return EditOutcome::Unchanged;
        }

        let Some(from) = self.semesters.iter_mut().find(|s| s.id == source) else {
            return EditOutcome::Unchanged;
        };
        let Some(pos) = from.courses.iter().position(|c| c.id == course_id) else {
            return EditOutcome::Unchanged;
        };
        let course = from.courses.remove(pos);
        from.recompute_credits();

        if let Some(to) = self.semesters.iter_mut().find(|s| s.id == target) {
            to.courses.push(course);
            to.recompute_credits();
        }

        EditOutcome::Moved {
            from: source,
            to: target,
        }
    }

    /// Applies one command. `catalog` resolves catalog codes into plan courses
    /// for `AddCatalogCourse`.
    pub fn apply<F>(&mut self, command: EditCommand, now: i64, catalog: F) -> plant_shared::Result<EditOutcome>
    where
        F: Fn(&str) -> Option<Course>,
    {
        match command {
            EditCommand::AddSemester => {
                self.add_semester(now);
            }
            EditCommand::AddDefaultSemesters => self.add_default_semesters(),
            EditCommand::RenameSemester { semester_id, name } => {
                self.rename_semester(&semester_id, name)?
            }
            EditCommand::DeleteSemester { semester_id } => self.delete_semester(&semester_id)?,
            EditCommand::AddCourse { semester_id, course } => self.add_course(&semester_id, course)?,
            EditCommand::AddCatalogCourse {
                semester_id,
                course_code,
            } => {
                let Some(course) = catalog(&course_code) else {
                    plant_shared::not_found!("catalog course {}", course_code);
                };

                self.add_course(&semester_id, course)?;
            }
            EditCommand::RemoveCourse {
                semester_id,
                course_id,
            } => {
                self.remove_course(&semester_id, &course_id)?;
            }
            EditCommand::ToggleCourseCompletion {
                semester_id,
                course_id,
            } => {
                self.toggle_course_completion(&semester_id, &course_id)?;
            }
            EditCommand::ToggleCompletionByCode { course_code } => {
                if self.toggle_completion_by_code(&course_code) == 0 {
                    return Ok(EditOutcome::Unchanged);
                }
            }
            EditCommand::MoveCourse { course_id, over_id } => {
                return Ok(self.move_course(&course_id, over_id.as_deref()));
            }
        }

        Ok(EditOutcome::Changed)
    }
}
