//! Pointer-driven course dragging, independent of any UI toolkit.
//!
//! ```text
//! Idle --pointer_down(course)--> Pending --moved >= activation--> Dragging
//!  ^                                |                                |
//!  +-------- pointer_up (click) ----+                                |
//!  +-------- pointer_up (drop) / cancel -----------------------------+
//! ```

use crate::editor::{EditOutcome, SemesterEditor};

/// Distance in pixels the pointer has to travel before a press becomes a drag.
pub const ACTIVATION_DISTANCE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Pending {
        course_id: String,
        origin: Point,
    },
    Dragging {
        course_id: String,
        source_semester_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Ignored,
    Pressed { course_id: String },
    Started { course_id: String },
    Click { course_id: String },
    Dropped(EditOutcome),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    activation_distance: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(ACTIVATION_DISTANCE)
    }
}

impl DragController {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            state: DragState::Idle,
            activation_distance,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The course being dragged, for rendering an overlay.
    pub fn active_course(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { course_id, .. } => Some(course_id),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, editor: &SemesterEditor, course_id: &str, at: Point) -> DragOutcome {
        if self.state != DragState::Idle || editor.find_course(course_id).is_none() {
            return DragOutcome::Ignored;
        }

        self.state = DragState::Pending {
            course_id: course_id.to_owned(),
            origin: at,
        };

        DragOutcome::Pressed {
            course_id: course_id.to_owned(),
        }
    }

    pub fn pointer_move(&mut self, editor: &SemesterEditor, at: Point) -> DragOutcome {
        let DragState::Pending { course_id, origin } = &self.state else {
            return DragOutcome::Ignored;
        };

        if origin.distance(&at) < self.activation_distance {
            return DragOutcome::Ignored;
        }

        let course_id = course_id.to_owned();
        let Some(source) = editor.semester_of_course(&course_id) else {
            self.state = DragState::Idle;
            return DragOutcome::Cancelled;
        };

        self.state = DragState::Dragging {
            course_id: course_id.to_owned(),
            source_semester_id: source.id.to_owned(),
        };

        tracing::debug!(course = course_id, semester = source.id, "drag started");

        DragOutcome::Started { course_id }
    }

    /// Ends the gesture. `over` is the id under the pointer, either a
    /// semester or a course.
    pub fn pointer_up(&mut self, editor: &mut SemesterEditor, over: Option<&str>) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Pending { course_id, .. } => DragOutcome::Click { course_id },
            DragState::Dragging { course_id, .. } => {
                DragOutcome::Dropped(editor.move_course(&course_id, over))
            }
        }
    }

    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            _ => DragOutcome::Cancelled,
        }
    }
}
