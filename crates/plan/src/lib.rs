pub mod drag;
pub mod editor;
pub mod summary;

mod create;
mod query;
pub(crate) mod repository;
mod update;

use std::ops::Deref;

pub use create::CreatePlanInput;
pub use drag::{DragController, DragOutcome, DragState, Point};
pub use editor::{EditCommand, EditOutcome, SemesterEditor};
pub use summary::{PlanSummary, SemesterStatus, SemesterSummary, render_report};
pub use update::PlanPatch;

#[derive(Clone)]
pub struct Command {
    state: plant_shared::State,
}

impl Deref for Command {
    type Target = plant_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: plant_shared::State) -> Self {
        Self { state }
    }
}
