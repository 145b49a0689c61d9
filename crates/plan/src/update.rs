use plant_shared::{PlanStatus, Semester};
use serde::Deserialize;
use validator::Validate;

use crate::repository;

/// Partial plan update. Absent fields are left untouched; identity and
/// timestamp fields sent by clients are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub major: Option<String>,
    #[validate(length(max = 200))]
    pub career_goal: Option<String>,
    pub status: Option<PlanStatus>,
    pub semesters: Option<Vec<Semester>>,
}

impl PlanPatch {
    pub fn semesters(semesters: Vec<Semester>) -> Self {
        Self {
            semesters: Some(semesters),
            ..Default::default()
        }
    }
}

impl super::Command {
    pub async fn update(&self, id: impl Into<String>, patch: PlanPatch) -> plant_shared::Result<()> {
        patch.validate()?;

        let id = id.into();
        let mut semesters = patch.semesters;
        if let Some(semesters) = semesters.as_mut() {
            for semester in semesters.iter_mut() {
                semester.recompute_credits();
            }
        }

        let affected = repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: id.to_owned(),
                title: patch.title,
                description: patch.description,
                major: patch.major,
                career_goal: patch.career_goal,
                status: patch.status,
                semesters,
                now: plant_shared::now_millis(),
            },
        )
        .await?;

        if affected == 0 {
            plant_shared::not_found!("plan {}", id);
        }

        tracing::debug!(plan = id, "plan updated");

        Ok(())
    }

    /// Removes the plan. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: impl Into<String>) -> plant_shared::Result<()> {
        let id = id.into();
        repository::delete(&self.write_db, id.to_owned()).await?;

        tracing::info!(plan = id, "plan deleted");

        Ok(())
    }
}
