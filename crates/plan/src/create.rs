use plant_shared::{Plan, PlanStatus};
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::repository;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub major: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub career_goal: String,
}

impl super::Command {
    /// Stores a new draft plan with no semesters and returns its id.
    pub async fn create(
        &self,
        user_id: impl Into<String>,
        input: CreatePlanInput,
    ) -> plant_shared::Result<String> {
        input.validate()?;

        let now = plant_shared::now_millis();
        let plan = Plan {
            id: Ulid::new().to_string(),
            title: input.title,
            description: input.description,
            major: input.major,
            career_goal: input.career_goal,
            created_at: now,
            updated_at: now,
            user_id: user_id.into(),
            status: PlanStatus::Draft,
            semesters: vec![],
        };

        repository::create(&self.write_db, &plan).await?;

        tracing::info!(plan = plan.id, user = plan.user_id, "plan created");

        Ok(plan.id)
    }
}
