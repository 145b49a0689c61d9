use plant_shared::Plan;

use crate::repository;

impl super::Command {
    pub async fn find(&self, id: impl Into<String>) -> plant_shared::Result<Option<Plan>> {
        Ok(repository::find(&self.read_db, id).await?.map(Plan::from))
    }

    /// Plans of a user, most recently updated first.
    pub async fn list_for_user(&self, user_id: impl Into<String>) -> plant_shared::Result<Vec<Plan>> {
        let mut plans = repository::filter_by_user(&self.read_db, user_id)
            .await?
            .into_iter()
            .map(Plan::from)
            .collect::<Vec<_>>();

        plans.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(plans)
    }
}
