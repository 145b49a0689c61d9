use plant_shared::CompletedCourse;

use crate::repository;

impl super::Command {
    /// Courses recorded on the user profile. An unknown user has none.
    pub async fn completed_courses(
        &self,
        id: impl Into<String>,
    ) -> plant_shared::Result<Vec<CompletedCourse>> {
        let row = repository::find(&self.read_db, repository::FindType::Id(id.into())).await?;

        Ok(row.map(|r| r.completed_courses.0).unwrap_or_default())
    }

    /// Replaces the whole completed-course list.
    pub async fn set_completed_courses(
        &self,
        id: impl Into<String>,
        courses: Vec<CompletedCourse>,
    ) -> plant_shared::Result<()> {
        let id = id.into();
        let affected =
            repository::update_completed_courses(&self.write_db, id.to_owned(), &courses).await?;

        if affected == 0 {
            plant_shared::not_found!("user {}", id);
        }

        tracing::info!(user = id, total = courses.len(), "completed courses updated");

        Ok(())
    }
}
