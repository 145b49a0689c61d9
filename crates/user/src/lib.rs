mod completed;
mod login;
mod register;
pub(crate) mod repository;

use std::ops::Deref;

use plant_shared::CompletedCourse;
use serde::Serialize;

pub use login::LoginInput;
pub use register::RegisterInput;

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

    pub async fn find(&self, id: impl Into<String>) -> plant_shared::Result<Option<User>> {
        let row = repository::find(&self.read_db, repository::FindType::Id(id.into())).await?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_email(&self, email: impl Into<String>) -> plant_shared::Result<Option<User>> {
        let row = repository::find(&self.read_db, repository::FindType::Email(email.into())).await?;

        Ok(row.map(User::from))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub completed_courses: Vec<CompletedCourse>,
    pub created_at: i64,
}

impl From<repository::UserRow> for User {
    fn from(row: repository::UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            completed_courses: row.completed_courses.0,
            created_at: row.created_at,
        }
    }
}
