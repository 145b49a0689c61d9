use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use plant_shared::CompletedCourse;
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::repository;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Courses extracted from a transcript before the account existed.
    #[serde(default)]
    pub completed_courses: Vec<CompletedCourse>,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> plant_shared::Result<String> {
        if input.password != input.confirm_password {
            plant_shared::user!("Passwords do not match");
        }

        if input.password.chars().count() < 6 {
            plant_shared::user!("Password must be at least 6 characters");
        }

        input.validate()?;

        if repository::find(
            &self.read_db,
            repository::FindType::Email(input.email.to_owned()),
        )
        .await?
        .is_some()
        {
            plant_shared::user!("Email already exists");
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let id = Ulid::new().to_string();
        let completed = input.completed_courses.len();

        repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                email: input.email,
                password: password_hash,
                completed_courses: input.completed_courses,
                created_at: plant_shared::now_millis(),
            },
        )
        .await?;

        tracing::info!(user = id, completed, "user registered");

        Ok(id)
    }
}
