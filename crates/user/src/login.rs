use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Deserialize;
use validator::Validate;

use crate::repository;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Verifies the credentials and returns the user id.
    pub async fn login(&self, input: LoginInput) -> plant_shared::Result<String> {
        input.validate()?;

        let Some(user_row) =
            repository::find(&self.read_db, repository::FindType::Email(input.email)).await?
        else {
            plant_shared::user!("Invalid email or password. Please try again.");
        };

        let parsed_hash = PasswordHash::new(&user_row.password)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            plant_shared::user!("Invalid email or password. Please try again.");
        }

        Ok(user_row.id)
    }
}
