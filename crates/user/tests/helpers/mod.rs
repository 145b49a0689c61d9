use std::{path::PathBuf, str::FromStr};

use plant_db::{Migrate, Plan};
use plant_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<plant_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    plant_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(plant_shared::State::new(pool))
}

pub fn register_input(name: &str) -> RegisterInput {
    RegisterInput {
        email: format!("{name}@plant.localhost"),
        password: "my_password".to_owned(),
        confirm_password: "my_password".to_owned(),
        completed_courses: vec![],
    }
}
