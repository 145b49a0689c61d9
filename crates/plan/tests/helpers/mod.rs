use std::{path::PathBuf, str::FromStr};

use plant_db::{Migrate, Plan};
use plant_plan::CreatePlanInput;
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

#[allow(dead_code)]
pub fn create_input(title: impl Into<String>) -> CreatePlanInput {
    CreatePlanInput {
        title: title.into(),
        description: "Four years at Northeastern".to_owned(),
        major: "Computer Science".to_owned(),
        career_goal: "Software Engineer".to_owned(),
    }
}
