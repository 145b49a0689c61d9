use std::str::FromStr;

use plant_db::{Migrate, Plan};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;

async fn connect(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);

    Ok(SqlitePool::connect_with(opts).await?)
}

#[tokio::test]
async fn apply_all_creates_collections() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = connect(&dir).await?;
    let mut conn = pool.acquire().await?;
    plant_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    let tables = sqlx::query_as::<_, (String,)>(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('user', 'plan') ORDER BY name",
    )
    .fetch_all(&mut *conn)
    .await?;

    assert_eq!(
        tables.into_iter().map(|t| t.0).collect::<Vec<_>>(),
        vec!["plan".to_owned(), "user".to_owned()]
    );

    Ok(())
}

#[tokio::test]
async fn apply_all_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = connect(&dir).await?;
    let mut conn = pool.acquire().await?;
    let migrator = plant_db::migrator::<sqlx::Sqlite>()?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;

    Ok(())
}
