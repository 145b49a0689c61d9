use sqlx_migrator::{Info, Migrator};

mod m0001;
pub mod table;

pub use sqlx_migrator::migrator::{Migrate, Plan};

pub fn migrator<DB: sqlx::Database>() -> Result<Migrator<DB>, sqlx_migrator::Error>
where
    m0001::M0001: sqlx_migrator::Migration<DB>,
{
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::M0001)])?;

    Ok(migrator)
}
