mod command;
mod course;
mod date;
pub mod lenient;
mod plan;

pub use command::*;
pub use course::*;
pub use date::*;
pub use plan::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}
