mod plan_create_table;
mod plan_create_user_id_idx;
mod user_create_email_idx;
mod user_create_table;

use sqlx_migrator::vec_box;

pub struct M0001;

sqlx_migrator::sqlite_migration!(
    M0001,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        user_create_table::Operation,
        user_create_email_idx::Operation,
        plan_create_table::Operation,
        plan_create_user_id_idx::Operation
    ]
);
