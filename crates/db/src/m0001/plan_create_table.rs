use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Plan;

pub struct Operation;

fn create_plan_table_statement() -> TableCreateStatement {
    Table::create()
        .table(Plan::Table)
        .col(
            ColumnDef::new(Plan::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Plan::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Plan::Title).string().not_null())
        .col(ColumnDef::new(Plan::Description).text().not_null().default(""))
        .col(ColumnDef::new(Plan::Major).string().not_null())
        .col(ColumnDef::new(Plan::CareerGoal).string().not_null().default(""))
        .col(
            ColumnDef::new(Plan::Status)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Plan::Semesters)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(ColumnDef::new(Plan::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Plan::UpdatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_plan_table_statement() -> TableDropStatement {
    Table::drop().table(Plan::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_plan_table_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_plan_table_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
