use plant_db::table::Plan as PlanTable;
use plant_shared::{Plan, PlanStatus, Semester};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder, UpdateStatement};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Json, types::Text};

#[derive(FromRow)]
pub struct PlanRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub major: String,
    pub career_goal: String,
    pub status: Text<PlanStatus>,
    pub semesters: Json<Vec<Semester>>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Plan {
            id: row.id,
            title: row.title,
            description: row.description,
            major: row.major,
            career_goal: row.career_goal,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user_id: row.user_id,
            status: row.status.0,
            semesters: row.semesters.0,
        }
    }
}

const COLUMNS: [PlanTable; 10] = [
    PlanTable::Id,
    PlanTable::UserId,
    PlanTable::Title,
    PlanTable::Description,
    PlanTable::Major,
    PlanTable::CareerGoal,
    PlanTable::Status,
    PlanTable::Semesters,
    PlanTable::CreatedAt,
    PlanTable::UpdatedAt,
];

pub(crate) async fn find(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> plant_shared::Result<Option<PlanRow>> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(PlanTable::Table)
        .and_where(Expr::col(PlanTable::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn filter_by_user(
    pool: &SqlitePool,
    user_id: impl Into<String>,
) -> plant_shared::Result<Vec<PlanRow>> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(PlanTable::Table)
        .and_where(Expr::col(PlanTable::UserId).eq(user_id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn create(pool: &SqlitePool, plan: &Plan) -> plant_shared::Result<()> {
    let semesters = serde_json::to_string(&plan.semesters)?;
    let statement = Query::insert()
        .into_table(PlanTable::Table)
        .columns(COLUMNS)
        .values_panic([
            plan.id.to_owned().into(),
            plan.user_id.to_owned().into(),
            plan.title.to_owned().into(),
            plan.description.to_owned().into(),
            plan.major.to_owned().into(),
            plan.career_goal.to_owned().into(),
            plan.status.to_string().into(),
            semesters.into(),
            plan.created_at.into(),
            plan.updated_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) struct UpdateInput {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub major: Option<String>,
    pub career_goal: Option<String>,
    pub status: Option<PlanStatus>,
    pub semesters: Option<Vec<Semester>>,
    pub now: i64,
}

/// Applies the provided fields and bumps `updated_at`. The new timestamp is
/// kept strictly above the stored one even when two writes share a millisecond.
pub(crate) async fn update(pool: &SqlitePool, input: UpdateInput) -> plant_shared::Result<u64> {
    let mut statement: UpdateStatement = Query::update()
        .table(PlanTable::Table)
        .and_where(Expr::col(PlanTable::Id).eq(input.id))
        .to_owned();

    if let Some(title) = input.title {
        statement.value(PlanTable::Title, title);
    }

    if let Some(description) = input.description {
        statement.value(PlanTable::Description, description);
    }

    if let Some(major) = input.major {
        statement.value(PlanTable::Major, major);
    }

    if let Some(career_goal) = input.career_goal {
        statement.value(PlanTable::CareerGoal, career_goal);
    }

    if let Some(status) = input.status {
        statement.value(PlanTable::Status, status.as_ref());
    }

    if let Some(semesters) = input.semesters {
        statement.value(PlanTable::Semesters, serde_json::to_string(&semesters)?);
    }

    statement.value(
        PlanTable::UpdatedAt,
        Expr::cust_with_values("MAX(?, \"updated_at\" + 1)", [input.now]),
    );

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

pub(crate) async fn delete(pool: &SqlitePool, id: impl Into<String>) -> plant_shared::Result<()> {
    let statement = Query::delete()
        .from_table(PlanTable::Table)
        .and_where(Expr::col(PlanTable::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
