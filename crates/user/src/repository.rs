use plant_db::table::User;
use plant_shared::CompletedCourse;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub completed_courses: Json<Vec<CompletedCourse>>,
    pub created_at: i64,
}

pub enum FindType {
    Id(String),
    Email(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> plant_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Password,
            User::CompletedCourses,
            User::CreatedAt,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) struct CreateInput {
    pub id: String,
    pub email: String,
    pub password: String,
    pub completed_courses: Vec<CompletedCourse>,
    pub created_at: i64,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> plant_shared::Result<()> {
    let completed_courses = serde_json::to_string(&input.completed_courses)?;
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Email,
            User::Password,
            User::CompletedCourses,
            User::CreatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.email.into(),
            input.password.into(),
            completed_courses.into(),
            input.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    match sqlx::query_with(&sql, values).execute(pool).await {
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            plant_shared::user!("Email already exists");
        }
        res => {
            res?;
        }
    }

    Ok(())
}

pub(crate) async fn update_completed_courses(
    pool: &SqlitePool,
    id: String,
    courses: &[CompletedCourse],
) -> plant_shared::Result<u64> {
    let statement = Query::update()
        .table(User::Table)
        .values([(User::CompletedCourses, serde_json::to_string(courses)?.into())])
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}
