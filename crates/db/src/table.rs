use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Password,
    CompletedCourses,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Plan {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Major,
    CareerGoal,
    Status,
    Semesters,
    CreatedAt,
    UpdatedAt,
}
