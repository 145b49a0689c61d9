mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn category<'a>(report: &'a Value, key: &str) -> &'a Value {
    report["categories"]
        .as_array()
        .and_then(|c| c.iter().find(|c| c["key"] == key))
        .unwrap_or(&Value::Null)
}

async fn cs_student(app: &helpers::TestApp) -> anyhow::Result<(String, String)> {
    let cookie = app.signup("john").await?;
    app.put(
        "/me/completed-courses",
        Some(&cookie),
        json!({"completedCourses": [
            {"courseCode": "engw1111", "courseName": "First-Year Writing", "credits": 4, "grade": "A-"}
        ]}),
    )
    .await?;

    let plan = app.create_plan(&cookie, "Computer Science", "").await?;
    let id = plan["id"].as_str().unwrap_or_default().to_owned();
    app.post(
        &format!("/plans/{id}/edits"),
        Some(&cookie),
        json!({"commands": [
            {"type": "addDefaultSemesters"},
            {"type": "addCatalogCourse", "semesterId": "semester-1", "courseCode": "CS 2500"},
            {"type": "addCatalogCourse", "semesterId": "semester-2", "courseCode": "CS 2510"},
            {"type": "toggleCompletionByCode", "courseCode": "CS 2500"}
        ]}),
    )
    .await?;

    Ok((cookie, id))
}

#[tokio::test]
async fn cs_checklist_merges_plan_and_transcript() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    let (cookie, id) = cs_student(&app).await?;

    let response = app.get(&format!("/plans/{id}/requirements/cs"), Some(&cookie)).await?;
    assert_eq!(response.status, StatusCode::OK);

    let report = &response.body;
    assert_eq!(report["title"], "Computer Science");
    assert_eq!(report["majorCode"], "BSCS-CSCI");
    assert_eq!(report["categories"].as_array().map(Vec::len), Some(12));
    assert_eq!(report["categories"][0]["key"], "CS_Overview");
    assert_eq!(report["categories"][11]["key"], "NUPath");

    let fundamentals = category(report, "CS_Fundamental");
    assert_eq!(fundamentals["progress"]["fulfilled"], 1);
    assert_eq!(fundamentals["progress"]["planned"], 1);
    assert_eq!(fundamentals["progress"]["percentage"], 50.0);
    assert_eq!(fundamentals["requirements"][0]["state"], "fulfilled");
    assert_eq!(fundamentals["requirements"][0]["matches"][0]["provenance"], "plan");
    assert_eq!(fundamentals["requirements"][1]["state"], "planned");

    let writing = category(report, "Writing");
    assert_eq!(writing["progress"]["percentage"], 100.0);
    assert_eq!(writing["requirements"][0]["matches"][0]["provenance"], "transcript");
    assert_eq!(writing["requirements"][0]["matches"][0]["grade"], "A-");

    let nupath = category(report, "NUPath");
    assert_eq!(nupath["progress"]["required"], 2);
    assert_eq!(nupath["progress"]["percentage"], 100.0);
    assert_eq!(nupath["competencies"][1]["fulfilledBy"], json!(["CS 2500"]));

    let security = category(report, "Security_Requirement");
    assert_eq!(security["progress"]["required"], 0);
    assert_eq!(security["progress"]["percentage"], 0.0);

    // (1 + 1 + 2) counted of (2 + 1 + 2) required
    assert_eq!(report["overallPercentage"], 80.0);

    let response = app.get(&format!("/plans/{id}/requirements"), Some(&cookie)).await?;
    assert_eq!(response.body["title"], "Computer Science");

    Ok(())
}

#[tokio::test]
async fn major_checklist_for_mapped_major() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    let cookie = app.signup("jane").await?;
    app.put(
        "/me/completed-courses",
        Some(&cookie),
        json!({"completedCourses": [
            {"courseCode": "PSYC 1101", "courseName": "Foundations of Psychology", "credits": 4}
        ]}),
    )
    .await?;
    let plan = app.create_plan(&cookie, "psychology", "").await?;
    let id = plan["id"].as_str().unwrap_or_default();

    let response = app.get(&format!("/plans/{id}/requirements/major"), Some(&cookie)).await?;
    assert_eq!(response.status, StatusCode::OK);

    let report = &response.body;
    assert_eq!(report["majorCode"], "BS-PSYC");

    let keys = report["categories"]
        .as_array()
        .map(|c| c.iter().map(|c| c["key"].clone()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(keys, vec![json!("core_courses"), json!("research_methods_courses"), json!("nupath")]);

    let core = category(report, "core_courses");
    assert_eq!(core["progress"]["fulfilled"], 1);
    assert_eq!(core["progress"]["total"], 2);
    assert_eq!(core["progress"]["percentage"], 50.0);
    assert_eq!(category(report, "research_methods_courses")["name"], "Research Methods");

    let response = app.get(&format!("/plans/{id}/requirements"), Some(&cookie)).await?;
    assert_eq!(response.body["majorCode"], "BS-PSYC");

    Ok(())
}

#[tokio::test]
async fn majors_containing_cs_letters_get_their_own_checklist() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    let cookie = app.signup("jane").await?;
    let plan = app.create_plan(&cookie, "Mathematics", "").await?;

    let response = app
        .get(&format!("/plans/{}/requirements", plan["id"].as_str().unwrap_or_default()), Some(&cookie))
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["majorCode"], "BA-MATH");
    assert_eq!(response.body["categories"][0]["key"], "core_courses");

    Ok(())
}

#[tokio::test]
async fn unknown_majors_have_no_requirements() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    let cookie = app.signup("john").await?;

    let plan = app.create_plan(&cookie, "Xylophone", "").await?;
    let response = app
        .get(&format!("/plans/{}/requirements/major", plan["id"].as_str().unwrap_or_default()), Some(&cookie))
        .await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Requirements not available for Xylophone"}));

    let plan = app.create_plan(&cookie, "Computer Science", "").await?;
    let response = app
        .get(&format!("/plans/{}/requirements/major", plan["id"].as_str().unwrap_or_default()), Some(&cookie))
        .await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Requirements not available for BSCS-CSCI"}));

    Ok(())
}

#[tokio::test]
async fn missing_requirement_data_is_unavailable() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    std::fs::remove_file(app.data_dir().join(plant_requirements::source::CS_REQUIREMENTS))?;

    let cookie = app.signup("john").await?;
    let plan = app.create_plan(&cookie, "Computer Science", "").await?;
    let response = app
        .get(&format!("/plans/{}/requirements/cs", plan["id"].as_str().unwrap_or_default()), Some(&cookie))
        .await?;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, json!({"error": "Failed to load CS requirements"}));

    Ok(())
}
