mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn welcome_lists_easy_electives_for_the_goal() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    let cookie = app.signup("john").await?;
    let plan = app.create_plan(&cookie, "Computer Science", "data scientist").await?;

    let response = app
        .get(&format!("/plans/{}/assistant/welcome", plan["id"].as_str().unwrap_or_default()), Some(&cookie))
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "assistant");
    assert_eq!(response.body["failed"], false);

    let content = response.body["content"].as_str().unwrap_or_default();
    assert!(content.contains("your career goal: **\"data scientist\"**"));

    let easy = content.find("CS 3200").unwrap_or(usize::MAX);
    let hard = content.find("CS 4100").unwrap_or(usize::MAX);
    assert!(easy < hard, "electives are sorted by difficulty");
    assert!(content.contains("DS 3000"));

    Ok(())
}

#[tokio::test]
async fn questions_go_to_the_model_with_context() -> anyhow::Result<()> {
    let app = helpers::setup(helpers::FakeModel::replying("Take **CS 3200** next.")).await?;
    let cookie = app.signup("john").await?;
    let plan = app.create_plan(&cookie, "Computer Science", "").await?;
    let uri = format!("/plans/{}/assistant", plan["id"].as_str().unwrap_or_default());

    let response = app
        .post(&uri, Some(&cookie), json!({"question": "What should I take next?"}))
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["content"], "Take **CS 3200** next.");
    assert_eq!(response.body["failed"], false);

    let prompt = app.model.last_text();
    assert!(prompt.contains("- Major: Computer Science"));
    assert!(prompt.contains("- Career Goal: Not specified"));
    assert!(prompt.contains("CS Requirements Summary:"));
    assert!(prompt.contains("Student Question: What should I take next?"));

    let response = app.post(&uri, Some(&cookie), json!({"question": "   "})).await?;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.model.calls(), 1);

    Ok(())
}

#[tokio::test]
async fn model_failure_becomes_an_error_message() -> anyhow::Result<()> {
    let app = helpers::setup(helpers::FakeModel::failing(429)).await?;
    let cookie = app.signup("john").await?;
    let plan = app.create_plan(&cookie, "Psychology", "").await?;

    let response = app
        .post(
            &format!("/plans/{}/assistant", plan["id"].as_str().unwrap_or_default()),
            Some(&cookie),
            json!({"question": "Help"}),
        )
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["failed"], true);
    assert_eq!(
        response.body["content"],
        "**Error:** Unable to process your request. Please try again."
    );

    Ok(())
}

#[tokio::test]
async fn assistant_without_key_is_unavailable() -> anyhow::Result<()> {
    let app = helpers::setup_without_ai().await?;
    let cookie = app.signup("john").await?;
    let plan = app.create_plan(&cookie, "Psychology", "").await?;

    let response = app
        .post(
            &format!("/plans/{}/assistant", plan["id"].as_str().unwrap_or_default()),
            Some(&cookie),
            json!({"question": "Help"}),
        )
        .await?;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);

    Ok(())
}
