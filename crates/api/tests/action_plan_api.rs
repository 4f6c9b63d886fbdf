//! HTTP-level integration tests for action plans.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_idea, delete, get, post_json, put_json, FakeProvider};
use serde_json::json;
use sqlx::SqlitePool;

fn goals() -> serde_json::Value {
    json!({
        "timeline": "3 months",
        "vision": "Every street has a tool shelf",
        "constraints": "No budget"
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_without_provider_uses_fallback(pool: SqlitePool) {
    let idea_id = create_idea(common::build_test_app(pool.clone()), json!({"title": "Tool library"})).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &format!("/api/ideas/{idea_id}/action-plans/generate"), goals()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Action Plan for Tool library");
    assert_eq!(data["priority"], 5);
    assert_eq!(data["timeline"], "3 months");
    assert_eq!(data["resources"], "");
    let content = data["content"].as_str().unwrap();
    assert!(content.contains("## Phase"));
    assert!(content.contains("No budget"));

    let app = common::build_test_app(pool);
    let current = body_json(get(app, &format!("/api/ideas/{idea_id}/action-plan")).await).await;
    assert_eq!(current["data"]["id"], data["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_with_provider_stores_model_plan(pool: SqlitePool) {
    let idea_id = create_idea(common::build_test_app(pool.clone()), json!({"title": "Tool library"})).await;
    let provider = FakeProvider::new("- [ ] Find a shelf\n- [ ] Ask neighbours");

    let mut body = goals();
    body["priority"] = json!(8);
    let app = common::build_test_app_with_provider(pool, provider);
    let response = post_json(app, &format!("/api/ideas/{idea_id}/action-plans/generate"), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = &body_json(response).await["data"];
    assert_eq!(data["content"], "- [ ] Find a shelf\n- [ ] Ask neighbours");
    assert_eq!(data["priority"], 8);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_validates_goals(pool: SqlitePool) {
    let idea_id = create_idea(common::build_test_app(pool.clone()), json!({"title": "Tool library"})).await;
    let uri = format!("/api/ideas/{idea_id}/action-plans/generate");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, json!({"vision": "x"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Timeline is required");

    let mut body = goals();
    body["priority"] = json!(11);
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/ideas/999/action-plans/generate", goals()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_action_plan_crud(pool: SqlitePool) {
    let idea_id = create_idea(common::build_test_app(pool.clone()), json!({"title": "Tool library"})).await;
    let base = format!("/api/ideas/{idea_id}/action-plans");

    let app = common::build_test_app(pool.clone());
    let current = body_json(get(app, &format!("/api/ideas/{idea_id}/action-plan")).await).await;
    assert!(current["data"].is_null());

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &base, json!({"title": "Plan", "content": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Content is required");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &base, json!({"title": "Plan", "content": "- [ ] go", "priority": 0})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &base, json!({"title": "Plan", "content": "- [ ] go"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let plan_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("{base}/{plan_id}"), json!({"priority": 9})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["priority"], 9);
    assert_eq!(data["title"], "Plan");

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("{base}/{plan_id}"), json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let list = body_json(get(app, &base).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("{base}/{plan_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{base}/{plan_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Action plan not found");
}
