//! HTTP-level integration tests for export, import and statistics.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, create_idea, get, post_json};
use serde_json::json;
use sqlx::SqlitePool;

async fn seed_full_idea(pool: &SqlitePool) -> i64 {
    let idea_id = create_idea(
        common::build_test_app(pool.clone()),
        json!({
            "title": "Seed swap",
            "description": "Trade seeds, with neighbours",
            "category": "social",
            "tags": ["garden", "community"]
        }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/ideas/{idea_id}/documents"),
        json!({"title": "Research", "content": "Libraries host swaps."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/ideas/{idea_id}/action-plans"),
        json!({"title": "Launch", "content": "- [ ] Book a room", "timeline": "1 month"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    idea_id
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_idea_export_includes_documents_and_plans(pool: SqlitePool) {
    let idea_id = seed_full_idea(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/export/idea/{idea_id}/full")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["idea"]["title"], "Seed swap");
    assert_eq!(data["idea"]["tags"], json!(["community", "garden"]));
    assert_eq!(data["documents"][0]["title"], "Research");
    assert_eq!(data["action_plans"][0]["timeline"], "1 month");

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/export/idea/{idea_id}/full?format=markdown")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/markdown");
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with(&format!("attachment; filename=\"idea_{idea_id}_")));
    let markdown = body_text(response).await;
    assert!(markdown.starts_with("# Seed swap\n"));
    assert!(markdown.contains("## Documents\n\n### Research"));
    assert!(markdown.contains("**Timeline:** 1 month"));

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/export/idea/{idea_id}/full?format=csv")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Unsupported format");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_idea_export_missing_idea_is_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/export/idea/999/full").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Idea not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_ideas_formats_and_filters(pool: SqlitePool) {
    seed_full_idea(&pool).await;
    create_idea(
        common::build_test_app(pool.clone()),
        json!({"title": "Solar kiosk", "category": "technology"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/export/ideas?category=social").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["total_ideas"], 1);
    assert_eq!(data["ideas"][0]["title"], "Seed swap");
    assert!(data["export_date"].is_string());

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/export/ideas?format=csv&category=social").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");
    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Title,Description,Category,Status,Created,Updated,Tags")
    );
    let row = lines.next().unwrap();
    assert!(row.contains(",Seed swap,\"Trade seeds, with neighbours\",social,seedling,"));
    assert!(row.ends_with(",\"community, garden\""));

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/export/ideas?format=markdown").await;
    let markdown = body_text(response).await;
    assert!(markdown.contains("Total Ideas: 2"));
    assert!(markdown.contains("## Solar kiosk"));

    let app = common::build_test_app(pool);
    let response = get(app, "/api/export/ideas?format=xml").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_reports_duplicates(pool: SqlitePool) {
    create_idea(common::build_test_app(pool.clone()), json!({"title": "Seed swap"})).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/export/import/ideas",
        json!([
            {"title": "Seed swap"},
            {"title": "Tool library", "status": "growing", "tags": ["shared"]}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Successfully imported 1 ideas");
    assert_eq!(json["data"]["imported_count"], 1);
    assert_eq!(json["data"]["total_attempted"], 2);
    assert_eq!(json["data"]["errors"], json!(["Duplicate idea: Seed swap"]));

    let app = common::build_test_app(pool);
    let ideas = body_json(get(app, "/api/ideas?tags=shared").await).await;
    assert_eq!(ideas["data"][0]["title"], "Tool library");
    assert_eq!(ideas["data"][0]["status"], "growing");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_empty_array_and_bad_body(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/export/import/ideas", json!([])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["imported_count"], 0);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/export/import/ideas", json!({"title": "not a list"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_usage_analytics(pool: SqlitePool) {
    seed_full_idea(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/analytics/usage").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["period"], "month");
    assert_eq!(data["ideas_created"], 1);
    assert_eq!(data["categories"], json!([{"category": "social", "count": 1}]));
    assert_eq!(data["statuses"], json!([{"status": "seedling", "count": 1}]));
    assert_eq!(data["total_documents"], 1);
    assert_eq!(data["total_action_plans"], 1);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/analytics/usage?period=decade").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_system_stats(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let data = body_json(get(app, "/api/system/stats").await).await["data"].clone();
    assert_eq!(data["overview"]["total_ideas"], 0);
    assert_eq!(data["growth"]["growth_rate"], "stable");

    seed_full_idea(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/system/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["overview"]["total_ideas"], 1);
    assert_eq!(data["overview"]["total_documents"], 1);
    assert_eq!(data["overview"]["recent_ideas"], 1);
    assert_eq!(data["overview"]["avg_ideas_per_day"], 1.0);
    assert_eq!(data["distribution"]["categories"][0]["category"], "social");
    assert_eq!(data["growth"]["ideas_this_month"], 1);
    assert_eq!(data["growth"]["growth_rate"], "positive");
}
