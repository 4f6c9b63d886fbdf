//! Integration tests for bulk import and the statistics aggregates.

use chrono::{Duration, Utc};
use idea_garden_core::idea::IdeaStatus;
use idea_garden_db::models::action_plan::CreateActionPlan;
use idea_garden_db::models::document::CreateDocument;
use idea_garden_db::models::idea::{CreateIdea, IdeaFilter};
use idea_garden_db::models::stats::{CategoryCount, StatusCount, Totals};
use idea_garden_db::repositories::{ActionPlanRepo, DocumentRepo, IdeaRepo, StatsRepo};
use sqlx::SqlitePool;

fn idea(title: &str, category: Option<&str>, status: Option<IdeaStatus>) -> CreateIdea {
    CreateIdea {
        title: title.into(),
        category: category.map(str::to_string),
        status,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn import_skips_duplicates_and_blank_titles(pool: SqlitePool) {
    IdeaRepo::create(&pool, &idea("Seed swap", None, None)).await.unwrap();

    let batch = vec![
        CreateIdea {
            tags: Some(vec!["garden".into()]),
            ..idea("Tool library", Some("social"), None)
        },
        idea("  Seed swap ", None, None),
        idea("   ", None, None),
        idea("Tool library", None, None),
    ];
    let summary = IdeaRepo::import(&pool, &batch).await.unwrap();

    assert_eq!(summary.imported_count, 1);
    assert_eq!(summary.total_attempted, 4);
    assert_eq!(
        summary.errors,
        vec![
            "Duplicate idea: Seed swap".to_string(),
            "Skipped idea without a title".to_string(),
            "Duplicate idea: Tool library".to_string(),
        ]
    );

    let ideas = IdeaRepo::list(&pool, &IdeaFilter::default()).await.unwrap();
    assert_eq!(ideas.len(), 2);
    let library = ideas.iter().find(|i| i.title == "Tool library").unwrap();
    assert_eq!(library.tags, vec!["garden"]);
    assert_eq!(library.category.as_deref(), Some("social"));
}

#[sqlx::test(migrations = "./migrations")]
async fn import_of_nothing_is_a_no_op(pool: SqlitePool) {
    let summary = IdeaRepo::import(&pool, &[]).await.unwrap();
    assert_eq!(summary.imported_count, 0);
    assert_eq!(summary.total_attempted, 0);
    assert!(summary.errors.is_empty());
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn totals_count_every_table(pool: SqlitePool) {
    assert_eq!(StatsRepo::totals(&pool).await.unwrap(), Totals::default());

    let created = IdeaRepo::create(&pool, &idea("Idea", None, None)).await.unwrap();
    DocumentRepo::create(
        &pool,
        created.id,
        &CreateDocument {
            title: "Doc".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    ActionPlanRepo::create(
        &pool,
        created.id,
        &CreateActionPlan {
            title: "Plan".into(),
            content: "- [ ] start".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(
        StatsRepo::totals(&pool).await.unwrap(),
        Totals {
            total_ideas: 1,
            total_documents: 1,
            total_action_plans: 1,
        }
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn distributions_group_and_respect_since(pool: SqlitePool) {
    for (title, category, status) in [
        ("A", Some("technology"), Some(IdeaStatus::Growing)),
        ("B", Some("technology"), None),
        ("C", None, Some(IdeaStatus::Growing)),
    ] {
        IdeaRepo::create(&pool, &idea(title, category, status)).await.unwrap();
    }

    let categories = StatsRepo::category_counts(&pool, None).await.unwrap();
    assert_eq!(
        categories,
        vec![
            CategoryCount {
                category: Some("technology".into()),
                count: 2
            },
            CategoryCount {
                category: None,
                count: 1
            },
        ]
    );

    let statuses = StatsRepo::status_counts(&pool, None).await.unwrap();
    assert_eq!(
        statuses,
        vec![
            StatusCount {
                status: "growing".into(),
                count: 2
            },
            StatusCount {
                status: "seedling".into(),
                count: 1
            },
        ]
    );

    let yesterday = Utc::now() - Duration::days(1);
    let tomorrow = Utc::now() + Duration::days(1);
    assert_eq!(StatsRepo::ideas_created_since(&pool, Some(yesterday)).await.unwrap(), 3);
    assert_eq!(StatsRepo::ideas_created_since(&pool, Some(tomorrow)).await.unwrap(), 0);
    assert!(StatsRepo::category_counts(&pool, Some(tomorrow)).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn first_idea_created_at_is_the_oldest(pool: SqlitePool) {
    assert_eq!(StatsRepo::first_idea_created_at(&pool).await.unwrap(), None);

    let first = IdeaRepo::create(&pool, &idea("First", None, None)).await.unwrap();
    IdeaRepo::create(&pool, &idea("Second", None, None)).await.unwrap();

    assert_eq!(
        StatsRepo::first_idea_created_at(&pool).await.unwrap(),
        Some(first.created_at)
    );
}
