//! Handlers for usage analytics and garden-wide statistics.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use idea_garden_core::stats::{
    average_per_day, growth_rate, month_start, recent_window_start, UsagePeriod,
};
use idea_garden_core::types::Timestamp;
use idea_garden_db::models::stats::{CategoryCount, StatusCount, Totals};
use idea_garden_db::repositories::StatsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::QueryParams;
use crate::query::UsageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Activity within one reporting window.
#[derive(Debug, Serialize)]
pub struct UsageAnalytics {
    pub period: &'static str,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub ideas_created: i64,
    pub categories: Vec<CategoryCount>,
    pub statuses: Vec<StatusCount>,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Serialize)]
pub struct StatsOverview {
    #[serde(flatten)]
    pub totals: Totals,
    pub recent_ideas: i64,
    pub avg_ideas_per_day: f64,
}

#[derive(Debug, Serialize)]
pub struct Distribution {
    pub categories: Vec<CategoryCount>,
    pub statuses: Vec<StatusCount>,
}

#[derive(Debug, Serialize)]
pub struct Growth {
    pub ideas_this_week: i64,
    pub ideas_this_month: i64,
    pub growth_rate: &'static str,
}

/// Garden-wide statistics.
#[derive(Debug, Serialize)]
pub struct SystemStats {
    pub overview: StatsOverview,
    pub distribution: Distribution,
    pub growth: Growth,
}

/// GET /api/analytics/usage?period=day|week|month|year
pub async fn usage(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<UsageParams>,
) -> AppResult<Json<ApiResponse<UsageAnalytics>>> {
    let period: UsagePeriod = params.period()?;
    let end_date = Utc::now();
    let start_date = period.start(end_date);
    let since = Some(start_date);

    let analytics = UsageAnalytics {
        period: period.as_str(),
        start_date,
        end_date,
        ideas_created: StatsRepo::ideas_created_since(&state.pool, since).await?,
        categories: StatsRepo::category_counts(&state.pool, since).await?,
        statuses: StatsRepo::status_counts(&state.pool, since).await?,
        totals: StatsRepo::totals(&state.pool).await?,
    };
    tracing::debug!(%period, ideas_created = analytics.ideas_created, "Usage analytics");
    Ok(Json(ApiResponse::ok(analytics)))
}

/// GET /api/system/stats
pub async fn system_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SystemStats>>> {
    let now = Utc::now();
    let totals = StatsRepo::totals(&state.pool).await?;
    let recent =
        StatsRepo::ideas_created_since(&state.pool, Some(recent_window_start(now))).await?;
    let this_month = StatsRepo::ideas_created_since(&state.pool, Some(month_start(now))).await?;
    let first = StatsRepo::first_idea_created_at(&state.pool).await?;

    let stats = SystemStats {
        overview: StatsOverview {
            totals,
            recent_ideas: recent,
            avg_ideas_per_day: average_per_day(totals.total_ideas, first, now),
        },
        distribution: Distribution {
            categories: StatsRepo::category_counts(&state.pool, None).await?,
            statuses: StatsRepo::status_counts(&state.pool, None).await?,
        },
        growth: Growth {
            ideas_this_week: recent,
            ideas_this_month: this_month,
            growth_rate: growth_rate(recent),
        },
    };
    Ok(Json(ApiResponse::ok(stats)))
}
