//! Shared query parameter types for API handlers.

use idea_garden_core::error::CoreError;
use idea_garden_core::export::ExportFormat;
use idea_garden_core::idea::IdeaStatus;
use idea_garden_core::stats::UsagePeriod;
use idea_garden_db::models::idea::IdeaFilter;
use serde::Deserialize;

/// Filters for `GET /api/ideas` (`?q=&category=&status=&tags=a,b`).
#[derive(Debug, Default, Deserialize)]
pub struct IdeaListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
}

impl IdeaListParams {
    /// Convert into a repository filter. Unknown statuses are rejected.
    pub fn into_filter(self) -> Result<IdeaFilter, CoreError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<IdeaStatus>()?),
        };
        let tags = self
            .tags
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(IdeaFilter {
            q: self.q,
            category: self.category.filter(|c| !c.trim().is_empty()),
            status,
            tags,
        })
    }
}

/// `?q=` for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// `?limit=` for related ideas. Clamped in the handler.
#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<i64>,
}

/// `?against=` for version diffs. Defaults to the previous version.
#[derive(Debug, Deserialize)]
pub struct DiffParams {
    pub against: Option<i64>,
}

/// `?title=&description=` for previewing a document template.
#[derive(Debug, Deserialize)]
pub struct TemplateParams {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Parse an optional query value, falling back to the type's default when
/// absent or blank.
fn parse_or_default<T>(value: Option<&str>) -> Result<T, CoreError>
where
    T: std::str::FromStr<Err = CoreError> + Default,
{
    match value.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(v) => v.parse(),
    }
}

/// `?format=&category=&status=&tags=` for the idea export.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
}

impl ExportParams {
    pub fn format(&self) -> Result<ExportFormat, CoreError> {
        parse_or_default(self.format.as_deref())
    }

    /// The same filters as the idea listing, without the text query.
    pub fn into_filter(self) -> Result<IdeaFilter, CoreError> {
        IdeaListParams {
            q: None,
            category: self.category,
            status: self.status,
            tags: self.tags,
        }
        .into_filter()
    }
}

/// `?format=` for a single-idea export.
#[derive(Debug, Default, Deserialize)]
pub struct FormatParams {
    pub format: Option<String>,
}

impl FormatParams {
    pub fn format(&self) -> Result<ExportFormat, CoreError> {
        parse_or_default(self.format.as_deref())
    }
}

/// `?period=day|week|month|year` for usage analytics. Defaults to month.
#[derive(Debug, Default, Deserialize)]
pub struct UsageParams {
    pub period: Option<String>,
}

impl UsageParams {
    pub fn period(&self) -> Result<UsagePeriod, CoreError> {
        parse_or_default(self.period.as_deref())
    }
}
