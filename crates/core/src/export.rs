//! Export formats and the text helpers shared by the exporters.

use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Output format of an export (`?format=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Markdown => "text/markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(CoreError::Validation("Unsupported format".to_string())),
        }
    }
}

/// Quote a CSV field when it contains a comma, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join fields into one CSV record terminated by `\n`.
pub fn csv_record<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// `Content-Disposition` value for a downloaded export, e.g.
/// `attachment; filename="ideas_export_20250310.csv"`.
pub fn attachment_header(stem: &str, format: ExportFormat, now: Timestamp) -> String {
    format!(
        "attachment; filename=\"{stem}_{}.{}\"",
        now.format("%Y%m%d"),
        format.extension()
    )
}
