//! Idea growth status and the text used to embed an idea.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Growth stage of an idea. Stored as lowercase text in `ideas.status`.
///
/// Request bodies and query strings share one parser, so `"Growing"` is
/// accepted in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum IdeaStatus {
    #[default]
    Seedling,
    Growing,
    Mature,
}

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 3] = [Self::Seedling, Self::Growing, Self::Mature];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Growing => "growing",
            Self::Mature => "mature",
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seedling" => Ok(Self::Seedling),
            "growing" => Ok(Self::Growing),
            "mature" => Ok(Self::Mature),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: seedling, growing, mature"
            ))),
        }
    }
}

impl TryFrom<String> for IdeaStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Build the text that represents an idea for embedding.
///
/// Absent and blank parts are skipped; the rest are joined with a single
/// space. Returns `None` when nothing is left to embed.
pub fn embedding_text(
    title: &str,
    description: Option<&str>,
    content: Option<&str>,
) -> Option<String> {
    let parts: Vec<&str> = [Some(title), description, content]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Growing".parse::<IdeaStatus>().unwrap(), IdeaStatus::Growing);
        assert_eq!(" mature ".parse::<IdeaStatus>().unwrap(), IdeaStatus::Mature);
    }

    #[test]
    fn status_rejects_unknown_value() {
        assert!("wilted".parse::<IdeaStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&IdeaStatus::Seedling).unwrap();
        assert_eq!(json, "\"seedling\"");
    }

    #[test]
    fn status_deserializes_like_from_str() {
        let status: IdeaStatus = serde_json::from_str("\"Growing\"").unwrap();
        assert_eq!(status, IdeaStatus::Growing);
        assert!(serde_json::from_str::<IdeaStatus>("\"wilted\"").is_err());
    }

    #[test]
    fn default_status_is_seedling() {
        assert_eq!(IdeaStatus::default(), IdeaStatus::Seedling);
    }

    #[test]
    fn embedding_text_joins_present_parts() {
        let text = embedding_text("Garden app", Some("Track plants"), Some("Water reminders"));
        assert_eq!(text.as_deref(), Some("Garden app Track plants Water reminders"));
    }

    #[test]
    fn embedding_text_skips_blank_parts() {
        let text = embedding_text("Garden app", Some("   "), None);
        assert_eq!(text.as_deref(), Some("Garden app"));
    }

    #[test]
    fn embedding_text_none_when_everything_blank() {
        assert_eq!(embedding_text("  ", None, Some("")), None);
    }
}
