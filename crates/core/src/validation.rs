//! Input validation helpers shared by the handlers.

use crate::error::CoreError;

/// Lowest accepted action-plan priority.
pub const MIN_PRIORITY: i64 = 1;

/// Highest accepted action-plan priority.
pub const MAX_PRIORITY: i64 = 10;

/// Priority assigned when a plan is created without one.
pub const DEFAULT_PRIORITY: i64 = 5;

/// Default number of related ideas returned.
pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// Upper bound on the number of related ideas a caller may request.
pub const MAX_RELATED_LIMIT: usize = 50;

/// Reject missing, empty or whitespace-only values.
///
/// Returns the trimmed value on success. `message` is used verbatim as the
/// validation error so handlers can keep their user-facing wording.
pub fn require_non_blank<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

/// Reject a value that is present but blank. Absent values pass.
pub fn reject_blank_if_present(value: Option<&str>, message: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(CoreError::Validation(message.to_string())),
        _ => Ok(()),
    }
}

/// Validate that a priority falls within `[MIN_PRIORITY, MAX_PRIORITY]`.
pub fn validate_priority(priority: i64) -> Result<(), CoreError> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(CoreError::Validation(format!(
            "Priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {priority}"
        )));
    }
    Ok(())
}

/// Trim tag names, drop blanks and duplicates, keep first-seen order.
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_string()))
        .map(str::to_string)
        .collect()
}

/// Resolve the `?limit=` of the related-ideas endpoint.
pub fn clamp_related_limit(limit: Option<i64>) -> usize {
    match limit {
        None => DEFAULT_RELATED_LIMIT,
        Some(n) if n < 1 => 1,
        Some(n) => (n as usize).min(MAX_RELATED_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_blank_trims() {
        assert_eq!(require_non_blank(Some("  Idea "), "Title is required").unwrap(), "Idea");
    }

    #[test]
    fn require_non_blank_rejects_whitespace_and_none() {
        for value in [None, Some(""), Some("   \t")] {
            match require_non_blank(value, "Title is required") {
                Err(CoreError::Validation(msg)) => assert_eq!(msg, "Title is required"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn reject_blank_if_present_allows_absent() {
        assert!(reject_blank_if_present(None, "x").is_ok());
        assert!(reject_blank_if_present(Some("ok"), "x").is_ok());
        assert!(reject_blank_if_present(Some(" "), "x").is_err());
    }

    #[test]
    fn priority_bounds() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(10).is_ok());
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(11).is_err());
    }

    #[test]
    fn tag_names_are_trimmed_and_deduplicated() {
        let names = vec![
            " rust ".to_string(),
            "".to_string(),
            "web".to_string(),
            "rust".to_string(),
        ];
        assert_eq!(normalize_tag_names(&names), vec!["rust", "web"]);
    }

    #[test]
    fn related_limit_defaults_and_clamps() {
        assert_eq!(clamp_related_limit(None), DEFAULT_RELATED_LIMIT);
        assert_eq!(clamp_related_limit(Some(0)), 1);
        assert_eq!(clamp_related_limit(Some(3)), 3);
        assert_eq!(clamp_related_limit(Some(10_000)), MAX_RELATED_LIMIT);
    }
}
