//! Input rules shared by every `IssueBoard` implementation

use crate::error::{BoardError, Result};
use std::collections::BTreeSet;

pub const MAX_SUMMARY_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 50;
pub const MAX_STORY_POINTS: u32 = 100;

/// Check a summary and return it trimmed
pub fn summary(summary: &str) -> Result<String> {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Validation("summary must not be empty".to_string()));
    }
    let len = trimmed.chars().count();
    if len > MAX_SUMMARY_LEN {
        return Err(BoardError::Validation(format!(
            "summary is {} characters long (maximum {})",
            len, MAX_SUMMARY_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Check labels and collapse them into a set of trimmed names
pub fn labels<S: AsRef<str>>(labels: &[S]) -> Result<BTreeSet<String>> {
    let mut set = BTreeSet::new();
    for label in labels {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BoardError::Validation("label must not be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_LABEL_LEN {
            return Err(BoardError::Validation(format!(
                "label '{}' is too long (maximum {} characters)",
                trimmed, MAX_LABEL_LEN
            )));
        }
        set.insert(trimmed.to_string());
    }
    Ok(set)
}

pub fn story_points(points: u32) -> Result<u32> {
    if points > MAX_STORY_POINTS {
        return Err(BoardError::Validation(format!(
            "story points must be at most {}",
            MAX_STORY_POINTS
        )));
    }
    Ok(points)
}

/// Check a comment body and return it trimmed
pub fn comment_body(body: &str) -> Result<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Validation("comment must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
