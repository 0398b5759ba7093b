use thiserror::Error;

/// Errors returned by board operations
///
/// Every operation is all-or-nothing: when one of these is returned the
/// board is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid seed data: {0}")]
    Seed(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl BoardError {
    /// Whether this error means a referenced issue, column or user does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BoardError::IssueNotFound(_) | BoardError::ColumnNotFound(_) | BoardError::UserNotFound(_)
        )
    }

    /// Whether this error was caused by bad input
    pub fn is_validation(&self) -> bool {
        matches!(self, BoardError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_groups_all_reference_errors() {
        assert!(BoardError::IssueNotFound("x".into()).is_not_found());
        assert!(BoardError::ColumnNotFound("x".into()).is_not_found());
        assert!(BoardError::UserNotFound("x".into()).is_not_found());
        assert!(!BoardError::Validation("x".into()).is_not_found());
    }

    #[test]
    fn messages_name_the_missing_thing() {
        let err = BoardError::IssueNotFound("PROJ-9".into());
        assert_eq!(err.to_string(), "Issue not found: PROJ-9");
    }
}
