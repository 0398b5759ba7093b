pub mod error;
pub mod filter;
pub mod models;
pub mod traits;
pub mod validation;

pub use error::{BoardError, Result};
pub use filter::{issue_count, matches_query, project_columns, FilterOptions};
pub use models::*;
pub use traits::IssueBoard;
