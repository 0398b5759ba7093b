use crate::cli::{OutputFormat, ShowArgs};
use crate::output::output_board;
use anyhow::Result;
use board_core::{issue_count, project_columns, IssueBoard};
use colored::Colorize;

pub fn handle_show(board: &dyn IssueBoard, args: &ShowArgs, format: OutputFormat) -> Result<()> {
    let filters = args.filters.to_options(board);
    let query = args.query.as_deref().unwrap_or("");
    let all = board.columns();
    let columns = project_columns(&all, query, &filters);

    output_board(&columns, format);

    if format == OutputFormat::Text && (!query.trim().is_empty() || !filters.is_empty()) {
        let summary = format!("Showing {} of {} issues", issue_count(&columns), issue_count(&all));
        println!("\n{}", summary.dimmed());
    }
    Ok(())
}
