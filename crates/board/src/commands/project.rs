use crate::cli::OutputFormat;
use crate::output::{output_result, Displayable};
use anyhow::Result;
use board_core::IssueBoard;
use colored::Colorize;

pub fn handle_project(board: &dyn IssueBoard, format: OutputFormat) -> Result<()> {
    let project = board.project();
    let users = board.users();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "project": project,
                "users": users,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            output_result(&project, format);
            println!("\n  {} ({}):", "Users".dimmed(), users.len());
            for user in &users {
                println!("    {}", user.display());
            }
        }
    }
    Ok(())
}
