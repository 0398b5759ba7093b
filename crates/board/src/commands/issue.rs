use crate::cli::{FilterArgs, IssueCommands, OutputFormat};
use crate::commands::resolve_user_id;
use crate::output::{output_list, output_result, IssueRow};
use anyhow::{Context, Result};
use board_core::{
    project_columns, CreateIssue, FieldChange, IssueBoard, IssueStatus, IssueType, Priority,
    UpdateIssue,
};

pub fn handle_issue(board: &dyn IssueBoard, action: &IssueCommands, format: OutputFormat) -> Result<()> {
    match action {
        IssueCommands::Get { id } => handle_get(board, id, format),
        IssueCommands::Create {
            summary,
            description,
            issue_type,
            priority,
            assignee,
            points,
            labels,
            column,
            json,
        } => {
            let create = match json {
                Some(payload) => serde_json::from_str(payload)
                    .context("Invalid JSON payload for issue creation")?,
                None => CreateIssue {
                    summary: summary.clone().unwrap_or_default(),
                    description: description.clone().unwrap_or_default(),
                    issue_type: issue_type.unwrap_or(IssueType::Task),
                    priority: priority.unwrap_or(Priority::Medium),
                    assignee_id: assignee.as_deref().map(|a| resolve_user_id(board, a)),
                    story_points: *points,
                    labels: labels.clone(),
                    target_column_id: column.clone(),
                },
            };
            handle_create(board, &create, format)
        }
        IssueCommands::Move { id, to, from } => handle_move(board, id, *to, *from, format),
        IssueCommands::Update {
            id,
            summary,
            description,
            issue_type,
            priority,
            status,
            assignee,
            unassign,
            points,
            clear_points,
            labels,
            clear_labels,
            json,
        } => {
            let update = match json {
                Some(payload) => serde_json::from_str(payload)
                    .context("Invalid JSON payload for issue update")?,
                None => UpdateIssue {
                    summary: summary.clone(),
                    description: description.clone(),
                    issue_type: *issue_type,
                    priority: *priority,
                    status: *status,
                    assignee: match (assignee, unassign) {
                        (Some(a), _) => Some(FieldChange::Set(resolve_user_id(board, a))),
                        (None, true) => Some(FieldChange::Clear),
                        (None, false) => None,
                    },
                    story_points: match (points, clear_points) {
                        (Some(p), _) => Some(FieldChange::Set(*p)),
                        (None, true) => Some(FieldChange::Clear),
                        (None, false) => None,
                    },
                    labels: if *clear_labels {
                        Some(Vec::new())
                    } else if labels.is_empty() {
                        None
                    } else {
                        Some(labels.clone())
                    },
                },
            };
            handle_update(board, id, &update, format)
        }
        IssueCommands::Comment { id, text } => handle_comment(board, id, text, format),
        IssueCommands::Search { query, filters } => handle_search(board, query, filters, format),
    }
}

fn resolve(board: &dyn IssueBoard, id: &str) -> Result<String> {
    board
        .resolve_issue_id(id)
        .with_context(|| format!("Failed to find issue '{}'", id))
}

fn handle_get(board: &dyn IssueBoard, id: &str, format: OutputFormat) -> Result<()> {
    let issue_id = resolve(board, id)?;
    let issue = board
        .get_issue(&issue_id)
        .with_context(|| format!("Failed to fetch issue '{}'", id))?;

    output_result(&issue, format);
    Ok(())
}

fn handle_create(board: &dyn IssueBoard, create: &CreateIssue, format: OutputFormat) -> Result<()> {
    let issue = board
        .create_issue(create)
        .context("Failed to create issue")?;

    output_result(&issue, format);
    Ok(())
}

fn handle_move(
    board: &dyn IssueBoard,
    id: &str,
    to: IssueStatus,
    from: Option<IssueStatus>,
    format: OutputFormat,
) -> Result<()> {
    let issue_id = resolve(board, id)?;
    let from = match from {
        Some(status) => status,
        None => board.get_issue(&issue_id)?.status,
    };

    board
        .move_issue(&issue_id, from, to)
        .with_context(|| format!("Failed to move issue '{}' from {} to {}", id, from, to))?;

    let issue = board.get_issue(&issue_id)?;
    output_result(&issue, format);
    Ok(())
}

fn handle_update(
    board: &dyn IssueBoard,
    id: &str,
    update: &UpdateIssue,
    format: OutputFormat,
) -> Result<()> {
    let issue_id = resolve(board, id)?;
    let issue = board
        .update_issue(&issue_id, update)
        .with_context(|| format!("Failed to update issue '{}'", id))?;

    output_result(&issue, format);
    Ok(())
}

fn handle_comment(board: &dyn IssueBoard, id: &str, text: &str, format: OutputFormat) -> Result<()> {
    let issue_id = resolve(board, id)?;
    let comment = board
        .add_comment(&issue_id, text)
        .with_context(|| format!("Failed to add comment to '{}'", id))?;

    output_result(&comment, format);
    Ok(())
}

fn handle_search(
    board: &dyn IssueBoard,
    query: &str,
    filters: &FilterArgs,
    format: OutputFormat,
) -> Result<()> {
    let columns = project_columns(&board.columns(), query, &filters.to_options(board));
    let hits: Vec<IssueRow> = columns
        .iter()
        .flat_map(|c| c.issues.iter())
        .map(IssueRow)
        .collect();

    if hits.is_empty() && format == OutputFormat::Text {
        println!("No issues found.");
        return Ok(());
    }
    output_list(&hits, format);
    Ok(())
}
