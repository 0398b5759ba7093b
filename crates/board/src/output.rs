use crate::cli::OutputFormat;
use board_core::{BoardError, Column, Comment, Issue, IssueStatus, Priority, Project, User};
use colored::Colorize;
use serde::Serialize;

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

pub fn output_list<T: Serialize + Displayable>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            for item in items {
                println!("{}", item.display());
                println!();
            }
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

/// Machine-readable class of an error
pub fn error_code(err: &anyhow::Error) -> &'static str {
    match err.chain().find_map(|e| e.downcast_ref::<BoardError>()) {
        Some(e) if e.is_validation() => "validation",
        Some(e) if e.is_not_found() => "not_found",
        _ => "error",
    }
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

fn colorize_priority(priority: Priority) -> String {
    let value = priority.as_str();
    match priority {
        Priority::Highest => value.red().bold().to_string(),
        Priority::High => value.red().to_string(),
        Priority::Medium => value.yellow().to_string(),
        Priority::Low | Priority::Lowest => value.dimmed().to_string(),
    }
}

fn colorize_status(status: IssueStatus) -> String {
    let value = status.as_str();
    match status {
        IssueStatus::ToDo => value.to_string(),
        IssueStatus::InProgress => value.yellow().to_string(),
        IssueStatus::Done => value.green().to_string(),
    }
}

impl Displayable for Issue {
    fn display(&self) -> String {
        let mut output = format!(
            "{} - {}\n  {}: {}  {}: {}  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}",
            self.key.cyan().bold(),
            self.summary.white().bold(),
            "Type".dimmed(),
            self.issue_type,
            "Priority".dimmed(),
            colorize_priority(self.priority),
            "Status".dimmed(),
            colorize_status(self.status),
            "Reporter".dimmed(),
            self.reporter.name,
            "Created".dimmed(),
            self.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            "Updated".dimmed(),
            self.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );

        let assignee = self
            .assignee
            .as_ref()
            .map(|u| format!("{} ({})", u.name, u.initials))
            .unwrap_or_else(|| "Unassigned".dimmed().to_string());
        output.push_str(&format!("\n  {}: {}", "Assignee".dimmed(), assignee));

        if let Some(points) = self.story_points {
            output.push_str(&format!("\n  {}: {}", "Story points".dimmed(), points));
        }

        if !self.labels.is_empty() {
            let labels: Vec<String> = self.labels.iter().map(|l| l.magenta().to_string()).collect();
            output.push_str(&format!("\n  {}: {}", "Labels".dimmed(), labels.join(", ")));
        }

        if !self.description.is_empty() {
            output.push_str(&format!("\n  {}: {}", "Description".dimmed(), self.description));
        }

        if !self.comments.is_empty() {
            output.push_str(&format!(
                "\n  {} ({}):",
                "Comments".dimmed(),
                self.comments.len()
            ));
            for comment in &self.comments {
                output.push_str(&format!("\n    {}", comment.display()));
            }
        }

        output
    }
}

impl Displayable for Comment {
    fn display(&self) -> String {
        format!(
            "[{}] {} - {}",
            self.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            self.author.name.cyan(),
            self.body
        )
    }
}

/// One line per issue, for board and search listings
fn issue_line(issue: &Issue) -> String {
    let assignee = issue
        .assignee
        .as_ref()
        .map(|u| u.initials.clone())
        .unwrap_or_else(|| "--".to_string());
    let points = issue
        .story_points
        .map(|p| format!(" ({}p)", p))
        .unwrap_or_default();
    format!(
        "{:<10} {:<6} {:<8} {:<3} {}{}",
        issue.key.cyan(),
        issue.issue_type.as_str(),
        colorize_priority(issue.priority),
        assignee,
        issue.summary,
        points.dimmed()
    )
}

impl Displayable for Column {
    fn display(&self) -> String {
        let count = match self.limit {
            Some(limit) => {
                let figure = format!("{}/{}", self.issues.len(), limit);
                if self.is_over_limit() {
                    figure.red().bold().to_string()
                } else {
                    figure
                }
            }
            None => self.issues.len().to_string(),
        };
        let mut output = format!(
            "{} [{}] {}",
            self.title.to_uppercase().white().bold(),
            colorize_status(self.status),
            count
        );
        if self.issues.is_empty() {
            output.push_str(&format!("\n  {}", "(empty)".dimmed()));
        }
        for issue in &self.issues {
            output.push_str(&format!("\n  {}", issue_line(issue)));
        }
        output
    }
}

/// Search hit: an issue shown on a single line
#[derive(Serialize)]
#[serde(transparent)]
pub struct IssueRow<'a>(pub &'a Issue);

impl Displayable for IssueRow<'_> {
    fn display(&self) -> String {
        format!("{} [{}]", issue_line(self.0), colorize_status(self.0.status))
    }
}

impl Displayable for User {
    fn display(&self) -> String {
        format!(
            "{} {} <{}> ({})",
            self.initials.bold(),
            self.name,
            self.email.dimmed(),
            self.id.dimmed()
        )
    }
}

impl Displayable for Project {
    fn display(&self) -> String {
        let mut output = format!(
            "{} ({}) - {}\n  {}: {}  {}: {}\n  {}: {}",
            self.key.cyan().bold(),
            self.id.dimmed(),
            self.name.white().bold(),
            "Category".dimmed(),
            self.category,
            "Type".dimmed(),
            self.project_type,
            "Lead".dimmed(),
            self.lead.name
        );
        if !self.description.is_empty() {
            output.push_str(&format!("\n  {}: {}", "Description".dimmed(), self.description));
        }
        output
    }
}

/// Print the whole board
pub fn output_board(columns: &[Column], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(columns) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            let blocks: Vec<String> = columns.iter().map(Displayable::display).collect();
            println!("{}", blocks.join("\n\n"));
        }
    }
}
