use crate::cli::{OutputFormat, SessionCommand};
use crate::commands::dispatch;
use crate::output::output_error;
use anyhow::{Context, Result};
use board_core::IssueBoard;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::BufRead;

/// Outcome counts of a session
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Run every command line from `input` against one board
///
/// A failing line is reported and the session goes on.
pub fn run_session(
    board: &dyn IssueBoard,
    input: impl BufRead,
    format: OutputFormat,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read session input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        tracing::debug!(line = index + 1, command = %line, "session command");
        summary.executed += 1;
        if let Err(err) = run_line(board, line, format) {
            summary.failed += 1;
            output_error(&err.context(format!("line {}", index + 1)), format);
        }
    }

    Ok(summary)
}

fn run_line(board: &dyn IssueBoard, line: &str, format: OutputFormat) -> Result<()> {
    let words = shell_words::split(line).context("Unbalanced quotes")?;
    let parsed = match SessionCommand::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp) => {
            print!("{}", err.render());
            return Ok(());
        }
        Err(err) => return Err(anyhow::anyhow!(err.render().to_string())),
    };
    dispatch(board, &parsed.command, format)
}
