//! In-memory kanban board store
//!
//! This crate provides `MemoryBoard`, the implementation of the `IssueBoard`
//! trait used by the CLI, and the seed format it starts from.
//!
//! Nothing is persisted: a store lives as long as the process that built
//! it, and a new store built from the same seed starts from the same board.
//!
//! # Usage
//!
//! ```no_run
//! use board_core::{CreateIssue, IssueBoard, IssueStatus};
//! use board_store::{MemoryBoard, Seed};
//!
//! let board = MemoryBoard::new(Seed::demo()?);
//! let issue = board.create_issue(&CreateIssue::new("Write release notes"))?;
//! board.move_issue(&issue.id, IssueStatus::ToDo, IssueStatus::InProgress)?;
//! # Ok::<(), board_core::BoardError>(())
//! ```
//!
//! # Seed Structure
//!
//! ```text
//! [project]            # id, key, name, description, lead (user id), category, type
//! [[users]]            # id, name, email, initials?, avatar_url?
//! [[columns]]          # id, title?, status, limit?
//! [[issues]]           # key, summary, type, priority, status, reporter, ...
//! [[issues.comments]]  # author, body, created_at
//! ```

mod memory;
mod seed;


pub use memory::{Clock, MemoryBoard};
pub use seed::{Seed, SeedColumn, SeedComment, SeedFile, SeedIssue, SeedProject, SeedUser};
