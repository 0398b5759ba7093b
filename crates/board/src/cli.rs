use board_core::{IssueStatus, IssueType, Priority};
use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "board", version, about = "Kanban board for tracking issues")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "BOARD_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed dataset to start the board from (overrides config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Act as this user (ID, name or email) when reporting issues and commenting
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// Log store operations to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Board(BoardCommands),
    /// Run board commands read from stdin against a single board
    ///
    /// Each line is one command as it would be typed after 'board', e.g.
    /// `issue move PROJ-3 --to done`. Changes are visible to later lines and
    /// discarded when the session ends. Blank lines and lines starting with
    /// '#' are skipped; 'exit' or 'quit' ends the session.
    Session,
    /// One-time onboarding flag
    Onboarding {
        #[command(subcommand)]
        action: OnboardingCommands,
    },
    /// Configuration inspection
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Commands that read or change the board
#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// Show the board, optionally filtered
    #[command(visible_alias = "ls")]
    Show(ShowArgs),
    /// Issue operations
    #[command(visible_alias = "i")]
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// Show the project and its users
    #[command(visible_alias = "p")]
    Project,
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "board", &mut std::io::stdout());
    }
}

/// One line of a session
#[derive(Parser, Debug)]
#[command(name = "board", no_binary_name = true, disable_version_flag = true)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub command: BoardCommands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    /// Free-text search over key, summary, description, people and labels
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only issues with this status (can be repeated)
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<IssueStatus>,

    /// Only issues carrying this label (can be repeated; any match counts)
    #[arg(long = "label", short = 'l', value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Only issues assigned to this user ID, name or email (can be repeated)
    #[arg(long = "assignee", value_name = "USER")]
    pub assignees: Vec<String>,

    /// Include unassigned issues (alone: only unassigned issues)
    #[arg(long)]
    pub unassigned: bool,

    /// Only issues of this type (can be repeated)
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_types: Vec<IssueType>,

    /// Only issues with this priority (can be repeated)
    #[arg(long = "priority", value_name = "PRIORITY")]
    pub priorities: Vec<Priority>,

    /// Only issues reported by this user ID, name or email (can be repeated)
    #[arg(long = "reporter", value_name = "USER")]
    pub reporters: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Get issue by ID or key
    #[command(visible_alias = "g")]
    Get {
        /// Issue ID or key (e.g., PROJ-3)
        id: String,
    },
    /// Create new issue
    #[command(visible_alias = "new", visible_alias = "c")]
    Create {
        /// Issue summary
        #[arg(
            long,
            short = 's',
            required_unless_present = "json",
            conflicts_with = "json"
        )]
        summary: Option<String>,
        /// Issue description
        #[arg(long, short = 'd', conflicts_with = "json")]
        description: Option<String>,
        /// Issue type: story, bug, task, epic (default: task)
        #[arg(long = "type", short = 't', conflicts_with = "json")]
        issue_type: Option<IssueType>,
        /// Priority: highest, high, medium, low, lowest (default: medium)
        #[arg(long, short = 'p', conflicts_with = "json")]
        priority: Option<Priority>,
        /// Assignee user ID, name or email
        #[arg(long, short = 'a', conflicts_with = "json")]
        assignee: Option<String>,
        /// Story points
        #[arg(long, conflicts_with = "json")]
        points: Option<u32>,
        /// Label (can be repeated)
        #[arg(long = "label", short = 'l', conflicts_with = "json")]
        labels: Vec<String>,
        /// Column ID to create the issue in (default: first column)
        #[arg(long, conflicts_with = "json")]
        column: Option<String>,
        /// JSON payload for issue creation
        #[arg(long, value_name = "JSON")]
        json: Option<String>,
    },
    /// Move an issue to another column
    #[command(visible_alias = "mv")]
    Move {
        /// Issue ID or key
        id: String,
        /// Destination status
        #[arg(long, value_name = "STATUS")]
        to: IssueStatus,
        /// Column the issue is expected in (default: its current status)
        #[arg(long, value_name = "STATUS")]
        from: Option<IssueStatus>,
    },
    /// Update fields of an issue
    #[command(visible_alias = "u", group(
        ArgGroup::new("update_fields")
            .args(["summary", "description", "issue_type", "priority", "status", "assignee", "unassign", "points", "clear_points", "labels", "clear_labels", "json"])
            .required(true)
            .multiple(true)
    ))]
    Update {
        /// Issue ID or key
        id: String,
        /// New summary
        #[arg(long, short = 's')]
        summary: Option<String>,
        /// New description
        #[arg(long, short = 'd')]
        description: Option<String>,
        /// New issue type
        #[arg(long = "type", short = 't')]
        issue_type: Option<IssueType>,
        /// New priority
        #[arg(long, short = 'p')]
        priority: Option<Priority>,
        /// New status (moves the issue to that column)
        #[arg(long)]
        status: Option<IssueStatus>,
        /// New assignee user ID, name or email
        #[arg(long, short = 'a', conflicts_with = "unassign")]
        assignee: Option<String>,
        /// Remove the assignee
        #[arg(long)]
        unassign: bool,
        /// New story points
        #[arg(long, conflicts_with = "clear_points")]
        points: Option<u32>,
        /// Remove story points
        #[arg(long)]
        clear_points: bool,
        /// Replace labels (can be repeated)
        #[arg(long = "label", short = 'l', conflicts_with = "clear_labels")]
        labels: Vec<String>,
        /// Remove all labels
        #[arg(long)]
        clear_labels: bool,
        /// JSON payload for issue update
        #[arg(long, conflicts_with_all = ["summary", "description", "issue_type", "priority", "status", "assignee", "unassign", "points", "clear_points", "labels", "clear_labels"], value_name = "JSON")]
        json: Option<String>,
    },
    /// Add a comment to an issue
    Comment {
        /// Issue ID or key
        id: String,
        /// Comment text
        text: String,
    },
    /// Search issues across all columns
    #[command(visible_alias = "s", visible_alias = "find")]
    Search {
        /// Search text (empty matches everything)
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum OnboardingCommands {
    /// Show whether onboarding has been seen
    Status,
    /// Mark onboarding as seen
    Complete,
    /// Forget that onboarding was seen
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// List config file locations in load order
    Path,
}
