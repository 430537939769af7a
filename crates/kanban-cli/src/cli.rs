use clap::{Args, Parser, Subcommand};
use kanban_domain::Priority;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Command-line client for a remote kanban board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the board API (or set KANBAN_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL", env = "KANBAN_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Task operations
    Task(TaskCommand),
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List all boards
    List,
    /// Show a board with its columns and tasks
    Show {
        #[arg(long)]
        id: String,
    },
    /// Create a board with the default columns
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a board
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a board
    Delete {
        #[arg(long)]
        id: String,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a column
    Add(TaskAddArgs),
    /// Update a task's fields
    Update(TaskUpdateArgs),
    /// Move a task to another column
    Move {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        column_id: String,
        /// Zero-based position in the target column (default: end)
        #[arg(long)]
        position: Option<usize>,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        board_id: String,
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct TaskFieldArgs {
    #[arg(long)]
    pub description: Option<String>,
    /// low, medium, high, or urgent
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Completion percentage (clamped to 0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub progress: Option<i64>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub allocator: Option<String>,
    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub deadline: Option<String>,
}

#[derive(Args)]
pub struct TaskAddArgs {
    #[arg(long)]
    pub board_id: String,
    #[arg(long)]
    pub column_id: String,
    #[arg(long)]
    pub title: String,
    #[command(flatten)]
    pub fields: TaskFieldArgs,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub board_id: String,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[command(flatten)]
    pub fields: TaskFieldArgs,
    #[arg(long, conflicts_with = "deadline")]
    pub clear_deadline: bool,
}
