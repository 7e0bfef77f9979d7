use clap::{Parser, Subcommand, ValueEnum};

use todoit::ItemStatus;

/// Parses `key=value` pairs used for item bodies, tag assignments, and
/// completion states.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected 'key=value', got '{s}'")),
    }
}

fn parse_bool_value(s: &str) -> Result<(String, bool), String> {
    let (key, value) = parse_key_value(s)?;
    let parsed = match value.as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        other => return Err(format!("expected true/false for '{key}', got '{other}'")),
    };
    Ok((key, parsed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl From<StatusArg> for ItemStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => ItemStatus::Pending,
            StatusArg::InProgress => ItemStatus::InProgress,
            StatusArg::Completed => ItemStatus::Completed,
            StatusArg::Failed => ItemStatus::Failed,
        }
    }
}

/// Embedded task-management engine, exposed as a thin command surface.
#[derive(Parser, Debug)]
#[command(name = "todoit", version, about = "Hierarchical todo lists with dependencies, tags and history")]
pub struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List management
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Item management
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Item dependency management
    Dep {
        #[command(subcommand)]
        command: DepCommands,
    },
    /// Tag management
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// History inspection
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Summary statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Create a new list
    Create {
        key: String,
        title: String,
        /// Initial root items as key=content pairs
        #[arg(long = "item", value_parser = parse_key_value)]
        items: Vec<(String, String)>,
        /// Tags to assign at creation
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show a single list
    Show { key: String },
    /// List all lists
    All {
        /// Restrict to lists carrying any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        include_archived: bool,
    },
    /// Rename a list
    Rename { key: String, new_title: String },
    /// Archive a list
    Archive {
        key: String,
        /// Archive even if items remain incomplete
        #[arg(long)]
        force: bool,
    },
    /// Reactivate an archived list
    Unarchive { key: String },
    /// Delete a list and everything under it
    Delete {
        key: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Get or set a list-scoped property
    Property {
        #[command(subcommand)]
        command: ListPropertyCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListPropertyCommands {
    Get { list: String, key: String },
    Set { list: String, key: String, value: String },
    Delete { list: String, key: String },
    All { list: String },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Add a root item
    Add {
        list: String,
        key: String,
        content: String,
        #[arg(long)]
        position: Option<i32>,
    },
    /// Add a subitem under an existing item
    AddSub {
        list: String,
        parent_key: String,
        key: String,
        content: String,
        #[arg(long)]
        position: Option<i32>,
    },
    /// Show a single item
    Show {
        list: String,
        key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// List an item's direct subitems
    Subitems { list: String, parent_key: String },
    /// Show an item and its whole subtree
    Hierarchy { list: String, root_key: String },
    /// List items in hierarchical order
    List {
        list: String,
        #[arg(long)]
        status: Option<StatusArg>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Update an item's status (leaf items only)
    Status {
        list: String,
        key: String,
        status: StatusArg,
        #[arg(long)]
        parent: Option<String>,
        /// Completion-state entries as key=true/false
        #[arg(long = "state", value_parser = parse_bool_value)]
        states: Vec<(String, bool)>,
    },
    /// Update an item's content
    Content {
        list: String,
        key: String,
        content: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename an item's key
    Rename {
        list: String,
        key: String,
        new_key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Clear an item's completion states without touching its status
    ClearStates {
        list: String,
        key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Move a root item under another item
    Move { list: String, key: String, new_parent_key: String },
    /// Delete an item and its subtree
    Delete {
        list: String,
        key: String,
        #[arg(long)]
        parent: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// The next actionable root item, ignoring hierarchy
    Next { list: String },
    /// The next actionable item, hierarchy- and dependency-aware
    NextSmart { list: String },
    /// Get or set an item-scoped property
    Property {
        #[command(subcommand)]
        command: ItemPropertyCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemPropertyCommands {
    Get {
        list: String,
        key: String,
        prop_key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    Set {
        list: String,
        key: String,
        prop_key: String,
        value: String,
        #[arg(long)]
        parent: Option<String>,
    },
    Delete {
        list: String,
        key: String,
        prop_key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    All {
        list: String,
        key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Every item's properties in one pass, hierarchical order
    AllItems {
        list: String,
        #[arg(long)]
        status: Option<StatusArg>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DepCommands {
    /// Make one item require another
    Add {
        dep_list: String,
        dep_key: String,
        req_list: String,
        req_key: String,
    },
    /// Remove a dependency edge
    Remove {
        dep_list: String,
        dep_key: String,
        req_list: String,
        req_key: String,
    },
    /// Show what blocks an item and what it blocks
    Show { list: String, key: String },
    /// All dependency edges touching a list
    Graph { list: String },
    /// Whether an item can currently be started
    CanStart { list: String, key: String },
    /// Whether an item can currently be completed
    CanComplete { list: String, key: String },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Create a tag
    Create {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Assign a tag to a list
    Add { list: String, name: String },
    /// Unassign a tag from a list
    Remove { list: String, name: String },
    /// All tags assigned to a list
    ForList { list: String },
    /// Every known tag
    All,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// History of a single item
    Item {
        list: String,
        key: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// History of a list
    List { list: String },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Item counts by status for a list
    Progress { list: String },
    /// The next actionable item for a list
    Next { list: String },
}
