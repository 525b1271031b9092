use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "projdesk", about = "Projects, modules and phases from the terminal", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the dashboard summary
    Dashboard,
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsAction),
    /// Manage the modules of a project
    #[command(subcommand)]
    Modules(ModulesAction),
    /// Manage phases
    #[command(subcommand)]
    Phases(PhasesAction),
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum ProjectsAction {
    /// List projects, one page at a time on narrow viewports
    List(ListArgs),
    /// Show a project with its modules
    Show { id: i64 },
    /// Create a project
    Create(ProjectFields),
    /// Replace a project's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProjectEdit,
    },
    /// Delete a project
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Viewport width (default: PROJDESK_VIEWPORT_WIDTH)
    #[arg(long)]
    pub width: Option<u32>,
    /// Page to show in paged mode
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
    /// Status label (default: Pendiente)
    #[arg(long)]
    pub status: Option<String>,
}

/// Fields left out keep their current value.
#[derive(Debug, Args)]
pub struct ProjectEdit {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum ModulesAction {
    /// Create a module in a project
    Create {
        project_id: i64,
        #[command(flatten)]
        fields: ModuleFields,
    },
    /// Replace a module's fields
    Update {
        project_id: i64,
        module_id: i64,
        #[command(flatten)]
        fields: ModuleEdit,
    },
    /// Delete a module
    Delete {
        project_id: i64,
        module_id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ModuleFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
    /// Phase id (default: the lowest-id phase)
    #[arg(long)]
    pub phase: Option<i64>,
    /// Status label (default: Pendiente)
    #[arg(long)]
    pub status: Option<String>,
}

/// Fields left out keep their current value.
#[derive(Debug, Args)]
pub struct ModuleEdit {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub phase: Option<i64>,
    #[arg(long)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum PhasesAction {
    /// List phases
    List,
    /// Create a phase
    Create {
        #[arg(long)]
        name: String,
        /// Hex color (default: #000000)
        #[arg(long)]
        color: Option<String>,
    },
    /// Change a phase's color
    Color { id: i64, color: String },
}
