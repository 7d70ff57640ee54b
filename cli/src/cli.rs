use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use youth_council_shared::{
    listing::{CategoryFilter, ReportSort},
    Category, ProjectStatus,
};

#[derive(Parser)]
#[command(name = "yc-cli", version, about = "Youth council site admin CLI")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Backend base URL (overrides YOUTH_COUNCIL_API_BASE). Resets the asset
    /// base to `<api-base>/uploads` unless --asset-base is also given.
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    /// Base URL uploaded files are served from (overrides
    /// YOUTH_COUNCIL_ASSET_BASE).
    #[arg(long, global = true)]
    pub asset_base: Option<String>,
    /// Where the session token is kept (overrides YOUTH_COUNCIL_TOKEN_FILE).
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// POST /login and store the returned token.
    Login {
        /// Admin username.
        #[arg(long)]
        username: String,
        /// Admin password (read from stdin when omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Manage council members.
    Members {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Manage projects.
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage transparency reports.
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Public landing page roster, grouped into tiers.
    Roster,
    /// Public project showcase.
    Showcase {
        /// `all` or a category label such as `health`.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Group projects under their category instead of one flat list.
        #[arg(long)]
        grouped: bool,
    },
    /// Public transparency report listing.
    Transparency {
        /// Case-insensitive title substring.
        #[arg(long, default_value = "")]
        search: String,
        /// `date` (newest first) or `title`.
        #[arg(long, default_value = "date")]
        sort: ReportSort,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// GET /members
    List,
    /// POST /members
    Add {
        #[command(flatten)]
        fields: MemberFields,
    },
    /// PUT /members/:id, keeping fields that are not given.
    Edit {
        /// Member id.
        id: i64,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// DELETE /members/:id
    Delete {
        /// Member id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct MemberFields {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,
    /// Position, e.g. "SK Chairperson".
    #[arg(long)]
    pub position: Option<String>,
    /// Committee category; pass an empty string to clear it.
    #[arg(long)]
    pub committee: Option<String>,
    /// Short biography.
    #[arg(long)]
    pub about: Option<String>,
    /// Photo file to upload.
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// GET /projects
    List {
        /// `all` or a category label.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// POST /projects
    Add {
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// PUT /projects/:id, keeping fields that are not given.
    Edit {
        /// Project id.
        id: i64,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// DELETE /projects/:id
    Delete {
        /// Project id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProjectFields {
    /// Project title.
    #[arg(long)]
    pub title: Option<String>,
    /// Project description.
    #[arg(long)]
    pub description: Option<String>,
    /// `Planned`, `Ongoing` or `Completed`.
    #[arg(long)]
    pub status: Option<ProjectStatus>,
    /// Free-form budget, e.g. "PHP 50,000".
    #[arg(long)]
    pub budget: Option<String>,
    /// Project date in `YYYY-MM-DD` format.
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,
    /// Category label such as `education`.
    #[arg(long)]
    pub category: Option<Category>,
    /// Image file to upload.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// GET /reports
    List,
    /// POST /reports (PDF, Excel or Word, at most 10MB).
    Upload {
        /// Document to upload.
        file: PathBuf,
        /// Report title (defaults to the file name without extension).
        #[arg(long)]
        title: Option<String>,
    },
    /// DELETE /reports/:id
    Delete {
        /// Report id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
