//! Command-line surface of the toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "adrata-ops",
    version,
    about = "Operations toolkit for the Adrata CRM database"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage tenant workspaces
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommand,
    },

    /// Import companies or people from a CSV or JSON file
    Import {
        #[arg(value_enum)]
        entity: Entity,
        /// Workspace slug the records belong to
        #[arg(long)]
        workspace: String,
        /// Input file (.csv or .json)
        #[arg(long)]
        file: PathBuf,
        /// Fill blank columns of existing records instead of skipping them
        #[arg(long)]
        merge: bool,
        /// Also create a lead per imported person
        #[arg(long)]
        as_leads: bool,
        /// Also create a prospect per imported person
        #[arg(long)]
        as_prospects: bool,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Export companies or people of a workspace
    Export {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(long)]
        workspace: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Convert the notary directory between JSON and CSV
    Convert {
        #[arg(value_enum)]
        direction: ConvertDirection,
        input: PathBuf,
        output: PathBuf,
    },

    /// Merge duplicate companies or people by natural key
    Dedupe {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(long)]
        workspace: String,
        /// Report planned merges without writing
        #[arg(long)]
        dry_run: bool,
        /// Merge oversized duplicate groups anyway
        #[arg(long)]
        force: bool,
    },

    /// Assign buyer-group roles from job titles
    Classify {
        #[arg(long)]
        workspace: String,
        /// Restrict to one company, matched by domain or name
        #[arg(long)]
        company: Option<String>,
        /// Ask the configured LLM to second-guess low-confidence results
        #[arg(long)]
        ai: bool,
        #[arg(long)]
        dry_run: bool,
    },

    /// Enrich records from third-party data vendors
    Enrich {
        #[arg(value_enum)]
        entity: Entity,
        #[arg(long)]
        workspace: String,
        /// Cap on records sent through the vendors
        #[arg(long)]
        limit: Option<usize>,
        /// Pause between vendor calls, overriding the configured default
        #[arg(long)]
        delay_ms: Option<u64>,
        #[arg(long)]
        dry_run: bool,
    },

    /// Send workspace invitations
    Invite {
        #[arg(long)]
        workspace: String,
        /// CSV file with name,email columns; defaults to uninvited users
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommand {
    /// Create a workspace
    Create {
        slug: String,
        #[arg(long)]
        name: String,
    },
    /// List every workspace
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Companies,
    People,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConvertDirection {
    JsonToCsv,
    CsvToJson,
}
