use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yapscan",
    version,
    about = "Heuristic YAPS content scoring and attestation statistics CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a text snippet against the YAPS heuristics
    Score(ScoreCommand),
    /// Aggregate per-field statistics over exported attestation pages
    Aggregate(AggregateCommand),
    /// Show the latest attestation for one Twitter user id
    Lookup(LookupCommand),
    /// Scan an exported schema listing for score-related candidates
    Schemas(SchemasCommand),
    /// List trending projects from a snapshot or the static catalog
    Projects(ProjectsCommand),
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Text to score; use --file to read it from disk instead
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct AggregateCommand {
    /// Exported GraphQL response file, or a directory of page files
    pub input: PathBuf,

    /// Schema UID to record in the report header
    #[arg(long)]
    pub schema: Option<String>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct LookupCommand {
    /// Exported GraphQL response file, or a directory of page files
    pub input: PathBuf,

    /// Twitter user id to look up
    #[arg(long)]
    pub user_id: String,
}

#[derive(Args)]
pub struct SchemasCommand {
    /// Exported schema listing (data.schemata response)
    pub input: PathBuf,

    /// Keywords to match against schema declarations (repeatable)
    #[arg(long)]
    pub keyword: Vec<String>,
}

#[derive(Args)]
pub struct ProjectsCommand {
    /// Saved leaderboard export; the static catalog is used when absent
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}
