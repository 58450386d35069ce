use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gpas",
    version,
    about = "GitHub profile authenticity scorer"
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
    /// Fetch (or replay) a user's activity and score it
    Analyze(AnalyzeCommand),
    /// Capture a user's activity bundle to a JSON file for later replay
    Fetch(FetchCommand),
    /// Score a previously emitted feature document
    Rescore(RescoreCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// GitHub username to analyze
    pub username: String,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
    /// Read the activity bundle from this file instead of the GitHub API
    #[arg(long)]
    pub bundle: Option<PathBuf>,
    /// Exit with code 1 when the score is below this value
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,
}

#[derive(Args)]
pub struct FetchCommand {
    pub username: String,
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct RescoreCommand {
    pub features: PathBuf,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}
