mod cli;
mod config;
mod error;
mod features;
mod fetch;
mod replay;
mod report;
mod score;
mod types;

use crate::error::GpasError;
use crate::fetch::client::GitHubClient;
use crate::types::bundle::ActivityBundle;
use crate::types::report::AuthenticityReport;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_THRESHOLD: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fetch_live(username: &str) -> Result<ActivityBundle, GpasError> {
    let loaded = config::load_config(Path::new("."))?;
    let client = GitHubClient::from_settings(&loaded.github())?;
    fetch::fetch_profile_bundle(&client, username, &loaded.sampling())
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Text => report::OutputFormat::Text,
    }
}

fn threshold_exit(score: u8, fail_under: Option<u8>) -> i32 {
    match fail_under {
        Some(threshold) if score < threshold => {
            eprintln!("score {score} is below threshold {threshold}");
            exit_code::BELOW_THRESHOLD
        }
        _ => exit_code::SUCCESS,
    }
}

/// The login recorded in the bundle wins over the requested one, so a
/// replayed capture is never reported under another user's name.
fn report_user(requested: &str, bundle: &ActivityBundle) -> String {
    let recorded = bundle.profile.login.trim();
    if recorded.is_empty() {
        return requested.to_string();
    }
    if !recorded.eq_ignore_ascii_case(requested) {
        tracing::warn!(requested, recorded, "bundle belongs to a different login");
    }
    recorded.to_string()
}

fn run() -> Result<i32, GpasError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let bundle = match &cmd.bundle {
                Some(path) => {
                    tracing::info!(path = %path.display(), "replaying bundle");
                    replay::load_bundle(path)?
                }
                None => fetch_live(&cmd.username)?,
            };

            let feature_set = features::compute_features(&bundle);
            let result = score::compute_score(&feature_set);
            tracing::info!(score = result.score, fired = result.explanations.len(), "scored");

            let user = report_user(&cmd.username, &bundle);
            let authenticity = AuthenticityReport::new(Some(user), &feature_set, result)?;
            let rendered = report::render(&authenticity, output_format(&cmd.format))?;
            println!("{rendered}");

            Ok(threshold_exit(authenticity.score, cmd.fail_under))
        }
        cli::Commands::Fetch(cmd) => {
            let bundle = fetch_live(&cmd.username)?;
            replay::write_bundle(&cmd.out, &bundle)?;
            println!(
                "bundle written: {} ({} repos, {} commits)",
                cmd.out.display(),
                bundle.repos.len(),
                bundle.commit_samples.len()
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Rescore(cmd) => {
            let document = replay::load_feature_document(&cmd.features)?;
            let result = score::compute_score(&document.values);
            for explanation in score::explain_score(&result) {
                tracing::debug!(%explanation, "penalty");
            }

            let authenticity = AuthenticityReport::new(document.user, &document.raw, result)?;
            let rendered = report::render(&authenticity, output_format(&cmd.format))?;
            println!("{rendered}");

            Ok(threshold_exit(authenticity.score, cmd.fail_under))
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
