//! Petition command-line front end.
//!
//! Screens candidates against the recent window (`check`), files new
//! submissions (`submit`), and lists what a category has received
//! (`list`). Backed by the SQLite store and the duplicate detector.

mod cli;
mod error;
mod output;

use clap::Parser;
use cli::{CandidateArgs, Cli, CliFormat, Command, ListArgs, Profile, SubmitArgs};
use error::Result;
use petition_dedup::{DetectorConfig, DetectorError, DuplicateDetector};
use petition_domain::traits::{RecentQuery, SubmissionStore};
use petition_domain::Submission;
use petition_store::SqliteStore;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}

fn detector_config(profile: Option<Profile>) -> std::result::Result<DetectorConfig, DetectorError> {
    match profile {
        Some(Profile::Strict) => Ok(DetectorConfig::strict()),
        Some(Profile::Lenient) => Ok(DetectorConfig::lenient()),
        Some(Profile::Default) => Ok(DetectorConfig::default()),
        // Environment overrides apply only when no explicit profile is given
        None => DetectorConfig::from_env(),
    }
}

async fn run_check(
    detector: &DuplicateDetector<SqliteStore>,
    args: &CandidateArgs,
    format: CliFormat,
    no_color: bool,
) -> Result<bool> {
    let verdict = detector.check(&args.title, &args.category, &args.body).await?;
    output::print_verdict(&verdict, format, no_color)?;
    Ok(verdict.is_duplicate)
}

async fn run_submit(
    detector: &DuplicateDetector<SqliteStore>,
    args: &SubmitArgs,
    format: CliFormat,
    no_color: bool,
) -> Result<()> {
    let verdict = match detector
        .check(&args.candidate.title, &args.candidate.category, &args.candidate.body)
        .await
    {
        Ok(verdict) => {
            output::print_verdict(&verdict, format, no_color)?;
            Some(verdict)
        }
        // Screening being unavailable does not block intake; the request
        // is filed unscreened and the failure reported
        Err(e @ DetectorError::CheckFailed { .. }) => {
            tracing::warn!(error = %e, "duplicate screening unavailable, filing unscreened");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let flagged = verdict.as_ref().map(|v| v.is_duplicate).unwrap_or(false);
    if flagged && !args.force {
        println!("not stored; pass --force to file it anyway");
        std::process::exit(2);
    }

    let submission = Submission::new(
        &args.candidate.title,
        &args.candidate.category,
        &args.candidate.body,
        now(),
    );
    let id = detector.store().add_submission(submission).await?;
    println!("stored {}", id);
    Ok(())
}

async fn run_list(store: &SqliteStore, args: &ListArgs, format: CliFormat) -> Result<()> {
    let since = now().saturating_sub(args.days * 86_400);
    let mut query = RecentQuery::window(&args.category, since);
    query.excluded_statuses = Vec::new();
    query.limit = Some(args.limit);

    let submissions = store.find_recent(&query).await?;
    output::print_submissions(&submissions, format)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format.unwrap_or(CliFormat::Table);

    let store = SqliteStore::new(&cli.db)?;

    match &cli.command {
        Command::Check(args) => {
            let detector = DuplicateDetector::new(store, detector_config(cli.profile)?)?;
            let is_duplicate = run_check(&detector, args, format, cli.no_color).await?;
            if is_duplicate {
                std::process::exit(2);
            }
        }
        Command::Submit(args) => {
            let detector = DuplicateDetector::new(store, detector_config(cli.profile)?)?;
            run_submit(&detector, args, format, cli.no_color).await?;
        }
        Command::List(args) => {
            run_list(&store, args, format).await?;
        }
    }

    Ok(())
}
