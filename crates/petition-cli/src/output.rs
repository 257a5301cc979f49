//! Output rendering for verdicts and submission listings.

use crate::cli::CliFormat;
use crate::error::Result;
use chrono::DateTime;
use colored::Colorize;
use petition_domain::{DuplicateVerdict, Submission};
use tabled::{settings::Style, Table, Tabled};

fn format_timestamp(epoch_secs: u64) -> String {
    DateTime::from_timestamp(epoch_secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_secs.to_string())
}

/// Print a duplicate verdict in the selected format.
pub fn print_verdict(verdict: &DuplicateVerdict, format: CliFormat, no_color: bool) -> Result<()> {
    match format {
        CliFormat::Json => {
            println!("{}", serde_json::to_string_pretty(verdict)?);
        }
        CliFormat::Quiet => {
            match &verdict.matched {
                Some(matched) => println!("duplicate {}", matched.id),
                None => println!("clear"),
            }
        }
        CliFormat::Table => {
            let headline = if verdict.is_duplicate {
                let text = format!("DUPLICATE (score {:.2})", verdict.highest_score);
                if no_color { text } else { text.red().bold().to_string() }
            } else {
                let text = format!("clear (closest score {:.2})", verdict.highest_score);
                if no_color { text } else { text.green().to_string() }
            };
            println!("{}", headline);

            if verdict.from_cache {
                println!("  (served from cache)");
            }
            if let Some(matched) = &verdict.matched {
                println!("  matches: {}", matched.title);
                println!("  id:      {}", matched.id);
                println!("  filed:   {}", format_timestamp(matched.created_at));
            }
            if let Some(signals) = &verdict.signals {
                println!(
                    "  signals: title {:.2}  body {:.2}  title-overlap {:.2}  body-overlap {:.2}  semantic {:.2}",
                    signals.title,
                    signals.body,
                    signals.title_overlap,
                    signals.body_overlap,
                    signals.semantic
                );
            }
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct SubmissionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Filed")]
    filed: String,
}

/// Print a submission listing in the selected format.
pub fn print_submissions(submissions: &[Submission], format: CliFormat) -> Result<()> {
    match format {
        CliFormat::Json => {
            println!("{}", serde_json::to_string_pretty(submissions)?);
        }
        CliFormat::Quiet => {
            for submission in submissions {
                println!("{}", submission.id);
            }
        }
        CliFormat::Table => {
            if submissions.is_empty() {
                println!("no submissions found");
                return Ok(());
            }
            let rows: Vec<SubmissionRow> = submissions
                .iter()
                .map(|s| SubmissionRow {
                    id: s.id.to_string(),
                    title: s.title.clone(),
                    status: s.status.to_string(),
                    filed: format_timestamp(s.created_at),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::sharp()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00");
        assert!(format_timestamp(1_700_000_000).starts_with("2023-"));
    }
}
