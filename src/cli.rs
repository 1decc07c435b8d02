use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::feed::replay_path;

/// Replay an order event log and report the time-weighted average of the
/// highest standing price.
#[derive(Parser)]
#[command(
    name = "twap",
    version,
    about = "Report the time weighted average of the highest standing price in an order event log"
)]
pub struct Cli {
    /// Path to the event log file
    pub log: PathBuf,

    /// Print the full replay summary as JSON instead of the one-line report
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the `twap` binary.
///
/// # Behavior
/// - A wrong argument count (nothing, or extra positionals) prints the usage
///   text and exits 0, as do `--help` and `--version`.
/// - Replay failures (unreadable file, malformed record, cancel of an
///   unknown id) abort with a diagnostic naming the offending line and a
///   nonzero exit.
/// - A NaN result is reported as a value; an empty or zero-exposure log is
///   not an error.
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(usage) => {
            usage.print()?;
            return Ok(());
        }
    };

    let summary = replay_path(&cli.log)
        .with_context(|| format!("failed to replay {}", cli.log.display()))?;
    info!(
        "replayed {} events from {}, {} still standing",
        summary.events,
        cli.log.display(),
        summary.open_orders
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.report());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_log_path_positionally() {
        let cli = Cli::try_parse_from(["twap", "events.txt"]).unwrap();
        assert_eq!(cli.log, PathBuf::from("events.txt"));
        assert!(!cli.json);
    }

    #[test]
    fn accepts_the_json_flag() {
        let cli = Cli::try_parse_from(["twap", "--json", "events.txt"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.log, PathBuf::from("events.txt"));
    }

    #[test]
    fn rejects_wrong_argument_counts() {
        assert!(Cli::try_parse_from(["twap"]).is_err());
        assert!(Cli::try_parse_from(["twap", "a.txt", "b.txt"]).is_err());
    }
}
