use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use twap_book::simulate::{self, RandomConfig};

/// Write a synthetic order event log.
#[derive(Parser)]
#[command(name = "twapgen", version, about = "Generate synthetic order event logs")]
struct Cli {
    /// Number of operations (the ramp adds one, the random mix a drain)
    #[arg(long, default_value_t = 10_000)]
    ops: u64,

    /// Workload shape to write
    #[arg(long, value_enum, default_value = "ramp")]
    mode: Mode,

    /// Seed for the random workload
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output file
    #[arg(long, default_value = "big_data.txt")]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Ascending inserts, then cancels in reverse id order
    Ramp,
    /// Seeded mix of inserts and cancels with a drifting mid price
    Random,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = File::create(&cli.out)
        .with_context(|| format!("failed to create {}", cli.out.display()))?;
    let mut out = BufWriter::new(file);

    let records = match cli.mode {
        Mode::Ramp => simulate::write_ramp(&mut out, cli.ops)?,
        Mode::Random => simulate::write_random(
            &mut out,
            &RandomConfig {
                ops: cli.ops,
                seed: cli.seed,
                ..RandomConfig::default()
            },
        )?,
    };
    out.flush()?;

    info!("wrote {} records to {}", records, cli.out.display());
    Ok(())
}
