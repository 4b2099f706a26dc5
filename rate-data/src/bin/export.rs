use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rate_data::{CalculationExporter, TransactionExporter};
use rate_db_sqlite::SqliteRepository;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dataset {
    /// Saved rate calculations
    Calculations,
    /// Income and expense transactions
    Transactions,
}

/// Export saved calculations or ledger transactions as CSV.
#[derive(Parser, Debug)]
#[command(name = "rate-export")]
#[command(version, about, long_about = None)]
struct Args {
    /// Which records to export
    #[arg(value_enum)]
    dataset: Dataset,

    /// SQLite database file, or `:memory:`
    #[arg(short, long, default_value = "freelance-rates.db")]
    database: String,

    /// Output file; CSV goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to open database: {}", args.database))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let rows = match args.dataset {
        Dataset::Calculations => CalculationExporter::export(&repo, writer)
            .await
            .context("Failed to export saved calculations")?,
        Dataset::Transactions => TransactionExporter::export(&repo, writer)
            .await
            .context("Failed to export transactions")?,
    };

    if let Some(path) = &args.output {
        eprintln!("Exported {rows} rows to {}", path.display());
    }

    Ok(())
}
