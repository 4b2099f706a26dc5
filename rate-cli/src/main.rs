use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use rate_cli::config::{AppConfig, DefaultsConfig};
use rate_cli::state::AppState;
use rate_cli::utils::parse_decimal;
use rate_cli::{app, logging, render};
use rate_core::calculations::TransactionFilter;
use rate_core::market::default_trend_series;
use rate_core::{
    Currency, Industry, Location, NewTransaction, RateInputs, SkillLevel, TransactionKind,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Freelance rate calculator.
///
/// Works out hourly, daily and monthly rates from a target income, compares
/// client budgets against market bands and keeps a small income/expense
/// ledger.
#[derive(Debug, Parser)]
#[command(name = "freelance-rates", version)]
struct Cli {
    /// Settings file. Defaults to `freelance-rates.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend to use.
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Database file, or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log filter, e.g. `debug` or `rate_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate rates for one or more target incomes.
    Calculate(CalculateArgs),
    /// Compare a client's budget against typical rates.
    Compare(CompareArgs),
    /// Show market rates and trends.
    Market(MarketArgs),
    /// Record and review income and expenses.
    #[command(subcommand)]
    Ledger(LedgerCommand),
    /// Manage saved calculations.
    #[command(subcommand)]
    Saved(SavedCommand),
    /// List skill levels, industries, locations and currencies.
    Tables,
    /// Ways to raise your rates.
    Tips,
}

#[derive(Debug, Args)]
struct CalculateArgs {
    #[arg(long)]
    skill_level: Option<SkillLevel>,

    #[arg(long)]
    industry: Option<Industry>,

    #[arg(long)]
    location: Option<Location>,

    /// Years of experience.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    experience: Decimal,

    /// Desired annual income. Repeat to compare several targets.
    #[arg(long = "income", value_parser = parse_decimal)]
    incomes: Vec<Decimal>,

    /// Annual business costs.
    #[arg(long, value_parser = parse_decimal)]
    costs: Option<Decimal>,

    /// Tax rate in percent.
    #[arg(long, value_parser = parse_decimal)]
    tax_rate: Option<Decimal>,

    /// Non-billable hours per week.
    #[arg(long, value_parser = parse_decimal)]
    non_billable: Option<Decimal>,

    #[arg(long)]
    currency: Option<Currency>,

    /// A specialised skill. Repeat for several.
    #[arg(long = "skill")]
    skills: Vec<String>,

    /// Store each result with the saved calculations.
    #[arg(long)]
    save: bool,
}

impl CalculateArgs {
    fn inputs(
        &self,
        income: Option<Decimal>,
        defaults: &DefaultsConfig,
    ) -> RateInputs {
        RateInputs {
            skill_level: self.skill_level,
            industry: self.industry,
            location: self.location.or(defaults.location),
            experience_years: self.experience,
            desired_annual_income: income,
            annual_business_costs: self.costs.unwrap_or(defaults.annual_business_costs),
            tax_rate_percent: self.tax_rate.unwrap_or(defaults.tax_rate_percent),
            non_billable_hours_per_week: self
                .non_billable
                .unwrap_or(defaults.non_billable_hours_per_week),
            currency: self.currency.unwrap_or(defaults.currency),
            selected_skills: self.skills.iter().cloned().collect::<BTreeSet<_>>(),
        }
    }
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// The client's total budget.
    #[arg(long, value_parser = parse_decimal)]
    budget: Decimal,

    /// Estimated project hours.
    #[arg(long, value_parser = parse_decimal)]
    hours: Decimal,

    #[arg(long)]
    currency: Option<Currency>,
}

#[derive(Debug, Args)]
struct MarketArgs {
    /// Region to ask about.
    #[arg(long)]
    region: Option<String>,

    /// Captured market service response to read instead of the configured one.
    #[arg(long)]
    response_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum LedgerCommand {
    /// Record a transaction.
    Add {
        #[arg(long = "type")]
        kind: TransactionKind,

        #[arg(long, value_parser = parse_decimal)]
        amount: Decimal,

        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions, optionally filtered.
    List {
        #[arg(long = "type")]
        kind: Option<TransactionKind>,

        #[arg(long)]
        category: Option<String>,

        /// First date to include.
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date to include.
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show income, expense and net totals.
    Summary {
        #[arg(long)]
        currency: Option<Currency>,
    },
    /// Delete a transaction by id.
    Remove { id: i64 },
}

#[derive(Debug, Subcommand)]
enum SavedCommand {
    List,
    /// Delete the calculation at INDEX, as shown by `saved list`.
    Delete { index: usize },
    Clear,
}

impl Cli {
    fn apply_overrides(
        &self,
        config: &mut AppConfig,
    ) {
        if let Some(backend) = &self.backend {
            config.database.backend = backend.clone();
        }
        if let Some(db) = &self.db {
            config.database.path = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Command::Market(MarketArgs {
            response_file: Some(path),
            ..
        }) = &self.command
        {
            config.market.response_file = Some(path.clone());
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn calculate(
    state: &mut AppState,
    args: &CalculateArgs,
    defaults: &DefaultsConfig,
) -> Result<()> {
    let incomes: Vec<Option<Decimal>> = if args.incomes.is_empty() {
        vec![None]
    } else {
        args.incomes.iter().copied().map(Some).collect()
    };

    for income in incomes {
        let calculation = state.calculate(args.inputs(income, defaults), Utc::now())?;
        print!("{}", render::calculation(&calculation));
        if args.save {
            state.save_last(Utc::now()).await?;
            println!("Saved.");
        }
        println!();
    }

    print!("{}", render::history(state.history()));
    Ok(())
}

async fn ledger(
    state: &AppState,
    command: LedgerCommand,
    defaults: &DefaultsConfig,
) -> Result<()> {
    match command {
        LedgerCommand::Add {
            kind,
            amount,
            date,
            category,
            description,
        } => {
            let stored = state
                .add_transaction(NewTransaction {
                    kind,
                    amount,
                    date: date.unwrap_or_else(|| Local::now().date_naive()),
                    category,
                    description,
                })
                .await?;
            println!("Recorded {} #{}.", stored.kind, stored.id);
        }
        LedgerCommand::List {
            kind,
            category,
            from,
            to,
        } => {
            let filter = TransactionFilter {
                kind,
                category,
                from,
                to,
            };
            print!("{}", render::transactions(&state.transactions(&filter).await?));
        }
        LedgerCommand::Summary { currency } => {
            let summary = state.ledger_summary().await?;
            print!(
                "{}",
                render::summary(&summary, currency.unwrap_or(defaults.currency))
            );
        }
        LedgerCommand::Remove { id } => {
            state
                .repo()
                .delete_transaction(id)
                .await
                .with_context(|| format!("cannot remove transaction #{id}"))?;
            println!("Removed transaction #{id}.");
        }
    }
    Ok(())
}

async fn saved(
    state: &AppState,
    command: SavedCommand,
) -> Result<()> {
    let repo = state.repo();
    match command {
        SavedCommand::List => {
            print!("{}", render::saved(&repo.list_saved_calculations().await?));
        }
        SavedCommand::Delete { index } => {
            repo.delete_saved_calculation(index)
                .await
                .with_context(|| format!("cannot delete saved calculation [{index}]"))?;
            println!("Deleted saved calculation [{index}].");
        }
        SavedCommand::Clear => {
            repo.clear_saved_calculations().await?;
            println!("Cleared saved calculations.");
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    logging::init_logging(&config.logging.level, config.logging.file.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Tables => {
            print!("{}", render::tables());
            return Ok(());
        }
        Command::Tips => {
            print!("{}", render::tips());
            return Ok(());
        }
        _ => {}
    }

    let mut state = app::open_state(&config).await?;

    match cli.command {
        Command::Calculate(args) => calculate(&mut state, &args, &config.defaults).await?,
        Command::Compare(args) => {
            let comparison = state.compare_budget(
                args.budget,
                args.hours,
                args.currency.unwrap_or(config.defaults.currency),
            )?;
            print!("{}", render::comparison(&comparison));
        }
        Command::Market(args) => {
            let region = args.region.unwrap_or_else(|| config.market.region.clone());
            let report = state.market_report(&region).await;
            print!("{}", render::market(&report, &default_trend_series()));
        }
        Command::Ledger(command) => ledger(&state, command, &config.defaults).await?,
        Command::Saved(command) => saved(&state, command).await?,
        Command::Tables | Command::Tips => {}
    }

    Ok(())
}
