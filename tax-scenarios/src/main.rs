use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::{BusinessProfile, EntityType, FilingStatus, TaxPipeline, TaxYearConfig};
use tax_scenarios::{ReportFormat, compare, demo_profiles, load_from_file, run_batch, write_report};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Business income-tax estimator for sole proprietors and S corporations.
///
/// Calculates 2024 federal, state, local and self-employment tax for one or
/// more business scenarios and compares entity types at equal net revenue.
#[derive(Debug, Parser)]
#[command(name = "tax-scenarios", version, about)]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text, global = true)]
    format: ReportFormat,

    /// Filing status for `run` and `demo` (S, MFJ or HOH).
    /// Batch files carry their own filing status per row.
    #[arg(long, default_value = "MFJ", global = true)]
    filing_status: FilingStatus,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate a single scenario from command-line figures.
    Run(RunArgs),

    /// Calculate every scenario in a CSV file.
    Batch {
        /// Path to the scenario CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Calculate the built-in reference scenarios.
    Demo,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Entity type (sole-proprietor or s-corp)
    #[arg(long)]
    entity_type: EntityType,

    #[arg(long)]
    gross_revenue: Decimal,

    #[arg(long, default_value = "0")]
    expenses: Decimal,

    /// Owner salary (S corporations)
    #[arg(long, default_value = "0")]
    salary: Decimal,

    #[arg(long)]
    retirement_contributions: Option<Decimal>,

    #[arg(long)]
    health_insurance_premiums: Option<Decimal>,

    /// Home office deduction as a dollar amount
    #[arg(long, conflicts_with = "home_office_square_feet")]
    home_office_deduction: Option<Decimal>,

    /// Home office area for the simplified method
    #[arg(long)]
    home_office_square_feet: Option<Decimal>,

    #[arg(long)]
    other_deductions: Option<Decimal>,

    #[arg(long)]
    estimated_tax_payments: Option<Decimal>,

    /// Local tax rate override as a fraction (e.g. 0.025)
    #[arg(long)]
    local_tax_rate: Option<Decimal>,
}

impl RunArgs {
    fn into_profile(
        self,
        filing_status: FilingStatus,
    ) -> Result<BusinessProfile> {
        let mut builder = BusinessProfile::builder(self.entity_type, filing_status)
            .gross_revenue(self.gross_revenue)
            .expenses(self.expenses)
            .salary(self.salary);

        if let Some(amount) = self.retirement_contributions {
            builder = builder.retirement_contributions(amount);
        }
        if let Some(amount) = self.health_insurance_premiums {
            builder = builder.health_insurance_premiums(amount);
        }
        if let Some(amount) = self.home_office_deduction {
            builder = builder.home_office_deduction(amount);
        }
        if let Some(area) = self.home_office_square_feet {
            builder = builder.home_office_square_feet(area);
        }
        if let Some(amount) = self.other_deductions {
            builder = builder.other_deductions(amount);
        }
        if let Some(amount) = self.estimated_tax_payments {
            builder = builder.estimated_tax_payments(amount);
        }
        if let Some(rate) = self.local_tax_rate {
            builder = builder.local_tax_rate(rate);
        }

        Ok(builder.build()?)
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set, otherwise `info`.
/// * Writes to stderr so reports on stdout stay clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config =
        TaxYearConfig::tax_year_2024().context("Built-in tax year configuration is invalid")?;
    let pipeline = TaxPipeline::new(&config)?;

    let profiles = match cli.command {
        Command::Run(args) => vec![args.into_profile(cli.filing_status)?],
        Command::Batch { file } => load_from_file(&file)
            .with_context(|| format!("Failed to load scenarios from: {}", file.display()))?,
        Command::Demo => demo_profiles(cli.filing_status)?,
    };
    info!(tax_year = config.tax_year, scenarios = profiles.len(), "Loaded scenarios");

    let results = run_batch(&pipeline, &profiles).context("Scenario calculation failed")?;
    let rows = compare(results);

    write_report(cli.format, &rows, io::stdout().lock()).context("Failed to write report")?;

    Ok(())
}
