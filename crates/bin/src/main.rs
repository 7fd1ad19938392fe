//! Darwin CLI binary.
//!
//! Builds the cross-sectional factor panel from Tushare Pro and writes it as CSV.

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use darwin::pipeline::{DEFAULT_CONCURRENCY, build_panel};
use darwin::{ListedUniverse, PipelineConfig, Universe};
use darwin_data::{TushareClient, TushareConfig};
use darwin_factors::{
    FactorCalculator, FactorCategory, FactorInfo, available_factors, factors_by_category,
    get_factor_info,
};
use darwin_output::{FactorTableExporter, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "darwin")]
#[command(about = "Darwin: cross-sectional factor panel for China A-shares", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TushareArgs {
    /// Tushare Pro API token
    #[arg(long, env = "TUSHARE_TOKEN", hide_env_values = true)]
    token: String,

    /// Tushare Pro endpoint
    #[arg(long, default_value = darwin_data::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Minimum delay between requests, in milliseconds
    #[arg(long, default_value = "0")]
    min_interval_ms: u64,
}

impl TushareArgs {
    fn client(&self) -> Result<TushareClient, darwin_data::DataError> {
        let config = TushareConfig::new(self.token.as_str())
            .with_base_url(self.base_url.as_str())
            .with_min_request_interval(Duration::from_millis(self.min_interval_ms));
        TushareClient::new(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the factor panel and export it
    Run {
        #[command(flatten)]
        tushare: TushareArgs,

        /// Directory for the exported CSV files
        #[arg(long, default_value = "factor_data")]
        output_dir: PathBuf,

        /// Securities computed concurrently
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Per-security time limit in seconds (0 disables it)
        #[arg(long, default_value = "60")]
        timeout_secs: u64,

        /// Only process the first N listed securities
        #[arg(long)]
        limit: Option<usize>,

        /// Process these codes instead of the listed universe
        #[arg(long, value_delimiter = ',')]
        codes: Vec<String>,

        /// Write files without a UTF-8 byte-order mark
        #[arg(long)]
        no_bom: bool,
    },

    /// List the exported factor columns
    Factors {
        /// Show a single column (e.g. amihud)
        name: Option<String>,

        /// Only show one category (e.g. value, liquidity)
        #[arg(long, conflicts_with = "name")]
        category: Option<FactorCategory>,
    },

    /// Print the listed universe
    Universe {
        #[command(flatten)]
        tushare: TushareArgs,

        /// Only print the first N codes
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            tushare,
            output_dir,
            concurrency,
            timeout_secs,
            limit,
            codes,
            no_bom,
        } => {
            let config = PipelineConfig::default()
                .with_concurrency(concurrency)
                .with_invocation_timeout(
                    (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
                );
            let exporter = FactorTableExporter::new(output_dir).with_byte_order_mark(!no_bom);
            run_panel(&tushare, codes, limit, &config, &exporter).await?;
        }
        Commands::Factors { name, category } => {
            let factors = match (name, category) {
                (Some(name), _) => {
                    let info = get_factor_info(&name)
                        .ok_or_else(|| format!("unknown factor '{}'", name))?;
                    vec![info]
                }
                (None, Some(category)) => factors_by_category(category),
                (None, None) => available_factors(),
            };
            list_factors(&factors);
        }
        Commands::Universe { tushare, limit } => {
            let client = tushare.client()?;
            let universe = limited(ListedUniverse::fetch(&client).await?, limit);
            for code in universe.codes() {
                println!("{}", code);
            }
            info!(size = universe.size(), "listed universe");
        }
    }

    Ok(())
}

fn limited(universe: ListedUniverse, limit: Option<usize>) -> ListedUniverse {
    match limit {
        Some(n) => universe.take(n),
        None => universe,
    }
}

async fn run_panel(
    tushare: &TushareArgs,
    codes: Vec<String>,
    limit: Option<usize>,
    config: &PipelineConfig,
    exporter: &FactorTableExporter,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = tushare.client()?;
    let universe = if codes.is_empty() {
        ListedUniverse::fetch(&client).await?
    } else {
        ListedUniverse::from_codes(codes)
    };
    let universe = limited(universe, limit);

    info!(
        securities = universe.size(),
        concurrency = config.concurrency,
        "starting factor run"
    );

    let pb = ProgressBar::new(universe.size() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Computing factors...");

    let calculator = FactorCalculator::new(client);
    let run = build_panel(&calculator, universe.codes(), config, exporter, Some(&pb)).await?;
    pb.finish_with_message(format!("Computed {} records", run.table.len()));

    let summary = RunSummary::new(
        Local::now().date_naive(),
        universe.size(),
        &run.table,
        &run.stats.failures,
    );
    println!();
    print!("{}", summary.to_ascii_table());
    println!();
    println!("Files written to {}", exporter.output_dir().display());

    Ok(())
}

fn list_factors(factors: &[FactorInfo]) {
    println!("{:<20} {:<11} {:<52} Inputs", "Column", "Category", "Description");
    println!("{}", "─".repeat(120));
    for info in factors {
        println!(
            "{:<20} {:<11} {:<52} {}",
            info.name(),
            info.category,
            info.description,
            info.inputs.join(", ")
        );
    }
}
