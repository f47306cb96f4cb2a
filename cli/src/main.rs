//! `scenario-scout`: index feature scenarios and select the ones related to a
//! change description.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use scout_retrieval::{ScenarioScout, ScoutConfig, StoreMode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "scenario-scout",
    version,
    about = "Select the feature scenarios most related to a change description"
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, embed and store every scenario of the corpus directory
    Index(IndexArgs),

    /// Score stored scenarios against a change description
    Query(QueryArgs),
}

#[derive(Args, Debug)]
struct IndexArgs {
    /// Directory of feature files
    #[arg(long, value_name = "DIR")]
    corpus: Option<PathBuf>,

    /// Embedding store to append to
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Remove the existing store before indexing
    #[arg(long)]
    replace: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct QueryArgs {
    /// Change description
    #[arg(long)]
    text: Option<String>,

    /// File holding the change description
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Embedding store to rank
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Minimum similarity for a scenario to be selected
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f32>,

    /// Show the K best scenarios instead of only the selected ones
    #[arg(long, value_name = "K")]
    top: Option<usize>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Also write every score to a CSV file
    #[arg(long, value_name = "FILE")]
    results_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    debug!("Loaded configuration: {config:?}");

    match cli.command {
        Command::Index(args) => run_index(config, args).await,
        Command::Query(args) => run_query(config, args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ScoutConfig> {
    let mut config = match path {
        Some(path) => ScoutConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ScoutConfig::default(),
    };
    config
        .apply_env(|name| std::env::var(name).ok())
        .context("invalid environment override")?;
    Ok(config)
}

async fn run_index(mut config: ScoutConfig, args: IndexArgs) -> Result<()> {
    if let Some(corpus) = args.corpus {
        config.corpus_dir = corpus;
    }
    if let Some(store) = args.store {
        config.store_path = store;
    }
    if args.replace {
        config = config.with_store_mode(StoreMode::Replace);
    }

    let scout = ScenarioScout::with_openai(config)?;
    let report = scout.index().await.context("indexing failed")?;

    println!("{}", render::index_summary(&report));
    Ok(())
}

async fn run_query(mut config: ScoutConfig, args: QueryArgs) -> Result<()> {
    if let Some(store) = args.store {
        config.store_path = store;
    }
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }

    let scout = ScenarioScout::with_openai(config)?;
    let report = match (&args.text, &args.file) {
        (Some(text), _) => scout.query(text).await,
        (None, Some(file)) => scout.query_file(file).await,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    }
    .context("query failed")?;

    if let Some(path) = &args.results_csv {
        report
            .write_csv(path)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
    }

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print!("{}", render::query_table(&report, args.top));
    }
    Ok(())
}
