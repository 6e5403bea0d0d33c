mod catalog;
mod discover;
mod rank;
mod score;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use deskrank_core::{AppConfig, Tuning};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "deskrank-cli")]
#[command(about = "deskrank scoring and discovery tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the popularity score for one product
    Score {
        /// Posts referencing the product
        #[arg(long, default_value_t = 0)]
        mentions: u64,
        /// Weighted reactions to those posts
        #[arg(long, default_value_t = 0)]
        mention_engagement: u64,
        /// Total video views
        #[arg(long, default_value_t = 0)]
        views: u64,
        /// Weighted reactions to those videos
        #[arg(long, default_value_t = 0)]
        view_engagement: u64,
        /// Rebuild factors from a stored per-source score instead of raw counts
        #[arg(long, requires = "view_source", conflicts_with_all = ["mentions", "mention_engagement", "views", "view_engagement"])]
        mention_source: Option<u8>,
        /// Stored video-source score, paired with `--mention-source`
        #[arg(long, requires = "mention_source")]
        view_source: Option<u8>,
    },
    /// Merge source observations into new product candidates
    Discover {
        /// JSON array of observations from the source adapters
        #[arg(long)]
        observations: PathBuf,
        /// Catalog JSON whose products are excluded (defaults to `DESKRANK_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// JSON object of product key -> fetched product info; enables admission
        #[arg(long)]
        products: Option<PathBuf>,
        /// Override the configured admission limit
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the catalog ranking
    Rank {
        /// Catalog JSON (defaults to `DESKRANK_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Restrict the ranking to one top-level category
        #[arg(long)]
        category: Option<String>,
        /// JSON object of item id -> collected summaries; rescore before ranking
        #[arg(long)]
        collected: Option<PathBuf>,
        /// Write rescored items and ranks back to the catalog file
        #[arg(long)]
        write: bool,
    },
    /// Validate a tuning file and print a summary
    CheckTuning {
        /// Path to the YAML tuning file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let config = deskrank_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "deskrank-cli starting");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Score {
            mentions,
            mention_engagement,
            views,
            view_engagement,
            mention_source,
            view_source,
        }) => {
            let tuning = load_tuning(&config)?;
            let input = match (mention_source, view_source) {
                (Some(mention_source), Some(view_source)) => score::ScoreInput::Composite {
                    mention_source,
                    view_source,
                },
                _ => score::ScoreInput::Raw(deskrank_core::EngagementFactors {
                    mention_count: mentions,
                    mention_engagement,
                    view_magnitude: views,
                    view_engagement,
                }),
            };
            score::run_score(&tuning, input)?;
        }
        Some(Commands::Discover {
            observations,
            catalog,
            products,
            limit,
        }) => {
            let tuning = load_tuning(&config)?;
            let catalog = catalog.unwrap_or_else(|| config.catalog_path.clone());
            discover::run_discover(
                tuning,
                &observations,
                &catalog,
                products.as_deref(),
                limit,
            )?;
        }
        Some(Commands::Rank {
            catalog,
            category,
            collected,
            write,
        }) => {
            let tuning = load_tuning(&config)?;
            let catalog = catalog.unwrap_or_else(|| config.catalog_path.clone());
            rank::run_rank(
                &tuning,
                &catalog,
                category.as_deref(),
                collected.as_deref(),
                write,
            )?;
        }
        Some(Commands::CheckTuning { path }) => run_check_tuning(&path)?,
        None => println!("deskrank-cli: no command given; see --help"),
    }

    Ok(())
}

/// Loads the tuning file named by `DESKRANK_TUNING_PATH`, or the built-in
/// defaults when it is unset.
fn load_tuning(config: &AppConfig) -> anyhow::Result<Tuning> {
    match &config.tuning_path {
        Some(path) => {
            let tuning = deskrank_core::load_tuning(path)
                .with_context(|| format!("failed to load tuning file {}", path.display()))?;
            tracing::info!(path = %path.display(), "tuning loaded");
            Ok(tuning)
        }
        None => {
            tracing::debug!("DESKRANK_TUNING_PATH not set; using built-in tuning defaults");
            Ok(Tuning::default())
        }
    }
}

fn run_check_tuning(path: &std::path::Path) -> anyhow::Result<()> {
    let tuning = deskrank_core::load_tuning(path)
        .with_context(|| format!("tuning file {} is invalid", path.display()))?;

    let weights = &tuning.scoring.weights;
    println!("ok: {}", path.display());
    println!(
        "  weights: mention_count={} mention_engagement={} view_magnitude={} view_engagement={}",
        weights.mention_count,
        weights.mention_engagement,
        weights.view_magnitude,
        weights.view_engagement
    );
    println!("  rounding: {:?}", tuning.scoring.rounding);
    println!(
        "  categories: {} rules ({:?})",
        tuning.discovery.categories.len(),
        tuning.discovery.match_policy
    );
    let seeded: Vec<&str> = tuning
        .discovery
        .seed_formulas
        .keys()
        .map(|source| source.as_str())
        .collect();
    println!("  seed formulas: {}", seeded.join(", "));
    println!("  admission limit: {}", tuning.discovery.admission_limit);

    Ok(())
}
