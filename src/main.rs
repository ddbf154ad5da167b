//! # MPMDB CLI (`mpmdb`)
//!
//! The `mpmdb` binary answers questions about curated medicinal plants,
//! lists and searches the underlying CSV datasets, and starts the HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! mpmdb --config ./config/mpmdb.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mpmdb ask "<question>"` | Ask the Plant Bot a question |
//! | `mpmdb datasets` | Show the load status of each CSV file |
//! | `mpmdb plants` | List the merged plant records |
//! | `mpmdb search <dataset> "<query>"` | Search one dataset's list view |
//! | `mpmdb serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Focused question, no network access
//! mpmdb ask "What do we know about neem?" --focus genomics --offline
//!
//! # Transcriptome runs mentioning a BioProject
//! mpmdb search transcriptome "PRJNA"
//!
//! # Start the API on [server].bind
//! mpmdb serve
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG`
//! (default `mpmdb=info,tower_http=info,warn`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mpmdb::app::App;
use mpmdb::catalogue::run_search;
use mpmdb::config;
use mpmdb::datasets::{list_datasets, list_plants};
use mpmdb::models::DatasetKind;
use mpmdb::server;
use mpmdb::summary::Focus;

/// MPMDB: a medicinal plant knowledge base with a question-answering bot.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing section falls back to its defaults.
#[derive(Parser)]
#[command(
    name = "mpmdb",
    about = "MPMDB: curated medicinal plant datasets and the Plant Bot",
    version,
    long_about = "MPMDB merges basic, taxonomy, genome, proteome, transcriptome and \
    phytochemical CSV tables into one record per plant, answers free-text questions \
    about them, and exposes the same data through a CLI and an HTTP API."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/mpmdb.toml`.
    #[arg(long, global = true, default_value = "./config/mpmdb.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Ask the Plant Bot a question.
    ///
    /// Prints the answer, then a `Source:` line when references or an
    /// encyclopedia URL are available.
    Ask {
        /// Free-text question, e.g. "neem proteome".
        question: String,

        /// Section to put first: genomics, proteomics, transcriptomics, taxonomy.
        #[arg(long)]
        focus: Option<String>,

        /// Never contact the external encyclopedia.
        #[arg(long)]
        offline: bool,
    },

    /// Show each dataset file with its row count and load status.
    Datasets,

    /// List the merged plant records.
    Plants,

    /// Search one dataset's list view.
    ///
    /// Dataset names: basic, classification (taxonomy), genome, proteome,
    /// transcript (transcriptome), phyto (phytochemical, metabolites).
    Search {
        /// Dataset to search.
        dataset: DatasetKind,

        /// Case-insensitive substring query.
        query: String,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mpmdb=info,tower_http=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Ask {
            question,
            focus,
            offline,
        } => {
            if offline {
                cfg.encyclopedia.enabled = false;
            }
            let focus = match focus.as_deref() {
                Some(value) if !value.trim().is_empty() => {
                    let parsed = Focus::parse(value);
                    if parsed.is_none() {
                        tracing::warn!(
                            focus = value,
                            "unknown focus ignored (expected genomics, proteomics, transcriptomics or taxonomy)"
                        );
                    }
                    parsed
                }
                _ => None,
            };

            let app = App::load(&cfg)?;
            let answer = app.bot.generate_answer(&question, focus).await;
            println!("{}", answer.answer);
            if let Some(source) = answer.source {
                println!("\nSource: {}", source);
            }
        }
        Commands::Datasets => {
            let app = App::load(&cfg)?;
            list_datasets(app.catalogue.datasets())?;
        }
        Commands::Plants => {
            let app = App::load(&cfg)?;
            list_plants(app.knowledge())?;
        }
        Commands::Search { dataset, query } => {
            let app = App::load(&cfg)?;
            run_search(&app.catalogue, dataset, &query)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
