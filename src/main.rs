use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clio::topics::{self, Catalog, Topic};
use clio::{App, Config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "clio=info";

/// Text width for printed topics
const PRINT_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "clio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Topic data file to use instead of the bundled one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Topic to open on start (by id)
    #[arg(long)]
    topic: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List topic groups and their topics
    List,
    /// Print a topic
    Show {
        /// Topic id
        id: String,
    },
    /// Validate a topic data file
    Check {
        /// Path to a JSON topic data file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(command) => {
            init_stderr_logging();
            let config = Config::load()?;
            run_command(command, cli.data.as_deref().or(config.data_path.as_deref()))
        }
        None => {
            // Launch TUI
            let config = Config::load()?;
            init_file_logging()?;

            let data_path = cli.data.clone().or_else(|| config.data_path.clone());
            let catalog = load(data_path.as_deref())?;
            tracing::info!("Loaded {} topics", catalog.topic_count());

            let mut app = App::new(config, catalog, cli.topic.as_deref())?;
            app.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr for the non-interactive subcommands
fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Log to a file while the TUI owns the terminal
fn init_file_logging() -> Result<()> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn load(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => topics::load_catalog(Some(p))
            .with_context(|| format!("Failed to load topic data from {:?}", p)),
        None => topics::load_catalog(None).context("Bundled topic data is invalid"),
    }
}

fn run_command(command: Commands, data: Option<&Path>) -> Result<ExitCode> {
    match command {
        Commands::List => {
            let catalog = load(data)?;
            for group in catalog.groups() {
                println!("{}", group.title);
                for topic in &group.topics {
                    println!("  {:<24} {}", topic.id, topic.title);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { id } => {
            let catalog = load(data)?;
            match catalog.find(&id) {
                Some(topic) => {
                    print_topic(&catalog, topic);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("No topic with id '{}'", id);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Check { path } => match topics::storage::load_catalog_file(&path) {
            Ok(catalog) => {
                println!(
                    "{}: ok ({} groups, {} topics)",
                    path.display(),
                    catalog.groups().len(),
                    catalog.topic_count()
                );
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::debug!("Validation failed: {:?}", e);
                eprintln!("{}: {}", path.display(), e);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn print_topic(catalog: &Catalog, topic: &Topic) {
    println!("{}", topic.title);
    println!("{}", "=".repeat(topic.title.chars().count()));
    println!();
    println!("{}", textwrap::fill(&topic.summary, PRINT_WIDTH));
    println!();
    println!("Did you know?");
    println!("{}", textwrap::indent(&textwrap::fill(&topic.curiosity, PRINT_WIDTH - 2), "  "));

    if topic.has_timeline() {
        println!();
        println!("Timeline");
        for event in &topic.timeline {
            println!("  {}: {}", event.date, event.description);
        }
    }

    println!();
    println!("Questions: {}", topic.questions.len());

    let related: Vec<&str> = catalog.related_topics(topic).map(|t| t.title.as_str()).collect();
    if !related.is_empty() {
        println!("Related: {}", related.join(", "));
    }
}
