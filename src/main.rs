//! refindex: build API reference artifacts and the docs search index.
//!
//! - **reference**: merge symbol trees into one artifact per package
//!   `refindex reference -o reference_gen/gen Deno Web`
//! - **index**: scan the docs tree into Orama JSON indexes
//!   `refindex index --root . -o static`
//! - **analyze**: summarize a generated index
//!   `refindex analyze static/orama-index.json`

mod analyze;
mod config;
mod error;
mod index;
mod model;
mod reference;
mod render;
mod slug;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use config::Config;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "refindex",
    version,
    about = "Generate API reference artifacts and search indexes for a documentation site"
)]
struct Cli {
    /// Configuration file (defaults to ./refindex.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge symbol trees and write one reference artifact per package
    Reference {
        /// Output directory for <package>.json artifacts
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Only build these packages (case-insensitive)
        packages: Vec<String>,
    },

    /// Scan the docs tree and write the search index
    Index {
        /// Docs root containing the include directories
        #[arg(short = 'r', long)]
        root: Option<PathBuf>,

        /// Output directory; must already exist
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Base URL prefixed to every document URL
        #[arg(long)]
        base_url: Option<String>,

        /// Output format: full, minimal, or all (default)
        #[arg(short = 'f', long, default_value = "all")]
        format: String,
    },

    /// Print a summary of a generated full index
    Analyze {
        /// Index file (defaults to <output_dir>/orama-index.json)
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<error::Error>()
                .map(error::Error::exit_code)
                .unwrap_or(ExitCode::FAILURE)
        }
    }
}

/// Logs go to stderr. `-v` flags win over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refindex=info")),
        1 => EnvFilter::new("refindex=debug"),
        _ => EnvFilter::new("refindex=trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Reference { output, packages } => reference_mode(&config, output.clone(), packages),
        Command::Index {
            root,
            output,
            base_url,
            format,
        } => index_mode(&config, root.clone(), output.clone(), base_url.clone(), format),
        Command::Analyze { file } => {
            let path = file
                .clone()
                .unwrap_or_else(|| config.output_dir.join(render::json::FILE_NAME));
            let index = analyze::load(&path)?;
            print!("{}", analyze::summarize(&index));
            Ok(())
        }
    }
}

/// Build and write the reference artifact of every selected package.
fn reference_mode(config: &Config, output: Option<PathBuf>, filter: &[String]) -> Result<()> {
    let out_dir = output.unwrap_or_else(|| config.reference.output_dir.clone());
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let selected: Vec<_> = config
        .reference
        .packages
        .iter()
        .filter(|p| filter.is_empty() || filter.iter().any(|f| f.eq_ignore_ascii_case(&p.name)))
        .collect();
    for name in filter {
        if !config.reference.packages.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            tracing::warn!("unknown package: {}", name);
        }
    }

    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    for package in selected {
        let built = reference::build_package(package);
        if built.symbols.is_empty() {
            tracing::warn!("no symbols found for {}, skipping", package.name);
            continue;
        }
        let artifact =
            reference::artifact::ReferenceArtifact::build(&built, &config.reference.url_root, &generated_at);
        artifact.write(&out_dir)?;
    }
    Ok(())
}

/// Select, index and write. The output directory is checked first.
fn index_mode(
    config: &Config,
    root: Option<PathBuf>,
    output: Option<PathBuf>,
    base_url: Option<String>,
    format: &str,
) -> Result<()> {
    let root = root.unwrap_or_else(|| config.index.root.clone());
    let out_dir = output.unwrap_or_else(|| config.output_dir.clone());
    let base_url = base_url.unwrap_or_else(|| config.base_url.clone());

    render::ensure_output_dir(&out_dir)?;
    let outputs = render::create_outputs(format, &out_dir, &base_url)?;

    let files = index::select::FileSelector::new(&config.index).select(&root);
    tracing::info!("Selected {} files under {}", files.len(), root.display());

    let indexers = index::default_indexers(&base_url, config.index.min_content_length);
    let collection = index::build_index(&files, &indexers);

    if collection.is_empty() {
        tracing::warn!("no documents indexed under {}", root.display());
    }
    let stats = collection.stats();
    tracing::info!(
        "{} documents, {} characters, average {} chars",
        stats.total_documents,
        stats.total_characters,
        stats.average_document_length
    );
    tracing::debug!("{:?}", stats);

    for output in outputs {
        output.write(&collection)?;
    }
    Ok(())
}
