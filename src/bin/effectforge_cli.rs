//! EffectForge CLI
//!
//! Commands: convert (default), classify, stats
//! Progress goes to the log; summaries and JSON go to stdout.
//! Returns non-zero only when the run itself cannot proceed.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

use effectforge_core::{
    classify, ConversionPipeline, ConversionReport, ConvertConfig, PipelineError, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "effectforge-cli")]
#[command(about = "EffectForge CLI - Effect Catalog Compiler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every effect directory and write the index
    Convert {
        /// JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding one folder per effect
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output directory for generated modules
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a single name/description pair
    Classify {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Classify every effect without writing, print catalog statistics
    Stats {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

fn load_config(
    path: Option<PathBuf>,
    source: Option<PathBuf>,
    target: Option<PathBuf>,
) -> Result<ConvertConfig, PipelineError> {
    let mut config = match path {
        Some(p) => ConvertConfig::load_from_file(&p)
            .map_err(|e| PipelineError::Config(format!("{}: {}", p.display(), e)))?,
        None => ConvertConfig::default(),
    };
    if let Some(s) = source {
        config.source_dir = s;
    }
    if let Some(t) = target {
        config.target_dir = t;
    }
    Ok(config)
}

fn print_summary(report: &ConversionReport) {
    println!();
    println!("Conversion complete!");
    println!("{} effects converted", report.converted);
    if report.skipped > 0 {
        println!("{} skipped", report.skipped);
    }
    if report.failed > 0 {
        println!("{} failed", report.failed);
    }
    println!("Files created in: {}/", report.target_dir.display());
    println!("Index file created: {}", report.index_file.display());
}

fn run(command: Commands) -> Result<(), PipelineError> {
    match command {
        Commands::Convert { config, source, target, json } => {
            let pipeline = ConversionPipeline::new(load_config(config, source, target)?);
            let report = pipeline.run()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
        }

        Commands::Classify { name, description } => {
            let result = classify(&name, &description);
            let output = serde_json::json!({
                "classification": result,
                "compatibility": result.compatibility(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Stats { config, source } => {
            let pipeline = ConversionPipeline::new(load_config(config, source, None)?);
            let (manifest, outcomes) = pipeline.survey()?;
            let output = serde_json::json!({
                "engine_version": ENGINE_VERSION,
                "stats": manifest.stats(),
                "tags": manifest.all_tags(),
                "outcomes": outcomes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Convert {
        config: None,
        source: None,
        target: None,
        json: false,
    });

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
