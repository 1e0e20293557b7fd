// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-healthcheck CLI - WCAG accessibility healthcheck pipeline

use a11y_healthcheck::config::{load_config, Config, DEFAULT_OUTPUT};
use a11y_healthcheck::interactive;
use a11y_healthcheck::metadata::{JsonFileSource, MetadataSource, SampleSource};
use a11y_healthcheck::pipeline::{self, Pipeline};
use a11y_healthcheck::report::{render, OutputFormat};
use a11y_healthcheck::simulate::ContextId;
use a11y_healthcheck::WcagLevel;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "a11y-healthcheck.toml";

/// Accessibility healthcheck for design-system components
#[derive(Parser)]
#[command(name = "a11y-healthcheck")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write a findings report
    Run {
        /// Component metadata JSON (built-in Button sample if omitted)
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Context to simulate; repeat for several (default: desktop, mobile)
        #[arg(long = "context", value_enum)]
        contexts: Vec<ContextArg>,

        /// Target WCAG conformance level
        #[arg(long)]
        level: Option<LevelArg>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,

        /// Output file (JSON defaults to out/findings.json, others to stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Fixed report timestamp (RFC 3339) for reproducible output
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,

        /// Exit non-zero when any finding fails
        #[arg(long)]
        strict: bool,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the acquired component metadata as JSON
    Extract {
        /// Component metadata JSON (built-in Button sample if omitted)
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Prompt for source, contexts and level, then run on the sample component
    Check {
        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Report pipeline liveness
    Health {
        /// Output file (default: out/health.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Usage context CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContextArg {
    Desktop,
    Mobile,
    KeyboardOnly,
}

impl From<ContextArg> for ContextId {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Desktop => ContextId::Desktop,
            ContextArg::Mobile => ContextId::Mobile,
            ContextArg::KeyboardOnly => ContextId::KeyboardOnly,
        }
    }
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<LevelArg> for WcagLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Aa => WcagLevel::AA,
            LevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11y_healthcheck=debug")
    } else {
        EnvFilter::new("a11y_healthcheck=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn metadata_source(path: Option<PathBuf>) -> Box<dyn MetadataSource> {
    match path {
        Some(p) => Box::new(JsonFileSource::new(p)),
        None => Box::new(SampleSource),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            metadata,
            contexts,
            level,
            format,
            output,
            config,
            timestamp,
            strict,
            verbose,
        } => {
            init_logging(verbose);
            let mut cfg: Config = load_config(&config)?;
            if !contexts.is_empty() {
                cfg.contexts = contexts.into_iter().map(ContextId::from).collect();
            }
            if let Some(level) = level {
                cfg.target_level = level.into();
            }
            if let Some(format) = format {
                cfg.format = format.into();
            }
            if output.is_some() {
                cfg.output = output;
            }

            let source = metadata_source(metadata);
            let pipeline = Pipeline::new(cfg.profiles()?, cfg.target_level);
            info!(
                "Source: {} | Contexts: {} | Level: {}",
                source.describe(),
                cfg.contexts.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", "),
                cfg.target_level
            );

            let run = pipeline.run_at(source.as_ref(), timestamp.unwrap_or_else(Utc::now))?;
            let rendered = render(&run.report, cfg.format)?;
            write_output(&rendered, cfg.output_path().as_deref())?;

            interactive::write_summary(&run.report, &mut std::io::stderr())?;

            if strict && run.report.has_failures() {
                std::process::exit(1);
            }
        }

        Commands::Extract { metadata, verbose } => {
            init_logging(verbose);
            let meta = metadata_source(metadata).acquire()?;
            println!("{}", serde_json::to_string_pretty(&meta)?);
        }

        Commands::Check { verbose } => {
            init_logging(verbose);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let Some(options) = interactive::prompt_options(&mut stdin.lock(), &mut stdout)? else {
                return Ok(());
            };

            println!("\nRunning pipeline...");
            let run = Pipeline::new(options.profiles(), options.level).run(&SampleSource)?;
            for stage in pipeline::STAGES {
                println!("  done: {}", stage);
            }
            println!();

            let json = render(&run.report, OutputFormat::Json)?;
            write_output(&json, Some(Path::new(DEFAULT_OUTPUT)))?;
            interactive::write_summary(&run.report, &mut stdout)?;
            println!("\nFull results written to {}", DEFAULT_OUTPUT);
        }

        Commands::Health { output } => {
            init_logging(false);
            let status = pipeline::health();
            let path = pipeline::health_output_path(output);
            write_output(&serde_json::to_string_pretty(&status)?, Some(&path))?;
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
