//! codelens CLI Entry Point
//!
//! Analyze Java source locally (and optionally with Gemini), re-render saved
//! results, or print the remote review instruction.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use codelens_analysis::{
    describe_failure, AnalysisOutcome, AnalyzerConfig, CodeAnalyzer, ExportFormat, ReportExporter,
};
use codelens_llm::{build_prompt, RateLimiter};
use codelens_utils::logging::{basic_config, LogLevel};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "codelens")]
#[command(about = "codelens - Java code review from heuristics and Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze Java source from a file or stdin
    Analyze {
        /// Source file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Output format (json, yaml, markdown, html, text)
        #[arg(short = 'f', long, default_value = "json")]
        format: ExportFormat,

        /// Output file path; the format's extension is added when missing
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Configuration file path (TOML, JSON or YAML)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Skip the remote review
        #[arg(long)]
        local_only: bool,

        /// Enable debug logging
        #[arg(short = 'd', long)]
        debug: bool,
    },

    /// Re-render a saved JSON result
    Export {
        /// JSON file written by `codelens analyze`
        report: PathBuf,

        #[arg(short = 'f', long, default_value = "markdown")]
        format: ExportFormat,

        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print the instruction sent to the remote model
    Prompt {
        /// Source file (reads stdin when omitted or "-")
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let debug = matches!(cli.command, Commands::Analyze { debug: true, .. });
    basic_config(Some(if debug { LogLevel::Debug } else { LogLevel::Info }))?;

    match cli.command {
        Commands::Analyze {
            file,
            format,
            output,
            api_key,
            config,
            local_only,
            debug: _,
        } => {
            let request = AnalyzeRequest {
                file,
                api_key,
                config,
                local_only,
            };
            let outcome = analyze(request).await.map_err(|e| {
                if let Some(codelens_core::Error::InputValidation(message)) = e.downcast_ref() {
                    return anyhow!(message.clone());
                }
                tracing::error!("Analysis failed: {:#}", e);
                anyhow!(describe_failure(&format!("{e:#}")))
            })?;

            emit(&ReportExporter::export(&outcome, format)?, output.as_deref(), format)
        }

        Commands::Export { report, format, output } => {
            let json = std::fs::read_to_string(&report)
                .with_context(|| format!("Failed to read {}", report.display()))?;
            let outcome = AnalysisOutcome::from_json(&json)
                .with_context(|| format!("{} is not a saved codelens result", report.display()))?;

            emit(&ReportExporter::export(&outcome, format)?, output.as_deref(), format)
        }

        Commands::Prompt { file } => {
            let source = read_source(file.as_deref())?;
            let source = codelens_core::validate_source(&source)?;
            println!("{}", build_prompt(source));
            Ok(())
        }
    }
}

struct AnalyzeRequest {
    file: Option<PathBuf>,
    api_key: Option<String>,
    config: Option<PathBuf>,
    local_only: bool,
}

async fn analyze(request: AnalyzeRequest) -> Result<AnalysisOutcome> {
    let mut config = match &request.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if request.api_key.is_some() {
        config.gateway.api_key = request.api_key;
    }
    config.local_only |= request.local_only;

    let source = read_source(request.file.as_deref())?;
    let limiter = Arc::new(RateLimiter::new(config.gateway.min_interval()));
    let analyzer = CodeAnalyzer::from_config(&config, limiter);

    Ok(analyzer.analyze(&source).await?)
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read source from stdin")?;
            Ok(source)
        }
    }
}

fn emit(rendered: &str, output: Option<&Path>, format: ExportFormat) -> Result<()> {
    match output {
        Some(path) => {
            let path = if path.extension().is_none() {
                path.with_extension(format.extension())
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Results saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
