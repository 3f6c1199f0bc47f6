//! # CLI Module
//!
//! Command-line interface for block-hash fingerprints.
//!
//! ## Usage
//! ```bash
//! # Fingerprint files and directories
//! blockhash hash ~/Photos
//!
//! # Finer grid, artifact-resistant method
//! blockhash hash photo.jpg --bits 32 --method precise
//!
//! # JSON output
//! blockhash hash ~/Photos --output json
//!
//! # Compare two stored fingerprints
//! blockhash compare 9f3c... 9f1c... --bits 16
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_blockhash::core::comparator::{self, ThresholdStrategy};
use image_blockhash::core::decode::DispatchConfig;
use image_blockhash::core::fingerprint::Fingerprint;
use image_blockhash::core::hasher::HashMethod;
use image_blockhash::core::pipeline::{Pipeline, PipelineResult};
use image_blockhash::core::scanner::ScanConfig;
use image_blockhash::error::{BlockhashError, Result};
use image_blockhash::events::{Event, EventChannel, HashEvent, PipelineEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

/// Block-hash image fingerprints
#[derive(Parser, Debug)]
#[command(name = "blockhash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fingerprint image files (directories are searched recursively)
    Hash {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Block grid side length; fingerprints have bits*bits bits
        #[arg(short, long, default_value = "16")]
        bits: u32,

        /// Block-value method
        #[arg(short, long, default_value = "quick")]
        method: Method,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Maximum directory depth to search
        #[arg(long)]
        max_depth: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compare two hex fingerprints
    Compare {
        /// First fingerprint (hex)
        first: String,

        /// Second fingerprint (hex)
        second: String,

        /// Grid size the fingerprints were made with (default: 4 bits per hex digit)
        #[arg(short, long)]
        bits: Option<u32>,

        /// Match threshold on the 64-bit scale (lower = stricter, 0-64)
        #[arg(short, long, default_value = "8")]
        threshold: u32,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Mean brightness per block (default)
    Quick,
    /// Median of oversampled sub-cells, resists artifacts
    Precise,
}

impl From<Method> for HashMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Quick => HashMethod::Quick,
            Method::Precise => HashMethod::Precise,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (hex only)
    Minimal,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Hash { verbose, .. } | Commands::Compare { verbose, .. } => *verbose,
    };
    image_blockhash::init_tracing(verbose);

    let outcome = match cli.command {
        Commands::Hash {
            paths,
            bits,
            method,
            output,
            include_hidden,
            max_depth,
            verbose,
        } => {
            let scan_config = ScanConfig {
                include_hidden,
                max_depth,
                ..ScanConfig::default()
            };
            run_hash(paths, bits, method.into(), output, scan_config, verbose)
        }
        Commands::Compare {
            first,
            second,
            bits,
            threshold,
            output,
            verbose: _,
        } => run_compare(&first, &second, bits, threshold, output),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            Term::stderr()
                .write_line(&format!("{} {}", style("error:").red().bold(), e))
                .ok();
            ExitCode::from(2)
        }
    }
}

/// Returns whether every image was fingerprinted
fn run_hash(
    paths: Vec<PathBuf>,
    bits: u32,
    method: HashMethod,
    output: OutputFormat,
    scan_config: ScanConfig,
    verbose: bool,
) -> Result<bool> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("blockhash").bold().cyan(),
            style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line(&format!("  {}", style(method.description()).dim()))
            .ok();
        term.write_line("").ok();
    }

    let pipeline = Pipeline::builder()
        .paths(paths)
        .bits(bits)
        .method(method)
        .scan_config(scan_config)
        .dispatch(DispatchConfig::verbose(verbose))
        .build();

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| BlockhashError::Config(e.to_string()))?
            .progress_chars("█▓░");
        pb.set_style(bar_style);
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}", phase));
                }
                Event::Hash(HashEvent::Started { total }) => {
                    pb.set_length(total as u64);
                }
                Event::Hash(HashEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(p.current);
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    drop(sender);
    event_thread.join().ok();

    let result = result?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &result),
        OutputFormat::Json => print_json_results(&result)?,
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(result.failed() == 0 && result.scan_errors.is_empty())
}

fn print_pretty_results(term: &Term, result: &PipelineResult) {
    term.write_line(&format!(
        "{} {} images fingerprinted ({}x{} {}) in {:.1}s",
        style("✓").green().bold(),
        style(result.succeeded()).cyan(),
        result.params.bits,
        result.params.bits,
        result.params.method,
        result.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line("").ok();

    for entry in &result.entries {
        match (&entry.fingerprint, &entry.error) {
            (Some(fingerprint), _) => {
                println!("{}  {}", fingerprint, entry.source);
            }
            (None, error) => {
                term.write_line(&format!(
                    "  {} {}: {}",
                    style("✗").red(),
                    entry.source,
                    style(error.as_deref().unwrap_or("unknown error")).dim()
                ))
                .ok();
            }
        }
    }

    for error in &result.scan_errors {
        term.write_line(&format!("  {} {}", style("✗").red(), style(error).dim()))
            .ok();
    }

    if result.failed() > 0 {
        term.write_line("").ok();
        term.write_line(&format!(
            "  {} images could not be fingerprinted",
            style(result.failed()).yellow()
        ))
        .ok();
    }
}

fn print_json_results(result: &PipelineResult) -> Result<()> {
    let output = serde_json::json!({
        "bits": result.params.bits,
        "method": result.params.method,
        "succeeded": result.succeeded(),
        "failed": result.failed(),
        "duration_ms": result.duration_ms,
        "scan_errors": result.scan_errors,
        "entries": result.entries.iter().map(|e| {
            serde_json::json!({
                "source": e.source,
                "format": e.format.map(|f| f.mime()),
                "hash": e.fingerprint.as_ref().map(|f| f.to_hex()),
                "error": e.error,
            })
        }).collect::<Vec<_>>()
    });

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| BlockhashError::Config(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn print_minimal_results(result: &PipelineResult) {
    for entry in &result.entries {
        if let Some(fingerprint) = &entry.fingerprint {
            println!("{} {}", fingerprint, entry.source);
        }
    }
}

/// Returns whether the fingerprints match under the threshold
fn run_compare(
    first: &str,
    second: &str,
    bits: Option<u32>,
    threshold: u32,
    output: OutputFormat,
) -> Result<bool> {
    let parse = |hex: &str| -> Result<Fingerprint> {
        let fingerprint = match bits {
            Some(bits) => Fingerprint::from_hex_for_grid(hex, bits)?,
            None => hex.parse::<Fingerprint>()?,
        };
        Ok(fingerprint)
    };

    let a = parse(first)?;
    let b = parse(second)?;
    let strategy = ThresholdStrategy::new(threshold)?;
    let result = comparator::compare(&a, &b, &strategy)?;

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} {} of {} bits differ ({:.1}% similar)",
                style("Distance:").bold(),
                style(result.distance).cyan(),
                result.bits,
                result.similarity_percent
            ))
            .ok();
            let verdict = if result.is_match {
                style(format!("{}", result.match_type)).green()
            } else {
                style(format!("{}", result.match_type)).yellow()
            };
            term.write_line(&format!("{} {}", style("Match:").bold(), verdict))
                .ok();
        }
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&result)
                .map_err(|e| BlockhashError::Config(e.to_string()))?;
            println!("{}", text);
        }
        OutputFormat::Minimal => println!("{}", result.distance),
    }

    Ok(result.is_match)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hash_defaults() {
        let cli = Cli::try_parse_from(["blockhash", "hash", "a.png"]).unwrap();
        match cli.command {
            Commands::Hash {
                bits,
                method,
                max_depth,
                ..
            } => {
                assert_eq!(bits, 16);
                assert!(matches!(method, Method::Quick));
                assert_eq!(max_depth, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn hash_accepts_max_depth() {
        let cli = Cli::try_parse_from(["blockhash", "hash", "photos", "--max-depth", "2"]).unwrap();
        match cli.command {
            Commands::Hash { max_depth, .. } => assert_eq!(max_depth, Some(2)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn compare_rejects_length_mismatch() {
        let result = run_compare("ffff", "fffff", None, 8, OutputFormat::Minimal);
        assert!(matches!(result, Err(BlockhashError::Compare(_))));
    }

    #[test]
    fn compare_with_grid_bits() {
        let result = run_compare("3333", "3333", Some(4), 8, OutputFormat::Minimal).unwrap();
        assert!(result);
        let result = run_compare("3333", "cccc", Some(4), 8, OutputFormat::Minimal).unwrap();
        assert!(!result);
    }
}
