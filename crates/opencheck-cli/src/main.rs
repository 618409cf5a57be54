//! opencheck command-line interface.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use opencheck::report::unix_timestamp;
use opencheck::{Analysis, AnalysisMode, AnalysisOptions, Report, analyze_file};
use tracing_subscriber::EnvFilter;

/// Exit code when the run completed and found critical or error issues.
const EXIT_ISSUES: u8 = 2;
/// Exit code when the run could not complete.
const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "opencheck")]
#[command(about = "Detect open circuits and DC-floating nodes in SPICE netlists", long_about = None)]
#[command(version)]
struct Cli {
    /// SPICE netlist file to analyze
    #[arg(value_name = "NETLIST")]
    netlist: PathBuf,

    /// Save the JSON report to FILE
    #[arg(short = 'j', long, value_name = "FILE")]
    output_json: Option<PathBuf>,

    /// Save the text report to FILE
    #[arg(short = 't', long, value_name = "FILE")]
    output_text: Option<PathBuf>,

    /// Print parse and flattening statistics
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the console summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Analyze a single subcircuit instead of the flattened hierarchy
    #[arg(long)]
    subcircuit_only: bool,

    /// Subcircuit to analyze with --subcircuit-only (default: the first defined)
    #[arg(long, value_name = "NAME", requires = "subcircuit_only")]
    subcircuit: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::from(EXIT_ISSUES),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the analysis. Returns whether any critical or error finding exists.
fn run(cli: &Cli) -> Result<bool> {
    let path = &cli.netlist;
    if !path.exists() {
        bail!("netlist file not found: {}", path.display());
    }
    if !path.is_file() {
        bail!("not a file: {}", path.display());
    }

    let options = if cli.subcircuit_only {
        AnalysisOptions::subcircuit_only(cli.subcircuit.clone())
    } else {
        AnalysisOptions::flattened()
    };
    log::debug!("analysis options: {:?}", options);

    if cli.verbose {
        println!("Parsing netlist: {}", path.display());
    }
    let analysis = analyze_file(path, &options)
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    if cli.verbose {
        print_statistics(&analysis, options.mode);
    }

    let blocking = analysis.has_blocking_findings();
    let report = Report::new(analysis.findings, Some(path.clone()), unix_timestamp());
    save_reports(cli, &report)?;

    if !cli.quiet {
        report.print_summary();
    }

    Ok(blocking)
}

fn print_statistics(analysis: &Analysis, mode: AnalysisMode) {
    let netlist = &analysis.netlist;
    println!("Found {} subcircuit(s)", netlist.num_subcircuits());

    match mode {
        AnalysisMode::SubcircuitOnly => {
            for subckt in netlist.subcircuits() {
                println!(
                    "  - {}: {} ports, {} elements",
                    subckt.name,
                    subckt.num_ports(),
                    subckt.elements.len()
                );
            }
            if let Some(name) = &analysis.subcircuit {
                println!("Analyzing subcircuit: {}", name);
            }
        }
        AnalysisMode::Flattened => {
            println!("Found {} instance(s)", netlist.instances.len());
            println!(
                "Found {} top-level element(s)",
                netlist.top_level_elements.len()
            );
            println!(
                "Flattened graph: {} nodes, {} elements",
                analysis.graph.num_nodes(),
                analysis.graph.num_elements()
            );
            println!("Top-level nodes: {}", analysis.graph.top_level_nodes().len());
        }
    }

    for warning in &analysis.warnings {
        println!("Warning: {}", warning);
    }
}

fn save_reports(cli: &Cli, report: &Report) -> Result<()> {
    if let Some(json_path) = &cli.output_json {
        report
            .save_json(json_path)
            .with_context(|| format!("failed to write JSON report to {}", json_path.display()))?;
        announce(cli, "JSON", json_path);
    }
    if let Some(text_path) = &cli.output_text {
        report
            .save_text(text_path)
            .with_context(|| format!("failed to write text report to {}", text_path.display()))?;
        announce(cli, "Text", text_path);
    }
    Ok(())
}

fn announce(cli: &Cli, kind: &str, path: &Path) {
    if cli.verbose {
        println!("{} report saved to: {}", kind, path.display());
    }
}
