//! Wheel Scanner CLI
//!
//! Command-line interface for screening covered calls and cash-secured puts.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use wheel_scanner::prelude::*;

/// Screen option chains for covered-call and cash-secured-put premium.
#[derive(Parser)]
#[command(name = "wheel-scan")]
#[command(version)]
#[command(about = "Covered call and cash-secured put screener")]
#[command(long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more symbols against live Yahoo Finance data
    Scan {
        /// calls (1) or puts (2)
        strategy: Strategy,

        /// Stock symbols
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Prompt for strategy and symbol until quit
    Interactive,

    /// Analyze every symbol in a saved JSON snapshot
    Offline {
        /// calls (1) or puts (2)
        strategy: Strategy,

        /// Snapshot file
        snapshot: PathBuf,
    },

    /// Print the default configuration as TOML
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level.
    fn init_logging(&self) {
        let level = match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .with_writer(io::stderr)
            .finish();

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set tracing subscriber: {}", e);
        }
    }

    fn load_config(&self) -> ScanResult<ScannerConfig> {
        match &self.config {
            Some(path) => ScannerConfig::load(path),
            None => Ok(ScannerConfig::default()),
        }
    }
}

fn print_report(report: &AnalysisReport, format: OutputFormat) -> ScanResult<()> {
    let formatter = ReportFormatter::new();
    match format {
        OutputFormat::Text => println!("{}", formatter.render(report)),
        OutputFormat::Json => println!("{}", formatter.render_json(report)?),
    }
    Ok(())
}

/// Analyze each symbol in turn; one symbol's failure does not stop the rest.
/// Returns the number of failed symbols.
fn scan_symbols<S: MarketDataSource>(
    analyzer: &Analyzer<S>,
    strategy: Strategy,
    symbols: &[String],
    format: OutputFormat,
) -> ScanResult<usize> {
    let mut failures = 0;

    for symbol in symbols {
        match analyzer.analyze(symbol, strategy) {
            Ok(report) => print_report(&report, format)?,
            Err(e) => {
                error!("{}: {}", symbol, e);
                eprintln!("{}: {}", symbol.trim().to_ascii_uppercase(), e);
                failures += 1;
            }
        }
    }

    Ok(failures)
}

fn run_offline(
    config: ScannerConfig,
    strategy: Strategy,
    snapshot: &Path,
    format: OutputFormat,
) -> ScanResult<usize> {
    let source = StaticSource::load(snapshot)?;
    let symbols = source.symbols();
    let analyzer = Analyzer::new(source, config);
    scan_symbols(&analyzer, strategy, &symbols, format)
}

fn run(cli: &Cli) -> ScanResult<usize> {
    let config = cli.load_config()?;

    match &cli.command {
        Commands::Scan { strategy, symbols } => {
            let client = YahooClient::with_config(&config.data)?;
            let analyzer = Analyzer::new(client, config);
            scan_symbols(&analyzer, *strategy, symbols, cli.output)
        }

        Commands::Interactive => {
            let client = YahooClient::with_config(&config.data)?;
            let analyzer = Analyzer::new(client, config);
            let stdin = io::stdin();
            run_interactive(&analyzer, stdin.lock(), io::stdout())?;
            Ok(0)
        }

        Commands::Offline { strategy, snapshot } => run_offline(config, *strategy, snapshot, cli.output),

        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(0)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
