//! Swinglab CLI: indicator computation and optimal swing-trade analysis.
//!
//! Commands:
//! - `analyze`: optimal trades and summary for one or more CSV series
//! - `indicators`: write the series plus every indicator column as CSV
//! - `batch`: analyse every `[[series]]` of a TOML config in parallel
//! - `synthetic`: analyse a deterministic synthetic random walk

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use swinglab_core::{AnalysisConfig, BoundaryMode};
use swinglab_runner::{
    export_indicators_csv, load_csv, run_many, run_series, save_artifacts, synthetic_series,
    AnalysisReport, LoadedSeries, RunConfig, SeriesRun,
};
use tracing::info;
use tracing_appender::non_blocking;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "swinglab",
    about = "Swinglab CLI: technical indicators and optimal swing trades"
)]
struct Cli {
    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find optimal trades in the trailing window of each CSV series.
    Analyze {
        /// OHLCV CSV files (timestamp in epoch milliseconds).
        #[arg(required = true)]
        csv: Vec<PathBuf>,

        #[command(flatten)]
        opts: AnalysisArgs,
    },
    /// Compute the full indicator set and write it as CSV.
    Indicators {
        /// OHLCV CSV file.
        csv: PathBuf,

        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,
    },
    /// Analyse every series listed in a TOML config, in parallel.
    Batch {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Overrides `[output] dir` from the config.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print each trade list as JSON.
        #[arg(long, default_value_t = false)]
        print_trades: bool,
    },
    /// Analyse a synthetic random-walk series.
    Synthetic {
        /// Symbol used to seed the generator.
        #[arg(long, default_value = "SYNTH")]
        symbol: String,

        /// Number of points to generate.
        #[arg(long, default_value_t = 500)]
        points: usize,

        #[command(flatten)]
        opts: AnalysisArgs,
    },
}

/// Analysis settings shared by `analyze` and `synthetic`.
#[derive(Args, Debug, Default)]
struct AnalysisArgs {
    /// TOML run config; only its `[analysis]` and `[output]` sections are used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of most recent points to analyse.
    #[arg(long)]
    subset_size: Option<usize>,

    /// Neighbourhood radius for maxima.
    #[arg(long)]
    maxima_order: Option<usize>,

    /// Neighbourhood radius for minima.
    #[arg(long)]
    minima_order: Option<usize>,

    /// How neighbourhoods crossing the window edge are compared.
    #[arg(long, value_enum)]
    boundary: Option<BoundaryArg>,

    /// Print the trade list as JSON.
    #[arg(long, default_value_t = false)]
    print_trades: bool,

    /// Write report.json, trades.csv, indicators.csv and report.md here.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BoundaryArg {
    Truncate,
    Clip,
}

impl From<BoundaryArg> for BoundaryMode {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Truncate => BoundaryMode::Truncate,
            BoundaryArg::Clip => BoundaryMode::Clip,
        }
    }
}

impl AnalysisArgs {
    /// Resolve the effective config: end-to-end defaults, then the TOML file,
    /// then command-line flags.
    fn resolve(&self) -> Result<(AnalysisConfig, Option<PathBuf>)> {
        let (mut analysis, mut output_dir) = match &self.config {
            Some(path) => {
                let file = RunConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?;
                (file.analysis, file.output.dir)
            }
            None => (AnalysisConfig::end_to_end(), None),
        };

        if let Some(n) = self.subset_size {
            analysis.subset_size = n;
        }
        if let Some(n) = self.maxima_order {
            analysis.maxima_order = n;
        }
        if let Some(n) = self.minima_order {
            analysis.minima_order = n;
        }
        if let Some(b) = self.boundary {
            analysis.boundary = b.into();
        }
        if self.print_trades {
            analysis.print_trades = true;
        }
        if self.output_dir.is_some() {
            output_dir = self.output_dir.clone();
        }

        analysis.validate().context("invalid analysis settings")?;
        Ok((analysis, output_dir))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file)?;

    match cli.command {
        Commands::Analyze { csv, opts } => run_analyze(&csv, &opts),
        Commands::Indicators { csv, out } => run_indicators(&csv, &out),
        Commands::Batch {
            config,
            output_dir,
            print_trades,
        } => run_batch(&config, output_dir, print_trades),
        Commands::Synthetic {
            symbol,
            points,
            opts,
        } => run_synthetic(&symbol, points, &opts),
    }
}

/// Logs go to stderr so stdout carries only results.
fn init_tracing(log_file: Option<PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| anyhow!("failed to create log directory {parent:?}: {err}"))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| anyhow!("failed to open log file {path:?}: {err}"))?;
        let (non_blocking_writer, guard) = non_blocking(file);
        // The writer must outlive every log call; keep the guard for the process lifetime.
        let _guard = Box::leak(Box::new(guard));
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_writer);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
    }
}

fn run_analyze(paths: &[PathBuf], opts: &AnalysisArgs) -> Result<()> {
    let (config, output_dir) = opts.resolve()?;
    for path in paths {
        let loaded =
            load_csv(path, None).with_context(|| format!("failed to load {}", path.display()))?;
        analyze_and_report(&loaded, &config, output_dir.as_deref())?;
    }
    Ok(())
}

fn run_synthetic(symbol: &str, points: usize, opts: &AnalysisArgs) -> Result<()> {
    let (config, output_dir) = opts.resolve()?;
    let loaded = synthetic_series(symbol, points)?;
    analyze_and_report(&loaded, &config, output_dir.as_deref())
}

fn analyze_and_report(
    loaded: &LoadedSeries,
    config: &AnalysisConfig,
    output_dir: Option<&Path>,
) -> Result<()> {
    let run = run_series(loaded, config)?;
    emit(&run, config.print_trades, output_dir)
}

fn emit(run: &SeriesRun, print_trades: bool, output_dir: Option<&Path>) -> Result<()> {
    print!("{}", format_summary(&run.report));
    if print_trades {
        println!("{}", serde_json::to_string_pretty(&run.report.trades)?);
    }
    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(run, dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_indicators(path: &Path, out: &Path) -> Result<()> {
    let loaded =
        load_csv(path, None).with_context(|| format!("failed to load {}", path.display()))?;
    let indicators = swinglab_core::compute_indicators(&loaded.series);
    let csv = export_indicators_csv(&loaded.series, &indicators)?;
    std::fs::write(out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    info!(
        symbol = %loaded.symbol,
        points = loaded.series.len(),
        columns = indicators.len(),
        out = %out.display(),
        "indicators written"
    );
    Ok(())
}

fn run_batch(config_path: &Path, output_dir: Option<PathBuf>, print_trades: bool) -> Result<()> {
    let config = RunConfig::load(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    if config.series.is_empty() {
        bail!("config {} lists no [[series]]", config_path.display());
    }
    let output_dir = output_dir.or_else(|| config.output.dir.clone());
    let print_trades = print_trades || config.analysis.print_trades;
    info!(run_id = %config.run_id()?, series = config.series.len(), "starting batch");

    let mut failures = Vec::new();
    for (symbol, result) in run_many(&config) {
        match result {
            Ok(run) => emit(&run, print_trades, output_dir.as_deref())?,
            Err(e) => {
                eprintln!("Error for {symbol}: {e}");
                failures.push(symbol);
            }
        }
    }

    if !failures.is_empty() {
        bail!("{} of {} series failed: {}", failures.len(), config.series.len(), failures.join(", "));
    }
    Ok(())
}

/// Console summary for one run.
fn format_summary(report: &AnalysisReport) -> String {
    let mut out = format!("=== {} ===\n", report.symbol);
    if report.has_synthetic {
        out.push_str("(synthetic data)\n");
    }
    match &report.summary {
        Some(s) => {
            out.push_str(&format!(
                "Number of trades: {}, Total return: {}%\n",
                s.trade_count, s.total_return_pct
            ));
            out.push_str(&format!(
                "Return / Trade ratio: {} (Avg. return per trade)\n",
                s.avg_return_per_trade_pct
            ));
        }
        None => out.push_str("No trades\n"),
    }
    out
}
