//! Command-line front end for colstats
//!
//! # Usage
//!
//! ```bash
//! # Statistics for every column
//! colstats data.txt
//!
//! # Rows 1 through 100, columns 0, 1 and 4, plus a 20-bin histogram
//! colstats -r 1:100 -c 0:1,4 -b 20 data.txt
//!
//! # Histogram only
//! colstats -s=false -b 50 data.txt
//! ```

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

use colstats::engine::{ColumnSelection, EngineConfig, RowRange, StatisticsEngine};
use colstats::histogram::{HistogramBuilder, DEFAULT_BAR_WIDTH};
use colstats::reader::RowReader;
use colstats::report::ColumnReport;

/// Streaming statistics over columns of a numeric text file
#[derive(Parser, Debug)]
#[command(name = "colstats")]
#[command(version)]
#[command(about = "Compute count, min, max, mean, variance, median and histograms per column")]
struct Args {
    /// Print statistics; "-s=false" prints histograms only
    #[arg(
        short = 's',
        long = "stats",
        value_name = "BOOL",
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    stats: bool,

    /// Inclusive 0-based row range, e.g. "1:100", "5:" or ":20"
    #[arg(short = 'r', long = "rows", value_name = "START:END")]
    rows: Option<RowRange>,

    /// Columns to analyze: indices and inclusive ranges, e.g. "0:2,5"
    #[arg(short = 'c', long = "columns", value_name = "SPEC")]
    columns: Option<ColumnSelection>,

    /// Print a histogram with this many bins for each column
    #[arg(short = 'b', long = "bins", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    bins: Option<u32>,

    /// Width of the longest histogram bar
    #[arg(long = "bar-width", default_value_t = DEFAULT_BAR_WIDTH)]
    bar_width: usize,

    /// Log progress to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Input file: whitespace-separated numbers, one row per line
    file: PathBuf,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_rows(self.rows.unwrap_or_default())
            .with_columns(self.columns.clone().unwrap_or_default())
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let file = File::open(&args.file)
        .map_err(|e| format!("cannot open {}: {}", args.file.display(), e))?;
    info!(file = %args.file.display(), "reading input");

    let mut engine = StatisticsEngine::new(args.engine_config());
    engine.consume(&mut RowReader::new(BufReader::new(file)))?;
    debug!(
        accepted = engine.rows_accepted(),
        skipped = engine.rows_skipped(),
        "input consumed"
    );
    let columns = engine.finalize_all();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    for (&index, stats) in &columns {
        if args.stats {
            write!(out, "{}", ColumnReport::new(index, stats))?;
        }

        if let Some(bins) = args.bins {
            match HistogramBuilder::new(bins as usize).build(stats) {
                Ok(hist) => {
                    writeln!(out, "histogram column {}", index)?;
                    write!(out, "{}", hist.render(args.bar_width))?;
                }
                Err(err) => {
                    error!(column = index, "{}", err);
                    all_ok = false;
                }
            }
        }

        if args.stats || args.bins.is_some() {
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(all_ok)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("colstats: {}", err);
            ExitCode::FAILURE
        }
    }
}
