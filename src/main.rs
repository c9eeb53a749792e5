use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use camelbird::input::{ColumnSpec, load_table};
use camelbird::metrics::{Aggregate, MetricKind};
use camelbird::report::{build_summary, write_reports};

#[derive(Parser, Debug)]
#[command(name = "camelbird", version, about = "Group-fairness metrics for binary classifiers")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute fairness metrics for a TSV of predictions and write reports
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Tab-separated input with a header row (.gz accepted)
    #[arg(long)]
    input: PathBuf,

    /// Output directory for summary.json, groups.tsv and report.txt
    #[arg(long)]
    out: PathBuf,

    /// Metric to compute; repeat for several (default: all)
    #[arg(long = "metric", value_parser = parse_metric)]
    metrics: Vec<MetricKind>,

    /// Fold the two group rates into one score: difference|ratio
    #[arg(long, value_parser = parse_aggregate)]
    aggregate: Option<Aggregate>,

    #[arg(long, default_value = "y_true")]
    y_true_col: String,

    #[arg(long, default_value = "y_pred")]
    y_pred_col: String,

    #[arg(long, default_value = "group")]
    group_col: String,

    /// Column holding per-row sample weights
    #[arg(long)]
    weight_col: Option<String>,
}

#[derive(Debug, Clone)]
struct RunConfig {
    input: PathBuf,
    out_dir: PathBuf,
    metrics: Vec<MetricKind>,
    aggregate: Option<Aggregate>,
    columns: ColumnSpec,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        let mut metrics = if args.metrics.is_empty() {
            MetricKind::all().to_vec()
        } else {
            args.metrics
        };
        metrics.sort();
        metrics.dedup();
        Self {
            input: args.input,
            out_dir: args.out,
            metrics,
            aggregate: args.aggregate,
            columns: ColumnSpec {
                y_true: args.y_true_col,
                y_pred: args.y_pred_col,
                group: args.group_col,
                weight: args.weight_col,
            },
        }
    }
}

fn parse_metric(s: &str) -> Result<MetricKind, String> {
    s.parse()
}

fn parse_aggregate(s: &str) -> Result<Aggregate, String> {
    s.parse().map_err(|e: camelbird::metrics::FairnessError| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    camelbird::logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> camelbird::Result<()> {
    match command {
        Command::Run(args) => run_metrics(&RunConfig::from(args)),
    }
}

fn run_metrics(config: &RunConfig) -> camelbird::Result<()> {
    let table = load_table(&config.input, &config.columns)?;
    let summary = build_summary(&table, &config.metrics, config.aggregate)?;
    for m in &summary.metrics {
        if let Some(value) = m.aggregated {
            tracing::info!("{}: {:.6}", m.metric, value);
        }
    }
    write_reports(&summary, &config.out_dir)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
