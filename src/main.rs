use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use trend_engine::config::AppConfig;
use trend_engine::error::TrendError;
use trend_engine::session::{format_percent, Session, SessionView};

#[derive(Parser)]
#[command(name = "trend-engine")]
#[command(about = "Compare a turbine start-up recording against the successful baseline")]
struct Args {
    /// Candidate start-up CSV to analyze
    candidate: PathBuf,

    /// Baseline CSV (overrides the configured path)
    #[arg(short, long)]
    baseline: Option<PathBuf>,

    /// Optional JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated channel names; all selectable channels when omitted
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Tolerance threshold in percent (0-100)
    #[arg(short, long)]
    tolerance: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(baseline) = args.baseline {
        config.baseline_path = baseline;
    }

    info!("Loading baseline from {}", config.baseline_path.display());
    let mut session = Session::new(config)?;

    if let Err(err) = session.upload_csv(&args.candidate) {
        match err {
            TrendError::NoTriggerFound { .. } => {
                println!("{}", err);
                println!("The candidate file never reaches start-of-sequence; nothing to compare.");
                return Ok(());
            }
            other => return Err(other.into()),
        }
    }

    let columns = if args.columns.is_empty() {
        let mut all = session.selectable_columns();
        all.truncate(session.config().max_selected_columns);
        all
    } else {
        args.columns.clone()
    };
    session.select_columns(&columns)?;

    if let Some(tolerance) = args.tolerance {
        session.set_tolerance(tolerance);
    }

    match session.view()? {
        SessionView::AwaitingUpload { prompt } | SessionView::AwaitingSelection { prompt } => {
            println!("{}", prompt);
        }
        SessionView::Report(report) => {
            println!("=== Channel Deviation ===");
            for record in &report.records {
                println!(
                    "{:<24} min {:>8}  max {:>8}  mean {:>8}",
                    record.column,
                    format_percent(record.min),
                    format_percent(record.max),
                    format_percent(record.mean)
                );
            }

            println!("\n=== Largest Differences ({}) ===", report.current.column);
            for row in report.detail.iter().take(10) {
                println!(
                    "row {:>5}  baseline {:>12.4}  candidate {:>12.4}  diff {:.4}",
                    row.row, row.baseline, row.candidate, row.difference
                );
            }

            println!("\n=== Tolerance Verdicts ({:.2}%) ===", session.tolerance());
            println!("{}", report.classification.narrative());

            info!(
                "Chart prepared: {} points, y domain {:.4}..{:.4}",
                report.chart.points.len(),
                report.chart.y_domain.0,
                report.chart.y_domain.1
            );
        }
    }

    Ok(())
}
