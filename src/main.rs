use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use je_analyzer::config::{AnalyzerConfig, DEFAULT_BENFORD_MIN_SAMPLES};
use je_analyzer::{analysis, excel, logging, report};

#[derive(Parser)]
#[command(name = "je-analyzer")]
#[command(about = "Descriptive statistics and Benford's Law checks for journal entry workbooks")]
#[command(version)]
struct Cli {
    /// Input workbook (.xlsx)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for report files (recreated on each run)
    #[arg(short, long)]
    output: PathBuf,

    /// Minimum eligible values a numeric column needs for Benford analysis
    #[arg(long, default_value_t = DEFAULT_BENFORD_MIN_SAMPLES)]
    benford_min_samples: usize,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let cli = Cli::parse();

    let config = AnalyzerConfig {
        benford_min_samples: cli.benford_min_samples,
    };

    let workbook = excel::load_workbook(&cli.input)?;
    let summary = analysis::analyze_workbook(&workbook, &config);
    report::write_reports(&cli.output, &summary)?;

    tracing::info!(
        "analyzed {}: {} sheets, {} benford-eligible columns",
        summary.workbook,
        summary.sheets.len(),
        summary.benford.len()
    );
    Ok(())
}
