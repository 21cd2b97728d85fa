pub mod benford;
pub mod summary;

use crate::config::AnalyzerConfig;
use crate::excel::Workbook;
use crate::models::{ColumnKind, SummaryReport};

/// Run every aggregation over a loaded workbook. Pure: sheets and columns
/// are walked strictly in order and the workbook is never mutated.
pub fn analyze_workbook(workbook: &Workbook, config: &AnalyzerConfig) -> SummaryReport {
    let mut sheets = Vec::with_capacity(workbook.sheets.len());
    let mut benford = Vec::new();

    for sheet in &workbook.sheets {
        sheets.push(summary::summarize_sheet(sheet));

        for (idx, kind) in sheet.kinds.iter().enumerate() {
            if *kind != ColumnKind::Numeric {
                continue;
            }
            let series = &sheet.df.get_columns()[idx];
            match series.f64() {
                Ok(ca) => {
                    if let Some(result) = benford::analyze_column(
                        &sheet.name,
                        &sheet.headers[idx],
                        ca,
                        config.benford_min_samples,
                    ) {
                        benford.push(result);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "sheet {} column {}: benford input unavailable: {}",
                        sheet.name,
                        sheet.headers[idx],
                        e
                    );
                }
            }
        }
    }

    SummaryReport {
        workbook: workbook.file_name.clone(),
        sheets,
        benford,
    }
}
