use std::fmt::Display;
use std::fs;
use std::path::Path;

use serde::ser::{Serialize, Serializer};

use crate::error::AnalyzeError;
use crate::excel::classify::sanitize_file_stem;
use crate::models::{BenfordResult, SheetSummary, SummaryReport};

/// Serializes as a top-level mapping from sheet name to sheet summary,
/// preserving workbook sheet order.
struct SheetMap<'a>(&'a [SheetSummary]);

impl Serialize for SheetMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|sheet| (&sheet.sheet, sheet)))
    }
}

/// Write every report file under `out_dir`. The directory is recreated from
/// scratch on each run; callers only reach this after a successful load, so
/// a fatal input error never leaves partial output behind.
pub fn write_reports(out_dir: &Path, report: &SummaryReport) -> Result<(), AnalyzeError> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).map_err(|e| write_error(out_dir, &e))?;
    }
    fs::create_dir_all(out_dir).map_err(|e| write_error(out_dir, &e))?;

    write_summary_json(out_dir, report)?;
    write_column_stats_csv(out_dir, report)?;
    write_describe_csvs(out_dir, report)?;
    write_benford_csv(out_dir, &report.benford)?;
    write_summary_md(out_dir, report)?;
    write_index_md(out_dir)?;

    tracing::info!(
        "wrote reports for {} sheets ({} benford-eligible columns) to {}",
        report.sheets.len(),
        report.benford.len(),
        out_dir.display()
    );
    Ok(())
}

fn write_error(path: &Path, err: &dyn Display) -> AnalyzeError {
    AnalyzeError::OutputWrite(format!("{}: {}", path.display(), err))
}

fn write_summary_json(out_dir: &Path, report: &SummaryReport) -> Result<(), AnalyzeError> {
    let path = out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&SheetMap(&report.sheets))
        .map_err(|e| write_error(&path, &e))?;
    fs::write(&path, json + "\n").map_err(|e| write_error(&path, &e))
}

fn write_column_stats_csv(out_dir: &Path, report: &SummaryReport) -> Result<(), AnalyzeError> {
    let path = out_dir.join("column_stats.csv");
    let mut wtr = csv::Writer::from_path(&path).map_err(|e| write_error(&path, &e))?;

    wtr.write_record(["sheet", "column", "dtype", "count", "null_count", "unique_count"])
        .map_err(|e| write_error(&path, &e))?;
    for sheet in &report.sheets {
        for col in &sheet.column_stats {
            wtr.write_record(&[
                sheet.sheet.clone(),
                col.name.clone(),
                col.dtype.as_str().to_string(),
                col.count.to_string(),
                col.null_count.to_string(),
                col.unique_count.to_string(),
            ])
            .map_err(|e| write_error(&path, &e))?;
        }
    }
    wtr.flush().map_err(|e| write_error(&path, &e))
}

/// One numeric-describe table per sheet: a `statistic` column followed by
/// one column per numeric column. Sheets without numeric columns still get
/// a file so the per-sheet set stays uniform.
fn write_describe_csvs(out_dir: &Path, report: &SummaryReport) -> Result<(), AnalyzeError> {
    for sheet in &report.sheets {
        let path = out_dir.join(format!("describe_{}.csv", sanitize_file_stem(&sheet.sheet)));
        let mut wtr = csv::Writer::from_path(&path).map_err(|e| write_error(&path, &e))?;

        let numeric: Vec<_> = sheet
            .column_stats
            .iter()
            .filter_map(|col| col.describe.as_ref().map(|d| (col.name.as_str(), d)))
            .collect();

        let mut header = vec!["statistic".to_string()];
        header.extend(numeric.iter().map(|(name, _)| (*name).to_string()));
        wtr.write_record(&header).map_err(|e| write_error(&path, &e))?;

        let rows: [(&str, fn(&crate::models::DescribeStats) -> String); 8] = [
            ("count", |d| d.count.to_string()),
            ("mean", |d| d.mean.to_string()),
            ("std", |d| d.std.map(|v| v.to_string()).unwrap_or_default()),
            ("min", |d| d.min.to_string()),
            ("25%", |d| d.p25.to_string()),
            ("50%", |d| d.median.to_string()),
            ("75%", |d| d.p75.to_string()),
            ("max", |d| d.max.to_string()),
        ];
        for (label, cell) in rows {
            let mut record = vec![label.to_string()];
            record.extend(numeric.iter().map(|(_, d)| cell(d)));
            wtr.write_record(&record).map_err(|e| write_error(&path, &e))?;
        }
        wtr.flush().map_err(|e| write_error(&path, &e))?;
    }
    Ok(())
}

fn write_benford_csv(out_dir: &Path, results: &[BenfordResult]) -> Result<(), AnalyzeError> {
    let path = out_dir.join("benford_summary.csv");
    let mut wtr = csv::Writer::from_path(&path).map_err(|e| write_error(&path, &e))?;

    let mut header = vec![
        "sheet".to_string(),
        "column".to_string(),
        "total_values".to_string(),
        "chi_square".to_string(),
    ];
    header.extend((1..=9).map(|d| format!("digit_{}", d)));
    wtr.write_record(&header).map_err(|e| write_error(&path, &e))?;

    for result in results {
        let mut record = vec![
            result.sheet.clone(),
            result.column.clone(),
            result.total_values.to_string(),
            format!("{:.6}", result.chi_square),
        ];
        record.extend(result.observed.iter().map(|count| count.to_string()));
        wtr.write_record(&record).map_err(|e| write_error(&path, &e))?;
    }
    wtr.flush().map_err(|e| write_error(&path, &e))
}

fn write_summary_md(out_dir: &Path, report: &SummaryReport) -> Result<(), AnalyzeError> {
    let mut lines = vec![
        format!("# Journal Entry Summary for `{}`", report.workbook),
        String::new(),
        format!("Total sheets: **{}**", report.sheets.len()),
        String::new(),
    ];

    for sheet in &report.sheets {
        lines.push(format!("## Sheet: {}", sheet.sheet));
        lines.push(format!("- Rows: **{}**", sheet.row_count));
        lines.push(format!("- Columns: **{}**", sheet.column_count));

        let dated: Vec<_> = sheet
            .column_stats
            .iter()
            .filter_map(|col| col.date_range.as_ref().map(|r| (&col.name, r)))
            .collect();
        if !dated.is_empty() {
            lines.push("- Date ranges:".to_string());
            for (name, range) in dated {
                lines.push(format!(
                    "  - {}: {} -> {} (non-null {})",
                    name, range.min, range.max, range.non_null
                ));
            }
        }

        let numeric: Vec<_> = sheet
            .column_stats
            .iter()
            .filter_map(|col| col.describe.as_ref().map(|d| (&col.name, d)))
            .collect();
        if !numeric.is_empty() {
            lines.push("- Numeric summaries:".to_string());
            for (name, d) in numeric {
                let std = d
                    .std
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "n/a".to_string());
                lines.push(format!(
                    "  - {}: mean {:.2}, std {}, min {:.2}, max {:.2}",
                    name, d.mean, std, d.min, d.max
                ));
            }
        }
        lines.push(String::new());
    }

    if !report.benford.is_empty() {
        lines.push("## Benford's Law Results".to_string());
        lines.push(String::new());
        for result in &report.benford {
            lines.push(format!(
                "- {} / {}: chi-square {:.2} over {} values",
                result.sheet, result.column, result.chi_square, result.total_values
            ));
        }
        lines.push(String::new());
        lines.push(
            "See `benford_summary.csv` for per-column digit distributions.".to_string(),
        );
        lines.push(String::new());
    }

    let path = out_dir.join("summary.md");
    fs::write(&path, lines.join("\n")).map_err(|e| write_error(&path, &e))
}

fn write_index_md(out_dir: &Path) -> Result<(), AnalyzeError> {
    let lines = [
        "# Output Files",
        "",
        "This folder is generated by the journal entry analysis run.",
        "",
        "- `summary.json`: machine-readable summary",
        "- `summary.md`: human-readable summary",
        "- `column_stats.csv`: per-column statistics",
        "- `describe_<sheet>.csv`: numeric describe table per sheet",
        "- `benford_summary.csv`: Benford's Law leading digit distribution per column",
    ];
    let path = out_dir.join("index.md");
    fs::write(&path, lines.join("\n")).map_err(|e| write_error(&path, &e))
}
