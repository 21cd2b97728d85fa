use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use polars::prelude::*;

use super::classify::{self, classify_column, clean_column_name};
use crate::error::AnalyzeError;
use crate::models::ColumnKind;

/// One loaded sheet: cleaned headers, one classification tag and one typed
/// series per column. `kinds[i]` describes `df` column `i`.
#[derive(Debug)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub kinds: Vec<ColumnKind>,
    pub df: DataFrame,
}

/// The whole input workbook, loaded once and read-only for the run.
#[derive(Debug)]
pub struct Workbook {
    pub file_name: String,
    pub sheets: Vec<Sheet>,
}

/// Load an xlsx workbook into memory.
///
/// A missing or unparseable file is fatal. A sheet whose range cannot be
/// read or materialized is logged and skipped; the run continues with the
/// remaining sheets.
pub fn load_workbook(path: &Path) -> Result<Workbook, AnalyzeError> {
    if !path.exists() {
        return Err(AnalyzeError::Input(format!(
            "input file not found: {}",
            path.display()
        )));
    }

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        AnalyzeError::Input(format!("failed to open workbook {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::info!("found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = match workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!("skipping unreadable sheet {}: {}", sheet_name, e);
                continue;
            }
        };

        let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
        match build_sheet(sheet_name, &rows) {
            Ok(sheet) => {
                tracing::info!(
                    "loaded sheet {} ({} rows, {} columns)",
                    sheet.name,
                    sheet.df.height(),
                    sheet.headers.len()
                );
                sheets.push(sheet);
            }
            Err(e) => {
                tracing::warn!("skipping sheet {}: {}", sheet_name, e);
            }
        }
    }

    Ok(Workbook { file_name, sheets })
}

/// Materialize one sheet from its raw cell rows. The first row is the
/// header; each data column becomes a series typed by its classification.
pub fn build_sheet(name: &str, rows: &[Vec<Data>]) -> PolarsResult<Sheet> {
    let mut existing_names = HashSet::new();
    let headers: Vec<String> = rows
        .first()
        .map(|row| {
            row.iter()
                .map(|cell| clean_column_name(&cell.to_string(), &mut existing_names))
                .collect()
        })
        .unwrap_or_default();

    let mut kinds = Vec::with_capacity(headers.len());
    let mut columns = Vec::with_capacity(headers.len());

    for (col_idx, header) in headers.iter().enumerate() {
        let values: Vec<Data> = rows
            .iter()
            .skip(1)
            .map(|row| row.get(col_idx).cloned().unwrap_or(Data::Empty))
            .collect();

        let kind = classify_column(&values);
        let series = match kind {
            ColumnKind::Numeric => {
                let nums: Vec<Option<f64>> = values
                    .iter()
                    .map(|v| match v {
                        Data::Float(f) => Some(*f),
                        Data::Int(i) => Some(*i as f64),
                        _ => None,
                    })
                    .collect();
                Series::new(header, nums)
            }
            ColumnKind::DateTime => {
                let stamps: Vec<Option<i64>> = values
                    .iter()
                    .map(|v| match v {
                        Data::DateTime(d) => {
                            Some(classify::excel_serial_to_unix_seconds(d.as_f64()))
                        }
                        Data::DateTimeIso(s) | Data::String(s) => classify::parse_date_string(s)
                            .map(|dt| dt.and_utc().timestamp()),
                        _ => None,
                    })
                    .collect();
                Series::new(header, stamps)
            }
            ColumnKind::Other => {
                let strings: Vec<Option<String>> = values
                    .iter()
                    .map(|v| match v {
                        Data::Empty => None,
                        _ => Some(v.to_string()),
                    })
                    .collect();
                Series::new(header, strings)
            }
        };

        kinds.push(kind);
        columns.push(series);
    }

    let df = DataFrame::new(columns)?;
    Ok(Sheet {
        name: name.to_string(),
        headers,
        kinds,
        df,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<Data> {
        cells.iter().map(|c| Data::String((*c).to_string())).collect()
    }

    #[test]
    fn missing_input_is_an_input_error() {
        let err = load_workbook(Path::new("/no/such/workbook.xlsx")).unwrap_err();
        assert!(matches!(err, AnalyzeError::Input(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn sheet_columns_are_typed_by_classification() {
        let rows = vec![
            header(&["Amount", "Posted", "Memo"]),
            vec![
                Data::Float(120.5),
                Data::String("2024-01-02".into()),
                Data::String("opening".into()),
            ],
            vec![Data::Int(99), Data::String("2024-01-03".into()), Data::Empty],
        ];
        let sheet = build_sheet("JE", &rows).unwrap();

        assert_eq!(sheet.headers, vec!["amount", "posted", "memo"]);
        assert_eq!(
            sheet.kinds,
            vec![ColumnKind::Numeric, ColumnKind::DateTime, ColumnKind::Other]
        );
        assert_eq!(sheet.df.height(), 2);
        assert_eq!(sheet.df.get_columns()[2].null_count(), 1);
    }

    #[test]
    fn ragged_rows_pad_with_nulls() {
        let rows = vec![
            header(&["a", "b"]),
            vec![Data::Float(1.0)],
            vec![Data::Float(2.0), Data::Float(3.0)],
        ];
        let sheet = build_sheet("s", &rows).unwrap();
        assert_eq!(sheet.df.get_columns()[1].null_count(), 1);
    }

    #[test]
    fn empty_sheet_loads_with_no_columns() {
        let sheet = build_sheet("empty", &[]).unwrap();
        assert_eq!(sheet.df.height(), 0);
        assert!(sheet.headers.is_empty());
    }
}
