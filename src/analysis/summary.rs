use polars::prelude::*;

use crate::excel::classify::format_unix_seconds;
use crate::excel::Sheet;
use crate::models::{ColumnKind, ColumnStats, DateRange, DescribeStats, SheetSummary};

/// Aggregate one sheet. Every loaded column yields exactly one
/// `ColumnStats`; a column whose aggregation fails keeps its counts but has
/// its typed stats omitted.
pub fn summarize_sheet(sheet: &Sheet) -> SheetSummary {
    let column_stats = sheet
        .headers
        .iter()
        .zip(&sheet.kinds)
        .zip(sheet.df.get_columns())
        .map(|((name, kind), series)| summarize_column(&sheet.name, name, *kind, series))
        .collect();

    SheetSummary {
        sheet: sheet.name.clone(),
        row_count: sheet.df.height(),
        column_count: sheet.headers.len(),
        column_stats,
    }
}

fn summarize_column(sheet: &str, name: &str, kind: ColumnKind, series: &Series) -> ColumnStats {
    let null_count = series.null_count();
    let count = series.len() - null_count;

    let unique_count = match series.n_unique() {
        // polars counts null as one distinct value; the report wants
        // distinct non-missing values only.
        Ok(n) => n.saturating_sub(usize::from(null_count > 0)),
        Err(e) => {
            tracing::warn!("sheet {} column {}: unique count failed: {}", sheet, name, e);
            0
        }
    };

    let describe = match kind {
        ColumnKind::Numeric => match numeric_describe(series, count) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("sheet {} column {}: describe failed: {}", sheet, name, e);
                None
            }
        },
        _ => None,
    };

    let date_range = match kind {
        ColumnKind::DateTime => date_range(series, count),
        _ => None,
    };

    ColumnStats {
        name: name.to_string(),
        dtype: kind,
        count,
        null_count,
        unique_count,
        describe,
        date_range,
    }
}

/// Standard describe set over the non-null values, quartiles linearly
/// interpolated. `count == 0` yields no stats rather than NaN noise.
fn numeric_describe(series: &Series, count: usize) -> PolarsResult<Option<DescribeStats>> {
    if count == 0 {
        return Ok(None);
    }
    let ca = series.f64()?;

    let (Some(mean), Some(min), Some(max)) = (ca.mean(), ca.min(), ca.max()) else {
        return Ok(None);
    };
    let (Some(p25), Some(median), Some(p75)) = (
        ca.quantile(0.25, QuantileInterpolOptions::Linear)?,
        ca.quantile(0.50, QuantileInterpolOptions::Linear)?,
        ca.quantile(0.75, QuantileInterpolOptions::Linear)?,
    ) else {
        return Ok(None);
    };

    Ok(Some(DescribeStats {
        count,
        mean,
        std: ca.std(1),
        min,
        p25,
        median,
        p75,
        max,
    }))
}

fn date_range(series: &Series, count: usize) -> Option<DateRange> {
    if count == 0 {
        return None;
    }
    let ca = series.i64().ok()?;
    let min = format_unix_seconds(ca.min()?)?;
    let max = format_unix_seconds(ca.max()?)?;
    Some(DateRange {
        non_null: count,
        min,
        max,
    })
}
