use serde::Serialize;

/// Classification assigned to every column before any statistic is computed.
/// Mixed-type columns fall back to `Other` so no spurious numeric stats are
/// produced for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    DateTime,
    Other,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::DateTime => "datetime",
            ColumnKind::Other => "other",
        }
    }
}

/// Standard describe set for a numeric column. `std` is `None` when fewer
/// than two values are present (sample standard deviation is undefined).
#[derive(Debug, Clone, Serialize)]
pub struct DescribeStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

/// Observed date extent of a datetime column, ISO-8601 formatted.
#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub non_null: usize,
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub dtype: ColumnKind,
    pub count: usize,
    pub null_count: usize,
    pub unique_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub describe: Option<DescribeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    #[serde(skip_serializing)]
    pub sheet: String,
    pub row_count: usize,
    pub column_count: usize,
    pub column_stats: Vec<ColumnStats>,
}

/// Benford's Law digit distribution for one eligible numeric column.
/// Nine digit categories give 8 degrees of freedom for the chi-square.
#[derive(Debug, Clone)]
pub struct BenfordResult {
    pub sheet: String,
    pub column: String,
    pub total_values: usize,
    pub observed: [u64; 9],
    pub expected: [f64; 9],
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
}

/// Everything a run computes, in workbook sheet order.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub workbook: String,
    pub sheets: Vec<SheetSummary>,
    pub benford: Vec<BenfordResult>,
}
