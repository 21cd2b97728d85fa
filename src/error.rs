use thiserror::Error;

/// Fatal error taxonomy for a run.
///
/// Column- and sheet-level compute failures are not represented here: they
/// are logged, the affected stats omitted, and the run continues.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Input file missing, unreadable, or not a parseable workbook.
    #[error("input error: {0}")]
    Input(String),

    /// Output directory or report file could not be created/written.
    #[error("output error: {0}")]
    OutputWrite(String),
}
