/// Literature-standard minimum sample size for a meaningful Benford check.
pub const DEFAULT_BENFORD_MIN_SAMPLES: usize = 10;

/// Run-level policy knobs. Everything else about a run is pure function of
/// the loaded workbook.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Minimum count of eligible values (non-null, |v| >= 1) a numeric
    /// column needs before Benford analysis is attempted.
    pub benford_min_samples: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            benford_min_samples: DEFAULT_BENFORD_MIN_SAMPLES,
        }
    }
}
