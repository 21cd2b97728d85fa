//! Batch analyzer for journal entry workbooks: per-sheet descriptive
//! statistics plus a Benford's Law leading-digit check over numeric columns.

pub mod analysis;
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod models;
pub mod report;
