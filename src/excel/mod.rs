pub mod classify;
pub mod loader;

pub use loader::{load_workbook, Sheet, Workbook};
