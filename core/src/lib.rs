pub mod count;
pub mod documents;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sheet;
pub mod text;

pub use error::{Result, RunError};
pub use model::{CellValue, CountTable, ReportRow, WordEntry};
pub use pipeline::{run, spawn_run, spawn_run_with, Completion, RunConfig, RunEvent, RunHandle, RunOutcome};
