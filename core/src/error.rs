use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunError>;

/// Failure of a counting run. Every variant aborts the whole run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("cannot read word list {}: {message}", path.display())]
    InputFormat { path: PathBuf, message: String },

    #[error("cannot read document {}: {message}", path.display())]
    DocumentRead { path: PathBuf, message: String },

    #[error("cannot write report {}: {message}", path.display())]
    OutputWrite { path: PathBuf, message: String },
}

impl RunError {
    pub fn input_format(path: &Path, message: impl ToString) -> Self {
        RunError::InputFormat { path: path.to_path_buf(), message: message.to_string() }
    }

    pub fn document_read(path: &Path, message: impl ToString) -> Self {
        RunError::DocumentRead { path: path.to_path_buf(), message: message.to_string() }
    }

    pub fn output_write(path: &Path, message: impl ToString) -> Self {
        RunError::OutputWrite { path: path.to_path_buf(), message: message.to_string() }
    }
}
