//! Data handling for the talentdesk table console
//!
//! Rows, the client-side query engine (search/sort/filter/pagination for
//! internally-managed tables), roster sources and CSV export. The table
//! core treats all of this as its data-fetching collaborator: it only ever
//! sees `QueryResult`-shaped values and stable row ids.

pub mod engine;
pub mod export;
pub mod model;
pub mod row;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use engine::{apply_view, normalize_text, RowPredicate, ViewRows};
pub use export::{export_rows_csv, ExportColumn};
pub use model::{Candidate, CandidateStatus, PriorityCategory};
pub use row::{QueryResult, TableRow};
pub use sources::{CsvRosterSource, RosterSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("invalid record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
