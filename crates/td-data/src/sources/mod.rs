//! Roster sources

mod csv_roster;

pub use csv_roster::CsvRosterSource;

use async_trait::async_trait;

use crate::model::Candidate;
use crate::DataError;

/// A source the console can load a candidate roster from.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Load the full roster.
    async fn load(&self) -> Result<Vec<Candidate>, DataError>;

    /// Name shown in logs and the status line.
    fn source_name(&self) -> &str;
}
