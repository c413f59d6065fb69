//! CSV roster source
//!
//! Loads a candidate roster from a CSV file with one record per candidate.
//! Parsing happens on a blocking task so large rosters never stall the UI
//! thread.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use uuid::Uuid;

use super::RosterSource;
use crate::model::{Candidate, CandidateStatus, PriorityCategory};
use crate::DataError;

/// CSV source for candidate rosters.
pub struct CsvRosterSource {
    path: PathBuf,
    name: String,
}

/// Wire format of one roster record.
#[derive(Debug, Deserialize)]
struct RosterRecord {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    city: String,
    pool: String,
    status: CandidateStatus,
    priority: PriorityCategory,
    submitted_at: NaiveDate,
    #[serde(default)]
    suspended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<RosterRecord> for Candidate {
    fn from(record: RosterRecord) -> Self {
        Candidate {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            city: record.city,
            pool: record.pool,
            status: record.status,
            priority: record.priority,
            submitted_at: record.submitted_at,
            suspended_at: record.suspended_at,
            notes: record.notes.filter(|n| !n.is_empty()),
        }
    }
}

impl CsvRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    fn read_roster(path: &Path) -> Result<Vec<Candidate>, DataError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

        let mut candidates = Vec::new();
        for (idx, result) in reader.deserialize::<RosterRecord>().enumerate() {
            // Header is line 1; records start on line 2.
            let line = idx + 2;
            let record = result.map_err(|err| DataError::InvalidRecord {
                line,
                message: err.to_string(),
            })?;
            candidates.push(record.into());
        }

        tracing::info!(
            path = %path.display(),
            rows = candidates.len(),
            "loaded candidate roster"
        );
        Ok(candidates)
    }
}

#[async_trait]
impl RosterSource for CsvRosterSource {
    async fn load(&self) -> Result<Vec<Candidate>, DataError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_roster(&path)).await?
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("roster-{}.csv", Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "id,first_name,last_name,email,city,pool,status,priority,submitted_at,suspended_at,notes";

    #[tokio::test]
    async fn loads_a_well_formed_roster() {
        let path = write_temp_csv(&format!(
            "{HEADER}\n\
             7e2f1a30-9c4f-4f4e-8f59-27bfe4a4a1bd,Sam,Levesque,sam@example.ca,Ottawa,IT Apprenticeship,NEW_APPLICATION,OTHER,2024-03-01,,\n\
             3f8f1f9c-51be-4a9e-a68e-a9b2ed5cf00a,Alex,Tran,alex@example.ca,Halifax,Digital Talent,PLACED,VETERAN,2024-01-15,,Shortlisted twice\n"
        ));

        let source = CsvRosterSource::new(&path);
        let roster = source.load().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].full_name(), "Sam Levesque");
        assert_eq!(roster[0].notes, None);
        assert_eq!(roster[1].status, CandidateStatus::Placed);
        assert_eq!(roster[1].notes.as_deref(), Some("Shortlisted twice"));
    }

    #[tokio::test]
    async fn a_bad_record_reports_its_line() {
        let path = write_temp_csv(&format!(
            "{HEADER}\n\
             not-a-uuid,Sam,Levesque,sam@example.ca,Ottawa,IT,NEW_APPLICATION,OTHER,2024-03-01,,\n"
        ));

        let source = CsvRosterSource::new(&path);
        let err = source.load().await.unwrap_err();
        std::fs::remove_file(&path).ok();

        match err {
            DataError::InvalidRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
