//! Hiring-pool domain model
//!
//! A `Candidate` is one row of a pool's candidate roster. The column ids
//! used here are the ones the console's table, view links and CSV exports
//! all share.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::row::TableRow;

/// Column ids of the candidate roster.
pub mod columns {
    pub const STATUS: &str = "status";
    pub const PRIORITY: &str = "priority";
    pub const CANDIDACY: &str = "candidacy";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const CITY: &str = "city";
    pub const POOL: &str = "pool";
    pub const SUBMITTED_AT: &str = "submitted_at";
    pub const NOTES: &str = "notes";
}

/// Where a candidate sits in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    NewApplication,
    ApplicationReview,
    ScreenedIn,
    ScreenedOut,
    UnderAssessment,
    QualifiedAvailable,
    Placed,
    Expired,
}

impl CandidateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateStatus::NewApplication => "New application",
            CandidateStatus::ApplicationReview => "Application review",
            CandidateStatus::ScreenedIn => "Screened in",
            CandidateStatus::ScreenedOut => "Screened out",
            CandidateStatus::UnderAssessment => "Under assessment",
            CandidateStatus::QualifiedAvailable => "Qualified available",
            CandidateStatus::Placed => "Placed",
            CandidateStatus::Expired => "Expired",
        }
    }

    pub const ALL: [CandidateStatus; 8] = [
        CandidateStatus::NewApplication,
        CandidateStatus::ApplicationReview,
        CandidateStatus::ScreenedIn,
        CandidateStatus::ScreenedOut,
        CandidateStatus::UnderAssessment,
        CandidateStatus::QualifiedAvailable,
        CandidateStatus::Placed,
        CandidateStatus::Expired,
    ];
}

/// Hiring priority category, highest entitlement first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityCategory {
    PriorityEntitlement,
    Veteran,
    CitizenOrResident,
    Other,
}

impl PriorityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityCategory::PriorityEntitlement => "Priority entitlement",
            PriorityCategory::Veteran => "Veteran",
            PriorityCategory::CitizenOrResident => "Citizen or resident",
            PriorityCategory::Other => "Other",
        }
    }

    pub const ALL: [PriorityCategory; 4] = [
        PriorityCategory::PriorityEntitlement,
        PriorityCategory::Veteran,
        PriorityCategory::CitizenOrResident,
        PriorityCategory::Other,
    ];

    /// Stable sort weight; lower sorts first.
    fn weight(&self) -> u8 {
        match self {
            PriorityCategory::PriorityEntitlement => 1,
            PriorityCategory::Veteran => 2,
            PriorityCategory::CitizenOrResident => 3,
            PriorityCategory::Other => 4,
        }
    }
}

/// One row of a pool's candidate roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub pool: String,
    pub status: CandidateStatus,
    pub priority: PriorityCategory,
    pub submitted_at: NaiveDate,
    /// Set while the candidate has suspended their availability.
    pub suspended_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "Active" unless the candidate has suspended their availability.
    pub fn candidacy(&self) -> &'static str {
        if self.suspended_at.is_some() {
            "Suspended"
        } else {
            "Active"
        }
    }
}

impl TableRow for Candidate {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell_text(&self, column_id: &str) -> Option<String> {
        match column_id {
            columns::STATUS => Some(self.status.label().to_string()),
            columns::PRIORITY => Some(self.priority.label().to_string()),
            columns::CANDIDACY => Some(self.candidacy().to_string()),
            columns::NAME => Some(self.full_name()),
            columns::EMAIL => Some(self.email.clone()),
            columns::CITY => Some(self.city.clone()),
            columns::POOL => Some(self.pool.clone()),
            // ISO dates; also what sorting wants.
            columns::SUBMITTED_AT => Some(self.submitted_at.format("%Y-%m-%d").to_string()),
            columns::NOTES => Some(self.notes.clone().unwrap_or_default()),
            _ => None,
        }
    }

    fn sort_text(&self, column_id: &str) -> Option<String> {
        match column_id {
            // Entitlement order, not alphabetical label order.
            columns::PRIORITY => Some(self.priority.weight().to_string()),
            _ => self.cell_text(column_id),
        }
    }
}
