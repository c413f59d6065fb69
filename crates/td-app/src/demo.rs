//! Demo roster
//!
//! Generates a synthetic candidate roster so the console works out of the
//! box without a CSV file.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use td_data::{Candidate, CandidateStatus, PriorityCategory};

const FIRST_NAMES: [&str; 12] = [
    "Sam", "Alex", "Maya", "Noah", "Priya", "Louis", "Fatima", "Erik", "Jade", "Omar", "Chloe",
    "Ravi",
];

const LAST_NAMES: [&str; 12] = [
    "Levesque", "Tran", "Okafor", "Martin", "Singh", "Gagnon", "Haddad", "Larsen", "Roy",
    "Farouk", "Bergeron", "Patel",
];

const CITIES: [&str; 8] = [
    "Ottawa", "Gatineau", "Toronto", "Halifax", "Vancouver", "Winnipeg", "Montreal", "Victoria",
];

const POOLS: [&str; 4] = [
    "IT Apprenticeship",
    "Digital Talent",
    "Executive Leadership",
    "Administrative Services",
];

/// Build a deterministic-looking roster of `count` candidates.
pub fn demo_roster(count: usize) -> Vec<Candidate> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap_or_default();

    (0..count)
        .map(|idx| {
            let first = FIRST_NAMES[idx % FIRST_NAMES.len()];
            let last = LAST_NAMES[(idx / FIRST_NAMES.len() + idx) % LAST_NAMES.len()];
            let status = CandidateStatus::ALL[idx % CandidateStatus::ALL.len()];
            let priority = PriorityCategory::ALL[(idx / 3) % PriorityCategory::ALL.len()];

            // Roughly one in nine candidates has suspended their availability.
            let suspended_at = (idx % 9 == 4).then(|| {
                Utc.with_ymd_and_hms(2024, 6, 1 + (idx % 27) as u32, 12, 0, 0)
                    .single()
                    .unwrap_or_default()
            });

            Candidate {
                id: Uuid::new_v4(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!(
                    "{}.{}{}@example.ca",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    idx
                ),
                city: CITIES[(idx * 5 + 1) % CITIES.len()].to_string(),
                pool: POOLS[idx % POOLS.len()].to_string(),
                status,
                priority,
                submitted_at: base_date + Duration::days((idx % 160) as i64),
                suspended_at,
                notes: (idx % 7 == 2).then(|| "Follow-up interview booked".to_string()),
            }
        })
        .collect()
}
