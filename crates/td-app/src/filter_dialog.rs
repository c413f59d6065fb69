//! Candidate filter dialog
//!
//! The typed filter form for the candidates table. Applying it produces two
//! things: the opaque JSON payload stored in the filter cell (and mirrored
//! into view links), and the row predicate the client-side engine runs.

use serde::{Deserialize, Serialize};

use td_core::state::{FilterState, StateUpdate, TableState};
use td_data::{Candidate, CandidateStatus, PriorityCategory, RowPredicate};

/// Typed filter selections. Empty selections mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilters {
    #[serde(default)]
    pub statuses: Vec<CandidateStatus>,
    #[serde(default)]
    pub priorities: Vec<PriorityCategory>,
    #[serde(default)]
    pub pools: Vec<String>,
}

impl CandidateFilters {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.priorities.is_empty() && self.pools.is_empty()
    }

    /// The opaque payload stored in the filter cell; `None` when nothing is
    /// restricted, so an unfiltered table stays out of view links.
    pub fn to_payload(&self) -> FilterState {
        if self.is_empty() {
            None
        } else {
            serde_json::to_value(self).ok()
        }
    }

    /// Recover typed filters from a view link's payload. Unreadable payloads
    /// mean no restriction, mirroring the codec's fail-soft policy.
    pub fn from_payload(payload: &FilterState) -> Self {
        payload
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }

    /// The predicate the engine runs; `None` when nothing is restricted.
    pub fn predicate(&self) -> Option<RowPredicate<Candidate>> {
        if self.is_empty() {
            return None;
        }
        let filters = self.clone();
        Some(Box::new(move |candidate: &Candidate| {
            (filters.statuses.is_empty() || filters.statuses.contains(&candidate.status))
                && (filters.priorities.is_empty()
                    || filters.priorities.contains(&candidate.priority))
                && (filters.pools.is_empty() || filters.pools.contains(&candidate.pool))
        }))
    }
}

/// Modal-ish window hosting the filter form.
pub struct FilterDialog {
    pub open: bool,
    draft: CandidateFilters,
}

impl FilterDialog {
    pub fn new(current: CandidateFilters) -> Self {
        Self {
            open: false,
            draft: current,
        }
    }

    /// Show the dialog. Returns the applied filters when the user hits
    /// "Apply filters" or "Clear all"; the caller owns the live copy.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        state: &TableState,
        pools: &[String],
    ) -> Option<CandidateFilters> {
        if !self.open {
            return None;
        }

        let mut applied = None;
        let mut open = self.open;

        egui::Window::new("Filter candidates")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label("Status");
                for status in CandidateStatus::ALL {
                    let mut on = self.draft.statuses.contains(&status);
                    if ui.checkbox(&mut on, status.label()).clicked() {
                        toggle(&mut self.draft.statuses, status, on);
                    }
                }

                ui.separator();
                ui.label("Priority category");
                for priority in PriorityCategory::ALL {
                    let mut on = self.draft.priorities.contains(&priority);
                    if ui.checkbox(&mut on, priority.label()).clicked() {
                        toggle(&mut self.draft.priorities, priority, on);
                    }
                }

                ui.separator();
                ui.label("Pool");
                for pool in pools {
                    let mut on = self.draft.pools.contains(pool);
                    if ui.checkbox(&mut on, pool).clicked() {
                        toggle(&mut self.draft.pools, pool.clone(), on);
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Apply filters").clicked() {
                        state.update_filters(StateUpdate::Set(self.draft.to_payload()));
                        applied = Some(self.draft.clone());
                    }
                    if ui.button("Clear all").clicked() {
                        self.draft = CandidateFilters::default();
                        state.update_filters(StateUpdate::Set(None));
                        applied = Some(self.draft.clone());
                    }
                });
            });

        self.open = open && applied.is_none();
        applied
    }
}

fn toggle<T: PartialEq>(list: &mut Vec<T>, value: T, on: bool) {
    if on {
        if !list.contains(&value) {
            list.push(value);
        }
    } else {
        list.retain(|v| v != &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_produce_no_payload_and_no_predicate() {
        let filters = CandidateFilters::default();
        assert_eq!(filters.to_payload(), None);
        assert!(filters.predicate().is_none());
    }

    #[test]
    fn payload_round_trips_through_json() {
        let filters = CandidateFilters {
            statuses: vec![CandidateStatus::QualifiedAvailable],
            priorities: vec![PriorityCategory::Veteran],
            pools: vec!["Digital Talent".to_string()],
        };

        let payload = filters.to_payload();
        assert!(payload.is_some());
        assert_eq!(CandidateFilters::from_payload(&payload), filters);
    }

    #[test]
    fn unreadable_payload_falls_back_to_no_restriction() {
        let payload = Some(serde_json::json!(["not", "an", "object"]));
        assert_eq!(CandidateFilters::from_payload(&payload), CandidateFilters::default());
    }

    #[test]
    fn predicate_restricts_each_dimension() {
        let mut candidate = crate::demo::demo_roster(1).remove(0);
        candidate.status = CandidateStatus::Placed;
        candidate.pool = "Digital Talent".to_string();

        let filters = CandidateFilters {
            statuses: vec![CandidateStatus::Placed],
            priorities: Vec::new(),
            pools: vec!["Digital Talent".to_string()],
        };
        let predicate = filters.predicate().expect("non-empty filters");
        assert!(predicate(&candidate));

        candidate.pool = "IT Apprenticeship".to_string();
        assert!(!predicate(&candidate));
    }
}
