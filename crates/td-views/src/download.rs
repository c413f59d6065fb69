//! Download trigger
//!
//! The download control comes in distinct variants, resolved by pattern
//! match: a CSV export of the current selection, or a caller-supplied
//! document download. The trigger is disabled while a download is already
//! running.

/// What clicking the trigger means.
#[derive(Debug, Clone)]
pub enum DownloadStrategy {
    /// Export the currently selected rows as CSV.
    SelectionCsv,
    /// A caller-supplied document download.
    Document { label: String },
}

/// Descriptor for the download control.
#[derive(Debug, Clone)]
pub struct DownloadTrigger {
    pub enable: bool,
    pub downloading: bool,
    pub strategy: DownloadStrategy,
}

impl DownloadTrigger {
    pub fn selection_csv() -> Self {
        Self {
            enable: true,
            downloading: false,
            strategy: DownloadStrategy::SelectionCsv,
        }
    }

    pub fn document(label: impl Into<String>) -> Self {
        Self {
            enable: true,
            downloading: false,
            strategy: DownloadStrategy::Document {
                label: label.into(),
            },
        }
    }

    pub fn downloading(mut self, downloading: bool) -> Self {
        self.downloading = downloading;
        self
    }

    fn label(&self) -> String {
        match &self.strategy {
            DownloadStrategy::SelectionCsv => {
                format!("{} Download CSV", td_ui::icons::DOWNLOAD)
            }
            DownloadStrategy::Document { label } => {
                format!("{} {label}", td_ui::icons::DOWNLOAD)
            }
        }
    }

    /// Render the trigger; returns true when it was clicked.
    pub fn show(&self, ui: &mut egui::Ui) -> bool {
        let enabled = self.enable && !self.downloading;
        let mut clicked = false;
        ui.horizontal(|ui| {
            if self.downloading {
                ui.spinner();
            }
            clicked = ui
                .add_enabled(enabled, egui::Button::new(self.label()))
                .clicked();
        });
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_by_variant() {
        let csv = DownloadTrigger::selection_csv();
        assert!(csv.label().contains("Download CSV"));

        let doc = DownloadTrigger::document("Profile document");
        assert!(doc.label().contains("Profile document"));
    }
}
