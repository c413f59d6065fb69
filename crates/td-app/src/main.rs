//! Talentdesk console entry point
//!
//! An admin console for browsing hiring-pool candidate rosters: one
//! candidates table with search, sort, filters, pagination, column
//! visibility and row selection, all mirrored into a shareable view link.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use eframe::egui;
use eframe::egui::RichText;
use parking_lot::{Mutex, RwLock};
use tracing::info;

use td_core::announce::{CountAnnouncer, ANNOUNCE_DELAY};
use td_core::controller::{TableController, TableOptions};
use td_core::events::{events, handler_from_fn, EventBus};
use td_core::state::{SortRule, TableState, TableViewState};
use td_core::sync::{Location, MemoryLocation};
use td_data::model::columns;
use td_data::{
    apply_view, export_rows_csv, Candidate, CsvRosterSource, QueryResult, RosterSource, TableRow,
};
use td_ui::{icons, Toasts};
use td_views::{
    column_visibility_menu, export_columns, pagination_bar, search_column_ids, selection_bar,
    show_table, ColumnDef, DownloadTrigger, PageInfo, SearchForm, TableFrame,
};

mod demo;
mod filter_dialog;

use filter_dialog::{CandidateFilters, FilterDialog};

/// Column set of the candidates table.
fn candidate_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new(columns::STATUS, "Status"),
        ColumnDef::new(columns::PRIORITY, "Category"),
        ColumnDef::new(columns::CANDIDACY, "Candidacy"),
        ColumnDef::new(columns::NAME, "Candidate name").always_visible(),
        ColumnDef::new(columns::EMAIL, "Email"),
        ColumnDef::new(columns::CITY, "Current city"),
        ColumnDef::new(columns::POOL, "Pool"),
        ColumnDef::new(columns::SUBMITTED_AT, "Date received"),
        ColumnDef::new(columns::NOTES, "Notes").not_sortable(),
    ]
}

/// Main application state
struct TalentdeskApp {
    /// Tokio runtime backing roster loads; kept alive for the app lifetime
    _runtime: tokio::runtime::Runtime,

    /// The navigable location view state is mirrored into
    location: Arc<MemoryLocation>,

    /// Table state, selection and synchronization for the candidates table
    controller: TableController,

    columns: Vec<ColumnDef>,

    /// Latest roster fetch, shared with the load task
    roster: Arc<RwLock<QueryResult<Candidate>>>,

    /// Live copy of the typed filters behind the opaque filter payload
    filters: CandidateFilters,
    filter_dialog: FilterDialog,

    search_form: SearchForm,

    /// Debounced result-count announcements
    announcer: CountAnnouncer,
    live_status: Option<String>,

    bus: Arc<EventBus>,
    toasts: Arc<Mutex<Toasts>>,
}

impl TalentdeskApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        td_ui::apply_theme(&cc.egui_ctx, &td_ui::Theme::default());

        let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");

        // A fresh mount has an empty location; opening the app from a saved
        // view link would seed it here instead.
        let location = Arc::new(MemoryLocation::new());

        let initial = TableViewState {
            sort_state: vec![SortRule::desc(columns::SUBMITTED_AT)],
            ..Default::default()
        };
        let controller = TableController::mount(
            initial,
            location.clone(),
            TableOptions {
                url_sync: true,
                internal_pagination: true,
                on_sort_change: Some(Box::new(|sort| {
                    tracing::debug!(?sort, "sort state changed");
                })),
            },
        );

        let bus = Arc::new(EventBus::new());
        let toasts = Arc::new(Mutex::new(Toasts::new()));
        subscribe_app_events(&bus, &toasts);

        {
            let bus = bus.clone();
            controller.selection().on_selection(move |ids| {
                bus.publish(events::SelectionChanged {
                    selected: ids.to_vec(),
                });
            });
        }

        // The filter cell may have been seeded from a view link.
        let filters = CandidateFilters::from_payload(&controller.state().filters());
        let filter_dialog = FilterDialog::new(filters.clone());

        let columns = candidate_columns();
        let roster = Arc::new(RwLock::new(QueryResult::loading()));
        spawn_roster_load(
            &runtime,
            roster.clone(),
            bus.clone(),
            cc.egui_ctx.clone(),
            columns.len(),
        );

        Self {
            _runtime: runtime,
            location,
            controller,
            columns,
            roster,
            filters,
            filter_dialog,
            search_form: SearchForm::new(),
            announcer: CountAnnouncer::new(),
            live_status: None,
            bus,
            toasts,
        }
    }

    fn export_selection(&self, rows: &[Candidate], state: &TableState) {
        let ids = self.controller.selection().selected_ids();
        if ids.is_empty() {
            self.bus.publish(events::ExportBlocked);
            return;
        }

        // Stale ids (rows no longer in the roster) simply do not resolve.
        let id_set: HashSet<String> = ids.into_iter().collect();
        let selected: Vec<&Candidate> = rows
            .iter()
            .filter(|candidate| id_set.contains(&candidate.row_id()))
            .collect();

        let Some(path) = rfd::FileDialog::new()
            .set_title("Export selected candidates")
            .set_file_name("candidates.csv")
            .save_file()
        else {
            return;
        };

        let export_cols = export_columns(&self.columns, &state.hidden_columns());
        match export_rows_csv(&path, &export_cols, &selected) {
            Ok(count) => self.bus.publish(events::ExportFinished {
                row_count: count,
                path: path.display().to_string(),
            }),
            Err(err) => {
                tracing::error!(%err, "export failed");
                self.toasts.lock().error(format!("Export failed: {err}"));
            }
        }
    }
}

/// Route bus events into logs and toasts.
fn subscribe_app_events(bus: &Arc<EventBus>, toasts: &Arc<Mutex<Toasts>>) {
    {
        let toasts = toasts.clone();
        bus.subscribe::<events::RosterLoaded>(handler_from_fn(move |event| {
            if let Some(loaded) = event.as_any().downcast_ref::<events::RosterLoaded>() {
                info!(
                    source = %loaded.source_name,
                    rows = loaded.row_count,
                    columns = loaded.column_count,
                    "roster loaded"
                );
                toasts.lock().success(format!(
                    "Loaded {} candidates from {}",
                    loaded.row_count, loaded.source_name
                ));
            }
        }));
    }

    {
        let toasts = toasts.clone();
        bus.subscribe::<events::RosterLoadFailed>(handler_from_fn(move |event| {
            if let Some(failed) = event.as_any().downcast_ref::<events::RosterLoadFailed>() {
                tracing::error!(source = %failed.source_name, error = %failed.error, "roster load failed");
                toasts
                    .lock()
                    .error(format!("Could not load {}: {}", failed.source_name, failed.error));
            }
        }));
    }

    {
        let toasts = toasts.clone();
        bus.subscribe::<events::ExportBlocked>(handler_from_fn(move |_| {
            toasts
                .lock()
                .warning("Download failed: no rows selected. Select candidates first.");
        }));
    }

    {
        let toasts = toasts.clone();
        bus.subscribe::<events::ExportFinished>(handler_from_fn(move |event| {
            if let Some(finished) = event.as_any().downcast_ref::<events::ExportFinished>() {
                toasts.lock().success(format!(
                    "Exported {} candidates to {}",
                    finished.row_count, finished.path
                ));
            }
        }));
    }

    bus.subscribe::<events::SelectionChanged>(handler_from_fn(|event| {
        if let Some(change) = event.as_any().downcast_ref::<events::SelectionChanged>() {
            tracing::debug!(count = change.selected.len(), "selection changed");
        }
    }));

    bus.subscribe::<events::ResultCountAnnounced>(handler_from_fn(|event| {
        if let Some(announced) = event.as_any().downcast_ref::<events::ResultCountAnnounced>() {
            tracing::debug!(count = announced.count, "result count announced");
        }
    }));
}

/// Load the roster off the UI thread: a CSV path from the command line, or
/// the built-in demo roster.
fn spawn_roster_load(
    runtime: &tokio::runtime::Runtime,
    roster: Arc<RwLock<QueryResult<Candidate>>>,
    bus: Arc<EventBus>,
    egui_ctx: egui::Context,
    column_count: usize,
) {
    let arg_path = std::env::args().nth(1);
    runtime.spawn(async move {
        let (source_name, result) = match arg_path {
            Some(path) => {
                let source = CsvRosterSource::new(path);
                let name = source.source_name().to_string();
                let result = source.load().await;
                (name, result)
            }
            None => ("demo roster".to_string(), Ok(demo::demo_roster(250))),
        };

        match result {
            Ok(rows) => {
                bus.publish(events::RosterLoaded {
                    source_name,
                    row_count: rows.len(),
                    column_count,
                });
                *roster.write() = QueryResult::ready(rows);
            }
            Err(err) => {
                bus.publish(events::RosterLoadFailed {
                    source_name,
                    error: err.to_string(),
                });
                *roster.write() = QueryResult::ready(Vec::new());
            }
        }
        egui_ctx.request_repaint();
    });
}

impl eframe::App for TalentdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.controller.state().clone();
        let roster = self.roster.clone();
        let guard = roster.read();

        let predicate = self.filters.predicate();
        let search_ids = search_column_ids(&self.columns);
        let snapshot = state.snapshot();
        let view = apply_view(&guard.rows, &snapshot, &search_ids, predicate.as_ref());

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Hiring pool candidates");
                ui.separator();
                self.search_form.show(ui, &state, &self.columns);
                column_visibility_menu(ui, &state, &self.columns);
                if ui.button(format!("{} Filters", icons::FILTER)).clicked() {
                    self.filter_dialog.open = true;
                }
            });

            // The desktop analog of the shareable URL.
            ui.horizontal(|ui| {
                let query = self.location.query();
                let link = if query.is_empty() {
                    "talentdesk://candidates".to_string()
                } else {
                    format!("talentdesk://candidates?{query}")
                };
                ui.label(RichText::new("View link:").small().weak());
                ui.monospace(RichText::new(&link).small());
                if td_ui::icon_button(ui, icons::LINK, "Copy view link").clicked() {
                    ui.output_mut(|o| o.copied_text = link.clone());
                    self.toasts.lock().info("View link copied");
                }
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("table_footer").show(ctx, |ui| {
            ui.add_space(4.0);
            let download = DownloadTrigger::selection_csv();
            if selection_bar(ui, self.controller.selection(), &download) {
                self.export_selection(&guard.rows, &state);
            }
            pagination_bar(ui, &state, &PageInfo::from_view(&view));
            if let Some(status) = &self.live_status {
                ui.label(RichText::new(status).small().weak());
            }
            ui.add_space(4.0);
        });

        // "No rows and not loading" is all we know; a failed fetch and a
        // genuinely empty roster both land here.
        let empty_message = if guard.is_settled_and_empty() {
            "No candidates in this roster."
        } else {
            "No candidates match the current search and filters."
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            show_table(
                ui,
                &self.controller,
                &TableFrame {
                    columns: &self.columns,
                    view: &view,
                    is_loading: guard.is_loading,
                    empty_message,
                },
            );
        });

        let mut pools: Vec<String> = guard.rows.iter().map(|c| c.pool.clone()).collect();
        pools.sort();
        pools.dedup();
        if let Some(applied) = self.filter_dialog.show(ctx, &state, &pools) {
            self.filters = applied;
        }

        if !guard.is_loading {
            self.announcer.observe(view.filtered_count, Instant::now());
        }
        if let Some(count) = self.announcer.poll(Instant::now()) {
            self.live_status = Some(if count == 1 {
                "1 result".to_string()
            } else {
                format!("{count} results")
            });
            self.bus.publish(events::ResultCountAnnounced { count });
        }
        if self.announcer.has_pending() {
            ctx.request_repaint_after(ANNOUNCE_DELAY);
        }

        self.controller.maintain();
        self.toasts.lock().show(ctx);
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting talentdesk console");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Talentdesk",
        options,
        Box::new(|cc| Box::new(TalentdeskApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
