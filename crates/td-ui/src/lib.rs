//! User interface chrome for the talentdesk console
//!
//! This crate provides the theme, toast notifications and small widget
//! helpers shared by the table views and the app shell.

pub mod theme;
pub mod toast;
pub mod widget_utils;

/// Re-export commonly used types
pub use theme::{accent_color, apply_theme, error_color, success_color, warning_color, Theme};
pub use toast::{ToastKind, Toasts};
pub use widget_utils::{widget_id, ScrollAreaExt, WidgetId};

/// Small icon button with a hover tooltip.
pub fn icon_button(ui: &mut egui::Ui, icon: &str, tooltip: &str) -> egui::Response {
    ui.add(egui::Button::new(icon)).on_hover_text(tooltip)
}

// Common icon definitions
pub mod icons {
    pub const SEARCH: &str = "🔍";
    pub const COLUMNS: &str = "⚙";
    pub const FILTER: &str = "⛭";
    pub const DOWNLOAD: &str = "⬇";
    pub const CLEAR: &str = "✖";
    pub const SORT_ASC: &str = "⬆";
    pub const SORT_DESC: &str = "⬇";
    pub const LINK: &str = "🔗";
}
