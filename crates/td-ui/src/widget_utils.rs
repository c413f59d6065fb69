//! Widget utilities for managing IDs and preventing conflicts
//!
//! Table chrome repeats the same controls for every column and row; these
//! helpers build unique egui IDs so debug builds never trip over duplicate
//! widget IDs.

use egui::{Id, ScrollArea};
use std::fmt::Display;

/// Widget ID builder that ensures unique IDs by combining multiple components
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    /// Create a new widget ID builder
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Add an index to the ID (useful in loops)
    pub fn index(self, idx: usize) -> Self {
        self.with(format!("idx_{}", idx))
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }

    /// Create an egui ID from this widget ID
    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// Extension trait for ScrollArea to easily add unique IDs
pub trait ScrollAreaExt {
    /// Set the ID source using a WidgetId builder
    fn id_builder(self, builder: WidgetId) -> Self;
}

impl ScrollAreaExt for ScrollArea {
    fn id_builder(self, builder: WidgetId) -> Self {
        self.id_source(builder.build())
    }
}

/// Helper function to create a unique widget ID for a given context
///
/// # Example
/// ```ignore
/// for (idx, column) in columns.iter().enumerate() {
///     let checkbox_id = widget_id("column_toggle", idx);
/// }
/// ```
pub fn widget_id(base: impl Display, suffix: impl Display) -> String {
    format!("{}_{}", base, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_builder() {
        let id = WidgetId::new("candidates")
            .with("header")
            .index(5)
            .build();
        assert_eq!(id, "candidates_header_idx_5");
    }

    #[test]
    fn test_widget_id_helper() {
        let id = widget_id("row_select", 42);
        assert_eq!(id, "row_select_42");
    }
}
