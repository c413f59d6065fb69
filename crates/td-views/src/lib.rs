//! Table presentation for the talentdesk console
//!
//! Pure rendering driven by the `td-core` state stores: the table itself,
//! the search form, the pagination bar, the column-visibility control and
//! the download trigger. These components read state and call updaters;
//! none of them keeps a divergent copy of the view state.

mod column;
mod download;
mod pagination;
mod search;
mod table_view;

pub use column::{
    column_visibility_menu, export_columns, search_column_ids, visible_columns, ColumnDef,
};
pub use download::{DownloadStrategy, DownloadTrigger};
pub use pagination::{pagination_bar, PageInfo};
pub use search::SearchForm;
pub use table_view::{selection_bar, show_table, TableFrame};
