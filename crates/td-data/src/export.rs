//! CSV export of selected rows
//!
//! Writes whatever the user selected, in the table's visible column order,
//! with one header row. The caller resolves selected ids against the
//! current roster first; ids that no longer resolve are simply absent from
//! `rows`.

use std::path::Path;

use crate::row::TableRow;
use crate::DataError;

/// One exported column: the row column id and the human header.
#[derive(Debug, Clone)]
pub struct ExportColumn {
    pub id: String,
    pub header: String,
}

impl ExportColumn {
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
        }
    }
}

/// Write `rows` as CSV to `path`, returning how many rows were written.
pub fn export_rows_csv<T: TableRow>(
    path: &Path,
    columns: &[ExportColumn],
    rows: &[&T],
) -> Result<usize, DataError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(columns.iter().map(|c| c.header.as_str()))?;
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|c| row.cell_text(&c.id).unwrap_or_default()),
        )?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = rows.len(), "exported selection");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, &'static str);

    impl TableRow for Pair {
        fn row_id(&self) -> String {
            self.0.to_string()
        }

        fn cell_text(&self, column_id: &str) -> Option<String> {
            match column_id {
                "name" => Some(self.1.to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn writes_header_and_visible_columns_only() {
        let mut path = std::env::temp_dir();
        path.push(format!("export-{}.csv", std::process::id()));

        let rows = [Pair("1", "Sam"), Pair("2", "Alex, Jr.")];
        let refs: Vec<&Pair> = rows.iter().collect();
        let columns = [
            ExportColumn::new("name", "Name"),
            ExportColumn::new("missing", "Missing"),
        ];

        let written = export_rows_csv(&path, &columns, &refs).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(written, 2);
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Name,Missing"));
        assert_eq!(lines.next(), Some("Sam,"));
        // Values containing commas are quoted.
        assert_eq!(lines.next(), Some("\"Alex, Jr.\","));
    }
}
