//! Listing - the notes table shown on the home screen
//!
//! Four columns: 1-based index, display name, last edit time, preview.

use tabled::settings::object::Segment;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::note::Note;

/// Default `strftime` pattern for the "Date Edited" column
pub const DEFAULT_TIME_FORMAT: &str = "%a %b %d @ %I:%M%p";

/// Default preview width in characters
pub const DEFAULT_PREVIEW_CHARS: usize = 50;

/// How notes are projected into table rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingStyle {
    pub time_format: String,
    pub preview_chars: usize,
}

impl Default for ListingStyle {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct NoteRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Date Edited")]
    pub edited: String,
    #[tabled(rename = "Content")]
    pub preview: String,
}

impl NoteRow {
    pub fn new(index: usize, note: &Note, style: &ListingStyle) -> Self {
        Self {
            index,
            name: note.display_name(),
            edited: note.edited_time().format(&style.time_format).to_string(),
            preview: note.preview(style.preview_chars),
        }
    }
}

/// Rows in collection order, numbered from 1
pub fn rows<'a>(notes: impl IntoIterator<Item = &'a Note>, style: &ListingStyle) -> Vec<NoteRow> {
    notes
        .into_iter()
        .enumerate()
        .map(|(i, note)| NoteRow::new(i + 1, note, style))
        .collect()
}

/// Render rows as a bordered, left-aligned table with a divider between rows
pub fn render(rows: Vec<NoteRow>) -> String {
    Table::new(rows)
        .with(Style::modern())
        .with(Modify::new(Segment::all()).with(Alignment::left()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn note(name: &str, content: &str) -> Note {
        Note::new(Path::new("."), "txt", name, content)
    }

    #[test]
    fn test_rows_are_numbered_from_one() {
        let notes = vec![note("a", "x"), note("b", "y")];
        let rows = rows(&notes, &ListingStyle::default());
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].name, "b");
    }

    #[test]
    fn test_row_projection() {
        let long = "z".repeat(60);
        let notes = vec![note("shopping_list", &long)];
        let row = &rows(&notes, &ListingStyle::default())[0];

        assert_eq!(row.name, "shopping list");
        assert_eq!(row.preview, format!("{}...", "z".repeat(50)));
        assert!(row.edited.contains('@'));
    }

    #[test]
    fn test_custom_style() {
        let notes = vec![note("n", "abcdef")];
        let style = ListingStyle {
            time_format: "%Y".to_string(),
            preview_chars: 3,
        };
        let row = &rows(&notes, &style)[0];
        assert_eq!(row.preview, "abc...");
        assert_eq!(row.edited.len(), 4);
    }

    #[test]
    fn test_render_has_headers_and_cells() {
        let notes = vec![note("shopping_list", "eggs")];
        let table = render(rows(&notes, &ListingStyle::default()));

        for header in ["#", "Name", "Date Edited", "Content"] {
            assert!(table.contains(header), "missing header {header}");
        }
        assert!(table.contains("shopping list"));
        assert!(table.contains("eggs"));
    }

    #[test]
    fn test_render_empty() {
        let table = render(Vec::new());
        assert!(table.contains("Name"));
    }
}
