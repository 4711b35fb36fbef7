//! Table - Boxed, column-aligned dump of row maps
//!
//! ```text
//! ╔══════╦══════╗
//! ║  id  ║ name ║
//! ╠══════╬══════╣
//! ║ 1234 ║ ab   ║
//! ║ 7    ║      ║
//! ╚══════╩══════╝
//! ```
//!
//! Headers are centered, body cells left aligned. Body rows have no
//! separators between them.

use crate::printer::{Printer, PrinterCore};
use crate::sink::Sink;
use comfy_table::{Cell, CellAlignment, ContentArrangement, TableComponent, presets};
use std::collections::BTreeMap;

/// One table row: column key to cell text. Missing keys render empty.
pub type Row = BTreeMap<String, String>;

const BORDERS: [(TableComponent, char); 15] = [
    (TableComponent::TopLeftCorner, '╔'),
    (TableComponent::TopBorder, '═'),
    (TableComponent::TopBorderIntersections, '╦'),
    (TableComponent::TopRightCorner, '╗'),
    (TableComponent::LeftBorder, '║'),
    (TableComponent::VerticalLines, '║'),
    (TableComponent::RightBorder, '║'),
    (TableComponent::LeftHeaderIntersection, '╠'),
    (TableComponent::HeaderLines, '═'),
    (TableComponent::MiddleHeaderIntersections, '╬'),
    (TableComponent::RightHeaderIntersection, '╣'),
    (TableComponent::BottomLeftCorner, '╚'),
    (TableComponent::BottomBorder, '═'),
    (TableComponent::BottomBorderIntersections, '╩'),
    (TableComponent::BottomRightCorner, '╝'),
];

/// Render `rows` under `columns` as a double-line box, without a trailing
/// newline.
pub fn render(columns: &[&str], rows: &[Row]) -> String {
    let mut table = comfy_table::Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    for (component, glyph) in BORDERS {
        table.set_style(component, glyph);
    }

    let header: Vec<Cell> = columns
        .iter()
        .map(|column| Cell::new(column).set_alignment(CellAlignment::Center))
        .collect();
    table.set_header(header);

    for row in rows {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| Cell::new(row.get(*column).map_or("", String::as_str)))
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

/// Table printer.
#[derive(Debug)]
pub struct Table {
    core: PrinterCore,
}

impl Table {
    /// Table printer writing to `sink`.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::from_core(PrinterCore::new(sink))
    }

    /// Table printer over a prepared core.
    pub fn from_core(core: PrinterCore) -> Self {
        Self { core }
    }

    /// Clear the current line and print the table followed by a newline.
    pub fn print(&mut self, columns: &[&str], rows: &[Row]) -> &mut Self {
        let table = render(columns, rows);
        self.core.clear_line().write(&table).newline();
        self
    }
}

impl Printer for Table {
    fn with_core<R>(&mut self, f: impl FnOnce(&mut PrinterCore) -> R) -> R {
        f(&mut self.core)
    }

    /// No state, no stop.
    fn stop(&mut self) -> &mut Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkCall};

    fn row(cells: &[(&str, &str)]) -> Row {
        cells
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_render_box() {
        let rows = vec![row(&[("id", "1234"), ("name", "ab")]), row(&[("id", "7")])];

        let rendered = render(&["id", "name"], &rows);

        assert_eq!(
            rendered,
            [
                "╔══════╦══════╗",
                "║  id  ║ name ║",
                "╠══════╬══════╣",
                "║ 1234 ║ ab   ║",
                "║ 7    ║      ║",
                "╚══════╩══════╝",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_columns_select_and_order_cells() {
        let rows = vec![row(&[("a", "1"), ("b", "2"), ("c", "3")])];

        let rendered = render(&["c", "a"], &rows);

        assert!(rendered.contains("║ 3 ║ 1 ║"));
        assert!(!rendered.contains('2'));
    }

    #[test]
    fn test_print_redraw_sequence() {
        let sink = RecordingSink::new();
        let mut table = Table::new(sink.clone());
        let rows = vec![row(&[("k", "v")])];

        table.print(&["k"], &rows);

        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::ClearLine,
                SinkCall::CursorToColumn(0),
                SinkCall::Write(render(&["k"], &rows)),
                SinkCall::Write("\n".into()),
            ]
        );
    }

    #[test]
    fn test_silent_table() {
        let sink = RecordingSink::new();
        let mut table = Table::new(sink.clone());

        table.silent().print(&["k"], &[]);

        assert!(sink.calls().is_empty());
    }
}
