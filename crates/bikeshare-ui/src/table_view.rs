//! Raw-row pages for the "see raw data" loop.
//!
//! Renders a window of unfiltered CSV rows as an aligned plain-text table,
//! headed by the original column names and prefixed with the row index.

use bikeshare_data::reader::RawTable;
use unicode_width::UnicodeWidthStr;

/// Column gap between cells.
const GAP: &str = "  ";

/// Walks a [`RawTable`] a fixed number of rows at a time.
#[derive(Debug)]
pub struct RawPager<'a> {
    table: &'a RawTable,
    page_size: usize,
    next: usize,
}

impl<'a> RawPager<'a> {
    pub fn new(table: &'a RawTable, page_size: usize) -> Self {
        Self {
            table,
            page_size: page_size.max(1),
            next: 0,
        }
    }

    /// Render the next page, or `None` once every row has been shown.
    pub fn next_page(&mut self) -> Option<String> {
        let start = self.next;
        let rows = self.table.page(start, self.page_size);
        if rows.is_empty() {
            return None;
        }
        self.next = start + rows.len();
        Some(render_rows(self.table, start, self.page_size))
    }
}

/// Render up to `len` rows of `table` starting at `start`.
pub fn render_rows(table: &RawTable, start: usize, len: usize) -> String {
    let rows = table.page(start, len);

    let index_labels: Vec<String> = (start..start + rows.len()).map(|i| i.to_string()).collect();
    let columns = table.headers.len();

    // Width of the index column and each data column.
    let index_width = index_labels.iter().map(|s| s.width()).max().unwrap_or(0);
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();

    let mut header = pad("", index_width);
    for (i, name) in table.headers.iter().enumerate() {
        header.push_str(GAP);
        header.push_str(&pad(name, widths[i]));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (label, row) in index_labels.iter().zip(rows) {
        let mut line = pad(label, index_width);
        for (i, width) in widths.iter().enumerate() {
            line.push_str(GAP);
            line.push_str(&pad(row.get(i).unwrap_or(""), *width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Left-align `text` in `width` terminal columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    let mut s = String::with_capacity(text.len() + fill);
    s.push_str(text);
    s.extend(std::iter::repeat(' ').take(fill));
    s
}
