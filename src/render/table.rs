//! Collecting table cells while a `<table>` is traversed.

use super::grid::{self, GridOptions};

/// The cells seen so far in the table being traversed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableState {
    header: Vec<String>,
    body: Vec<Vec<String>>,
    footer: Vec<String>,
    row: usize,
    in_footer: bool,
}

impl TableState {
    /// Forget everything, ready for a new table.
    pub fn reset(&mut self) {
        *self = TableState::default();
    }

    /// Called when a `<tr>` starts.
    pub fn start_row(&mut self) {
        self.body.push(Vec::new());
    }

    /// Called when a `<tr>` ends.
    pub fn end_row(&mut self) {
        self.row += 1;
    }

    /// Mark whether cells now belong to the `<tfoot>`.
    pub fn set_in_footer(&mut self, in_footer: bool) {
        self.in_footer = in_footer;
    }

    /// Add a `<th>` cell.
    pub fn add_header_cell(&mut self, cell: String) {
        self.header.push(cell);
    }

    /// Add a `<td>` cell, to the footer or to the current row.
    pub fn add_data_cell(&mut self, cell: String) {
        if self.in_footer {
            self.footer.push(cell);
            return;
        }
        // A cell outside any row gets one of its own.
        if self.body.len() <= self.row {
            html_trace!("add_data_cell: no row {} yet", self.row);
            self.body.resize_with(self.row + 1, Vec::new);
        }
        self.body[self.row].push(cell);
    }

    #[cfg(test)]
    pub(crate) fn header(&self) -> &[String] {
        &self.header
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &[Vec<String>] {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn footer(&self) -> &[String] {
        &self.footer
    }

    /// Render the collected cells as a bordered grid, leaving this empty.
    pub fn take_grid(&mut self, options: &GridOptions) -> String {
        let table = std::mem::take(self);
        grid::render(&table.header, &table.body, &table.footer, options)
    }
}
