//! Lay out table cells as a bordered ASCII grid.
//!
//! ```text
//! +---+---+
//! | A | B |
//! +---+---+
//! | 1 | 2 |
//! +---+---+
//! ```

use unicode_width::UnicodeWidthStr;

/// Options controlling grid layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
    /// Upper-case header and footer text, showing `_` as a space.
    pub uppercase_headers: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            uppercase_headers: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Centre,
    Right,
}

/// A cell split into its lines.
struct Cell<'a> {
    lines: Vec<&'a str>,
    align: Align,
}

impl<'a> Cell<'a> {
    fn new(s: &'a str, align: Align) -> Cell<'a> {
        Cell {
            lines: s.split('\n').collect(),
            align,
        }
    }

    fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| UnicodeWidthStr::width(*l))
            .max()
            .unwrap_or(0)
    }
}

/// Body cells which look like numbers are right-aligned.
fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s);
    let s = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in s.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

fn body_align(s: &str) -> Align {
    if is_numeric(s) {
        Align::Right
    } else {
        Align::Left
    }
}

fn pad(s: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(UnicodeWidthStr::width(s));
    let (left, right) = match align {
        Align::Left => (0, gap),
        Align::Right => (gap, 0),
        Align::Centre => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn push_border(out: &mut String, widths: &[usize]) {
    out.push('+');
    for w in widths {
        out.push_str(&"-".repeat(w + 2));
        out.push('+');
    }
    out.push('\n');
}

fn push_row(out: &mut String, widths: &[usize], row: &[Cell]) {
    let height = row.iter().map(|c| c.lines.len()).max().unwrap_or(0);
    for lineno in 0..height {
        out.push('|');
        for (colno, w) in widths.iter().enumerate() {
            let (text, align) = match row.get(colno) {
                Some(cell) => (cell.lines.get(lineno).copied().unwrap_or(""), cell.align),
                None => ("", Align::Left),
            };
            out.push(' ');
            out.push_str(&pad(text, *w, align));
            out.push_str(" |");
        }
        out.push('\n');
    }
}

/// Render a table's header, body rows and footer as a grid of text.
///
/// Rows may be ragged; short rows are padded with blank cells.  Rows
/// with no cells at all are dropped.  The result is empty if there are
/// no cells anywhere, and otherwise ends in a newline.
pub fn render(
    header: &[String],
    body: &[Vec<String>],
    footer: &[String],
    options: &GridOptions,
) -> String {
    let auto_format = |s: &String| {
        if options.uppercase_headers {
            s.replace('_', " ").to_uppercase()
        } else {
            s.clone()
        }
    };
    let header_text: Vec<String> = header.iter().map(auto_format).collect();
    let footer_text: Vec<String> = footer.iter().map(auto_format).collect();

    let header_row: Vec<Cell> = header_text
        .iter()
        .map(|s| Cell::new(s, Align::Centre))
        .collect();
    let footer_row: Vec<Cell> = footer_text
        .iter()
        .map(|s| Cell::new(s, Align::Centre))
        .collect();
    let body_rows: Vec<Vec<Cell>> = body
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| row.iter().map(|s| Cell::new(s, body_align(s))).collect())
        .collect();

    let num_columns = body_rows
        .iter()
        .map(Vec::len)
        .chain([header_row.len(), footer_row.len()])
        .max()
        .unwrap_or(0);
    if num_columns == 0 {
        return String::new();
    }

    let mut widths = vec![0; num_columns];
    for row in body_rows
        .iter()
        .chain(Some(&header_row))
        .chain(Some(&footer_row))
    {
        for (colno, cell) in row.iter().enumerate() {
            widths[colno] = widths[colno].max(cell.width());
        }
    }

    let mut out = String::new();
    push_border(&mut out, &widths);
    if !header_row.is_empty() {
        push_row(&mut out, &widths, &header_row);
        push_border(&mut out, &widths);
    }
    for row in &body_rows {
        push_row(&mut out, &widths, row);
    }
    if !body_rows.is_empty() {
        push_border(&mut out, &widths);
    }
    if !footer_row.is_empty() {
        push_row(&mut out, &widths, &footer_row);
        push_border(&mut out, &widths);
    }
    out
}
