//! The text-flow state for one traversal.
//!
//! `TextRenderer` owns the output sink and keeps track of where the
//! current line is, whether we're inside quoted blocks, and whether the
//! last thing written was whitespace.

use super::table::TableState;
use crate::Result;
use std::fmt::Write;

/// Default column at which quoted text is wrapped.
pub const DEFAULT_QUOTE_WRAP_WIDTH: usize = 74;

/// Per-traversal rendering state, writing into `W`.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    prefix: String,
    quote_level: usize,
    line_len: usize,
    ends_with_space: bool,
    just_closed_div: bool,
    wrap_width: usize,
    /// Cells collected for the table currently being traversed.
    pub table: TableState,
}

impl TextRenderer<String> {
    /// A fresh renderer accumulating into a `String`.
    pub fn new(wrap_width: usize) -> TextRenderer<String> {
        TextRenderer::with_sink(String::new(), wrap_width)
    }
}

impl<W: Write> TextRenderer<W> {
    /// A fresh renderer writing into `out`.
    pub fn with_sink(out: W, wrap_width: usize) -> TextRenderer<W> {
        TextRenderer {
            out,
            prefix: String::new(),
            quote_level: 0,
            line_len: 0,
            ends_with_space: false,
            just_closed_div: false,
            wrap_width: wrap_width.max(1),
            table: TableState::default(),
        }
    }

    /// Create an isolated sub-renderer used to measure or decorate some
    /// inline content before it is emitted into this one.
    ///
    /// The sub-renderer starts outside any quote, with an empty line.
    pub fn new_sub_renderer(&self) -> TextRenderer<String> {
        TextRenderer::new(self.wrap_width)
    }

    /// Pretend the output so far ends in whitespace, so the next
    /// fragment is not separated from whatever precedes this renderer.
    pub fn set_starts_after_space(&mut self) {
        self.ends_with_space = true;
    }

    /// Return the sink, consuming the renderer.
    pub fn into_inner(self) -> W {
        self.out
    }

    #[cfg(test)]
    pub(crate) fn get_ref(&self) -> &W {
        &self.out
    }

    /// Length (in chars) of the current output line.
    pub fn line_len(&self) -> usize {
        self.line_len
    }

    /// The current blockquote nesting depth.
    pub fn quote_level(&self) -> usize {
        self.quote_level
    }

    #[cfg(test)]
    pub(crate) fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True if a `<div>` has just been closed with nothing since.
    pub fn just_closed_div(&self) -> bool {
        self.just_closed_div
    }

    /// Set or clear the just-closed-div marker.
    pub fn set_just_closed_div(&mut self, closed: bool) {
        self.just_closed_div = closed;
    }

    /// Enter a quoted block.
    pub fn start_quote(&mut self) {
        self.quote_level += 1;
        self.update_prefix();
    }

    /// Leave a quoted block started with `start_quote`.
    pub fn end_quote(&mut self) {
        self.quote_level = self.quote_level.saturating_sub(1);
        self.update_prefix();
    }

    fn update_prefix(&mut self) {
        self.prefix = ">".repeat(self.quote_level);
        if self.quote_level > 0 {
            self.prefix.push(' ');
        }
    }

    /// Append `data` to the output.
    ///
    /// A single space is added in front unless either side of the join
    /// is already whitespace, and each newline is followed by the
    /// current quote prefix.
    pub fn emit(&mut self, data: &str) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        for line in self.break_long_lines(data) {
            let (first, last) = match (line.chars().next(), line.chars().next_back()) {
                (Some(first), Some(last)) => (first, last),
                _ => continue,
            };
            if !first.is_whitespace() && !self.ends_with_space {
                self.out.write_char(' ')?;
                self.line_len += 1;
            }
            self.ends_with_space = last.is_whitespace();
            for c in line.chars() {
                self.out.write_char(c)?;
                self.line_len += 1;
                if c == '\n' {
                    self.line_len = 0;
                    if !self.prefix.is_empty() {
                        self.out.write_str(&self.prefix)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Split `data` into pieces so that no line goes past the wrap
    /// width, taking the current line position into account.  Only
    /// quoted text is wrapped; otherwise `data` is returned whole.
    pub fn break_long_lines(&self, data: &str) -> Vec<String> {
        if self.quote_level == 0 {
            return vec![data.to_string()];
        }
        let width = self.wrap_width;
        let mut result = Vec::new();
        let all: Vec<char> = data.chars().collect();
        let mut chars = &all[..];
        let mut existing = self.line_len;
        if existing >= width {
            result.push("\n".to_string());
            existing = 0;
        }
        while chars.len() + existing > width {
            let limit = width - existing;
            let mut i = match (0..=limit).rev().find(|&i| chars[i].is_whitespace()) {
                Some(i) => i,
                // No spaces, so go the other way.
                None => (limit..chars.len())
                    .find(|&i| chars[i].is_whitespace())
                    .unwrap_or(chars.len()),
            };
            let mut piece: String = chars[..i].iter().collect();
            piece.push('\n');
            html_trace_quiet!("break_long_lines: piece={:?}", piece);
            result.push(piece);
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            chars = &chars[i..];
            existing = 0;
        }
        if !chars.is_empty() {
            result.push(chars.iter().collect());
        }
        result
    }
}
