//! Convert HTML to a plain-text digest.
//!
//! This crate walks a parsed HTML document and writes a readable text
//! version of it, keeping some of the visual structure using plain text
//! conventions: headings are boxed or underlined, list items get a `* `
//! bullet, quotes get `>` prefixes (and are wrapped), link targets are
//! shown in brackets after the link text, and tables are drawn as ASCII
//! grids.
//!
//! # Examples
//!
//! ```rust
//! # use html2plaintext::from_string;
//! let html = r#"<h1>Hi</h1><p>Contact: <a href="mailto:a@b.com">us</a></p>"#;
//! assert_eq!(from_string(html).unwrap(),
//!            "\
//! **
//! Hi
//! **
//!
//! Contact: us ( a@b.com )");
//! ```
//!
//! A simple demonstration program is included as an example:
//!
//! ```sh
//! $ cargo run --example html2plaintext < foo.html
//! [...]
//! ```

#![deny(missing_docs)]

#[macro_use]
mod macros;

pub mod render;

use render::text_renderer::TextRenderer;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::NodeData;
pub use markup5ever_rcdom::{Handle, RcDom};
use std::fmt;
use std::io;
use tendril::TendrilSink;

/// Errors that can occur during HTML to text conversion.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Reading or decoding the input failed.
    #[error("I/O error")]
    IoError(#[from] io::Error),
    /// The output sink refused a write.
    #[error("Output error")]
    FmtError(#[from] fmt::Error),
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        use Error::*;
        match (self, other) {
            (IoError(a), IoError(b)) => a.kind() == b.kind(),
            (FmtError(_), FmtError(_)) => true,
            _ => false,
        }
    }
}

/// A specialised `Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub mod config {
    //! Configure the HTML to text translation using the `Config` type, which can be
    //! constructed using one of the functions in this module.

    use super::{normalise_output, parse, traverse, Handle, Result};
    use crate::render::grid::GridOptions;
    use crate::render::text_renderer::{TextRenderer, DEFAULT_QUOTE_WRAP_WIDTH};
    use std::fmt;
    use std::io;

    /// Configure the HTML processing.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Config {
        pub(crate) omit_links: bool,
        pub(crate) quote_wrap_width: usize,
        pub(crate) grid: GridOptions,
    }

    impl Default for Config {
        fn default() -> Config {
            Config {
                omit_links: false,
                quote_wrap_width: DEFAULT_QUOTE_WRAP_WIDTH,
                grid: GridOptions::default(),
            }
        }
    }

    impl Config {
        /// Don't show link targets after the link text.
        pub fn omit_links(mut self, omit: bool) -> Self {
            self.omit_links = omit;
            self
        }

        /// Wrap quoted text at `width` columns instead of the default 74.
        pub fn quote_wrap_width(mut self, width: usize) -> Self {
            self.quote_wrap_width = width.max(1);
            self
        }

        /// Whether table header and footer cells are shown in upper case
        /// (the default).
        pub fn uppercase_table_headers(mut self, upper: bool) -> Self {
            self.grid.uppercase_headers = upper;
            self
        }

        /// Reads HTML from `input`, and returns the text rendering.
        pub fn string_from_read<R: io::Read>(self, input: R) -> Result<String> {
            let dom = parse(input)?;
            self.string_from_dom(&dom.document)
        }

        /// Renders an already parsed node (and everything below it).
        pub fn string_from_dom(&self, handle: &Handle) -> Result<String> {
            let mut out = String::new();
            self.render_raw_into(handle, &mut out)?;
            Ok(normalise_output(&out))
        }

        /// Walks `handle`, writing the raw rendering into `out` without
        /// the final whitespace clean-up.
        pub fn render_raw_into<W: fmt::Write>(&self, handle: &Handle, out: &mut W) -> Result<()> {
            let mut renderer = TextRenderer::with_sink(out, self.quote_wrap_width);
            traverse(&mut renderer, handle, self)
        }
    }

    /// Return a Config with the default settings.
    pub fn plain() -> Config {
        Config::default()
    }
}

use config::Config;

/// Return the value of attribute `attr_name` on `handle`, or an empty
/// string if it isn't an element or doesn't have that attribute.
pub fn get_attr_val(handle: &Handle, attr_name: &str) -> String {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(handle.data, NodeData::Element { ref name, .. } if &*name.local == tag)
}

/// Collapse runs of whitespace into one space, and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\r' | '\n' | '\t') {
            if !in_space {
                result.push(' ');
            }
            in_space = true;
        } else {
            result.push(c);
            in_space = false;
        }
    }
    result.trim_matches(' ').to_string()
}

/// Final clean-up of a complete rendering: drop one space after each
/// newline, squash runs of blank lines and trim the ends.
fn normalise_output(text: &str) -> String {
    let text = text.replace("\n ", "\n");
    let mut result = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        result.push(c);
    }
    result.trim().to_string()
}

fn traverse<W: fmt::Write>(
    renderer: &mut TextRenderer<W>,
    handle: &Handle,
    config: &Config,
) -> Result<()> {
    match handle.data {
        NodeData::Text { ref contents } => {
            let text = collapse_whitespace(&contents.borrow());
            renderer.emit(&text)
        }
        NodeData::Element { ref name, .. } => handle_element(renderer, handle, &name.local, config),
        _ => traverse_children(renderer, handle, config),
    }
}

fn traverse_children<W: fmt::Write>(
    renderer: &mut TextRenderer<W>,
    handle: &Handle,
    config: &Config,
) -> Result<()> {
    for child in handle.children.borrow().iter() {
        traverse(renderer, child, config)?;
    }
    Ok(())
}

fn handle_element<W: fmt::Write>(
    renderer: &mut TextRenderer<W>,
    handle: &Handle,
    tag: &str,
    config: &Config,
) -> Result<()> {
    renderer.set_just_closed_div(false);
    match tag {
        "br" => renderer.emit("\n"),
        "h1" | "h2" | "h3" => render_header(renderer, handle, tag, config),
        "blockquote" => {
            renderer.start_quote();
            renderer.emit("\n")?;
            if renderer.quote_level() == 1 {
                renderer.emit("\n")?;
            }
            traverse_children(renderer, handle, config)?;
            renderer.end_quote();
            renderer.emit("\n\n")
        }
        "div" => {
            if renderer.line_len() > 0 {
                renderer.emit("\n")?;
            }
            traverse_children(renderer, handle, config)?;
            if !renderer.just_closed_div() {
                renderer.emit("\n")?;
            }
            renderer.set_just_closed_div(true);
            Ok(())
        }
        "li" => {
            renderer.emit("* ")?;
            traverse_children(renderer, handle, config)?;
            renderer.emit("\n")
        }
        "b" | "strong" => {
            let mut sub_renderer = renderer.new_sub_renderer();
            sub_renderer.set_starts_after_space();
            traverse_children(&mut sub_renderer, handle, config)?;
            renderer.emit(&format!("*{}*", sub_renderer.into_inner()))
        }
        "a" => render_link(renderer, handle, config),
        "p" | "ul" => {
            renderer.emit("\n\n")?;
            traverse_children(renderer, handle, config)?;
            renderer.emit("\n\n")
        }
        "table" => render_table(renderer, handle, config),
        "tfoot" => {
            renderer.table.set_in_footer(true);
            traverse_children(renderer, handle, config)?;
            renderer.table.set_in_footer(false);
            Ok(())
        }
        "tr" => {
            renderer.table.start_row();
            traverse_children(renderer, handle, config)?;
            renderer.table.end_row();
            Ok(())
        }
        "th" => {
            let cell = content_as_string(handle, config)?;
            renderer.table.add_header_cell(cell);
            Ok(())
        }
        "td" => {
            let cell = content_as_string(handle, config)?;
            renderer.table.add_data_cell(cell);
            Ok(())
        }
        "style" | "script" | "head" => Ok(()),
        _ => {
            html_trace!("Unhandled element: {:?}", tag);
            traverse_children(renderer, handle, config)
        }
    }
}

fn render_header<W: fmt::Write>(
    renderer: &mut TextRenderer<W>,
    handle: &Handle,
    tag: &str,
    config: &Config,
) -> Result<()> {
    let mut sub_renderer = renderer.new_sub_renderer();
    traverse_children(&mut sub_renderer, handle, config)?;
    let text = sub_renderer.into_inner();

    // The sub-rendering starts with a separating space which the final
    // clean-up removes, so it doesn't count.
    let divider_len = text
        .split('\n')
        .map(|line| line.chars().count().saturating_sub(1))
        .max()
        .unwrap_or(0);
    let divider = if tag == "h1" { "*" } else { "-" }.repeat(divider_len);

    if tag == "h3" {
        renderer.emit(&format!("\n\n{}\n{}\n\n", text, divider))
    } else {
        renderer.emit(&format!("\n\n{}\n{}\n{}\n\n", divider, text, divider))
    }
}

/// The image which is the only child of `handle`, if there is one.
fn sole_image_child(handle: &Handle) -> Option<Handle> {
    match &handle.children.borrow()[..] {
        [only] if is_element(only, "img") => Some(only.clone()),
        _ => None,
    }
}

fn normalise_href(link: &str) -> &str {
    let link = link.trim();
    link.strip_prefix("mailto:").unwrap_or(link)
}

fn render_link<W: fmt::Write>(
    renderer: &mut TextRenderer<W>,
    handle: &Handle,
    config: &Config,
) -> Result<()> {
    // If an image is the only child, its alt text is the link text.
    if let Some(img) = sole_image_child(handle) {
        let alt = get_attr_val(&img, "alt");
        renderer.emit(&alt)?;
    } else {
        traverse_children(renderer, handle, config)?;
    }
    if config.omit_links {
        return Ok(());
    }
    let href = get_attr_val(handle, "href");
    let href = normalise_href(&href);
    if href.is_empty() {
        return Ok(());
    }
    renderer.emit(&format!("( {} )", href))
}

fn render_table<W: fmt::Write>(
    renderer: &mut TextRenderer<W>,
    handle: &Handle,
    config: &Config,
) -> Result<()> {
    renderer.emit("\n\n")?;
    renderer.table.reset();
    traverse_children(renderer, handle, config)?;
    let text = renderer.table.take_grid(&config.grid);
    html_trace!("render_table: grid of {} lines", text.lines().count());
    renderer.emit(&text)?;
    renderer.emit("\n\n")
}

/// Render each child of a table cell separately, as a complete document
/// of its own, and join the results with newlines.
fn content_as_string(handle: &Handle, config: &Config) -> Result<String> {
    let mut result = String::new();
    for (i, child) in handle.children.borrow().iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        result.push_str(&config.string_from_dom(child)?);
    }
    html_trace!("content_as_string: {:?}", result);
    Ok(result)
}

/// Reads and parses HTML from `input`, skipping any UTF-8 byte order mark.
pub fn parse(mut input: impl io::Read) -> Result<RcDom> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let mut body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut body)?;
    Ok(dom)
}

/// Renders text from an already parsed document or node.
pub fn from_dom(handle: &Handle) -> Result<String> {
    config::plain().string_from_dom(handle)
}

/// Reads HTML from `input`, and returns the text rendering.
pub fn from_read<R>(input: R) -> Result<String>
where
    R: io::Read,
{
    config::plain().string_from_read(input)
}

/// Parses HTML from `input`, and returns the text rendering.
pub fn from_string(input: &str) -> Result<String> {
    from_read(input.as_bytes())
}

#[cfg(test)]
mod tests;
