//! Module containing the text-flow state and the table helpers used
//! while walking the DOM.

pub mod grid;
pub mod table;
pub mod text_renderer;
