//! Display formatting for terminal output
//!
//! Renderers build strings; printing them is left to the caller.

pub mod grapher;
pub mod printer;
pub mod style;
pub mod text;

pub use grapher::format_graph;
pub use printer::{format_list, format_totals};
pub use style::{Paint, Style};
