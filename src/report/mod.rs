//! Renderers for resolved licenses.
//!
//! - [`markdown`]: the acknowledgments document: header comment, title,
//!   introduction and one indented section per dependency.
//! - [`terminal`]: coloured run summary; the full table with `--verbose`.

pub mod markdown;
pub mod terminal;
