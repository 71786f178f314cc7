//! Segment engine: character tables and slot formatting.

mod format;
pub mod table;

pub use format::{format_number, format_string, parse_number, Glyph, NumberFormat};
pub use table::{segments_for, SegmentTable};
