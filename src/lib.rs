//! lcdc - LCD widget schema extractor
//!
//! Turns layered documents whose layer names follow a small bracket-prefix
//! protocol (`[T]`, `[D:7p]`, `[R]`, `[N]`, `[S]`, `#`) into widget schemas,
//! and drives 7- and 16-segment displays from those schemas.

pub mod classify;
pub mod cli;
pub mod discovery;
pub mod display;
pub mod document;
pub mod error;
pub mod extract;
pub mod output;
pub mod schema;
pub mod segment;
pub mod validation;
pub mod widget;

pub use classify::{classify, classify_document, ExtractedLeafRecord, TraversalContext};
pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest, ScanResult};
pub use display::{visibility, LayerVisibility};
pub use document::{load_document, BoundingBox, Document, DocumentKind, LayerNode};
pub use error::{LcdError, Result};
pub use extract::{extract, Extraction};
pub use schema::{LayerEntry, Schema};
pub use segment::{
    format_number, format_string, parse_number, segments_for, Glyph, NumberFormat, SegmentTable,
};
pub use validation::{validate_extraction, Diagnostic, Severity, ValidationResult};
pub use widget::{
    aggregate, CompoundWidget, DigitSlot, DigitWidget, RangeWidget, ToggleWidget,
    WidgetDescriptor, WidgetKind, WidgetRegistry,
};
