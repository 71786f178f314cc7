//! Widget descriptors built from classified layers.
//!
//! Widgets are aggregated from leaf records in a single order-preserving
//! pass; digit layers are then put into canonical segment order.

mod aggregate;
pub mod types;

pub use aggregate::{aggregate, NameConflict, WidgetRegistry};
pub use types::{
    CompoundWidget, DigitSlot, DigitWidget, RangeWidget, ToggleWidget, WidgetDescriptor,
    WidgetKind,
};
