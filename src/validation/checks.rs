//! Validation checks for an extracted document.
//!
//! Each check looks at one part of an [`Extraction`](crate::extract::Extraction) and returns a
//! `ValidationResult`.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::classify::{DigitSpec, ExtractedLeafRecord};
use crate::widget::{NameConflict, WidgetDescriptor};

use super::warning::{Diagnostic, ValidationResult};

/// Check that digits have one layer per segment, plus the decimal point.
pub fn check_segment_counts(widgets: &IndexMap<String, WidgetDescriptor>) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut check = |label: String, spec: DigitSpec, found: usize| {
        let expected = spec.layer_count();
        if found != expected {
            result.push(
                Diagnostic::warning(
                    "lcdc::validate::segment-count",
                    format!(
                        "{} has {} layers, expected {} ({} segments{})",
                        label,
                        found,
                        expected,
                        spec.segments,
                        if spec.has_decimal { " + decimal point" } else { "" }
                    ),
                )
                .with_help("Each digit group needs one layer per segment, decimal point last"),
            );
        }
    };

    for (name, widget) in widgets {
        match widget {
            WidgetDescriptor::Digit(w) => {
                check(
                    format!("Digit '{}'", name),
                    DigitSpec::new(w.segments, w.has_decimal),
                    w.layers.len(),
                );
            }
            WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => {
                for slot in &w.digits {
                    check(
                        format!("Digit '{}' of '{}'", slot.name, name),
                        DigitSpec::new(slot.segments, slot.has_decimal),
                        slot.layers.len(),
                    );
                }
            }
            WidgetDescriptor::Toggle(_) | WidgetDescriptor::Range(_) => {}
        }
    }

    result
}

/// Check for widgets that ended up with nothing to show.
pub fn check_empty_widgets(widgets: &IndexMap<String, WidgetDescriptor>) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, widget) in widgets {
        let empty = match widget {
            WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => w.digits.is_empty(),
            other => other.layer_refs().is_empty(),
        };
        if empty {
            let what = match widget {
                WidgetDescriptor::Number(_) | WidgetDescriptor::String(_) => "digits",
                _ => "layers",
            };
            result.push(
                Diagnostic::warning(
                    "lcdc::validate::empty-widget",
                    format!("{} widget '{}' has no {}", widget.kind(), name, what),
                )
                .with_subject(name.as_str())
                .with_help("Put [D:n] groups inside [N] and [S] widgets"),
            );
        }
    }

    result
}

/// Report widget names used by more than one kind.
pub fn check_name_conflicts(conflicts: &[NameConflict]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for conflict in conflicts {
        result.push(
            Diagnostic::error(
                "lcdc::validate::name-conflict",
                format!(
                    "Widget '{}' is a {} but layer '{}' declares it as a {}",
                    conflict.name, conflict.existing, conflict.layer, conflict.requested
                ),
            )
            .with_subject(conflict.name.as_str())
            .with_help("Rename one of the groups so each widget name is used once"),
        );
    }

    result
}

/// Check that no two exported layers share a file name.
pub fn check_duplicate_layers(records: &[ExtractedLeafRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for record in records {
        let filename = record.filename();
        if !seen.insert(filename.clone()) && reported.insert(filename.clone()) {
            result.push(
                Diagnostic::error(
                    "lcdc::validate::duplicate-layer",
                    format!("More than one layer exports to '{}'", filename),
                )
                .with_subject(filename)
                .with_help("Give sibling layers distinct names"),
            );
        }
    }

    result
}

/// Every decimal slot of a number widget lights when the value has a fraction.
pub fn check_decimal_slots(widgets: &IndexMap<String, WidgetDescriptor>) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, widget) in widgets {
        let WidgetDescriptor::Number(w) = widget else {
            continue;
        };
        let count = w.digits.iter().filter(|d| d.has_decimal).count();
        if count > 1 {
            result.push(
                Diagnostic::warning(
                    "lcdc::validate::multiple-decimals",
                    format!(
                        "Number '{}' has {} digits with a decimal point; all of them light for fractional values",
                        name, count
                    ),
                )
                .with_subject(name.as_str()),
            );
        }
    }

    result
}

/// Report leaves dropped for having no visible pixels.
pub fn check_skipped_layers(skipped: &[ExtractedLeafRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for record in skipped {
        let name = record.original_name.as_deref().unwrap_or(record.name.as_str());
        result.push(
            Diagnostic::warning(
                "lcdc::validate::empty-layer",
                format!("Layer '{}' has no visible content and was skipped", name),
            )
            .with_subject(record.filename()),
        );
    }

    result
}
