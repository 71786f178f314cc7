//! Validation of extracted documents.
//!
//! Runs a suite of checks against an extraction and reports errors and
//! warnings. Used by both `lcdc validate` and `lcdc build`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::extract::Extraction;
use crate::output::Printer;

/// Run all validation checks against an extraction.
pub fn validate_extraction(extraction: &Extraction) -> ValidationResult {
    let mut result = ValidationResult::new();
    let widgets = &extraction.schema.widgets;

    result.merge(checks::check_name_conflicts(&extraction.conflicts));
    result.merge(checks::check_duplicate_layers(&extraction.records));
    result.merge(checks::check_segment_counts(widgets));
    result.merge(checks::check_empty_widgets(widgets));
    result.merge(checks::check_decimal_slots(widgets));
    result.merge(checks::check_skipped_layers(&extraction.skipped));

    result
}

/// Print diagnostics as status lines on stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = format!("{}[{}]", d.severity, d.code);
        let line = format!("{}: {}", printer.severity(&label, d.is_error()), d.message);
        eprintln!("{}", line);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }
}
