//! Validate command implementation.
//!
//! Extracts every discovered document and reports diagnostics without
//! writing output.

use std::path::PathBuf;

use clap::Args;

use crate::document::load_document;
use crate::error::{LcdError, Result};
use crate::extract::extract;
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, validate_extraction};

/// Validate documents without writing anything
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Documents or directories to check (default: current project)
    pub paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let discovery = super::discover_documents(&args.paths)?;

    if discovery.scan.is_empty() {
        printer.warning("Warning", "no documents found");
        return Ok(());
    }

    let mut errors = 0;
    let mut warnings = 0;

    for path in discovery.scan.paths() {
        printer.status("Checking", &display_path(path));

        let document = load_document(path)?;
        let extraction = extract(&document);
        let result = validate_extraction(&extraction);
        print_diagnostics(&result, printer);

        errors += result.error_count();
        warnings += result.warning_count();
    }

    let summary = format!(
        "{}, {}",
        plural(errors, "error", "errors"),
        plural(warnings, "warning", "warnings")
    );

    if errors > 0 || (args.strict && warnings > 0) {
        printer.error("Failed", &summary);
        return Err(LcdError::Validation {
            message: format!("{} did not pass", plural(discovery.scan.total(), "document", "documents")),
            help: Some("Fix the diagnostics above and run again".to_string()),
        });
    }

    printer.success(
        "Validated",
        &format!("{} ({})", plural(discovery.scan.total(), "document", "documents"), summary),
    );
    Ok(())
}
