//! Init command implementation.
//!
//! Generates an `lcdc.yaml` manifest listing the directories that hold
//! documents.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, Manifest, MANIFEST_FILENAME};
use crate::error::{LcdError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize an lcdc project by generating an lcdc.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing lcdc.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(LcdError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;

    // Parent directory of each document, relative to the project root.
    let source_dirs: BTreeSet<String> = discovery
        .scan
        .paths()
        .filter_map(Path::parent)
        .map(|parent| {
            let relative = parent.strip_prefix(&discovery.root).unwrap_or(parent);
            if relative.as_os_str().is_empty() {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            }
        })
        .collect();

    let manifest = Manifest {
        // A lone "." is the default and needs no listing.
        sources: if source_dirs.len() == 1 && source_dirs.contains(".") {
            Vec::new()
        } else {
            source_dirs.iter().cloned().collect()
        },
        ..Manifest::default()
    };

    let yaml = serde_yaml::to_string(&manifest).map_err(|e| LcdError::Build {
        message: format!("Failed to serialize manifest: {}", e),
        help: None,
    })?;
    fs::write(&manifest_path, yaml).map_err(|e| LcdError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !manifest.sources.is_empty() {
        printer.info("Discovered", &manifest.sources.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(discovery.scan.total(), "document", "documents")
        ),
    );

    Ok(())
}
