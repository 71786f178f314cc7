//! Finding layered documents in a project.
//!
//! Discovery either follows an `lcdc.yaml` manifest in the project root or
//! scans the whole root for documents.
//!
//! # Example
//!
//! ```ignore
//! use lcdc::discovery::discover;
//!
//! let result = discover("./ui")?;
//! for path in result.scan.paths() {
//!     println!("{}", path.display());
//! }
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::document::DocumentKind;
use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{scan_directory, scan_sources, DocumentSource, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "lcdc.yaml";

/// Result of discovering documents in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no lcdc.yaml was found).
    pub manifest: Manifest,

    pub has_manifest: bool,

    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Output directory: the override if given, else the manifest's, relative to the root.
    pub fn output_dir(&self, cli_output: Option<&Path>) -> PathBuf {
        match cli_output {
            Some(path) => path.to_path_buf(),
            None if self.manifest.output.is_absolute() => self.manifest.output.clone(),
            None => self.root.join(&self.manifest.output),
        }
    }
}

/// Discover documents in a project directory.
///
/// Uses the source paths of `lcdc.yaml` if the root has one, otherwise
/// scans the whole root.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let scan = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover documents from explicit paths (no manifest lookup).
///
/// Files are read as layer trees. Directories are scanned; a directory
/// with no documents inside is itself read as a layer folder.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            let dir_scan = scan_directory(path, &manifest);
            if dir_scan.is_empty() {
                scan.push(path.clone(), DocumentKind::Folder);
            } else {
                scan.merge(dir_scan);
            }
        } else if path.is_file() {
            scan.push(path.clone(), DocumentKind::Tree);
        } else {
            return Err(crate::error::LcdError::Io {
                path: path.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}
