//! File system scanner for layered documents.
//!
//! Recursively scans directories for `*.layers.yaml` / `*.layers.yml`
//! layer trees and `*.layers` PNG folders. A `*.layers` folder is a single
//! document; its contents are not scanned further.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::document::{detect_document_kind, DocumentKind};

use super::manifest::Manifest;

/// A document found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

/// Result of scanning for documents.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub documents: Vec<DocumentSource>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn push(&mut self, path: PathBuf, kind: DocumentKind) {
        if !self.documents.iter().any(|d| d.path == path) {
            self.documents.push(DocumentSource { path, kind });
        }
    }

    /// Merge another scan result into this one, skipping paths already present.
    pub fn merge(&mut self, other: ScanResult) {
        for doc in other.documents {
            self.push(doc.path, doc.kind);
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.documents.iter().map(|d| d.path.as_path())
    }
}

/// Scan a directory for documents, in file name order.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    let mut walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();

        if manifest.is_excluded(path) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        match detect_document_kind(path) {
            Some(DocumentKind::Folder) => {
                result.push(path.to_path_buf(), DocumentKind::Folder);
                walker.skip_current_dir();
            }
            Some(DocumentKind::Tree) if entry.file_type().is_file() => {
                result.push(path.to_path_buf(), DocumentKind::Tree);
            }
            _ => {}
        }
    }

    result
}

/// Scan multiple source paths relative to `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}
