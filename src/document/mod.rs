//! Layered document model and readers.
//!
//! A document is an ordered tree of layers. Groups own children, leaves
//! carry a bounding box. Two readers produce documents:
//! - `*.layers.yaml` / `*.layers.yml` layer-tree descriptions
//! - `*.layers` folders of PNG files (sub-folders become groups)
//!
//! Both readers expose children in storage order (bottom-to-top), the
//! reverse of the order an author sees them in an editor.

mod folder;
mod tree;

use std::path::{Path, PathBuf};

pub use folder::{content_bounds, read_folder};
pub use tree::{parse_tree, read_tree};

use crate::error::Result;

/// Pixel bounds of a layer: `(left, top, right, bottom)`, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// A box with no area holds no visible content.
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

/// Group or leaf payload of a layer.
#[derive(Debug, Clone)]
pub enum LayerKind {
    /// A group with its children in storage order.
    Group(Vec<LayerNode>),
    /// A pixel layer.
    Pixel {
        bbox: Option<BoundingBox>,
        /// Backing image file, for folder documents.
        source: Option<PathBuf>,
    },
}

/// A single node in the layer tree.
#[derive(Debug, Clone)]
pub struct LayerNode {
    pub name: Option<String>,
    pub kind: LayerKind,
}

impl LayerNode {
    /// Create a named group.
    pub fn group(name: impl Into<String>, children: Vec<LayerNode>) -> Self {
        Self {
            name: Some(name.into()),
            kind: LayerKind::Group(children),
        }
    }

    /// Create a named pixel layer.
    pub fn pixel(name: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            name: Some(name.into()),
            kind: LayerKind::Pixel {
                bbox: Some(bbox),
                source: None,
            },
        }
    }

    /// Create a pixel layer without a name.
    pub fn unnamed(bbox: Option<BoundingBox>) -> Self {
        Self {
            name: None,
            kind: LayerKind::Pixel { bbox, source: None },
        }
    }

    /// Attach the backing image file (no-op for groups).
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        if let LayerKind::Pixel { source, .. } = &mut self.kind {
            *source = Some(path.into());
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, LayerKind::Group(_))
    }

    /// Children of a group; empty for leaves.
    pub fn children(&self) -> &[LayerNode] {
        match &self.kind {
            LayerKind::Group(children) => children,
            LayerKind::Pixel { .. } => &[],
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match &self.kind {
            LayerKind::Pixel { bbox, .. } => *bbox,
            LayerKind::Group(_) => None,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        match &self.kind {
            LayerKind::Pixel { source, .. } => source.as_deref(),
            LayerKind::Group(_) => None,
        }
    }

    /// Count this node and all its descendants.
    pub fn descendant_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(LayerNode::descendant_count)
            .sum::<usize>()
    }
}

/// A loaded layered document.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name of the original document (e.g. `dashboard.psb`).
    pub source_file: String,
    pub width: u32,
    pub height: u32,
    /// Top-level layers in storage order.
    pub layers: Vec<LayerNode>,
}

impl Document {
    /// Total number of nodes in the tree, groups included.
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(LayerNode::descendant_count).sum()
    }
}

/// How a document is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A `*.layers.yaml` layer-tree description.
    Tree,
    /// A `*.layers` folder of PNG layers.
    Folder,
}

const TREE_SUFFIXES: [&str; 2] = [".layers.yaml", ".layers.yml"];
const FOLDER_SUFFIX: &str = ".layers";

/// Detect the document kind from a path's name.
pub fn detect_document_kind(path: &Path) -> Option<DocumentKind> {
    let filename = path.file_name()?.to_str()?;

    if TREE_SUFFIXES.iter().any(|s| filename.ends_with(s)) {
        Some(DocumentKind::Tree)
    } else if filename.ends_with(FOLDER_SUFFIX) && path.is_dir() {
        Some(DocumentKind::Folder)
    } else {
        None
    }
}

/// Base name used for outputs: `dash.layers.yaml` -> `dash`.
pub fn document_stem(path: &Path) -> String {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    TREE_SUFFIXES
        .iter()
        .chain(std::iter::once(&FOLDER_SUFFIX))
        .find_map(|suffix| filename.strip_suffix(suffix))
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(filename)
                .to_string()
        })
}

/// Load a document, dispatching on whether the path is a folder.
pub fn load_document(path: &Path) -> Result<Document> {
    if path.is_dir() {
        read_folder(path)
    } else {
        read_tree(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BoundingBox::new(10, 20, 60, 120);
        assert_eq!(bbox.width(), 50);
        assert_eq!(bbox.height(), 100);
        assert!(!bbox.is_empty());
        assert!(BoundingBox::new(5, 5, 5, 10).is_empty());
    }

    #[test]
    fn test_layer_node_accessors() {
        let leaf = LayerNode::pixel("seg", BoundingBox::new(0, 0, 1, 1)).with_source("seg.png");
        assert!(!leaf.is_group());
        assert_eq!(leaf.source(), Some(Path::new("seg.png")));
        assert!(leaf.children().is_empty());

        let group = LayerNode::group("[D:7]speed", vec![leaf.clone(), leaf]);
        assert!(group.is_group());
        assert_eq!(group.children().len(), 2);
        assert_eq!(group.bbox(), None);
        assert_eq!(group.descendant_count(), 3);
    }

    #[test]
    fn test_detect_document_kind() {
        assert_eq!(
            detect_document_kind(Path::new("dash.layers.yaml")),
            Some(DocumentKind::Tree)
        );
        assert_eq!(
            detect_document_kind(Path::new("screens/dash.layers.yml")),
            Some(DocumentKind::Tree)
        );
        assert_eq!(detect_document_kind(Path::new("lcdc.yaml")), None);

        let dir = tempdir().unwrap();
        let folder = dir.path().join("panel.layers");
        std::fs::create_dir(&folder).unwrap();
        assert_eq!(detect_document_kind(&folder), Some(DocumentKind::Folder));
    }

    #[test]
    fn test_document_stem() {
        assert_eq!(document_stem(Path::new("a/dash.layers.yaml")), "dash");
        assert_eq!(document_stem(Path::new("panel.layers")), "panel");
        assert_eq!(document_stem(Path::new("other.yaml")), "other");
    }
}
