//! Layer-tree description reader.
//!
//! Reads `*.layers.yaml` files, the text form of a layered document:
//!
//! ```yaml
//! source_file: dash.psb
//! width: 800
//! height: 480
//! layers:
//!   - name: Background
//!     bbox: [0, 0, 800, 480]
//!   - name: "[D:7]speed"
//!     children:
//!       - name: segment_D
//!         bbox: [10, 90, 40, 95]
//! ```
//!
//! A layer with a `children` key is a group, even when the list is empty.

use std::path::Path;

use serde::Deserialize;

use crate::error::{LcdError, Result};

use super::{document_stem, BoundingBox, Document, LayerKind, LayerNode};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    source_file: Option<String>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    #[serde(default)]
    name: Option<serde_yaml::Value>,
    #[serde(default)]
    bbox: Option<[i32; 4]>,
    #[serde(default)]
    children: Option<Vec<RawLayer>>,
}

impl From<RawLayer> for LayerNode {
    fn from(raw: RawLayer) -> Self {
        let name = raw.name.and_then(scalar_name);
        let kind = match raw.children {
            Some(children) => LayerKind::Group(children.into_iter().map(LayerNode::from).collect()),
            None => LayerKind::Pixel {
                bbox: raw.bbox.map(|[l, t, r, b]| BoundingBox::new(l, t, r, b)),
                source: None,
            },
        };
        LayerNode { name, kind }
    }
}

/// Layer names like `1` or `true` arrive as YAML scalars, not strings.
fn scalar_name(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a layer-tree description.
///
/// `fallback_source` is used when the description has no `source_file`.
pub fn parse_tree(content: &str, fallback_source: &str) -> Result<Document> {
    let raw: RawDocument = serde_yaml::from_str(content).map_err(|e| LcdError::Parse {
        message: format!("Invalid layer tree: {}", e),
        help: Some("Each layer needs a name and either bbox or children".to_string()),
    })?;

    Ok(Document {
        source_file: raw
            .source_file
            .unwrap_or_else(|| fallback_source.to_string()),
        width: raw.width,
        height: raw.height,
        layers: raw.layers.into_iter().map(LayerNode::from).collect(),
    })
}

/// Read a layer-tree description from disk.
pub fn read_tree(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| LcdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read layer tree: {}", e),
    })?;

    parse_tree(&content, &format!("{}.psb", document_stem(path)))
}
