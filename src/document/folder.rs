//! Layer-folder reader.
//!
//! Reads a directory of PNG files as a layered document. Sub-directories
//! become groups, each `*.png` becomes a pixel layer named by its file stem.
//! Entries are read in descending name order (storage order), so files named
//! in ascending authoring order come out canonical after widget aggregation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LcdError, Result};

use super::{BoundingBox, Document, LayerNode};

/// Read a layer folder.
///
/// Document size is the largest PNG size found anywhere in the tree.
pub fn read_folder(root: &Path) -> Result<Document> {
    let mut size = (0u32, 0u32);
    let layers = read_entries(root, &mut size)?;

    let source_file = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("layers")
        .to_string();

    Ok(Document {
        source_file,
        width: size.0,
        height: size.1,
        layers,
    })
}

fn read_entries(dir: &Path, size: &mut (u32, u32)) -> Result<Vec<LayerNode>> {
    let entries = fs::read_dir(dir).map_err(|e| LcdError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to read layer folder: {}", e),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !is_hidden(p))
        .collect();
    paths.sort();
    paths.reverse();

    let mut layers = Vec::new();
    for path in paths {
        if path.is_dir() {
            let name = file_name(&path);
            let children = read_entries(&path, size)?;
            layers.push(LayerNode::group(name, children));
        } else if is_png(&path) {
            let (bbox, width, height) = content_bounds(&path)?;
            size.0 = size.0.max(width);
            size.1 = size.1.max(height);

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let mut node = LayerNode::unnamed(bbox).with_source(&path);
            node.name = Some(name);
            layers.push(node);
        }
    }

    Ok(layers)
}

/// Compute the extents of non-transparent pixels in a PNG.
///
/// Returns the bounding box (None for a fully transparent image) and
/// the full image dimensions.
pub fn content_bounds(path: &Path) -> Result<(Option<BoundingBox>, u32, u32)> {
    let img = image::open(path)
        .map_err(|e| LcdError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    let mut extents: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        extents = Some(match extents {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }

    let bbox = extents.map(|(l, t, r, b)| {
        BoundingBox::new(l as i32, t as i32, r as i32 + 1, b as i32 + 1)
    });

    Ok((bbox, width, height))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
