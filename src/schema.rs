//! The schema file written for each document.
//!
//! ```yaml
//! source_file: dashboard.psb
//! document_width: 800
//! document_height: 480
//! layers:
//!   - filename: Speed--digit1--a.png
//!     name: a
//!     x: 10
//!     y: 20
//!     width: 12
//!     height: 30
//! widgets:
//!   Speed:
//!     type: number
//!     digits: [...]
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::ExtractedLeafRecord;
use crate::error::{LcdError, Result};
use crate::widget::WidgetDescriptor;

/// An exported layer image and where it sits in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub filename: String,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LayerEntry {
    /// Entry for a leaf with content. Leaves without a bounding box get a zero rectangle.
    pub fn from_record(record: &ExtractedLeafRecord) -> Self {
        let (x, y, width, height) = record
            .bbox
            .map(|b| (b.left, b.top, b.width(), b.height()))
            .unwrap_or_default();
        Self {
            filename: record.filename(),
            name: record.name.clone(),
            x,
            y,
            width,
            height,
        }
    }
}

/// Everything a runtime needs to drive a document's widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub source_file: String,
    pub document_width: u32,
    pub document_height: u32,
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
    #[serde(default)]
    pub widgets: IndexMap<String, WidgetDescriptor>,
}

impl Schema {
    pub fn new(source_file: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source_file: source_file.into(),
            document_width: width,
            document_height: height,
            layers: Vec::new(),
            widgets: IndexMap::new(),
        }
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetDescriptor> {
        self.widgets.get(name)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| LcdError::Build {
            message: format!("Failed to serialize schema: {}", e),
            help: None,
        })
    }

    /// Parse a schema, restoring widget names from their keys.
    pub fn parse(content: &str) -> Result<Self> {
        let mut schema: Schema = serde_yaml::from_str(content).map_err(|e| LcdError::Parse {
            message: format!("Invalid schema: {}", e),
            help: Some("Schemas are written by `lcdc build`".to_string()),
        })?;
        for (name, widget) in schema.widgets.iter_mut() {
            widget.set_name(name.as_str());
        }
        Ok(schema)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LcdError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read schema: {}", e),
        })?;
        Self::parse(&content)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|e| LcdError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write schema: {}", e),
        })
    }
}
