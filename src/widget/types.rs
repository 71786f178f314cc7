//! Widget descriptor types.
//!
//! Descriptors serialize as YAML mappings tagged by `type`:
//!
//! ```yaml
//! Speed:
//!   type: digit
//!   segments: 7
//!   has_decimal: false
//!   layers: [Speed--segment_A.png, ...]
//! ```
//!
//! The widget name is the map key, so it is not part of the serialized body.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Toggle,
    Digit,
    Range,
    Number,
    String,
}

impl WidgetKind {
    /// Get the short name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Toggle => "toggle",
            WidgetKind::Digit => "digit",
            WidgetKind::Range => "range",
            WidgetKind::Number => "number",
            WidgetKind::String => "string",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named on/off group of layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleWidget {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub layers: Vec<String>,
}

/// A single-character segment display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitWidget {
    #[serde(skip)]
    pub name: String,
    pub segments: u32,
    pub has_decimal: bool,
    /// Canonical segment order, decimal point last.
    #[serde(default)]
    pub layers: Vec<String>,
}

/// Ordered levels; `layers[i]` is level `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWidget {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub layers: Vec<String>,
}

/// One digit position inside a number or string widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitSlot {
    pub name: String,
    #[serde(default = "default_segments")]
    pub segments: u32,
    pub has_decimal: bool,
    #[serde(default)]
    pub layers: Vec<String>,
}

fn default_segments() -> u32 {
    7
}

impl DigitSlot {
    pub fn new(name: impl Into<String>, has_decimal: bool) -> Self {
        Self {
            name: name.into(),
            segments: default_segments(),
            has_decimal,
            layers: Vec::new(),
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }
}

/// A multi-slot widget (number or string).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundWidget {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub digits: Vec<DigitSlot>,
}

impl CompoundWidget {
    /// Index of the first slot with a decimal point.
    pub fn decimal_index(&self) -> Option<usize> {
        self.digits.iter().position(|d| d.has_decimal)
    }
}

/// A widget discovered in a layered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WidgetDescriptor {
    Toggle(ToggleWidget),
    Digit(DigitWidget),
    Range(RangeWidget),
    Number(CompoundWidget),
    String(CompoundWidget),
}

impl WidgetDescriptor {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetDescriptor::Toggle(_) => WidgetKind::Toggle,
            WidgetDescriptor::Digit(_) => WidgetKind::Digit,
            WidgetDescriptor::Range(_) => WidgetKind::Range,
            WidgetDescriptor::Number(_) => WidgetKind::Number,
            WidgetDescriptor::String(_) => WidgetKind::String,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            WidgetDescriptor::Toggle(w) => &w.name,
            WidgetDescriptor::Digit(w) => &w.name,
            WidgetDescriptor::Range(w) => &w.name,
            WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => &w.name,
        }
    }

    /// Restore the name after deserializing from a keyed map.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            WidgetDescriptor::Toggle(w) => w.name = name,
            WidgetDescriptor::Digit(w) => w.name = name,
            WidgetDescriptor::Range(w) => w.name = name,
            WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => w.name = name,
        }
    }

    /// All layer references, in slot order for compound widgets.
    pub fn layer_refs(&self) -> Vec<&str> {
        match self {
            WidgetDescriptor::Toggle(ToggleWidget { layers, .. })
            | WidgetDescriptor::Digit(DigitWidget { layers, .. })
            | WidgetDescriptor::Range(RangeWidget { layers, .. }) => {
                layers.iter().map(String::as_str).collect()
            }
            WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => w
                .digits
                .iter()
                .flat_map(|d| d.layers.iter().map(String::as_str))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_name() {
        let widget = WidgetDescriptor::Range(RangeWidget {
            name: "battery".to_string(),
            layers: vec!["b1.png".to_string()],
        });
        assert_eq!(widget.kind(), WidgetKind::Range);
        assert_eq!(widget.name(), "battery");
        assert_eq!(widget.kind().to_string(), "range");
    }

    #[test]
    fn test_layer_refs_flatten_slots() {
        let mut first = DigitSlot::new("tens", true);
        first.layers = vec!["a.png".to_string(), "b.png".to_string()];
        let mut second = DigitSlot::new("ones", false);
        second.layers = vec!["c.png".to_string()];

        let widget = WidgetDescriptor::Number(CompoundWidget {
            name: "Speed".to_string(),
            digits: vec![first, second],
        });
        assert_eq!(widget.layer_refs(), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_decimal_index() {
        let widget = CompoundWidget {
            name: "Speed".to_string(),
            digits: vec![
                DigitSlot::new("a", false),
                DigitSlot::new("b", true),
                DigitSlot::new("c", true),
            ],
        };
        assert_eq!(widget.decimal_index(), Some(1));
        assert_eq!(CompoundWidget::default().decimal_index(), None);
    }

    #[test]
    fn test_serialize_tagged() {
        let widget = WidgetDescriptor::Digit(DigitWidget {
            name: "Speed".to_string(),
            segments: 7,
            has_decimal: false,
            layers: vec!["Speed--a.png".to_string()],
        });
        let yaml = serde_yaml::to_string(&widget).unwrap();

        assert!(yaml.contains("type: digit"));
        assert!(yaml.contains("segments: 7"));
        assert!(!yaml.contains("name"));
    }

    #[test]
    fn test_deserialize_tagged() {
        let yaml = r#"
type: string
digits:
  - name: char0
    segments: 16
    has_decimal: true
    layers: [m--char0--a1.png]
"#;
        let mut widget: WidgetDescriptor = serde_yaml::from_str(yaml).unwrap();
        widget.set_name("message");

        assert_eq!(widget.kind(), WidgetKind::String);
        assert_eq!(widget.name(), "message");
        match widget {
            WidgetDescriptor::String(w) => {
                assert_eq!(w.digits[0].segments, 16);
                assert!(w.digits[0].has_decimal);
            }
            other => panic!("expected string widget, got {:?}", other.kind()),
        }
    }
}
