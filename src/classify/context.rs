//! Traversal context and leaf records.

use std::path::PathBuf;

use crate::document::BoundingBox;

use super::naming::DigitSpec;

/// Kind of a standalone widget group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandaloneKind {
    Digit(DigitSpec),
    Range,
    Number,
    String,
}

impl StandaloneKind {
    /// Compound parent kind for `[N]`/`[S]` groups.
    pub fn as_compound(self) -> Option<CompoundKind> {
        match self {
            StandaloneKind::Number => Some(CompoundKind::Number),
            StandaloneKind::String => Some(CompoundKind::String),
            StandaloneKind::Digit(_) | StandaloneKind::Range => None,
        }
    }
}

/// The nearest enclosing widget group not nested in a compound widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneWidget {
    pub kind: StandaloneKind,
    pub name: String,
}

/// Multi-slot widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    Number,
    String,
}

/// A digit slot inside an `[N]`/`[S]` widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundDigit {
    pub parent_kind: CompoundKind,
    pub parent_name: String,
    pub digit: DigitSpec,
    pub digit_name: String,
}

/// State inherited from ancestors, passed by value down the recursion.
///
/// Every group derives a fresh context for its children; siblings never
/// observe each other's changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalContext {
    pub folder_path: Vec<String>,
    pub toggle: Option<String>,
    pub standalone: Option<StandaloneWidget>,
    pub compound: Option<CompoundDigit>,
}

impl TraversalContext {
    pub fn root() -> Self {
        Self::default()
    }

    /// Append a path segment. Empty segments are dropped.
    pub fn with_segment(mut self, segment: String) -> Self {
        if !segment.is_empty() {
            self.folder_path.push(segment);
        }
        self
    }

    pub fn with_toggle(mut self, name: String) -> Self {
        self.toggle = Some(name);
        self
    }

    pub fn with_standalone(mut self, kind: StandaloneKind, name: String) -> Self {
        self.standalone = Some(StandaloneWidget { kind, name });
        self
    }

    /// Enter a compound digit slot; the standalone widget no longer applies.
    pub fn with_compound(mut self, compound: CompoundDigit) -> Self {
        self.standalone = None;
        self.compound = Some(compound);
        self
    }
}

/// One surviving leaf layer and the context it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLeafRecord {
    /// Position among emitted leaves.
    pub index: usize,
    /// Prefix-stripped, sanitized leaf name.
    pub name: String,
    pub original_name: Option<String>,
    pub folder_path: Vec<String>,
    pub bbox: Option<BoundingBox>,
    pub source: Option<PathBuf>,
    pub toggle: Option<String>,
    pub standalone: Option<StandaloneWidget>,
    pub compound: Option<CompoundDigit>,
}

impl ExtractedLeafRecord {
    /// Layer reference: path segments and name joined by `--`, e.g.
    /// `Speed--ones--segment_A.png`.
    pub fn filename(&self) -> String {
        let mut parts: Vec<&str> = self.folder_path.iter().map(String::as_str).collect();
        parts.push(&self.name);
        format!("{}.png", parts.join("--"))
    }

    /// Leaves without visible pixels are not exported.
    pub fn has_content(&self) -> bool {
        self.bbox.is_some_and(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(folder_path: &[&str], name: &str) -> ExtractedLeafRecord {
        ExtractedLeafRecord {
            index: 0,
            name: name.to_string(),
            original_name: Some(name.to_string()),
            folder_path: folder_path.iter().map(|s| s.to_string()).collect(),
            bbox: Some(BoundingBox::new(0, 0, 1, 1)),
            source: None,
            toggle: None,
            standalone: None,
            compound: None,
        }
    }

    #[test]
    fn test_filename() {
        assert_eq!(record(&[], "Background").filename(), "Background.png");
        assert_eq!(
            record(&["Smo", "Mo"], "Layer_1").filename(),
            "Smo--Mo--Layer_1.png"
        );
    }

    #[test]
    fn test_has_content() {
        let mut r = record(&[], "a");
        assert!(r.has_content());
        r.bbox = Some(BoundingBox::new(3, 3, 3, 8));
        assert!(!r.has_content());
        r.bbox = None;
        assert!(!r.has_content());
    }

    #[test]
    fn test_context_is_derived_not_shared() {
        let parent = TraversalContext::root().with_segment("UI".to_string());
        let child = parent.clone().with_toggle("Light".to_string());

        assert_eq!(parent.toggle, None);
        assert_eq!(child.toggle.as_deref(), Some("Light"));
        assert_eq!(child.folder_path, vec!["UI"]);
    }

    #[test]
    fn test_compound_clears_standalone() {
        let ctx = TraversalContext::root()
            .with_standalone(StandaloneKind::Number, "Speed".to_string())
            .with_compound(CompoundDigit {
                parent_kind: CompoundKind::Number,
                parent_name: "Speed".to_string(),
                digit: DigitSpec::new(7, false),
                digit_name: "ones".to_string(),
            });

        assert!(ctx.standalone.is_none());
        assert!(ctx.compound.is_some());
    }

    #[test]
    fn test_empty_segment_dropped() {
        let ctx = TraversalContext::root().with_segment(String::new());
        assert!(ctx.folder_path.is_empty());
    }
}
