//! Widget classification of a layer tree.
//!
//! Walks the tree once, pre-order and depth-first, in the order children are
//! exposed by the document. Each group may change the inherited context
//! (toggle, standalone widget, compound digit slot); each leaf emits one
//! [`ExtractedLeafRecord`] carrying the context it was found in.
//!
//! # Example
//!
//! ```ignore
//! use lcdc::classify::classify;
//!
//! let records = classify(&document.layers);
//! for record in &records {
//!     println!("{} -> {:?}", record.filename(), record.toggle);
//! }
//! ```

mod context;
pub mod naming;

use std::collections::HashMap;

pub use context::{
    CompoundDigit, CompoundKind, ExtractedLeafRecord, StandaloneKind, StandaloneWidget,
    TraversalContext,
};
pub use naming::{is_pruned, parse_prefix, sanitize, DigitSpec, Prefix, PRUNE_MARKER};

use crate::document::{Document, LayerNode};

/// Classify every leaf under the given top-level layers.
pub fn classify(layers: &[LayerNode]) -> Vec<ExtractedLeafRecord> {
    let mut classifier = Classifier::default();
    let root = TraversalContext::root();

    for layer in layers {
        classifier.visit(layer, &root);
    }

    classifier.records
}

/// Classify every leaf of a document.
pub fn classify_document(document: &Document) -> Vec<ExtractedLeafRecord> {
    classify(&document.layers)
}

#[derive(Debug, Default)]
struct Classifier {
    records: Vec<ExtractedLeafRecord>,
    /// Counters for default names, keyed by kind (and parent for digit slots).
    unnamed: HashMap<String, usize>,
}

impl Classifier {
    fn visit(&mut self, node: &LayerNode, ctx: &TraversalContext) {
        if node.name().is_some_and(is_pruned) {
            return;
        }

        if node.is_group() {
            let child_ctx = self.enter_group(node.name().unwrap_or_default(), ctx);
            for child in node.children() {
                self.visit(child, &child_ctx);
            }
        } else {
            self.emit(node, ctx);
        }
    }

    /// Derive the context for a group's children.
    fn enter_group(&mut self, name: &str, ctx: &TraversalContext) -> TraversalContext {
        let prefix = parse_prefix(name);
        let next = ctx.clone();

        let (next, label) = match prefix {
            Prefix::Toggle(_) => {
                let toggle = self.name_or_default(prefix.label(), "toggle", "toggle");
                (next.with_toggle(toggle.clone()), toggle)
            }
            // Compound slots win over any widget nested inside them.
            Prefix::Plain(_) => (next, prefix.label().to_string()),
            _ if ctx.compound.is_some() => (next, prefix.label().to_string()),
            Prefix::Number(_) => {
                let name = self.name_or_default(prefix.label(), "number", "number");
                (next.with_standalone(StandaloneKind::Number, name.clone()), name)
            }
            Prefix::String(_) => {
                let name = self.name_or_default(prefix.label(), "string", "string");
                (next.with_standalone(StandaloneKind::String, name.clone()), name)
            }
            Prefix::Digit(spec, _) => self.enter_digit(spec, prefix.label(), next),
            Prefix::Range(_) => {
                let name = self.name_or_default(prefix.label(), "range", "range");
                (next.with_standalone(StandaloneKind::Range, name.clone()), name)
            }
        };

        next.with_segment(sanitize(&label))
    }

    fn enter_digit(
        &mut self,
        spec: DigitSpec,
        label: &str,
        ctx: TraversalContext,
    ) -> (TraversalContext, String) {
        let parent = ctx
            .standalone
            .as_ref()
            .and_then(|w| w.kind.as_compound().map(|kind| (kind, w.name.clone())));

        match parent {
            Some((parent_kind, parent_name)) => {
                let key = format!("digit:{}", parent_name);
                let digit_name = self.name_or_default(label, &key, "digit");
                let compound = CompoundDigit {
                    parent_kind,
                    parent_name,
                    digit: spec,
                    digit_name: digit_name.clone(),
                };
                (ctx.with_compound(compound), digit_name)
            }
            None => {
                let name = self.name_or_default(label, "digit", "digit");
                (
                    ctx.with_standalone(StandaloneKind::Digit(spec), name.clone()),
                    name,
                )
            }
        }
    }

    fn emit(&mut self, node: &LayerNode, ctx: &TraversalContext) {
        let index = self.records.len();
        let mut toggle = ctx.toggle.clone();

        let name = match node.name() {
            Some(raw) => match parse_prefix(raw) {
                // A toggle leaf applies to itself only.
                prefix @ Prefix::Toggle(_) => {
                    let name = self.name_or_default(prefix.label(), "toggle", "toggle");
                    toggle = Some(name.clone());
                    sanitize(&name)
                }
                _ => sanitize(raw),
            },
            None => String::new(),
        };
        let name = if name.is_empty() {
            format!("layer_{}", index)
        } else {
            name
        };

        self.records.push(ExtractedLeafRecord {
            index,
            name,
            original_name: node.name().map(str::to_string),
            folder_path: ctx.folder_path.clone(),
            bbox: node.bbox(),
            source: node.source().map(|p| p.to_path_buf()),
            toggle,
            standalone: ctx.standalone.clone(),
            compound: ctx.compound.clone(),
        });
    }

    /// Use the label, or a numbered default like `digit2` when it is empty.
    fn name_or_default(&mut self, label: &str, key: &str, stem: &str) -> String {
        if !label.is_empty() {
            return label.to_string();
        }
        let counter = self.unnamed.entry(key.to_string()).or_insert(0);
        *counter += 1;
        format!("{}{}", stem, counter)
    }
}
