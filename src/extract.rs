//! Document to schema pipeline.

use crate::classify::{classify_document, ExtractedLeafRecord};
use crate::document::Document;
use crate::schema::{LayerEntry, Schema};
use crate::widget::{aggregate, NameConflict};

/// Result of extracting widgets from one document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub schema: Schema,
    /// Leaves that were exported, in traversal order.
    pub records: Vec<ExtractedLeafRecord>,
    /// Leaves dropped because they have no visible content.
    pub skipped: Vec<ExtractedLeafRecord>,
    pub conflicts: Vec<NameConflict>,
}

/// Classify, filter and aggregate a document into its schema.
pub fn extract(document: &Document) -> Extraction {
    let (records, skipped): (Vec<_>, Vec<_>) = classify_document(document)
        .into_iter()
        .partition(ExtractedLeafRecord::has_content);

    let (widgets, conflicts) = aggregate(&records).into_parts();

    let mut schema = Schema::new(&document.source_file, document.width, document.height);
    schema.layers = records.iter().map(LayerEntry::from_record).collect();
    schema.widgets = widgets;

    Extraction {
        schema,
        records,
        skipped,
        conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse_tree, BoundingBox, LayerNode};
    use crate::widget::{WidgetDescriptor, WidgetKind};
    use pretty_assertions::assert_eq;

    fn document(layers: Vec<LayerNode>) -> Document {
        Document {
            source_file: "dash.psb".to_string(),
            width: 100,
            height: 50,
            layers,
        }
    }

    #[test]
    fn test_empty_leaves_are_skipped() {
        let doc = document(vec![LayerNode::group(
            "[T]light",
            vec![
                LayerNode::pixel("on", BoundingBox::new(0, 0, 5, 5)),
                LayerNode::pixel("ghost", BoundingBox::new(4, 4, 4, 9)),
                LayerNode::unnamed(None),
            ],
        )]);

        let extraction = extract(&doc);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.skipped.len(), 2);
        assert_eq!(extraction.schema.layers.len(), 1);
        assert_eq!(
            extraction.schema.widget("light").unwrap().layer_refs(),
            vec!["light--on.png"]
        );
    }

    #[test]
    fn test_schema_header() {
        let extraction = extract(&document(Vec::new()));
        assert_eq!(extraction.schema.source_file, "dash.psb");
        assert_eq!(extraction.schema.document_width, 100);
        assert_eq!(extraction.schema.document_height, 50);
        assert!(extraction.schema.widgets.is_empty());
    }

    #[test]
    fn test_conflicts_are_reported() {
        let doc = document(vec![
            LayerNode::group("[T]gauge", vec![LayerNode::pixel("a", BoundingBox::new(0, 0, 2, 2))]),
            LayerNode::group("[R]gauge", vec![LayerNode::pixel("b", BoundingBox::new(0, 0, 2, 2))]),
        ]);

        let extraction = extract(&doc);

        assert_eq!(extraction.conflicts.len(), 1);
        assert_eq!(extraction.conflicts[0].existing, WidgetKind::Toggle);
        assert_eq!(extraction.conflicts[0].requested, WidgetKind::Range);
    }

    #[test]
    fn test_layer_tree_end_to_end() {
        let yaml = r##"
source_file: cluster.psb
width: 320
height: 240
layers:
  - name: "[N]speed"
    children:
      - name: "[D:7p]digit2"
        children:
          - { name: dp, bbox: [40, 0, 42, 2] }
          - { name: g, bbox: [30, 0, 40, 2] }
          - { name: f, bbox: [30, 0, 40, 2] }
          - { name: e, bbox: [30, 0, 40, 2] }
          - { name: d, bbox: [30, 0, 40, 2] }
          - { name: c, bbox: [30, 0, 40, 2] }
          - { name: b, bbox: [30, 0, 40, 2] }
          - { name: a, bbox: [30, 0, 40, 2] }
      - name: "[D:7]digit1"
        children:
          - { name: g, bbox: [0, 0, 10, 2] }
          - { name: a, bbox: [0, 0, 10, 2] }
  - name: "#guides"
    children:
      - { name: grid, bbox: [0, 0, 320, 240] }
"##;
        let doc = parse_tree(yaml, "fallback.psb").unwrap();
        let extraction = extract(&doc);

        let Some(WidgetDescriptor::Number(speed)) = extraction.schema.widget("speed") else {
            panic!("speed should be a number widget");
        };
        let slot_names: Vec<&str> = speed.digits.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(slot_names, vec!["digit2", "digit1"]);
        assert_eq!(speed.digits[0].layers.len(), 8);
        assert_eq!(speed.digits[0].layers[0], "speed--digit2--a.png");
        assert_eq!(speed.digits[0].layers[7], "speed--digit2--dp.png");
        assert_eq!(speed.digits[1].layers, vec!["speed--digit1--a.png", "speed--digit1--g.png"]);
        assert_eq!(extraction.schema.layers.len(), 10);
        assert!(extraction
            .schema
            .layers
            .iter()
            .all(|l| !l.filename.contains("guides")));
    }
}
