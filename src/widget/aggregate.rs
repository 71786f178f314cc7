//! Aggregation of leaf records into widget descriptors.

use indexmap::IndexMap;

use crate::classify::{CompoundDigit, CompoundKind, ExtractedLeafRecord, StandaloneKind, StandaloneWidget};

use super::types::{
    CompoundWidget, DigitSlot, DigitWidget, RangeWidget, ToggleWidget, WidgetDescriptor,
    WidgetKind,
};

/// A record that named a widget already registered under another kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub name: String,
    pub existing: WidgetKind,
    pub requested: WidgetKind,
    /// The layer that was not attached.
    pub layer: String,
}

/// Widgets keyed by name, in first-seen order.
///
/// Immutable after [`aggregate`] returns.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: IndexMap<String, WidgetDescriptor>,
    conflicts: Vec<NameConflict>,
}

impl WidgetRegistry {
    pub fn get(&self, name: &str) -> Option<&WidgetDescriptor> {
        self.widgets.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.widgets.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn conflicts(&self) -> &[NameConflict] {
        &self.conflicts
    }

    /// Split into the widget map and the conflicts found while building it.
    pub fn into_parts(self) -> (IndexMap<String, WidgetDescriptor>, Vec<NameConflict>) {
        (self.widgets, self.conflicts)
    }

    /// Look up or create a widget of the given kind.
    ///
    /// Returns None (and records a conflict) when the name is taken by
    /// another kind.
    fn entry(
        &mut self,
        name: &str,
        kind: WidgetKind,
        layer: &str,
        create: impl FnOnce() -> WidgetDescriptor,
    ) -> Option<&mut WidgetDescriptor> {
        let existing = self.widgets.get(name).map(WidgetDescriptor::kind);
        match existing {
            Some(existing) if existing != kind => {
                self.conflicts.push(NameConflict {
                    name: name.to_string(),
                    existing,
                    requested: kind,
                    layer: layer.to_string(),
                });
                None
            }
            Some(_) => self.widgets.get_mut(name),
            None => {
                self.widgets.insert(name.to_string(), create());
                self.widgets.get_mut(name)
            }
        }
    }

    fn add_toggle(&mut self, name: &str, layer: &str) {
        let create = || {
            WidgetDescriptor::Toggle(ToggleWidget {
                name: name.to_string(),
                layers: Vec::new(),
            })
        };
        if let Some(WidgetDescriptor::Toggle(w)) = self.entry(name, WidgetKind::Toggle, layer, create)
        {
            w.layers.push(layer.to_string());
        }
    }

    fn add_standalone(&mut self, widget: &StandaloneWidget, layer: &str) {
        let name = widget.name.as_str();
        match widget.kind {
            StandaloneKind::Digit(spec) => {
                let create = || {
                    WidgetDescriptor::Digit(DigitWidget {
                        name: name.to_string(),
                        segments: spec.segments,
                        has_decimal: spec.has_decimal,
                        layers: Vec::new(),
                    })
                };
                if let Some(WidgetDescriptor::Digit(w)) =
                    self.entry(name, WidgetKind::Digit, layer, create)
                {
                    w.layers.push(layer.to_string());
                }
            }
            StandaloneKind::Range => {
                let create = || {
                    WidgetDescriptor::Range(RangeWidget {
                        name: name.to_string(),
                        layers: Vec::new(),
                    })
                };
                if let Some(WidgetDescriptor::Range(w)) =
                    self.entry(name, WidgetKind::Range, layer, create)
                {
                    w.layers.push(layer.to_string());
                }
            }
            // Layers directly inside [N]/[S] belong to no digit; only register the widget.
            StandaloneKind::Number => {
                self.compound_entry(CompoundKind::Number, name, layer);
            }
            StandaloneKind::String => {
                self.compound_entry(CompoundKind::String, name, layer);
            }
        }
    }

    fn add_compound_digit(&mut self, digit: &CompoundDigit, layer: &str) {
        let Some(widget) = self.compound_entry(digit.parent_kind, &digit.parent_name, layer) else {
            return;
        };

        match widget.digits.iter_mut().find(|d| d.name == digit.digit_name) {
            Some(slot) => slot.layers.push(layer.to_string()),
            None => {
                let mut slot = DigitSlot::new(digit.digit_name.clone(), digit.digit.has_decimal)
                    .with_segments(digit.digit.segments);
                slot.layers.push(layer.to_string());
                widget.digits.push(slot);
            }
        }
    }

    fn compound_entry(
        &mut self,
        kind: CompoundKind,
        name: &str,
        layer: &str,
    ) -> Option<&mut CompoundWidget> {
        let create = || {
            let widget = CompoundWidget {
                name: name.to_string(),
                digits: Vec::new(),
            };
            match kind {
                CompoundKind::Number => WidgetDescriptor::Number(widget),
                CompoundKind::String => WidgetDescriptor::String(widget),
            }
        };
        let widget_kind = match kind {
            CompoundKind::Number => WidgetKind::Number,
            CompoundKind::String => WidgetKind::String,
        };

        match self.entry(name, widget_kind, layer, create)? {
            WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => Some(w),
            _ => None,
        }
    }

    /// Reverse digit layers from storage order into canonical segment order.
    ///
    /// Applied exactly once, to standalone digits and every compound slot.
    fn canonicalize(&mut self) {
        for widget in self.widgets.values_mut() {
            match widget {
                WidgetDescriptor::Digit(w) => w.layers.reverse(),
                WidgetDescriptor::Number(w) | WidgetDescriptor::String(w) => {
                    for slot in &mut w.digits {
                        slot.layers.reverse();
                    }
                }
                WidgetDescriptor::Toggle(_) | WidgetDescriptor::Range(_) => {}
            }
        }
    }
}

/// Build the widget registry from leaf records, preserving record order.
pub fn aggregate(records: &[ExtractedLeafRecord]) -> WidgetRegistry {
    let mut registry = WidgetRegistry::default();

    for record in records {
        let layer = record.filename();

        if let Some(toggle) = &record.toggle {
            registry.add_toggle(toggle, &layer);
        }

        if let Some(digit) = &record.compound {
            registry.add_compound_digit(digit, &layer);
        } else if let Some(widget) = &record.standalone {
            registry.add_standalone(widget, &layer);
        }
    }

    registry.canonicalize();
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::document::{BoundingBox, LayerNode};
    use pretty_assertions::assert_eq;

    fn leaf(name: &str) -> LayerNode {
        LayerNode::pixel(name, BoundingBox::new(0, 0, 10, 10))
    }

    fn group(name: &str, children: Vec<LayerNode>) -> LayerNode {
        LayerNode::group(name, children)
    }

    fn leaves(names: &[&str]) -> Vec<LayerNode> {
        names.iter().map(|n| leaf(n)).collect()
    }

    fn build(layers: &[LayerNode]) -> WidgetRegistry {
        aggregate(&classify(layers))
    }

    #[test]
    fn test_digit_segments_reversed_into_canonical_order() {
        // Storage order: D, C, E, G, B, F, A
        let registry = build(&[group(
            "[D:7]speed",
            leaves(&["segment_D", "segment_C", "segment_E", "segment_G", "segment_B", "segment_F", "segment_A"]),
        )]);

        let Some(WidgetDescriptor::Digit(speed)) = registry.get("speed") else {
            panic!("speed should be a digit widget");
        };
        assert_eq!(
            speed.layers,
            vec![
                "speed--segment_A.png",
                "speed--segment_F.png",
                "speed--segment_B.png",
                "speed--segment_G.png",
                "speed--segment_E.png",
                "speed--segment_C.png",
                "speed--segment_D.png",
            ]
        );
    }

    #[test]
    fn test_digit_with_decimal_puts_decimal_last() {
        let registry = build(&[group(
            "[D:7p]temperature",
            leaves(&["decimal", "segment_D", "segment_C", "segment_E", "segment_G", "segment_B", "segment_F", "segment_A"]),
        )]);

        let Some(WidgetDescriptor::Digit(temp)) = registry.get("temperature") else {
            panic!("temperature should be a digit widget");
        };
        assert!(temp.has_decimal);
        assert_eq!(temp.layers.len(), 8);
        assert_eq!(temp.layers.first().unwrap(), "temperature--segment_A.png");
        assert_eq!(temp.layers.last().unwrap(), "temperature--decimal.png");
    }

    #[test]
    fn test_sixteen_segment_digit() {
        let registry = build(&[group(
            "[D:16p]temp",
            leaves(&["dp", "d2", "d1", "c", "m", "l", "k", "e", "g2", "g1", "b", "j", "i", "h", "f", "a2", "a1"]),
        )]);

        let Some(WidgetDescriptor::Digit(temp)) = registry.get("temp") else {
            panic!("temp should be a digit widget");
        };
        assert_eq!(temp.segments, 16);
        assert_eq!(temp.layers.len(), 17);
        assert_eq!(temp.layers[0], "temp--a1.png");
        assert_eq!(temp.layers[16], "temp--dp.png");
    }

    #[test]
    fn test_range_keeps_traversal_order() {
        let registry = build(&[group("[R]battery", leaves(&["bar_1", "bar_2", "bar_3"]))]);

        let Some(WidgetDescriptor::Range(battery)) = registry.get("battery") else {
            panic!("battery should be a range widget");
        };
        assert_eq!(
            battery.layers,
            vec!["battery--bar_1.png", "battery--bar_2.png", "battery--bar_3.png"]
        );
    }

    #[test]
    fn test_toggle_collects_layers() {
        let registry = build(&[
            group("[T]Status", leaves(&["a", "b"])),
            leaf("[T]Status"),
        ]);

        let Some(WidgetDescriptor::Toggle(status)) = registry.get("Status") else {
            panic!("Status should be a toggle");
        };
        assert_eq!(
            status.layers,
            vec!["Status--a.png", "Status--b.png", "Status.png"]
        );
    }

    #[test]
    fn test_number_widget_slots_in_first_seen_order() {
        let registry = build(&[group(
            "[N]Speed",
            vec![
                group("[D:7]zeta", leaves(&["2", "1"])),
                group("[D:7p]alpha", leaves(&["dp", "2", "1"])),
                group("[D:7]mid", leaves(&["1"])),
            ],
        )]);

        let Some(WidgetDescriptor::Number(speed)) = registry.get("Speed") else {
            panic!("Speed should be a number widget");
        };
        let names: Vec<&str> = speed.digits.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        assert_eq!(speed.digits[0].layers, vec!["Speed--zeta--1.png", "Speed--zeta--2.png"]);
        assert!(speed.digits[1].has_decimal);
        assert_eq!(speed.digits[1].layers.last().unwrap(), "Speed--alpha--dp.png");
        assert_eq!(speed.decimal_index(), Some(1));
    }

    #[test]
    fn test_string_widget() {
        let sixteen = ["dp", "d2", "d1", "c", "m", "l", "k", "e", "g2", "g1", "b", "j", "i", "h", "f", "a2", "a1"];
        let digits = (0..3)
            .map(|i| group(&format!("[D:16p]char{}", i), leaves(&sixteen)))
            .collect();
        let registry = build(&[group("[S]message", digits)]);

        let Some(WidgetDescriptor::String(message)) = registry.get("message") else {
            panic!("message should be a string widget");
        };
        assert_eq!(message.digits.len(), 3);
        for slot in &message.digits {
            assert!(slot.has_decimal);
            assert_eq!(slot.segments, 16);
            assert_eq!(slot.layers.len(), 17);
        }
    }

    #[test]
    fn test_every_digit_reversed_once() {
        // A standalone digit and a compound slot side by side must end up in the
        // same orientation.
        let registry = build(&[
            group("[D:7]solo", leaves(&["b", "a"])),
            group("[N]num", vec![group("[D:7]one", leaves(&["b", "a"]))]),
        ]);

        let Some(WidgetDescriptor::Digit(solo)) = registry.get("solo") else {
            panic!("solo should be a digit widget");
        };
        let Some(WidgetDescriptor::Number(num)) = registry.get("num") else {
            panic!("num should be a number widget");
        };
        assert_eq!(solo.layers, vec!["solo--a.png", "solo--b.png"]);
        assert_eq!(num.digits[0].layers, vec!["num--one--a.png", "num--one--b.png"]);
    }

    #[test]
    fn test_reversal_round_trip() {
        let original = vec!["a", "b", "c"];
        let mut layers = original.clone();
        layers.reverse();
        layers.reverse();
        assert_eq!(layers, original);
    }

    #[test]
    fn test_empty_number_widget_registered() {
        let registry = build(&[group("[N]Empty", leaves(&["label"]))]);

        let Some(WidgetDescriptor::Number(empty)) = registry.get("Empty") else {
            panic!("Empty should be a number widget");
        };
        assert!(empty.digits.is_empty());
    }

    #[test]
    fn test_toggle_and_widget_on_same_layer() {
        let registry = build(&[group("[T]Power", vec![group("[R]bars", leaves(&["1"]))])]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Power", "bars"]);
    }

    #[test]
    fn test_name_conflict_reported() {
        let registry = build(&[
            group("[T]Speed", leaves(&["light"])),
            group("[D:7]Speed", leaves(&["a"])),
        ]);

        assert_eq!(registry.get("Speed").unwrap().kind(), WidgetKind::Toggle);
        assert_eq!(
            registry.conflicts(),
            &[NameConflict {
                name: "Speed".to_string(),
                existing: WidgetKind::Toggle,
                requested: WidgetKind::Digit,
                layer: "Speed--a.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_plain_layers_make_no_widgets() {
        let registry = build(&[leaf("Background"), group("UI", leaves(&["Logo"]))]);
        assert!(registry.is_empty());
    }
}
