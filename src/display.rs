//! Layer visibility for a widget showing a value.
//!
//! This is what a runtime does with a schema: given a widget and the value
//! to show, decide which of its layers are visible.

use serde::Serialize;

use crate::error::{LcdError, Result};
use crate::segment::{
    format_number, format_string, parse_number, Glyph, NumberFormat, SegmentTable,
};
use crate::widget::{DigitSlot, WidgetDescriptor};

/// Visibility of one layer file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerVisibility {
    pub layer: String,
    pub visible: bool,
}

impl LayerVisibility {
    fn new(layer: &str, visible: bool) -> Self {
        Self {
            layer: layer.to_string(),
            visible,
        }
    }
}

/// Compute the visibility of every layer of `widget` when showing `value`.
///
/// `format` only applies to number widgets.
pub fn visibility(
    widget: &WidgetDescriptor,
    value: &str,
    format: NumberFormat,
) -> Result<Vec<LayerVisibility>> {
    match widget {
        WidgetDescriptor::Toggle(w) => {
            let on = parse_toggle(value)?;
            Ok(w.layers.iter().map(|l| LayerVisibility::new(l, on)).collect())
        }
        WidgetDescriptor::Digit(w) => {
            let glyph = parse_digit(value);
            Ok(glyph_visibility(
                &w.layers,
                SegmentTable::for_segments(w.segments),
                w.segments,
                w.has_decimal,
                glyph,
            ))
        }
        WidgetDescriptor::Range(w) => {
            let (low, high) = parse_range(value)?;
            Ok(w.layers
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    let level = i + 1;
                    LayerVisibility::new(l, level >= low && level <= high)
                })
                .collect())
        }
        WidgetDescriptor::Number(w) => {
            let number = parse_number(value)?;
            let glyphs = format_number(number, &w.digits, format)?;
            Ok(slots_visibility(&w.digits, &glyphs, |slot| {
                SegmentTable::for_segments(slot.segments)
            }))
        }
        WidgetDescriptor::String(w) => {
            let glyphs = format_string(value, &w.digits);
            Ok(slots_visibility(&w.digits, &glyphs, |_| SegmentTable::Sixteen))
        }
    }
}

fn slots_visibility(
    slots: &[DigitSlot],
    glyphs: &[Glyph],
    table: impl Fn(&DigitSlot) -> SegmentTable,
) -> Vec<LayerVisibility> {
    slots
        .iter()
        .zip(glyphs)
        .flat_map(|(slot, glyph)| {
            glyph_visibility(
                &slot.layers,
                table(slot),
                slot.segments,
                slot.has_decimal,
                *glyph,
            )
        })
        .collect()
}

/// Map a glyph onto a digit's layers.
///
/// Layers are in canonical segment order; the decimal point, if any, is the
/// layer right after the last segment.
fn glyph_visibility(
    layers: &[String],
    table: SegmentTable,
    segments: u32,
    has_decimal: bool,
    glyph: Glyph,
) -> Vec<LayerVisibility> {
    let lit = glyph.segments(table);
    let decimal_layer = has_decimal.then_some(segments as usize);

    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let visible = if Some(i) == decimal_layer {
                glyph.show_decimal
            } else {
                lit.get(i).copied().unwrap_or(false)
            };
            LayerVisibility::new(layer, visible)
        })
        .collect()
}

fn parse_toggle(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "show" | "yes" => Ok(true),
        "off" | "false" | "0" | "hide" | "no" => Ok(false),
        _ => Err(LcdError::Value {
            message: format!("'{}' is not a toggle state", value),
            help: Some("use on/off, true/false, 1/0 or show/hide".to_string()),
        }),
    }
}

/// First character of the value, uppercased; a following `.` lights the decimal point.
fn parse_digit(value: &str) -> Glyph {
    let mut chars = value.chars();
    match chars.next() {
        Some('.') => Glyph::new(' ', true),
        Some(ch) => {
            let ch = ch.to_uppercase().next().unwrap_or(ch);
            Glyph::new(ch, chars.next() == Some('.'))
        }
        None => Glyph::BLANK,
    }
}

/// `N` shows levels `1..=N`; `A:B` shows levels `A..=B`.
fn parse_range(value: &str) -> Result<(usize, usize)> {
    let invalid = || LcdError::Value {
        message: format!("'{}' is not a range level", value),
        help: Some("use a level like 3, or an inclusive span like 2:4".to_string()),
    };
    let level = |s: &str| s.trim().parse::<usize>().map_err(|_| invalid());

    match value.split_once(':') {
        Some((low, high)) => {
            let (low, high) = (level(low)?, level(high)?);
            if low > high {
                return Err(invalid());
            }
            Ok((low, high))
        }
        None => Ok((1, level(value)?)),
    }
}
