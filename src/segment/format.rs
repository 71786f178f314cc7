//! Number and string formatting onto digit slots.

use crate::error::{LcdError, Result};
use crate::widget::DigitSlot;

use super::table::{segments_for, SegmentTable};

/// What one digit slot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub show_decimal: bool,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        show_decimal: false,
    };

    pub fn new(ch: char, show_decimal: bool) -> Self {
        Self { ch, show_decimal }
    }

    /// Segment visibility for this glyph's character.
    pub fn segments(&self, table: SegmentTable) -> Vec<bool> {
        segments_for(self.ch, table)
    }
}

/// Options for [`format_number`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberFormat {
    /// Pad the integer part with `0` up to the decimal slot.
    pub leading_zeros: bool,
    /// Fixed number of fractional digits. Only honoured when a slot has a decimal point.
    pub decimal_places: Option<usize>,
}

impl NumberFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leading_zeros(mut self, yes: bool) -> Self {
        self.leading_zeros = yes;
        self
    }

    pub fn decimal_places(mut self, places: Option<usize>) -> Self {
        self.decimal_places = places;
        self
    }
}

/// An f64 has at most this many fractional decimal digits, so more places
/// only append zeros.
const MAX_DECIMAL_PLACES: usize = 1074;

/// Parse user input for a number widget.
///
/// Only finite numbers are accepted.
pub fn parse_number(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed.parse().map_err(|_| LcdError::Value {
        message: format!("'{}' is not a number", text),
        help: Some("number widgets accept values like 42, -3 or 12.5".to_string()),
    })?;
    ensure_finite(value)?;
    Ok(value)
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LcdError::Value {
            message: format!("cannot display {} on a number widget", value),
            help: Some("only finite values can be shown".to_string()),
        })
    }
}

/// Lay out `value` across `slots`, one glyph per slot.
///
/// The integer part fills the slots up to and including the first
/// decimal-capable slot, right-aligned; the fraction fills the slots after
/// it, left-aligned. Without a decimal slot, or when the value has no
/// fractional digits, the integer part is right-aligned across all slots.
/// Overflowing integers keep their least significant digits.
pub fn format_number(value: f64, slots: &[DigitSlot], format: NumberFormat) -> Result<Vec<Glyph>> {
    ensure_finite(value)?;

    let decimal_index = slots.iter().position(|slot| slot.has_decimal);

    let text = match (format.decimal_places, decimal_index) {
        (Some(places), Some(_)) => format!("{:.*}", places.min(MAX_DECIMAL_PLACES), value),
        // Display for f64 never uses exponent notation and drops `.0`.
        _ => format!("{}", value),
    };

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), fraction),
        None => (text.clone(), ""),
    };

    let integer = if format.leading_zeros {
        let width = decimal_index.map_or(slots.len(), |index| index + 1);
        zero_pad(&integer, width)
    } else {
        integer
    };

    let chars: Vec<char> = match decimal_index {
        Some(index) if !fraction.is_empty() => {
            let integer_slots = index + 1;
            let mut chars = align_right(&integer, integer_slots);
            chars.extend(align_left(fraction, slots.len() - integer_slots));
            chars
        }
        _ => align_right(&integer, slots.len()),
    };

    let show_decimal = !fraction.is_empty();
    Ok(slots
        .iter()
        .zip(chars)
        .map(|(slot, ch)| Glyph::new(ch, slot.has_decimal && show_decimal))
        .collect())
}

/// Lay out `text` across `slots`, left-aligned.
///
/// A `.` lights the decimal point of the preceding glyph when its slot has
/// one; otherwise it takes a slot of its own and shows nothing. Letters are
/// uppercased. Text beyond the last slot is dropped.
pub fn format_string(text: &str, slots: &[DigitSlot]) -> Vec<Glyph> {
    let mut glyphs: Vec<Glyph> = Vec::with_capacity(slots.len());

    for ch in text.chars().flat_map(char::to_uppercase) {
        if ch == '.' {
            let position = glyphs.len().checked_sub(1);
            if let (Some(last), Some(slot)) = (glyphs.last_mut(), position.map(|i| &slots[i])) {
                if slot.has_decimal && !last.show_decimal {
                    last.show_decimal = true;
                    continue;
                }
            }
        }
        if glyphs.len() == slots.len() {
            break;
        }
        glyphs.push(Glyph::new(ch, false));
    }

    glyphs.resize(slots.len(), Glyph::BLANK);
    glyphs
}

/// Pad with zeros after any sign so `-5` becomes `-05`.
fn zero_pad(integer: &str, width: usize) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };
    let pad = width.saturating_sub(sign.len() + digits.len());
    format!("{}{}{}", sign, "0".repeat(pad), digits)
}

/// The last `width` characters, space-padded on the left.
fn align_right(text: &str, width: usize) -> Vec<char> {
    let chars: Vec<char> = text.chars().collect();
    let start = chars.len().saturating_sub(width);
    let mut out = vec![' '; width - (chars.len() - start)];
    out.extend_from_slice(&chars[start..]);
    out
}

/// The first `width` characters, space-padded on the right.
fn align_left(text: &str, width: usize) -> Vec<char> {
    let mut out: Vec<char> = text.chars().take(width).collect();
    out.resize(width, ' ');
    out
}
