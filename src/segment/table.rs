//! Segment lookup tables.
//!
//! Each table maps a character to the segments lit for it. The array index
//! of a segment is its canonical position, which is also the index of its
//! layer in a digit widget.

/// Canonical 7-segment order.
pub mod seven {
    pub const TOP: usize = 0;
    pub const UPPER_LEFT: usize = 1;
    pub const UPPER_RIGHT: usize = 2;
    pub const MIDDLE: usize = 3;
    pub const LOWER_LEFT: usize = 4;
    pub const LOWER_RIGHT: usize = 5;
    pub const BOTTOM: usize = 6;

    pub const COUNT: usize = 7;
}

/// Canonical 16-segment order, read left to right, top to bottom.
pub mod sixteen {
    /// Top, left half.
    pub const A1: usize = 0;
    /// Top, right half.
    pub const A2: usize = 1;
    /// Upper left vertical.
    pub const F: usize = 2;
    /// Upper left diagonal.
    pub const H: usize = 3;
    /// Upper centre vertical.
    pub const I: usize = 4;
    /// Upper right diagonal.
    pub const J: usize = 5;
    /// Upper right vertical.
    pub const B: usize = 6;
    /// Middle, left half.
    pub const G1: usize = 7;
    /// Middle, right half.
    pub const G2: usize = 8;
    /// Lower left vertical.
    pub const E: usize = 9;
    /// Lower left diagonal.
    pub const K: usize = 10;
    /// Lower centre vertical.
    pub const L: usize = 11;
    /// Lower right diagonal.
    pub const M: usize = 12;
    /// Lower right vertical.
    pub const C: usize = 13;
    /// Bottom, left half.
    pub const D1: usize = 14;
    /// Bottom, right half.
    pub const D2: usize = 15;

    pub const COUNT: usize = 16;
}

const fn lit<const N: usize>(on: &[usize]) -> [bool; N] {
    let mut segments = [false; N];
    let mut i = 0;
    while i < on.len() {
        segments[on[i]] = true;
        i += 1;
    }
    segments
}

use seven::{BOTTOM, LOWER_LEFT, LOWER_RIGHT, MIDDLE, TOP, UPPER_LEFT, UPPER_RIGHT};
use sixteen::{A1, A2, B, C, D1, D2, E, F, G1, G2, H, I, J, K, L, M};

const SEVEN_SEGMENT: [(char, [bool; seven::COUNT]); 10] = [
    ('0', lit(&[TOP, UPPER_LEFT, UPPER_RIGHT, LOWER_LEFT, LOWER_RIGHT, BOTTOM])),
    ('1', lit(&[UPPER_RIGHT, LOWER_RIGHT])),
    ('2', lit(&[TOP, UPPER_RIGHT, MIDDLE, LOWER_LEFT, BOTTOM])),
    ('3', lit(&[TOP, UPPER_RIGHT, MIDDLE, LOWER_RIGHT, BOTTOM])),
    ('4', lit(&[UPPER_LEFT, UPPER_RIGHT, MIDDLE, LOWER_RIGHT])),
    ('5', lit(&[TOP, UPPER_LEFT, MIDDLE, LOWER_RIGHT, BOTTOM])),
    ('6', lit(&[TOP, UPPER_LEFT, MIDDLE, LOWER_LEFT, LOWER_RIGHT, BOTTOM])),
    ('7', lit(&[TOP, UPPER_RIGHT, LOWER_RIGHT])),
    ('8', lit(&[TOP, UPPER_LEFT, UPPER_RIGHT, MIDDLE, LOWER_LEFT, LOWER_RIGHT, BOTTOM])),
    ('9', lit(&[TOP, UPPER_LEFT, UPPER_RIGHT, MIDDLE, LOWER_RIGHT, BOTTOM])),
];

const SIXTEEN_SEGMENT: [(char, [bool; sixteen::COUNT]); 51] = [
    ('0', lit(&[A1, A2, F, J, B, E, K, C, D1, D2])),
    ('1', lit(&[B, C])),
    ('2', lit(&[A1, A2, B, G1, G2, E, D1, D2])),
    ('3', lit(&[A1, A2, B, G2, C, D1, D2])),
    ('4', lit(&[F, B, G1, G2, C])),
    ('5', lit(&[A1, A2, F, G1, G2, C, D1, D2])),
    ('6', lit(&[A1, A2, F, G1, G2, E, C, D1, D2])),
    ('7', lit(&[A1, A2, B, C])),
    ('8', lit(&[A1, A2, F, B, G1, G2, E, C, D1, D2])),
    ('9', lit(&[A1, A2, F, B, G1, G2, C, D1, D2])),
    ('A', lit(&[A1, A2, F, B, G1, G2, E, C])),
    ('B', lit(&[A1, A2, I, B, G2, L, C, D1, D2])),
    ('C', lit(&[A1, A2, F, E, D1, D2])),
    ('D', lit(&[A1, A2, I, B, L, C, D1, D2])),
    ('E', lit(&[A1, A2, F, G1, E, D1, D2])),
    ('F', lit(&[A1, A2, F, G1, E])),
    ('G', lit(&[A1, A2, F, G2, E, C, D1, D2])),
    ('H', lit(&[F, B, G1, G2, E, C])),
    ('I', lit(&[A1, A2, I, L, D1, D2])),
    ('J', lit(&[B, E, C, D1, D2])),
    ('K', lit(&[F, J, G1, E, M])),
    ('L', lit(&[F, E, D1, D2])),
    ('M', lit(&[F, H, J, B, E, C])),
    ('N', lit(&[F, H, B, E, M, C])),
    ('O', lit(&[A1, A2, F, B, E, C, D1, D2])),
    ('P', lit(&[A1, A2, F, B, G1, G2, E])),
    ('Q', lit(&[A1, A2, F, B, E, M, C, D1, D2])),
    ('R', lit(&[A1, A2, F, B, G1, G2, E, M])),
    ('S', lit(&[A1, A2, F, G1, G2, C, D1, D2])),
    ('T', lit(&[A1, A2, I, L])),
    ('U', lit(&[F, B, E, C, D1, D2])),
    ('V', lit(&[F, J, E, K])),
    ('W', lit(&[F, B, E, K, M, C])),
    ('X', lit(&[H, J, K, M])),
    ('Y', lit(&[H, J, L])),
    ('Z', lit(&[A1, A2, J, K, D1, D2])),
    (' ', lit(&[])),
    ('-', lit(&[G1, G2])),
    ('_', lit(&[D1, D2])),
    ('/', lit(&[J, K])),
    ('\\', lit(&[H, M])),
    // The decimal point is a separate layer, driven by `show_decimal`.
    ('.', lit(&[])),
    ('=', lit(&[G1, G2, D1, D2])),
    ('+', lit(&[I, G1, G2, L])),
    ('*', lit(&[H, I, J, G1, G2, K, L, M])),
    ('(', lit(&[J, M])),
    (')', lit(&[H, K])),
    ('[', lit(&[A1, F, E, D1])),
    (']', lit(&[A2, B, C, D2])),
    ('\'', lit(&[I])),
    ('"', lit(&[F, I])),
];

/// Which character table a digit uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTable {
    /// Numeric 7-segment display.
    Seven,
    /// Alphanumeric 16-segment display.
    Sixteen,
}

impl SegmentTable {
    /// Table for a digit declared with `segments` segments.
    ///
    /// `[D:16]` digits are alphanumeric; every other count uses the 7-segment table.
    pub fn for_segments(segments: u32) -> Self {
        if segments == sixteen::COUNT as u32 {
            SegmentTable::Sixteen
        } else {
            SegmentTable::Seven
        }
    }

    /// Number of segments (without the decimal point).
    pub fn segment_count(self) -> usize {
        match self {
            SegmentTable::Seven => seven::COUNT,
            SegmentTable::Sixteen => sixteen::COUNT,
        }
    }

    /// Segments for a character, or None if the table has no entry.
    pub fn lookup(self, ch: char) -> Option<&'static [bool]> {
        match self {
            SegmentTable::Seven => SEVEN_SEGMENT
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, segments)| segments.as_slice()),
            SegmentTable::Sixteen => SIXTEEN_SEGMENT
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, segments)| segments.as_slice()),
        }
    }

}

/// Segment visibility for a character; all off if the table has no entry.
pub fn segments_for(ch: char, table: SegmentTable) -> Vec<bool> {
    table
        .lookup(ch)
        .map(<[bool]>::to_vec)
        .unwrap_or_else(|| vec![false; table.segment_count()])
}
