//! Converts a message into the on/off light schedule used by the audio clip.
//!
//! Timing follows the standard Morse convention in abstract units, where one
//! unit is the length of a dot:
//!
//! | element                         | light | units |
//! |---------------------------------|-------|-------|
//! | dot                             | on    | 1     |
//! | dash                            | on    | 3     |
//! | gap between symbols of a letter | off   | 1     |
//! | gap between letters of a word   | off   | 3     |
//! | gap between words               | off   | 7     |
//!
//! The clip was encoded with exactly these values, so they are fixed.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::alphabet::{symbols_for, units};

const SYMBOL_GAP_UNITS: NonZeroU32 = units(1);
const CHARACTER_GAP_UNITS: NonZeroU32 = units(3);
const WORD_GAP_UNITS: NonZeroU32 = units(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    On,
    Off,
}

impl SegmentKind {
    pub fn is_on(self) -> bool {
        matches!(self, SegmentKind::On)
    }
}

/// A stretch of constant light state measured in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub length_units: NonZeroU32,
}

impl Segment {
    pub fn new(kind: SegmentKind, length_units: NonZeroU32) -> Self {
        Self { kind, length_units }
    }

    pub fn on(length_units: NonZeroU32) -> Self {
        Self::new(SegmentKind::On, length_units)
    }

    pub fn off(length_units: NonZeroU32) -> Self {
        Self::new(SegmentKind::Off, length_units)
    }

    pub fn units(&self) -> u32 {
        self.length_units.get()
    }
}

/// Builds the ordered segment list for `message`.
///
/// Words are separated by single spaces. Characters missing from the alphabet
/// are skipped along with the gap that would follow them; the gap written by
/// the preceding character stays, so such messages may render under- or
/// over-spaced.
pub fn build_schedule(message: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let words: Vec<&str> = message.split(' ').collect();

    for (word_index, word) in words.iter().enumerate() {
        let chars: Vec<char> = word.chars().collect();

        for (char_index, c) in chars.iter().enumerate() {
            let Some(symbols) = symbols_for(*c) else {
                continue;
            };

            let mut emitted = false;
            for symbol in symbols {
                segments.push(Segment::on(symbol.units()));
                segments.push(Segment::off(SYMBOL_GAP_UNITS));
                emitted = true;
            }
            // No gap after the last symbol of a character.
            if emitted {
                segments.pop();
            }

            if char_index + 1 < chars.len() {
                segments.push(Segment::off(CHARACTER_GAP_UNITS));
            }
        }

        if word_index + 1 < words.len() {
            segments.push(Segment::off(WORD_GAP_UNITS));
        }
    }

    tracing::trace!(message, segments = segments.len(), "built morse schedule");
    segments
}

pub fn total_units(segments: &[Segment]) -> u64 {
    segments.iter().map(|segment| u64::from(segment.units())).sum()
}
