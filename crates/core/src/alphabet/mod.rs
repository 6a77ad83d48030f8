use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// One element of a Morse character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Length of the lit stretch for this symbol, in units.
    pub fn units(self) -> NonZeroU32 {
        match self {
            Symbol::Dot => units(1),
            Symbol::Dash => units(3),
        }
    }

    fn from_code_char(c: u8) -> Option<Self> {
        match c {
            b'.' => Some(Symbol::Dot),
            b'-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// Compile-time checked unit count.
pub(crate) const fn units(count: u32) -> NonZeroU32 {
    match NonZeroU32::new(count) {
        Some(count) => count,
        None => panic!("morse element must last at least one unit"),
    }
}

/// International Morse table for the letters and digits carried by the clip.
pub const MORSE_TABLE: [(char, &str); 36] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

/// Returns the dot/dash string for `c`, ignoring case.
pub fn code_for(c: char) -> Option<&'static str> {
    let upper = c.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|(_, code)| *code)
}

pub fn symbols_for(c: char) -> Option<impl Iterator<Item = Symbol>> {
    code_for(c).map(|code| code.bytes().filter_map(Symbol::from_code_char))
}

/// Human-readable rendering: characters separated by a space, words by ` / `.
/// Characters outside the table are dropped.
pub fn render_code(message: &str) -> String {
    message
        .split(' ')
        .map(|word| {
            word.chars()
                .filter_map(code_for)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" / ")
}
