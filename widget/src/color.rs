//! 24-bit fill colors and their `#RRGGBB` text form.
//!
//! Hosts that persist numbers as single-precision floats cannot store a
//! 24-bit color exactly, so colors are persisted as hex text and that text
//! is also accepted on input. Shorthand `#RGB` expands to `#RRGGBB`.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_COLOR;

/// Mask applied on every assignment.
const COLOR_MASK: u32 = 0xFF_FF_FF;

/// Leading marker of the text form.
pub const HEX_MARKER: char = '#';

/// A 24-bit RGB value. Always masked to `0x000000..=0xFFFFFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Color(u32);

impl Color {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value & COLOR_MASK)
    }

    /// Color from a host float argument. The fractional part is dropped and
    /// negative values wrap through the mask like a two's complement int.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_float(value: f64) -> Self {
        Self::new((value as i32) as u32)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(*self))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        encode(color)
    }
}

impl From<String> for Color {
    fn from(text: String) -> Self {
        if text.starts_with(HEX_MARKER) { decode(&text) } else { Self::default() }
    }
}

/// Canonical text form: marker plus six uppercase hex digits.
#[must_use]
pub fn encode(color: Color) -> String {
    format!("{HEX_MARKER}{:06X}", color.value())
}

/// Parse a hex color whose first character is the marker.
///
/// The marker itself is not checked. Digits are read case-insensitively up
/// to the first non-hex character, at most six. Three digits are expanded
/// (`abc` → `aabbcc`); any other count fills the most significant nibbles
/// and leaves the rest zero.
#[must_use]
pub fn decode(text: &str) -> Color {
    let mut digits = [0u32; 6];
    let mut count = 0;

    for (slot, ch) in digits.iter_mut().zip(text.chars().skip(1)) {
        let Some(digit) = ch.to_digit(16) else {
            break;
        };
        *slot = digit;
        count += 1;
    }

    if count == 3 {
        let [r, g, b, ..] = digits;
        digits = [r, r, g, g, b, b];
    }

    Color::new(digits.iter().fold(0, |acc, digit| (acc << 4) | digit))
}
