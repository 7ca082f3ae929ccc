//! Creation arguments and the persisted textual form.
//!
//! Both share one fixed argument order: width, height, send name, receive
//! name, color. The color is stored as hex text because host floats cannot
//! hold every 24-bit value.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::fmt;

use crate::color::Color;
use crate::consts::CLASS_NAME;
use crate::geometry::PixelPoint;
use crate::message::{Atom, color_from_atom, size_from_atoms};

/// Index of the raw send name in the stored atoms (class name first).
const STORED_SEND_INDEX: usize = 3;

/// Index of the raw receive name in the stored atoms.
const STORED_RECEIVE_INDEX: usize = 4;

/// Arguments given at creation, all optional.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationArgs {
    pub width: i32,
    pub height: Option<i32>,
    pub send: String,
    pub receive: String,
    pub color: Option<Color>,
}

impl Default for CreationArgs {
    fn default() -> Self {
        Self::from_atoms(&[])
    }
}

impl CreationArgs {
    /// Read `[width height send receive color]`. Non-symbol names read as
    /// empty; the color applies only when a fifth argument is present.
    #[must_use]
    pub fn from_atoms(atoms: &[Atom]) -> Self {
        let (width, height) = size_from_atoms(atoms);
        let symbol_at = |i: usize| atoms.get(i).and_then(Atom::as_symbol).unwrap_or_default().to_string();

        Self { width, height, send: symbol_at(2), receive: symbol_at(3), color: atoms.get(4).map(color_from_atom) }
    }
}

/// Raw send/receive names from the stored atoms, if there are enough of
/// them. Non-symbol atoms are rendered to text.
#[must_use]
pub fn stored_raw_names(stored: &[Atom]) -> Option<(String, String)> {
    if stored.len() <= STORED_RECEIVE_INDEX {
        return None;
    }
    Some((stored[STORED_SEND_INDEX].to_string(), stored[STORED_RECEIVE_INDEX].to_string()))
}

/// Everything written when the host saves the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedForm {
    /// Position normalized to zoom factor 1.
    pub position: PixelPoint,
    pub width: i32,
    pub height: i32,
    pub send: String,
    pub receive: String,
    pub color: Color,
}

impl SavedForm {
    /// Stored atoms as the host keeps them: class name, then the arguments.
    #[must_use]
    pub fn atoms(&self) -> Vec<Atom> {
        vec![
            CLASS_NAME.into(),
            self.width.into(),
            self.height.into(),
            self.send.as_str().into(),
            self.receive.as_str().into(),
            self.color.to_string().into(),
        ]
    }
}

impl fmt::Display for SavedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#X obj {} {}", self.position.x, self.position.y)?;
        for atom in self.atoms() {
            write!(f, " {atom}")?;
        }
        f.write_str(";")
    }
}
