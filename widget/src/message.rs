//! Message vocabulary: atoms, inbound selectors, and outbound events.
//!
//! DESIGN
//! ======
//! The host delivers messages as a selector plus a list of atoms.
//! [`Message::parse`] is the selector table: it maps the selector to a typed
//! [`Message`] once, so the widget's handlers never look at raw atoms.
//! Missing float arguments read as 0 and missing symbol arguments read as
//! the empty symbol, which is how the host fills typed method arguments.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{self, Color, HEX_MARKER};
use crate::consts::DEFAULT_SIZE;

/// Error returned by [`Message::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    /// No handler exists for the selector.
    #[error("no method for '{0}'")]
    UnknownSelector(String),
    /// The selector is reserved for host notifications.
    #[error("'{0}' is sent by the host only")]
    HostOnly(&'static str),
    /// An argument has the wrong kind for the selector.
    #[error("bad arguments for message '{selector}' at position {index}")]
    BadArguments { selector: &'static str, index: usize },
}

// =============================================================================
// ATOMS
// =============================================================================

/// One message argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Atom {
    Float(f64),
    Symbol(String),
}

impl Atom {
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Symbol(_) => None,
        }
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Float(_) => None,
            Self::Symbol(name) => Some(name),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Symbol(name) => f.write_str(name),
        }
    }
}

impl From<f64> for Atom {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for Atom {
    fn from(value: i32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }
}

impl From<String> for Atom {
    fn from(name: String) -> Self {
        Self::Symbol(name)
    }
}

/// Split whitespace-separated text into atoms; numeric words become floats.
#[must_use]
pub fn parse_atoms(text: &str) -> Vec<Atom> {
    text.split_whitespace()
        .map(|word| match word.parse::<f64>() {
            Ok(value) if value.is_finite() => Atom::Float(value),
            _ => Atom::Symbol(word.to_string()),
        })
        .collect()
}

/// Host floats carry integers; the fraction is dropped.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn float_to_int(value: f64) -> i32 {
    value as i32
}

// =============================================================================
// INBOUND
// =============================================================================

/// Inbound selectors the widget answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Size,
    Color,
    Delta,
    Pos,
    Send,
    Receive,
    Status,
    Get,
    Dirty,
    Zoom,
    Motion,
}

impl Selector {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Color => "color",
            Self::Delta => "delta",
            Self::Pos => "pos",
            Self::Send => "send",
            Self::Receive => "receive",
            Self::Status => "status",
            Self::Get => "get",
            Self::Dirty => "dirty",
            Self::Zoom => "zoom",
            Self::Motion => "motion",
        }
    }
}

impl FromStr for Selector {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "size" => Ok(Self::Size),
            "color" => Ok(Self::Color),
            "delta" => Ok(Self::Delta),
            "pos" => Ok(Self::Pos),
            "send" => Ok(Self::Send),
            "receive" => Ok(Self::Receive),
            "status" => Ok(Self::Status),
            "get" => Ok(Self::Get),
            "dirty" => Ok(Self::Dirty),
            "zoom" => Ok(Self::Zoom),
            "motion" => Ok(Self::Motion),
            other => Err(MessageError::UnknownSelector(other.to_string())),
        }
    }
}

/// Stored parameters a `get` message can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Size,
    Names,
    Color,
    Pos,
    Zoom,
}

impl Query {
    /// Look up a query selector; unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "size" => Some(Self::Size),
            "names" => Some(Self::Names),
            "color" => Some(Self::Color),
            "pos" => Some(Self::Pos),
            "zoom" => Some(Self::Zoom),
            _ => None,
        }
    }
}

/// A parsed inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Resize; `height: None` makes the widget square.
    Size { width: i32, height: Option<i32> },
    /// Recolor; `None` when no argument was given.
    Color(Option<Color>),
    /// Move by a nominal offset.
    Delta { dx: i32, dy: i32 },
    /// Move to a nominal position.
    Pos { x: i32, y: i32 },
    /// Rebind the outbound channel (raw, unexpanded name).
    Send(String),
    /// Rebind the inbound channel (raw, unexpanded name).
    Receive(String),
    Status,
    /// Echo a stored parameter; unknown selectors parse to `None`.
    Get(Option<Query>),
    Dirty,
    /// Drag motion in device pixels.
    Motion { dx: i32, dy: i32 },
}

impl Message {
    /// Map a user-level selector and its atoms to a typed message.
    ///
    /// # Errors
    ///
    /// [`MessageError::UnknownSelector`] for selectors without a handler,
    /// [`MessageError::HostOnly`] for `zoom`, and
    /// [`MessageError::BadArguments`] when a typed argument has the wrong kind.
    pub fn parse(selector: &str, atoms: &[Atom]) -> Result<Self, MessageError> {
        let selector: Selector = selector.parse()?;
        let name = selector.as_str();

        match selector {
            Selector::Size => {
                let (width, height) = size_from_atoms(atoms);
                Ok(Self::Size { width, height })
            }
            Selector::Color => Ok(Self::Color(atoms.first().map(color_from_atom))),
            Selector::Delta => Ok(Self::Delta { dx: int_arg(name, atoms, 0)?, dy: int_arg(name, atoms, 1)? }),
            Selector::Pos => Ok(Self::Pos { x: int_arg(name, atoms, 0)?, y: int_arg(name, atoms, 1)? }),
            Selector::Send => Ok(Self::Send(symbol_arg(name, atoms, 0)?)),
            Selector::Receive => Ok(Self::Receive(symbol_arg(name, atoms, 0)?)),
            Selector::Status => Ok(Self::Status),
            Selector::Get => Ok(Self::Get(Query::from_name(&symbol_arg(name, atoms, 0)?))),
            Selector::Dirty => Ok(Self::Dirty),
            Selector::Zoom => Err(MessageError::HostOnly(name)),
            Selector::Motion => Ok(Self::Motion { dx: int_arg(name, atoms, 0)?, dy: int_arg(name, atoms, 1)? }),
        }
    }
}

/// Width and height from `[w]` or `[w h]`. Missing or non-float entries use
/// the default size; a single argument yields `height: None`.
#[must_use]
pub fn size_from_atoms(atoms: &[Atom]) -> (i32, Option<i32>) {
    let width = atoms.first().and_then(Atom::as_float).map_or(DEFAULT_SIZE, float_to_int);
    if atoms.len() == 1 {
        return (width, None);
    }
    let height = atoms.get(1).and_then(Atom::as_float).map_or(DEFAULT_SIZE, float_to_int);
    (width, Some(height))
}

/// Color from a float or from `#`-prefixed hex text. Any other symbol maps
/// to the default fill color.
#[must_use]
pub fn color_from_atom(atom: &Atom) -> Color {
    match atom {
        Atom::Float(value) => Color::from_float(*value),
        Atom::Symbol(text) if text.starts_with(HEX_MARKER) => color::decode(text),
        Atom::Symbol(_) => Color::default(),
    }
}

fn int_arg(selector: &'static str, atoms: &[Atom], index: usize) -> Result<i32, MessageError> {
    match atoms.get(index) {
        None => Ok(0),
        Some(Atom::Float(value)) => Ok(float_to_int(*value)),
        Some(Atom::Symbol(_)) => Err(MessageError::BadArguments { selector, index }),
    }
}

fn symbol_arg(selector: &'static str, atoms: &[Atom], index: usize) -> Result<String, MessageError> {
    match atoms.get(index) {
        None => Ok(String::new()),
        Some(Atom::Symbol(name)) => Ok(name.clone()),
        Some(Atom::Float(_)) => Err(MessageError::BadArguments { selector, index }),
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// Events and echoes the widget emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "selector", rename_all = "lowercase")]
pub enum OutMessage {
    Button { state: bool, shift: bool, alt: bool },
    Drag { x: i32, y: i32 },
    Hover { x: i32, y: i32 },
    Deltas { dx: i32, dy: i32 },
    Zoom { factor: i32 },
    Size { width: i32, height: i32 },
    Names { send: String, receive: String },
    Color { value: u32 },
    Pos { x: i32, y: i32 },
}

impl OutMessage {
    #[must_use]
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Button { .. } => "button",
            Self::Drag { .. } => "drag",
            Self::Hover { .. } => "hover",
            Self::Deltas { .. } => "deltas",
            Self::Zoom { .. } => "zoom",
            Self::Size { .. } => "size",
            Self::Names { .. } => "names",
            Self::Color { .. } => "color",
            Self::Pos { .. } => "pos",
        }
    }

    /// Arguments in host atom form.
    #[must_use]
    pub fn atoms(&self) -> Vec<Atom> {
        let flag = |on: bool| Atom::from(i32::from(on));
        match self {
            Self::Button { state, shift, alt } => vec![flag(*state), flag(*shift), flag(*alt)],
            Self::Drag { x, y } | Self::Hover { x, y } | Self::Pos { x, y } => vec![(*x).into(), (*y).into()],
            Self::Deltas { dx, dy } => vec![(*dx).into(), (*dy).into()],
            Self::Zoom { factor } => vec![(*factor).into()],
            Self::Size { width, height } => vec![(*width).into(), (*height).into()],
            Self::Names { send, receive } => vec![send.as_str().into(), receive.as_str().into()],
            Self::Color { value } => vec![Atom::Float(f64::from(*value))],
        }
    }
}

impl fmt::Display for OutMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())?;
        for atom in self.atoms() {
            write!(f, " {atom}")?;
        }
        Ok(())
    }
}
