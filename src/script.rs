//! Script lines: one JSON object per host event.
//!
//! Blank lines and lines starting with `#` or `//` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::Deserialize;
use widget::input::PointerEvent;
use widget::message::Atom;

use crate::HostError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// A message on the widget's inlet.
    Message {
        selector: String,
        #[serde(default)]
        args: Vec<Atom>,
    },
    /// A message sent to a named channel.
    Send {
        channel: String,
        selector: String,
        #[serde(default)]
        args: Vec<Atom>,
    },
    /// Hover or click over the widget.
    Pointer(PointerEvent),
    /// Drag motion after a grab, in device pixels.
    Motion { dx: i32, dy: i32 },
    Zoom { factor: i32 },
    Vis { visible: bool },
    Select { selected: bool },
    Displace { dx: i32, dy: i32 },
    /// Move the parent canvas origin.
    Offset { x: i32, y: i32 },
    /// Attach or detach an external listener (e.g. a properties editor).
    Listen { channel: String },
    Unlisten { channel: String },
    Properties,
    Save,
    Rect,
    Delete,
    Free,
}

/// Parse one script line.
///
/// # Errors
///
/// Returns [`HostError::Script`] when a non-comment line is not a valid event.
pub fn parse_line(number: usize, line: &str) -> Result<Option<HostEvent>, HostError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|source| HostError::Script { line: number, source })
}
