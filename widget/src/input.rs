//! Pointer input: modifier flags, host pointer events, and the two-state
//! machine that turns them into output events.
//!
//! The host reports every hover and click over the widget as a
//! [`PointerEvent`] carrying the current button state, and while the button
//! is held it routes raw motion deltas here too. There is no release
//! notification: the machine returns to [`InputState::Idle`] only when a
//! later pointer event reports the button up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::PixelPoint;
use crate::message::OutMessage;

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

/// A hover or click reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer position in device pixels, in the same space as the widget origin.
    pub at: PixelPoint,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub double_click: bool,
    pub button_down: bool,
}

/// Gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputState {
    /// No button held.
    #[default]
    Idle,
    /// Button held; the host routes motion to this widget.
    Dragging,
}

/// What a pointer event produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerOutcome {
    /// Messages to dispatch, in order.
    pub messages: Vec<OutMessage>,
    /// Whether to ask the host for exclusive motion reporting.
    pub grab: bool,
}

/// Last known button state and pointer position.
///
/// The position is kept in device pixels relative to the widget origin so
/// that sub-zoom motion deltas accumulate without loss; it is divided by the
/// zoom factor whenever it is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    state: InputState,
    offset: PixelPoint,
}

impl PointerState {
    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    #[must_use]
    pub fn button_down(&self) -> bool {
        self.state == InputState::Dragging
    }

    /// Last pointer position relative to the widget, in nominal units.
    #[must_use]
    pub fn position(&self, zoom: i32) -> PixelPoint {
        self.offset.to_nominal(zoom)
    }

    /// Handle a hover or click at `event.at` for a widget whose top-left is
    /// at `origin`.
    pub fn on_pointer(&mut self, event: &PointerEvent, origin: PixelPoint, zoom: i32) -> PointerOutcome {
        let mut messages = Vec::with_capacity(2);

        if event.button_down != self.button_down() {
            messages.push(OutMessage::Button {
                state: event.button_down,
                shift: event.modifiers.shift,
                alt: event.modifiers.alt,
            });
        }

        self.offset = event.at - origin;
        let PixelPoint { x, y } = self.position(zoom);

        if event.button_down {
            self.state = InputState::Dragging;
            messages.push(OutMessage::Drag { x, y });
        } else {
            self.state = InputState::Idle;
            messages.push(OutMessage::Hover { x, y });
        }

        PointerOutcome { messages, grab: event.button_down }
    }

    /// Handle a drag motion of `delta` device pixels. A zero delta emits
    /// nothing.
    pub fn on_motion(&mut self, delta: PixelPoint, zoom: i32) -> Vec<OutMessage> {
        if delta == PixelPoint::default() {
            return Vec::new();
        }

        self.offset = self.offset + delta;
        let PixelPoint { x, y } = self.position(zoom);
        let PixelPoint { x: dx, y: dy } = delta.to_nominal(zoom);

        vec![OutMessage::Drag { x, y }, OutMessage::Deltas { dx, dy }]
    }
}
