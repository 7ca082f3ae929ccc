//! The seam between the widget and the environment that embeds it.
//!
//! ARCHITECTURE
//! ============
//! The widget never reads ambient state. Every call that needs the host
//! takes it as an explicit `&mut impl Host` parameter: the drawing surface,
//! the named-channel registry, the widget's primary outlet, and a scheduler
//! for the one-shot deferred init callback. The host serializes all calls,
//! so nothing here is `Send` or locked.

#[cfg(test)]
#[path = "host_test.rs"]
pub(crate) mod host_test;

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FIXED_RECEIVE_PREFIX, FIXED_SEND_PREFIX};
use crate::geometry::PixelPoint;
use crate::message::OutMessage;
use crate::render::DrawCommand;

/// Error returned by [`Channels::bind`] when the host refuses a name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot bind channel '{name}': {reason}")]
pub struct BindError {
    pub name: String,
    pub reason: String,
}

/// Stable token identifying one live widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    /// Wrap a host-provided token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Random 64-bit token in `0X` + uppercase hex form.
    #[must_use]
    pub fn generate() -> Self {
        let bits: u64 = rand::rng().random();
        Self(format!("0X{bits:X}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Channel the properties editor listens on for echoes.
    #[must_use]
    pub fn fixed_send_name(&self) -> String {
        format!("{FIXED_SEND_PREFIX}{}", self.0)
    }

    /// Channel the properties editor sends updates on.
    #[must_use]
    pub fn fixed_receive_name(&self) -> String {
        format!("{FIXED_RECEIVE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Retained-mode drawing surface plus the canvas services the widget uses.
pub trait Canvas {
    /// Whether the owning view is currently shown.
    fn is_visible(&self) -> bool;

    /// Offset added to the widget's stored position to get its on-screen
    /// origin (nonzero when the widget lives inside a nested view).
    fn parent_offset(&self) -> PixelPoint {
        PixelPoint::default()
    }

    /// Execute one drawing primitive.
    fn draw(&mut self, command: DrawCommand);

    /// Route pointer motion exclusively to this widget until the button is
    /// released; the host then calls `Mousepad::motion` with deltas.
    fn grab_motion(&mut self, id: &InstanceId, at: PixelPoint);

    /// Mark the owning document modified.
    fn mark_dirty(&mut self);

    /// Print a line on the host console.
    fn post(&mut self, line: &str);
}

/// The host's named-channel registry.
pub trait Channels {
    /// Expand host template placeholders in a raw channel name.
    fn expand(&self, raw: &str) -> String;

    /// Register `id` as a receiver of messages addressed to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] if the host cannot register the name.
    fn bind(&mut self, name: &str, id: &InstanceId) -> Result<(), BindError>;

    /// Remove a registration made by [`Channels::bind`].
    fn unbind(&mut self, name: &str, id: &InstanceId);

    /// Whether anything is registered on `name`.
    fn has_listener(&self, name: &str) -> bool;

    /// Deliver a message to every receiver registered on `name`.
    fn send(&mut self, name: &str, message: &OutMessage);
}

/// Everything the widget needs from its embedding environment.
pub trait Host: Canvas + Channels {
    /// Emit on the widget's primary output port.
    fn outlet(&mut self, message: &OutMessage);

    /// Schedule a zero-delay callback to `Mousepad::deferred_init`.
    fn schedule_init(&mut self, id: &InstanceId);

    /// Open the external properties editor, passing the instance token.
    fn open_properties(&mut self, document: &Path, id: &InstanceId);
}
