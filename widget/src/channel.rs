//! Named-channel bindings: the settable send/receive slots and the fixed
//! pair reserved for the properties editor.
//!
//! DESIGN
//! ======
//! Each slot keeps the raw name (as typed or persisted, placeholders intact)
//! and the name the host resolved it to. `None` stands for the `empty`
//! sentinel. Connectivity is derived from the resolved name only.
//!
//! The receive slot owns at most one registration. Rebinding unbinds the
//! old name before binding the new one, and a refused bind leaves the slot
//! disconnected, so the slot never points at a name it does not hold.
//!
//! Rebinding reports a [`Transition`] when connectivity flips; the caller
//! feeds it to [`apply_transition`] to draw or erase the matching strip.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use tracing::{debug, warn};

use crate::color::Color;
use crate::consts::EMPTY;
use crate::host::{BindError, Canvas, Channels, Host, InstanceId};
use crate::message::OutMessage;
use crate::render::{Painter, Region, RegionSet};

/// Map the empty string and the `empty` sentinel to `None`.
#[must_use]
pub fn normalize(name: &str) -> Option<&str> {
    if name.is_empty() || name == EMPTY { None } else { Some(name) }
}

/// Connectivity flip caused by a rebind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Connected,
    Disconnected,
}

impl Transition {
    fn between(was: bool, now: bool) -> Option<Self> {
        match (was, now) {
            (false, true) => Some(Self::Connected),
            (true, false) => Some(Self::Disconnected),
            _ => None,
        }
    }
}

/// Outcome of [`Bindings::set_receive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebind {
    pub transition: Option<Transition>,
    /// Set when the host refused the new name; the slot is then disconnected.
    pub error: Option<BindError>,
}

/// One named-channel slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSlot {
    raw: Option<String>,
    resolved: Option<String>,
}

impl ChannelSlot {
    /// Raw name, or the sentinel when unset.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        self.raw.as_deref().unwrap_or(EMPTY)
    }

    /// Host-expanded name, `None` when not connected.
    #[must_use]
    pub fn resolved(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.resolved.is_some()
    }

    /// Whether the raw name is still the sentinel.
    #[must_use]
    pub fn raw_is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// Store `raw` and resolve it through the host.
    fn assign(&mut self, channels: &impl Channels, raw: &str) {
        self.raw = normalize(raw).map(str::to_string);
        self.resolved = self
            .raw
            .as_deref()
            .map(|name| channels.expand(name))
            .filter(|name| normalize(name).is_some());
    }

    /// Overwrite the raw name without touching the resolved one.
    fn set_raw(&mut self, raw: &str) {
        self.raw = normalize(raw).map(str::to_string);
    }
}

/// All channel state owned by one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    id: InstanceId,
    send: ChannelSlot,
    receive: ChannelSlot,
    fixed_send: String,
    fixed_receive: String,
}

impl Bindings {
    /// Empty bindings with the fixed receive channel registered.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] if the host refuses the fixed receive name.
    pub fn open(channels: &mut impl Channels, id: &InstanceId) -> Result<Self, BindError> {
        let fixed_receive = id.fixed_receive_name();
        channels.bind(&fixed_receive, id)?;
        debug!(%id, name = %fixed_receive, "fixed receive bound");

        Ok(Self {
            id: id.clone(),
            send: ChannelSlot::default(),
            receive: ChannelSlot::default(),
            fixed_send: id.fixed_send_name(),
            fixed_receive,
        })
    }

    #[must_use]
    pub fn send(&self) -> &ChannelSlot {
        &self.send
    }

    #[must_use]
    pub fn receive(&self) -> &ChannelSlot {
        &self.receive
    }

    #[must_use]
    pub fn fixed_send(&self) -> &str {
        &self.fixed_send
    }

    #[must_use]
    pub fn fixed_receive(&self) -> &str {
        &self.fixed_receive
    }

    /// Affordance strips currently shown: the inlet while nothing is bound
    /// for sending, the outlet while nothing is bound for receiving.
    #[must_use]
    pub fn affordances(&self) -> RegionSet {
        let mut set = RegionSet::empty();
        if !self.send.is_connected() {
            set |= RegionSet::INLET;
        }
        if !self.receive.is_connected() {
            set |= RegionSet::OUTLET;
        }
        set
    }

    /// Rebind the outbound channel.
    pub fn set_send(&mut self, channels: &impl Channels, raw: &str) -> Option<Transition> {
        let was = self.send.is_connected();
        self.send.assign(channels, raw);
        debug!(id = %self.id, raw = self.send.raw_name(), resolved = ?self.send.resolved(), "send name set");
        Transition::between(was, self.send.is_connected())
    }

    /// Rebind the inbound channel, releasing the previous registration first.
    pub fn set_receive(&mut self, channels: &mut impl Channels, raw: &str) -> Rebind {
        let was = self.receive.is_connected();
        if let Some(old) = self.receive.resolved.take() {
            channels.unbind(&old, &self.id);
            debug!(id = %self.id, name = %old, "receive unbound");
        }

        self.receive.assign(&*channels, raw);

        let mut error = None;
        if let Some(name) = self.receive.resolved.clone() {
            match channels.bind(&name, &self.id) {
                Ok(()) => debug!(id = %self.id, %name, "receive bound"),
                Err(e) => {
                    warn!(id = %self.id, error = %e, "receive bind refused");
                    self.receive.resolved = None;
                    error = Some(e);
                }
            }
        }

        Rebind { transition: Transition::between(was, self.receive.is_connected()), error }
    }

    /// Fill raw names the deferred init found, only where still unset.
    pub fn restore_raw(&mut self, send: Option<&str>, receive: Option<&str>) {
        if let Some(raw) = send.filter(|_| self.send.raw_is_empty()) {
            self.send.set_raw(raw);
        }
        if let Some(raw) = receive.filter(|_| self.receive.raw_is_empty()) {
            self.receive.set_raw(raw);
        }
    }

    /// Forget raw names while keeping resolved bindings. Used at creation,
    /// where the arguments arrive already expanded.
    pub fn clear_raw(&mut self) {
        self.send.raw = None;
        self.receive.raw = None;
    }

    /// Deliver on the primary outlet, the outbound channel if connected,
    /// and the fixed editor channel if anything listens there.
    pub fn dispatch(&self, host: &mut impl Host, message: &OutMessage) {
        host.outlet(message);
        if let Some(name) = self.send.resolved() {
            if host.has_listener(name) {
                host.send(name, message);
            }
        }
        if host.has_listener(&self.fixed_send) {
            host.send(&self.fixed_send, message);
        }
    }

    /// Release every registration this widget holds.
    pub fn close(self, channels: &mut impl Channels) {
        channels.unbind(&self.fixed_receive, &self.id);
        if let Some(name) = self.receive.resolved() {
            channels.unbind(name, &self.id);
        }
        debug!(id = %self.id, "bindings released");
    }
}

/// Draw or erase the affordance strip for `region` after a rebind.
///
/// Connecting a channel removes the strip; disconnecting draws it again.
/// Nothing happens while the widget is hidden.
pub fn apply_transition(
    transition: Transition,
    region: Region,
    painter: &Painter<'_>,
    canvas: &mut impl Canvas,
    fill: Color,
) {
    if !canvas.is_visible() {
        return;
    }
    match transition {
        Transition::Connected => painter.erase(canvas, region),
        Transition::Disconnected => painter.sync(canvas, true, region.into(), fill),
    }
}
