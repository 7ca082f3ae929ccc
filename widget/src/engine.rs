use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::channel::{Bindings, apply_transition};
use crate::color::Color;
use crate::consts::PROPERTIES_FILE;
use crate::geometry::{Geometry, PixelPoint, Rect};
use crate::host::{BindError, Canvas, Host, InstanceId};
use crate::input::{PointerEvent, PointerState};
use crate::message::{Atom, Message, MessageError, OutMessage, Query};
use crate::persist::{CreationArgs, SavedForm, stored_raw_names};
use crate::render::{DrawCommand, Painter, Region, RegionSet};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Error returned from widget operations.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Message(#[from] MessageError),
    /// The properties editor document is missing.
    #[error("could not find {}", path.display())]
    PropertiesUnavailable { path: PathBuf },
}

/// The mousepad widget.
///
/// Owns geometry, fill color, position, pointer state and channel bindings.
/// Every operation that touches the outside world takes the host explicitly.
#[derive(Debug)]
pub struct Mousepad {
    id: InstanceId,
    geometry: Geometry,
    color: Color,
    /// Stored position in device pixels, before any parent offset.
    position: PixelPoint,
    pointer: PointerState,
    bindings: Bindings,
    init_done: bool,
}

impl Mousepad {
    /// Create a widget from (already expanded) creation arguments.
    ///
    /// Binds the fixed editor channel and the inbound channel, then asks the
    /// host to schedule [`Mousepad::deferred_init`]. Nothing is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Bind`] if a channel cannot be bound; any
    /// registration made before the failure is released.
    pub fn new(host: &mut impl Host, id: InstanceId, position: PixelPoint, args: &CreationArgs) -> Result<Self, WidgetError> {
        let bindings = Bindings::open(host, &id)?;
        let mut geometry = Geometry::default();
        geometry.set_size(args.width, args.height);

        let mut pad = Self {
            id,
            geometry,
            color: args.color.unwrap_or_default(),
            position,
            pointer: PointerState::default(),
            bindings,
            init_done: false,
        };

        pad.bindings.set_send(&*host, &args.send);
        if let Some(e) = pad.bindings.set_receive(host, &args.receive).error {
            pad.bindings.close(host);
            return Err(e.into());
        }

        // Creation arguments arrive expanded; raw names come from the deferred init.
        pad.bindings.clear_raw();
        host.schedule_init(&pad.id);

        info!(id = %pad.id, width = pad.geometry.width(), height = pad.geometry.height(), "mousepad created");
        Ok(pad)
    }

    /// Recover raw channel names from the host's stored atoms.
    ///
    /// Runs once; later calls are ignored. Slots that were set explicitly
    /// since construction keep their names.
    pub fn deferred_init(&mut self, stored: &[Atom]) {
        if self.init_done {
            debug!(id = %self.id, "deferred init already ran");
            return;
        }
        self.init_done = true;

        match stored_raw_names(stored) {
            Some((send, receive)) => {
                self.bindings.restore_raw(Some(&send), Some(&receive));
                debug!(id = %self.id, send = self.bindings.send().raw_name(), receive = self.bindings.receive().raw_name(), "raw names restored");
            }
            None => debug!(id = %self.id, "no stored names"),
        }
    }

    /// Release every channel registration. Consumes the widget.
    pub fn free(self, host: &mut impl Host) {
        self.bindings.close(host);
        info!(id = %self.id, "mousepad freed");
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> PixelPoint {
        self.position
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// On-screen top-left in device pixels.
    #[must_use]
    pub fn origin(&self, canvas: &impl Canvas) -> PixelPoint {
        canvas.parent_offset() + self.position
    }

    /// Body plus whichever affordance strips are shown.
    #[must_use]
    pub fn visible_regions(&self) -> RegionSet {
        RegionSet::BODY | self.bindings.affordances()
    }

    /// Body rectangle for host hit-testing.
    #[must_use]
    pub fn get_rect(&self, canvas: &impl Canvas) -> Rect {
        self.painter(self.origin(&*canvas)).regions().body
    }

    /// Persisted form, position normalized to zoom 1.
    #[must_use]
    pub fn save(&self) -> SavedForm {
        SavedForm {
            position: self.position.to_nominal(self.geometry.zoom()),
            width: self.geometry.width(),
            height: self.geometry.height(),
            send: self.bindings.send().raw_name().to_string(),
            receive: self.bindings.receive().raw_name().to_string(),
            color: self.color,
        }
    }

    /// Current value of a stored parameter, as it would be echoed.
    #[must_use]
    pub fn query(&self, canvas: &impl Canvas, query: Query) -> OutMessage {
        match query {
            Query::Size => OutMessage::Size { width: self.geometry.width(), height: self.geometry.height() },
            Query::Names => OutMessage::Names {
                send: self.bindings.send().raw_name().to_string(),
                receive: self.bindings.receive().raw_name().to_string(),
            },
            Query::Color => OutMessage::Color { value: self.color.value() },
            Query::Pos => {
                let PixelPoint { x, y } = self.origin(canvas).to_nominal(self.geometry.zoom());
                OutMessage::Pos { x, y }
            }
            Query::Zoom => OutMessage::Zoom { factor: self.geometry.zoom() },
        }
    }

    fn painter(&self, origin: PixelPoint) -> Painter<'_> {
        Painter { id: &self.id, origin, geometry: &self.geometry }
    }

    /// Create (first draw) or move `regions`, defaulting to the visible set.
    pub fn redraw(&self, canvas: &mut impl Canvas, first_draw: bool, regions: Option<RegionSet>) {
        let regions = regions.unwrap_or_else(|| self.visible_regions());
        self.painter(self.origin(&*canvas)).sync(canvas, first_draw, regions, self.color);
    }

    // --- Host view notifications ---

    /// Show or hide the widget.
    pub fn vis(&self, canvas: &mut impl Canvas, visible: bool) {
        if visible {
            self.redraw(canvas, true, None);
            return;
        }
        let painter = self.painter(self.origin(&*canvas));
        for region in self.visible_regions().regions() {
            painter.erase(canvas, region);
        }
    }

    /// Host drag-move by device pixels.
    pub fn displace(&mut self, canvas: &mut impl Canvas, delta: PixelPoint) {
        self.position = self.position + delta;
        self.redraw(canvas, false, None);
    }

    /// Host selection change.
    pub fn select(&self, canvas: &mut impl Canvas, selected: bool) {
        self.painter(self.origin(&*canvas)).outline(canvas, selected);
    }

    /// Host deleted the widget from its view.
    pub fn delete(&self, canvas: &mut impl Canvas) {
        canvas.draw(DrawCommand::DeleteConnectors { id: self.id.clone() });
    }

    /// Host zoom change. Rescales pixel size and stored position, then
    /// emits a `zoom` event. Non-positive factors are ignored.
    pub fn zoom(&mut self, host: &mut impl Host, factor: i32) {
        let previous = self.geometry.zoom();
        if !self.geometry.set_zoom(factor) {
            warn!(id = %self.id, factor, "ignoring invalid zoom factor");
            return;
        }
        self.position = self.position.to_nominal(previous).to_device(factor);
        self.bindings.dispatch(host, &OutMessage::Zoom { factor });
    }

    // --- Pointer ---

    /// Hover or click over the widget. Always reports the event as handled.
    pub fn click(&mut self, host: &mut impl Host, event: &PointerEvent) -> bool {
        let origin = self.origin(&*host);
        let outcome = self.pointer.on_pointer(event, origin, self.geometry.zoom());
        for message in &outcome.messages {
            self.bindings.dispatch(host, message);
        }
        if outcome.grab {
            host.grab_motion(&self.id, event.at);
        }
        true
    }

    /// Drag motion routed by the host after a grab.
    pub fn motion(&mut self, host: &mut impl Host, delta: PixelPoint) {
        for message in self.pointer.on_motion(delta, self.geometry.zoom()) {
            self.bindings.dispatch(host, &message);
        }
    }

    // --- Messages ---

    /// Parse and handle a message addressed to the widget.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Message`] for selectors or arguments the
    /// widget does not accept and [`WidgetError::Bind`] when a new receive
    /// name cannot be bound.
    pub fn receive(&mut self, host: &mut impl Host, selector: &str, atoms: &[Atom]) -> Result<(), WidgetError> {
        let message = Message::parse(selector, atoms)?;
        self.handle(host, message)
    }

    /// Handle a parsed message.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Bind`] when a new receive name cannot be bound.
    pub fn handle(&mut self, host: &mut impl Host, message: Message) -> Result<(), WidgetError> {
        match message {
            Message::Size { width, height } => self.resize(host, width, height),
            Message::Color(Some(color)) => self.recolor(host, color),
            Message::Color(None) | Message::Get(None) => {}
            Message::Delta { dx, dy } => self.move_by(host, PixelPoint::new(dx, dy)),
            Message::Pos { x, y } => self.move_to(host, PixelPoint::new(x, y)),
            Message::Send(raw) => self.set_send(host, &raw),
            Message::Receive(raw) => self.set_receive(host, &raw)?,
            Message::Status => self.status(host),
            Message::Get(Some(query)) => self.get(host, query),
            Message::Dirty => host.mark_dirty(),
            Message::Motion { dx, dy } => self.motion(host, PixelPoint::new(dx, dy)),
        }
        Ok(())
    }

    /// Set nominal size and redraw.
    pub fn resize(&mut self, canvas: &mut impl Canvas, width: i32, height: Option<i32>) {
        self.geometry.set_size(width, height);
        self.redraw(canvas, false, None);
    }

    /// Set the fill color. Stored even while hidden.
    pub fn recolor(&mut self, canvas: &mut impl Canvas, color: Color) {
        self.painter(self.origin(&*canvas)).fill(canvas, color);
        self.color = color;
    }

    /// Move by a nominal offset.
    pub fn move_by(&mut self, canvas: &mut impl Canvas, delta: PixelPoint) {
        self.position = self.position + delta.to_device(self.geometry.zoom());
        self.redraw(canvas, false, None);
    }

    /// Move to a nominal position.
    pub fn move_to(&mut self, canvas: &mut impl Canvas, at: PixelPoint) {
        self.position = at.to_device(self.geometry.zoom());
        self.redraw(canvas, false, None);
    }

    pub fn set_send(&mut self, host: &mut impl Host, raw: &str) {
        if let Some(transition) = self.bindings.set_send(&*host, raw) {
            let painter = self.painter(self.origin(&*host));
            apply_transition(transition, Region::Inlet, &painter, host, self.color);
        }
    }

    /// Rebind the inbound channel.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Bind`] when the host refuses the name. The
    /// slot is left disconnected and the outlet strip reflects that.
    pub fn set_receive(&mut self, host: &mut impl Host, raw: &str) -> Result<(), WidgetError> {
        let rebind = self.bindings.set_receive(host, raw);
        if let Some(transition) = rebind.transition {
            let painter = self.painter(self.origin(&*host));
            apply_transition(transition, Region::Outlet, &painter, host, self.color);
        }
        match rebind.error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Echo a stored parameter on every dispatch path.
    pub fn get(&self, host: &mut impl Host, query: Query) {
        let message = self.query(&*host, query);
        self.bindings.dispatch(host, &message);
    }

    /// Post a human-readable dump on the host console.
    pub fn status(&self, canvas: &mut impl Canvas) {
        let lines = [
            format!("mousepad width: {}", self.geometry.width()),
            format!("mousepad height: {}", self.geometry.height()),
            format!("mousepad send name: {}", self.bindings.send().raw_name()),
            format!("mousepad receive name: {}", self.bindings.receive().raw_name()),
            format!("mousepad color is {}", self.color),
            format!("object ID is {}", self.id),
        ];
        for line in &lines {
            canvas.post(line);
        }
    }

    /// Open the properties editor found in `extern_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::PropertiesUnavailable`] after posting a
    /// diagnostic when the editor document does not exist.
    pub fn properties(&self, host: &mut impl Host, extern_dir: &Path) -> Result<(), WidgetError> {
        let document = extern_dir.join(PROPERTIES_FILE);
        if !document.is_file() {
            host.post(&format!("could not find {PROPERTIES_FILE}"));
            warn!(id = %self.id, path = %document.display(), "properties editor missing");
            return Err(WidgetError::PropertiesUnavailable { path: document });
        }
        host.open_properties(&document, &self.id);
        Ok(())
    }
}
