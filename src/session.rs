//! One widget living in a demo host, driven event by event.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};
use widget::consts::CLASS_NAME;
use widget::engine::{Mousepad, WidgetError};
use widget::geometry::PixelPoint;
use widget::host::InstanceId;
use widget::message::Atom;
use widget::persist::CreationArgs;

use crate::HostError;
use crate::config::Config;
use crate::host::{DemoHost, Effect};
use crate::script::{HostEvent, parse_line};

pub struct Session<W: Write> {
    host: DemoHost<W>,
    pad: Option<Mousepad>,
    /// Object text as typed, class name first, before `$` expansion.
    stored: Vec<Atom>,
    extern_dir: PathBuf,
}

impl<W: Write> Session<W> {
    /// Create the widget, run its deferred init, apply the initial zoom and
    /// draw it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Widget`] if construction fails and
    /// [`HostError::Io`] if the effect stream cannot be written.
    pub fn start(mut host: DemoHost<W>, config: &Config) -> Result<Self, HostError> {
        let raw = config.creation_atoms();
        let expanded: Vec<Atom> = raw.iter().map(|atom| host.expand_atom(atom)).collect();
        let args = CreationArgs::from_atoms(&expanded);

        let mut pad = Mousepad::new(&mut host, InstanceId::generate(), config.position(), &args)?;
        if let Some(factor) = config.zoom {
            pad.zoom(&mut host, factor);
        }
        pad.vis(&mut host, true);

        let mut stored = Vec::with_capacity(raw.len() + 1);
        stored.push(Atom::from(CLASS_NAME));
        stored.extend(raw);

        let mut session = Self { host, pad: Some(pad), stored, extern_dir: config.extern_dir.clone() };
        session.run_pending_init();
        session.host.check()?;
        info!(id = %session.id_label(), "session started");
        Ok(session)
    }

    /// Apply every event from `reader`, one per line.
    ///
    /// # Errors
    ///
    /// Stops at the first unreadable line, malformed event, or write
    /// failure. Events the widget rejects are reported on the stream and do
    /// not stop the run.
    pub fn run(&mut self, reader: impl BufRead) -> Result<usize, HostError> {
        let mut applied = 0_usize;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(event) = parse_line(index + 1, &line)? else {
                continue;
            };
            self.apply(event)?;
            applied = applied.saturating_add(1);
        }
        info!(applied, "script finished");
        Ok(applied)
    }

    /// Apply one host event.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Freed`] for events after `free`, and
    /// [`HostError::Io`] on write failure.
    pub fn apply(&mut self, event: HostEvent) -> Result<(), HostError> {
        debug!(?event, "host event");
        let pad = self.pad.as_mut().ok_or(HostError::Freed)?;
        let host = &mut self.host;

        let outcome = match event {
            HostEvent::Message { selector, args } => pad.receive(host, &selector, &args),
            HostEvent::Send { channel, selector, args } => {
                if host.is_bound(&channel, pad.id()) {
                    pad.receive(host, &selector, &args)
                } else {
                    debug!(%channel, "no widget bound to channel");
                    Ok(())
                }
            }
            HostEvent::Pointer(event) => {
                pad.click(host, &event);
                Ok(())
            }
            HostEvent::Motion { dx, dy } => {
                pad.motion(host, PixelPoint::new(dx, dy));
                Ok(())
            }
            HostEvent::Zoom { factor } => {
                pad.zoom(host, factor);
                Ok(())
            }
            HostEvent::Vis { visible } => {
                host.set_visible(visible);
                pad.vis(host, visible);
                Ok(())
            }
            HostEvent::Select { selected } => {
                pad.select(host, selected);
                Ok(())
            }
            HostEvent::Displace { dx, dy } => {
                pad.displace(host, PixelPoint::new(dx, dy));
                Ok(())
            }
            HostEvent::Offset { x, y } => {
                host.set_offset(PixelPoint::new(x, y));
                Ok(())
            }
            HostEvent::Listen { channel } => {
                host.listen(&channel);
                Ok(())
            }
            HostEvent::Unlisten { channel } => {
                host.unlisten(&channel);
                Ok(())
            }
            HostEvent::Properties => pad.properties(host, &self.extern_dir),
            HostEvent::Save => {
                let text = pad.save().to_string();
                host.emit(&Effect::Saved { text: &text });
                Ok(())
            }
            HostEvent::Rect => {
                let rect = pad.get_rect(&*host);
                host.emit(&Effect::Rect { rect });
                Ok(())
            }
            HostEvent::Delete => {
                pad.delete(host);
                Ok(())
            }
            HostEvent::Free => {
                self.free();
                Ok(())
            }
        };

        if let Err(e) = outcome {
            self.report(&e);
        }
        self.run_pending_init();
        self.host.check()
    }

    fn free(&mut self) {
        if let Some(pad) = self.pad.take() {
            pad.free(&mut self.host);
        }
    }

    fn report(&mut self, error: &WidgetError) {
        warn!(error = %error, "widget rejected event");
        let message = error.to_string();
        self.host.emit(&Effect::Error { message: &message });
    }

    /// Run deferred init callbacks the widget scheduled.
    fn run_pending_init(&mut self) {
        for id in self.host.take_pending_init() {
            match self.pad.as_mut() {
                Some(pad) if *pad.id() == id => pad.deferred_init(&self.stored),
                _ => debug!(%id, "deferred init for a widget that is gone"),
            }
        }
    }

    fn id_label(&self) -> String {
        self.pad.as_ref().map_or_else(String::new, |pad| pad.id().to_string())
    }

    /// Free the widget if still alive and hand back the host.
    pub fn finish(mut self) -> DemoHost<W> {
        self.free();
        let remaining = self.host.binding_count();
        if remaining > 0 {
            warn!(remaining, "channel registrations left after free");
        }
        self.host
    }
}
