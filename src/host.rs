//! In-memory host: channel registry, canvas state, and the JSON-lines
//! effect stream.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};
use widget::geometry::{PixelPoint, Rect};
use widget::host::{BindError, Canvas, Channels, Host, InstanceId};
use widget::message::{Atom, OutMessage};
use widget::render::DrawCommand;

use crate::HostError;

/// One observable effect, written as a JSON line.
#[derive(Debug, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect<'a> {
    Outlet { message: &'a OutMessage },
    Deliver { channel: &'a str, message: &'a OutMessage },
    Draw { command: &'a DrawCommand },
    Post { line: &'a str },
    Bind { channel: &'a str, id: &'a InstanceId },
    Unbind { channel: &'a str, id: &'a InstanceId },
    Grab { id: &'a InstanceId, at: PixelPoint },
    Dirty,
    ScheduleInit { id: &'a InstanceId },
    OpenProperties { document: &'a Path, id: &'a InstanceId },
    Rect { rect: Rect },
    Saved { text: &'a str },
    Error { message: &'a str },
}

/// Expand `$0` to `canvas_id` and `$n` to the n-th canvas argument.
///
/// A `$n` without a matching argument is kept as written.
#[must_use]
pub fn expand_dollars(raw: &str, canvas_id: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(at) = rest.find('$') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        let (number, after) = tail.split_at(digits);
        match number.parse::<usize>() {
            Ok(0) => out.push_str(canvas_id),
            Ok(n) if n <= args.len() => out.push_str(&args[n - 1]),
            _ => {
                out.push('$');
                out.push_str(number);
            }
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Host implementation that records state in memory and writes every
/// effect to `out`.
pub struct DemoHost<W: Write> {
    out: W,
    failed: Option<io::Error>,
    canvas_id: String,
    canvas_args: Vec<String>,
    visible: bool,
    offset: PixelPoint,
    registry: HashMap<String, Vec<InstanceId>>,
    listeners: HashSet<String>,
    pending_init: Vec<InstanceId>,
}

impl<W: Write> DemoHost<W> {
    pub fn new(out: W, canvas_id: impl Into<String>, canvas_args: Vec<String>) -> Self {
        Self {
            out,
            failed: None,
            canvas_id: canvas_id.into(),
            canvas_args,
            visible: true,
            offset: PixelPoint::default(),
            registry: HashMap::new(),
            listeners: HashSet::new(),
            pending_init: Vec::new(),
        }
    }

    /// Write one effect. The first write failure is kept for [`Self::check`];
    /// later effects are dropped.
    pub fn emit(&mut self, effect: &Effect<'_>) {
        if self.failed.is_some() {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, effect)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = written {
            warn!(error = %e, "effect stream failed");
            self.failed = Some(e);
        }
    }

    /// Surface a write failure recorded since the last check.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Io`] if any effect could not be written.
    pub fn check(&mut self) -> Result<(), HostError> {
        match self.failed.take() {
            Some(e) => Err(e.into()),
            None => self.out.flush().map_err(HostError::from),
        }
    }

    /// Expand `$` arguments inside a symbol atom.
    #[must_use]
    pub fn expand_atom(&self, atom: &Atom) -> Atom {
        match atom {
            Atom::Symbol(name) => Atom::Symbol(self.expand(name)),
            Atom::Float(_) => atom.clone(),
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_offset(&mut self, offset: PixelPoint) {
        self.offset = offset;
    }

    /// Register an external listener, e.g. an open properties editor.
    pub fn listen(&mut self, name: &str) {
        self.listeners.insert(name.to_owned());
    }

    pub fn unlisten(&mut self, name: &str) {
        self.listeners.remove(name);
    }

    /// Whether `id` is registered under `name`.
    #[must_use]
    pub fn is_bound(&self, name: &str, id: &InstanceId) -> bool {
        self.registry.get(name).is_some_and(|ids| ids.contains(id))
    }

    /// Total registrations across all names.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.registry.values().map(Vec::len).sum()
    }

    /// Deferred init requests not yet run.
    pub fn take_pending_init(&mut self) -> Vec<InstanceId> {
        std::mem::take(&mut self.pending_init)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Canvas for DemoHost<W> {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn parent_offset(&self) -> PixelPoint {
        self.offset
    }

    fn draw(&mut self, command: DrawCommand) {
        self.emit(&Effect::Draw { command: &command });
    }

    fn grab_motion(&mut self, id: &InstanceId, at: PixelPoint) {
        self.emit(&Effect::Grab { id, at });
    }

    fn mark_dirty(&mut self) {
        self.emit(&Effect::Dirty);
    }

    fn post(&mut self, line: &str) {
        self.emit(&Effect::Post { line });
    }
}

impl<W: Write> Channels for DemoHost<W> {
    fn expand(&self, raw: &str) -> String {
        expand_dollars(raw, &self.canvas_id, &self.canvas_args)
    }

    fn bind(&mut self, name: &str, id: &InstanceId) -> Result<(), BindError> {
        if name.trim().is_empty() {
            return Err(BindError { name: name.to_owned(), reason: "blank channel name".to_owned() });
        }
        let ids = self.registry.entry(name.to_owned()).or_default();
        if ids.contains(id) {
            return Err(BindError { name: name.to_owned(), reason: "already bound".to_owned() });
        }
        ids.push(id.clone());
        self.emit(&Effect::Bind { channel: name, id });
        Ok(())
    }

    fn unbind(&mut self, name: &str, id: &InstanceId) {
        let Some(ids) = self.registry.get_mut(name) else {
            debug!(%name, "unbind of unknown channel");
            return;
        };
        ids.retain(|bound| bound != id);
        if ids.is_empty() {
            self.registry.remove(name);
        }
        self.emit(&Effect::Unbind { channel: name, id });
    }

    fn has_listener(&self, name: &str) -> bool {
        self.listeners.contains(name) || self.registry.contains_key(name)
    }

    fn send(&mut self, name: &str, message: &OutMessage) {
        self.emit(&Effect::Deliver { channel: name, message });
    }
}

impl<W: Write> Host for DemoHost<W> {
    fn outlet(&mut self, message: &OutMessage) {
        self.emit(&Effect::Outlet { message });
    }

    fn schedule_init(&mut self, id: &InstanceId) {
        self.pending_init.push(id.clone());
        self.emit(&Effect::ScheduleInit { id });
    }

    fn open_properties(&mut self, document: &Path, id: &InstanceId) {
        self.emit(&Effect::OpenProperties { document, id });
    }
}
