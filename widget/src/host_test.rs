//! Recording host used by the crate's unit tests.

use std::collections::HashSet;
use std::path::PathBuf;

use super::*;

/// In-memory host that records every effect the widget produces.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub visible: bool,
    pub offset: PixelPoint,
    pub draws: Vec<DrawCommand>,
    pub outlet: Vec<OutMessage>,
    /// Messages delivered through named channels, with the channel name.
    pub deliveries: Vec<(String, OutMessage)>,
    /// Active registrations, in bind order.
    pub bindings: Vec<(String, InstanceId)>,
    /// Names with an external listener (e.g. an open properties editor).
    pub listeners: HashSet<String>,
    /// Names the registry refuses to bind.
    pub refuse: HashSet<String>,
    /// Values substituted for `$1..$n`.
    pub template_args: Vec<String>,
    pub grabs: Vec<PixelPoint>,
    pub dirty: usize,
    pub posts: Vec<String>,
    pub scheduled: Vec<InstanceId>,
    pub opened: Vec<(PathBuf, InstanceId)>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown() -> Self {
        Self { visible: true, ..Self::default() }
    }

    /// Number of registrations on `name`.
    pub fn bound(&self, name: &str) -> usize {
        self.bindings.iter().filter(|(n, _)| n == name).count()
    }

    /// Drain recorded draw commands.
    pub fn take_draws(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.draws)
    }

    /// Drain recorded outlet messages.
    pub fn take_outlet(&mut self) -> Vec<OutMessage> {
        std::mem::take(&mut self.outlet)
    }

    /// Messages delivered on one channel.
    pub fn delivered_on(&self, name: &str) -> Vec<OutMessage> {
        self.deliveries.iter().filter(|(n, _)| n == name).map(|(_, m)| m.clone()).collect()
    }
}

impl Canvas for FakeHost {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn parent_offset(&self) -> PixelPoint {
        self.offset
    }

    fn draw(&mut self, command: DrawCommand) {
        self.draws.push(command);
    }

    fn grab_motion(&mut self, _id: &InstanceId, at: PixelPoint) {
        self.grabs.push(at);
    }

    fn mark_dirty(&mut self) {
        self.dirty += 1;
    }

    fn post(&mut self, line: &str) {
        self.posts.push(line.to_string());
    }
}

impl Channels for FakeHost {
    fn expand(&self, raw: &str) -> String {
        let mut out = raw.replace("$0", "1000");
        for (i, value) in self.template_args.iter().enumerate().rev() {
            out = out.replace(&format!("${}", i + 1), value);
        }
        out
    }

    fn bind(&mut self, name: &str, id: &InstanceId) -> Result<(), BindError> {
        if self.refuse.contains(name) {
            return Err(BindError { name: name.to_string(), reason: "refused".into() });
        }
        self.bindings.push((name.to_string(), id.clone()));
        Ok(())
    }

    fn unbind(&mut self, name: &str, id: &InstanceId) {
        if let Some(pos) = self.bindings.iter().position(|(n, i)| n == name && i == id) {
            self.bindings.remove(pos);
        }
    }

    fn has_listener(&self, name: &str) -> bool {
        self.listeners.contains(name) || self.bound(name) > 0
    }

    fn send(&mut self, name: &str, message: &OutMessage) {
        if self.has_listener(name) {
            self.deliveries.push((name.to_string(), message.clone()));
        }
    }
}

impl Host for FakeHost {
    fn outlet(&mut self, message: &OutMessage) {
        self.outlet.push(message.clone());
    }

    fn schedule_init(&mut self, id: &InstanceId) {
        self.scheduled.push(id.clone());
    }

    fn open_properties(&mut self, document: &Path, id: &InstanceId) {
        self.opened.push((document.to_path_buf(), id.clone()));
    }
}

// =============================================================
// InstanceId
// =============================================================

#[test]
fn generated_ids_are_prefixed_hex() {
    let id = InstanceId::generate();
    let token = id.as_str();
    assert!(token.starts_with("0X"), "{token}");
    assert!(token[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
}

#[test]
fn generated_ids_differ() {
    assert_ne!(InstanceId::generate(), InstanceId::generate());
}

#[test]
fn fixed_names_derive_from_token() {
    let id = InstanceId::new("0XBEEF");
    assert_eq!(id.fixed_send_name(), "from-0XBEEF");
    assert_eq!(id.fixed_receive_name(), "to-0XBEEF");
    assert_eq!(id.to_string(), "0XBEEF");
}

#[test]
fn fake_expand_substitutes_template_args() {
    let host = FakeHost { template_args: vec!["a".into(), "b".into()], ..FakeHost::default() };
    assert_eq!(host.expand("$1-x-$2"), "a-x-b");
    assert_eq!(host.expand("$0-pad"), "1000-pad");
    assert_eq!(host.expand("plain"), "plain");
}
