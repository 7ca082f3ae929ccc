use super::*;
use serde_json::Value;

fn host() -> DemoHost<Vec<u8>> {
    DemoHost::new(Vec::new(), "1000", vec!["left".into(), "right".into()])
}

fn lines(host: DemoHost<Vec<u8>>) -> Vec<Value> {
    let out = String::from_utf8(host.into_inner()).unwrap();
    out.lines().map(|line| serde_json::from_str(line).unwrap()).collect()
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================
// expand_dollars
// =============================================================

#[test]
fn dollar_zero_expands_to_canvas_id() {
    assert_eq!(expand_dollars("$0-out", "1000", &[]), "1000-out");
}

#[test]
fn dollar_n_expands_to_canvas_argument() {
    let args = vec!["a".to_string(), "b".to_string()];
    assert_eq!(expand_dollars("$2-$1", "1000", &args), "b-a");
}

#[test]
fn unmatched_dollars_are_kept() {
    assert_eq!(expand_dollars("x-$3", "1000", &["a".to_string()]), "x-$3");
    assert_eq!(expand_dollars("cost$", "1000", &[]), "cost$");
    assert_eq!(expand_dollars("plain", "1000", &[]), "plain");
}

// =============================================================
// registry
// =============================================================

#[test]
fn bind_and_unbind_track_registrations() {
    let mut host = host();
    let id = InstanceId::new("0X1");
    host.bind("in", &id).unwrap();
    assert!(host.is_bound("in", &id));
    assert!(host.has_listener("in"));

    host.unbind("in", &id);
    assert!(!host.is_bound("in", &id));
    assert!(!host.has_listener("in"));
    assert_eq!(host.binding_count(), 0);
}

#[test]
fn double_bind_is_refused() {
    let mut host = host();
    let id = InstanceId::new("0X1");
    host.bind("in", &id).unwrap();
    let err = host.bind("in", &id).unwrap_err();
    assert_eq!(err.name, "in");
    assert_eq!(host.binding_count(), 1);
}

#[test]
fn external_listener_counts_as_listener() {
    let mut host = host();
    host.listen("from-0X1");
    assert!(host.has_listener("from-0X1"));
    host.unlisten("from-0X1");
    assert!(!host.has_listener("from-0X1"));
}

#[test]
fn expand_atom_leaves_floats_alone() {
    let host = host();
    assert_eq!(host.expand_atom(&Atom::Float(3.0)), Atom::Float(3.0));
    assert_eq!(host.expand_atom(&"$1-in".into()), Atom::from("left-in"));
}

// =============================================================
// effect stream
// =============================================================

#[test]
fn effects_are_json_lines() {
    let mut host = host();
    host.outlet(&OutMessage::Hover { x: 1, y: 2 });
    host.post("hello");
    host.mark_dirty();
    host.check().unwrap();

    let lines = lines(host);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["effect"], "outlet");
    assert_eq!(lines[0]["message"]["selector"], "hover");
    assert_eq!(lines[0]["message"]["x"], 1);
    assert_eq!(lines[1]["line"], "hello");
    assert_eq!(lines[2]["effect"], "dirty");
}

#[test]
fn schedule_init_is_queued() {
    let mut host = host();
    host.schedule_init(&InstanceId::new("0X1"));
    assert_eq!(host.take_pending_init(), vec![InstanceId::new("0X1")]);
    assert!(host.take_pending_init().is_empty());
}

#[test]
fn write_failure_surfaces_on_check() {
    let mut host = DemoHost::new(BrokenPipe, "1000", Vec::new());
    host.post("lost");
    host.post("also lost");
    assert!(matches!(host.check(), Err(HostError::Io(_))));
    assert!(host.check().is_ok());
}
