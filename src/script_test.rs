use super::*;
use widget::geometry::PixelPoint;
use widget::input::Modifiers;

fn parse(line: &str) -> HostEvent {
    parse_line(1, line).unwrap().unwrap()
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line(1, "").unwrap(), None);
    assert_eq!(parse_line(2, "   ").unwrap(), None);
    assert_eq!(parse_line(3, "# setup").unwrap(), None);
    assert_eq!(parse_line(4, "// drag").unwrap(), None);
}

#[test]
fn message_args_mix_numbers_and_symbols() {
    assert_eq!(
        parse(r#"{"event":"message","selector":"size","args":[40, "x"]}"#),
        HostEvent::Message { selector: "size".into(), args: vec![Atom::Float(40.0), "x".into()] }
    );
}

#[test]
fn message_args_default_to_empty() {
    assert_eq!(parse(r#"{"event":"message","selector":"status"}"#), HostEvent::Message {
        selector: "status".into(),
        args: Vec::new()
    });
}

#[test]
fn pointer_event_defaults_modifiers() {
    assert_eq!(
        parse(r#"{"event":"pointer","at":{"x":3,"y":4},"button_down":true}"#),
        HostEvent::Pointer(PointerEvent {
            at: PixelPoint::new(3, 4),
            modifiers: Modifiers::default(),
            double_click: false,
            button_down: true,
        })
    );
}

#[test]
fn unit_events_parse() {
    assert_eq!(parse(r#"{"event":"free"}"#), HostEvent::Free);
    assert_eq!(parse(r#"{"event":"save"}"#), HostEvent::Save);
}

#[test]
fn malformed_line_reports_line_number() {
    let err = parse_line(7, r#"{"event":"warp"}"#).unwrap_err();
    assert!(matches!(err, HostError::Script { line: 7, .. }));
}
