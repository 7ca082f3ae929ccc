use super::*;
use crate::message::parse_atoms;

// =============================================================
// CreationArgs
// =============================================================

#[test]
fn no_arguments_gives_defaults() {
    let args = CreationArgs::default();
    assert_eq!(args.width, 64);
    assert_eq!(args.height, Some(64));
    assert_eq!(args.send, "");
    assert_eq!(args.receive, "");
    assert_eq!(args.color, None);
}

#[test]
fn full_argument_list() {
    let args = CreationArgs::from_atoms(&parse_atoms("30 20 out in #00FF00"));
    assert_eq!(args.width, 30);
    assert_eq!(args.height, Some(20));
    assert_eq!(args.send, "out");
    assert_eq!(args.receive, "in");
    assert_eq!(args.color, Some(Color::new(0x00_FF_00)));
}

#[test]
fn single_size_argument_is_square() {
    let args = CreationArgs::from_atoms(&parse_atoms("12"));
    assert_eq!((args.width, args.height), (12, None));
}

#[test]
fn numeric_names_read_as_empty() {
    let args = CreationArgs::from_atoms(&parse_atoms("30 20 5 6"));
    assert_eq!(args.send, "");
    assert_eq!(args.receive, "");
    assert_eq!(args.color, None);
}

#[test]
fn float_color_argument() {
    let args = CreationArgs::from_atoms(&parse_atoms("30 20 empty empty 255"));
    assert_eq!(args.color, Some(Color::new(255)));
}

// =============================================================
// stored_raw_names
// =============================================================

#[test]
fn stored_names_need_five_atoms() {
    assert_eq!(stored_raw_names(&parse_atoms("mousepad 64 64 out")), None);
    assert_eq!(
        stored_raw_names(&parse_atoms("mousepad 64 64 $1-out $1-in")),
        Some(("$1-out".to_string(), "$1-in".to_string()))
    );
}

#[test]
fn stored_numeric_names_render_as_text() {
    assert_eq!(stored_raw_names(&parse_atoms("mousepad 64 64 7 empty")), Some(("7".to_string(), "empty".to_string())));
}

// =============================================================
// SavedForm
// =============================================================

fn form() -> SavedForm {
    SavedForm {
        position: PixelPoint::new(40, 80),
        width: 64,
        height: 32,
        send: "$1-out".into(),
        receive: "empty".into(),
        color: Color::new(0xDD_DD_DD),
    }
}

#[test]
fn saved_form_text_has_fixed_order() {
    assert_eq!(form().to_string(), "#X obj 40 80 mousepad 64 32 $1-out empty #DDDDDD;");
}

#[test]
fn saved_atoms_feed_creation_args() {
    let atoms = form().atoms();
    let args = CreationArgs::from_atoms(&atoms[1..]);
    assert_eq!(args.width, 64);
    assert_eq!(args.height, Some(32));
    assert_eq!(args.send, "$1-out");
    assert_eq!(args.color, Some(Color::new(0xDD_DD_DD)));
}

#[test]
fn saved_atoms_feed_stored_names() {
    assert_eq!(stored_raw_names(&form().atoms()), Some(("$1-out".to_string(), "empty".to_string())));
}
