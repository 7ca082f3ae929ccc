//! Shared constants for the widget crate.

// ── Geometry ────────────────────────────────────────────────────

/// Nominal width and height used when none are given.
pub const DEFAULT_SIZE: i32 = 64;

/// Zoom factor assumed until the host reports one.
pub const DEFAULT_ZOOM: i32 = 1;

/// Nominal width of the inlet/outlet affordance strips.
pub const IOLET_WIDTH: i32 = 7;

/// Nominal height of the inlet/outlet affordance strips.
pub const IOLET_HEIGHT: i32 = 3;

// ── Colors ──────────────────────────────────────────────────────

/// Body fill color for a fresh widget (mouse grey).
pub const DEFAULT_COLOR: u32 = 0xDD_DD_DD;

/// Body outline while the host has the widget selected (blue).
pub const COLOR_SELECTED: u32 = 0x00_00_FF;

/// Body outline otherwise (black).
pub const COLOR_NORMAL: u32 = 0x00_00_00;

// ── Channels ────────────────────────────────────────────────────

/// Sentinel name meaning "not connected".
pub const EMPTY: &str = "empty";

/// Prefix of the fixed outbound channel the properties editor listens on.
pub const FIXED_SEND_PREFIX: &str = "from-";

/// Prefix of the fixed inbound channel the properties editor writes to.
pub const FIXED_RECEIVE_PREFIX: &str = "to-";

// ── Host resources ──────────────────────────────────────────────

/// Class name written in the persisted form.
pub const CLASS_NAME: &str = "mousepad";

/// Properties editor document expected next to the widget binary.
pub const PROPERTIES_FILE: &str = "mousepad-properties.pd";
