//! Mousepad widget: a rectangular pointer pad embedded in a host patch canvas.
//!
//! The widget reports hover, button, drag and delta activity as structured
//! events and accepts configuration messages (size, color, position, channel
//! names). Everything that touches the outside world goes through the
//! [`host::Host`] traits, so the whole widget runs against an in-memory host
//! in tests and in the demo binary.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The [`engine::Mousepad`] widget and message routing |
//! | [`input`] | Pointer events and the press/drag state machine |
//! | [`channel`] | Named-channel slots, rebinding, and event dispatch |
//! | [`render`] | Region rectangles and draw commands |
//! | [`geometry`] | Nominal and device-pixel sizes under zoom |
//! | [`color`] | 24-bit colors and `#RRGGBB` text codec |
//! | [`message`] | Inbound message parsing and outbound events |
//! | [`persist`] | Creation arguments and the saved form |
//! | [`host`] | Host traits and instance identity |
//! | [`consts`] | Shared constants (default size, iolet size, colors) |

pub mod channel;
pub mod color;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod host;
pub mod input;
pub mod message;
pub mod persist;
pub mod render;
