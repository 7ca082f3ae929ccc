//! Command-line configuration for the demo host.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use clap::Parser;
use widget::geometry::PixelPoint;
use widget::message::{Atom, parse_atoms};

#[derive(Parser, Debug, Clone)]
#[command(name = "mousepad", about = "Drive a mousepad widget from a JSON-lines script of host events")]
pub struct Config {
    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    pub script: String,

    /// Creation arguments: `[width height send receive color]`.
    #[arg(long, env = "MOUSEPAD_ARGS", default_value = "", allow_hyphen_values = true)]
    pub args: String,

    /// Values substituted for `$1..$n` in channel names.
    #[arg(long, env = "MOUSEPAD_CANVAS_ARGS", default_value = "", allow_hyphen_values = true)]
    pub canvas_args: String,

    /// Value substituted for `$0`.
    #[arg(long, env = "MOUSEPAD_CANVAS_ID", default_value = "1000")]
    pub canvas_id: String,

    #[arg(long, env = "MOUSEPAD_EXTERN_DIR", default_value = ".")]
    pub extern_dir: PathBuf,

    /// Zoom factor reported to the widget right after creation.
    #[arg(long)]
    pub zoom: Option<i32>,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub x: i32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub y: i32,

    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Creation arguments as typed, before any `$` expansion.
    #[must_use]
    pub fn creation_atoms(&self) -> Vec<Atom> {
        parse_atoms(&self.args)
    }

    #[must_use]
    pub fn canvas_arg_list(&self) -> Vec<String> {
        self.canvas_args.split_whitespace().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}
