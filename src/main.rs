mod config;
mod host;
mod script;
mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use tracing::Level;
use widget::engine::WidgetError;

use crate::config::Config;
use crate::host::DemoHost;
use crate::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
    #[error("script line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error("widget error: {0}")]
    Widget(#[from] WidgetError),
    #[error("widget already freed")]
    Freed,
}

fn main() -> Result<(), HostError> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let reader: Box<dyn BufRead> = if config.script == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&config.script)?))
    };

    let host = DemoHost::new(io::stdout().lock(), config.canvas_id.clone(), config.canvas_arg_list());
    let mut session = Session::start(host, &config)?;
    session.run(reader)?;
    session.finish().check()
}
