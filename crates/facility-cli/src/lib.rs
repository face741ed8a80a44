//! Library components of the `facility` command-line tool.

pub mod logging;
pub mod settings;
