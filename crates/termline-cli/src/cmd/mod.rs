//! Subcommand implementations. Each one drives the printers of a
//! [`termline::Console`].

pub mod log;
pub mod progress;
pub mod spin;
pub mod table;
