//! `termline log`

use crate::Level;
use termline::Console;

/// Print `message` at `level` on stdout.
pub fn log(console: &mut Console, level: Level, message: &str) {
    let logger = &mut console.logger;
    match level {
        Level::Info => logger.info(message),
        Level::Warn => logger.warn(message),
        Level::Error => logger.error(message),
        Level::Debug => logger.debug(message),
    };
}
