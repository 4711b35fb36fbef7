//! Logger - One styled line per call
//!
//! The logger holds no redraw state. Prefer a [`Spinner`](crate::Spinner) or
//! [`ProgressBar`](crate::ProgressBar) when reporting on something that is
//! still running; the logger is for lines that stay.

use crate::printer::{Printer, PrinterCore};
use crate::sink::Sink;

/// Whether `debug` lines are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// Debug lines are dropped
    #[default]
    None,
    /// Debug lines are printed
    Debug,
}

/// Stateless line logger.
#[derive(Debug)]
pub struct Logger {
    core: PrinterCore,
    debug_mode: DebugMode,
}

impl Logger {
    /// Logger writing to `sink`.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::from_core(PrinterCore::new(sink))
    }

    /// Logger over a prepared core (custom decorator, etc.).
    pub fn from_core(core: PrinterCore) -> Self {
        Self {
            core,
            debug_mode: DebugMode::None,
        }
    }

    /// Switch debug output on or off.
    pub fn set_debug_mode(&mut self, mode: DebugMode) -> &mut Self {
        self.debug_mode = mode;
        self
    }

    /// Current debug mode.
    pub fn debug_mode(&self) -> DebugMode {
        self.debug_mode
    }

    /// `➔ text`
    pub fn info(&mut self, text: &str) -> &mut Self {
        let line = self.core.info(text);
        self.emit(&line)
    }

    /// `! text`
    pub fn warn(&mut self, text: &str) -> &mut Self {
        let line = self.core.warn(text);
        self.emit(&line)
    }

    /// `✘ text`
    pub fn error(&mut self, text: &str) -> &mut Self {
        let line = self.core.error(text);
        self.emit(&line)
    }

    /// `? text`, only in [`DebugMode::Debug`]. Otherwise nothing is touched,
    /// not even the current line.
    pub fn debug(&mut self, text: &str) -> &mut Self {
        if self.debug_mode == DebugMode::None {
            return self;
        }
        let line = self.core.debug(text);
        self.emit(&line)
    }

    fn emit(&mut self, line: &str) -> &mut Self {
        self.core.clear_line().write(line).newline();
        self
    }
}

impl Printer for Logger {
    fn with_core<R>(&mut self, f: impl FnOnce(&mut PrinterCore) -> R) -> R {
        f(&mut self.core)
    }

    /// No state, no stop.
    fn stop(&mut self) -> &mut Self {
        self
    }
}
