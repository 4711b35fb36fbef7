//! Console - The application's set of default printers
//!
//! Build one [`Console`] at startup and pass it (or its fields) to whatever
//! needs to report status. Stdout carries the logger, spinner, progress bar
//! and table; stderr gets a logger of its own for diagnostics.

use crate::logger::{DebugMode, Logger};
use crate::printer::{Printer, PrinterCore};
use crate::progress::ProgressBar;
use crate::settings::OutputSettings;
use crate::sink::{Sink, TerminalSink};
use crate::spinner::{DEFAULT_FRAMES, Spinner};
use crate::table::Table;
use crate::theme::{AnsiDecorator, Decorator};
use crate::timer::Scheduler;
use std::sync::Arc;
use tracing::debug;

/// Default printer instances.
#[derive(Debug)]
pub struct Console {
    /// Line logger on stdout
    pub logger: Logger,
    /// Line logger on stderr
    pub err_logger: Logger,
    /// Spinner on stdout
    pub spinner: Spinner,
    /// Progress bar on stdout
    pub progress: ProgressBar,
    /// Table printer on stdout
    pub table: Table,
}

impl Console {
    /// Printers bound to the process stdout and stderr.
    ///
    /// Color is turned off for whichever stream is not a terminal.
    pub fn stdio(scheduler: Arc<dyn Scheduler>) -> Self {
        let out_tty = TerminalSink::stdout().is_tty();
        let err = TerminalSink::stderr();
        let err_tty = err.is_tty();

        let mut console = Self::with_sinks(
            TerminalSink::stdout,
            err,
            scheduler,
            Arc::new(AnsiDecorator::default()),
        );
        console.plain_unless_tty(out_tty, err_tty);
        console
    }

    /// Printers over custom sinks. `out` is called once per stdout printer.
    pub fn with_sinks<O, E>(
        mut out: impl FnMut() -> O,
        err: E,
        scheduler: Arc<dyn Scheduler>,
        decorator: Arc<dyn Decorator>,
    ) -> Self
    where
        O: Sink + 'static,
        E: Sink + 'static,
    {
        Self {
            logger: Logger::from_core(core(out(), &decorator)),
            err_logger: Logger::from_core(core(err, &decorator)),
            spinner: Spinner::from_core(core(out(), &decorator), scheduler, DEFAULT_FRAMES),
            progress: ProgressBar::from_core(core(out(), &decorator)),
            table: Table::from_core(core(out(), &decorator)),
        }
    }

    /// Push `settings` into every printer.
    ///
    /// Settings only ever switch features off (or debug on): a printer that
    /// was already silenced stays silenced. `quiet` leaves the stderr logger
    /// alone so errors are still reported.
    pub fn apply(&mut self, settings: OutputSettings) -> &mut Self {
        debug!(?settings, "applying output settings");

        if settings.debug {
            self.logger.set_debug_mode(DebugMode::Debug);
            self.err_logger.set_debug_mode(DebugMode::Debug);
        }
        if settings.quiet {
            self.for_each_stdout(|core| {
                core.silence();
            });
        }
        if !settings.progress {
            self.for_each(|core| {
                core.disable_progress();
            });
        }
        if !settings.color {
            self.for_each(|core| {
                core.disable_color();
            });
        }
        self
    }

    /// Stop the spinner and forget any running progress bar.
    pub fn stop(&mut self) -> &mut Self {
        self.spinner.stop();
        self.progress.stop();
        self
    }

    fn plain_unless_tty(&mut self, out_tty: bool, err_tty: bool) {
        if !out_tty {
            self.for_each_stdout(|core| {
                core.disable_color();
            });
        }
        if !err_tty {
            self.err_logger.no_color();
        }
    }

    fn for_each(&mut self, mut f: impl FnMut(&mut PrinterCore)) {
        self.err_logger.with_core(&mut f);
        self.for_each_stdout(f);
    }

    fn for_each_stdout(&mut self, mut f: impl FnMut(&mut PrinterCore)) {
        self.logger.with_core(&mut f);
        self.spinner.with_core(&mut f);
        self.progress.with_core(&mut f);
        self.table.with_core(&mut f);
    }
}

fn core(sink: impl Sink + 'static, decorator: &Arc<dyn Decorator>) -> PrinterCore {
    PrinterCore::new(sink).with_decorator(Arc::clone(decorator))
}
