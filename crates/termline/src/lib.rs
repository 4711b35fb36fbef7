//! termline - In-place terminal status output
//!
//! Loggers, spinners, progress bars and tables that redraw the current line
//! instead of scrolling.
//!
//! # Overview
//!
//! Every printer owns a [`PrinterCore`] (a [`Sink`] plus color, progress and
//! silence flags) and implements [`Printer`], whose chainable toggles return
//! the concrete printer:
//!
//! ```
//! use std::sync::Arc;
//! use termline::{ManualClock, Printer, RecordingSink, Spinner, SpinnerConfig};
//!
//! let sink = RecordingSink::new();
//! let mut spinner = Spinner::new(sink.clone(), Arc::new(ManualClock::new()));
//! spinner
//!     .no_color()
//!     .start(SpinnerConfig::new("fetching", "fetched", "fetch failed"))
//!     .success(None);
//!
//! assert_eq!(sink.writes().last().map(String::as_str), Some("\n"));
//! ```
//!
//! # Architecture
//!
//! - **Sinks**: [`TerminalSink`] over crossterm, [`SilentSink`] and
//!   [`RecordingSink`] for tests.
//! - **Timers**: the spinner ticks through a [`Scheduler`]: [`TokioScheduler`]
//!   in applications, [`ManualClock`] for deterministic tests.
//! - **Console**: [`Console`] bundles the default printers and applies
//!   [`OutputSettings`] to all of them.

pub mod console;
pub mod logger;
pub mod printer;
pub mod progress;
pub mod settings;
pub mod sink;
pub mod spinner;
pub mod table;
pub mod theme;
pub mod timer;

pub use console::Console;
pub use logger::{DebugMode, Logger};
pub use printer::{Printer, PrinterCore};
pub use progress::{ProgressBar, ProgressConfig};
pub use settings::{OutputSettings, SettingsError};
pub use sink::{RecordingSink, SilentSink, Sink, SinkCall, TerminalSink};
pub use spinner::{Completion, Spinner, SpinnerConfig};
pub use table::{Row, Table};
pub use theme::{AnsiDecorator, Decorator, LabelDecorator, Tag, Theme};
pub use timer::{ManualClock, Scheduler, TimerHandle, TokioScheduler};
