//! Printer - The shared redraw contract
//!
//! Every concrete printer (logger, spinner, progress bar, table) owns a
//! [`PrinterCore`]: the sink plus the color/progress/silence flags and the
//! primitive redraw operations. The [`Printer`] trait layers the public,
//! chainable toggles on top. Its default methods return `&mut Self`, so
//! chaining never loses the concrete type:
//!
//! ```
//! use termline::{Logger, Printer, RecordingSink};
//!
//! let mut logger = Logger::new(RecordingSink::new());
//! logger.no_color().no_progress().info("ready");
//! ```

use crate::sink::{SilentSink, Sink};
use crate::theme::{AnsiDecorator, BarGlyphs, Decorator, Segment, Tag};
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// Sink, flags and primitive redraw operations shared by all printers.
pub struct PrinterCore {
    sink: Box<dyn Sink>,
    decorator: Arc<dyn Decorator>,
    silenced: bool,
    color: bool,
    progress: bool,
}

impl PrinterCore {
    /// Core drawing through `sink` with the default ANSI decorator.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            decorator: Arc::new(AnsiDecorator::default()),
            silenced: false,
            color: true,
            progress: true,
        }
    }

    /// Replace the decorator used while color is enabled.
    pub fn with_decorator(mut self, decorator: Arc<dyn Decorator>) -> Self {
        self.decorator = decorator;
        self
    }

    /// Write `text` as-is. Empty text is not forwarded at all.
    pub fn write(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        if let Err(err) = self.sink.write(text) {
            warn!(%err, "dropping status output");
        }
        self
    }

    /// Clear the current line and return the cursor to column 0.
    ///
    /// Failures are discarded: this is expected whenever the stream is not a
    /// terminal. A failing clear skips the cursor reset.
    pub fn clear_line(&mut self) -> &mut Self {
        let result = self
            .sink
            .clear_line()
            .and_then(|()| self.sink.cursor_to_column(0));
        if let Err(err) = result {
            trace!(%err, "clear line skipped");
        }
        self
    }

    /// Write a single `\n`.
    pub fn newline(&mut self) -> &mut Self {
        if let Err(err) = self.sink.write("\n") {
            warn!(%err, "dropping status newline");
        }
        self
    }

    /// Move up one row (when the sink can) and clear that line.
    pub fn delete_last_line(&mut self) -> &mut Self {
        if self.sink.supports_move_cursor() {
            let _ = self
                .sink
                .move_cursor(0, -1)
                .inspect_err(|err| trace!(%err, "cursor move skipped"));
        }
        self.clear_line()
    }

    /// Swap the sink for a silent one. There is no way back.
    pub fn silence(&mut self) -> &mut Self {
        self.sink = Box::new(SilentSink);
        self.silenced = true;
        self
    }

    /// Turn off colors for everything decorated from now on.
    pub fn disable_color(&mut self) -> &mut Self {
        self.color = false;
        self
    }

    /// Turn off animation and bar glyphs.
    pub fn disable_progress(&mut self) -> &mut Self {
        self.progress = false;
        self
    }

    /// Whether [`PrinterCore::silence`] was called.
    pub fn is_silent(&self) -> bool {
        self.silenced
    }

    /// Whether decorated output is colored.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Whether animations and bars are drawn.
    pub fn progress_enabled(&self) -> bool {
        self.progress
    }

    /// Prefix `msg` with the tag icon and color it when color is on.
    pub fn decorate(&self, tag: Tag, msg: &str) -> String {
        let text = format!("{}{msg}", tag.prefix());
        if self.color {
            self.decorator.paint(tag, &text)
        } else {
            text
        }
    }

    /// `✔ msg`
    pub fn success(&self, msg: &str) -> String {
        self.decorate(Tag::Success, msg)
    }

    /// `✘ msg`
    pub fn error(&self, msg: &str) -> String {
        self.decorate(Tag::Error, msg)
    }

    /// `! msg`
    pub fn warn(&self, msg: &str) -> String {
        self.decorate(Tag::Warn, msg)
    }

    /// `➔ msg`
    pub fn info(&self, msg: &str) -> String {
        self.decorate(Tag::Info, msg)
    }

    /// `? msg`
    pub fn debug(&self, msg: &str) -> String {
        self.decorate(Tag::Debug, msg)
    }

    /// Bar glyphs of the decorator's theme.
    pub fn bar_glyphs(&self) -> BarGlyphs {
        self.decorator.bar_glyphs()
    }

    /// A bar glyph, styled when color is on.
    pub fn segment(&self, segment: Segment, glyph: &str) -> String {
        if self.color {
            self.decorator.segment(segment, glyph)
        } else {
            glyph.to_string()
        }
    }
}

impl fmt::Debug for PrinterCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterCore")
            .field("decorator", &self.decorator)
            .field("silenced", &self.silenced)
            .field("color", &self.color)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// Chainable operations common to every printer.
///
/// Implementors provide [`Printer::with_core`], which lends their
/// [`PrinterCore`] to the default methods, and [`Printer::stop`].
pub trait Printer {
    /// Run `f` against this printer's core.
    fn with_core<R>(&mut self, f: impl FnOnce(&mut PrinterCore) -> R) -> R;

    /// Tear down any running timer or pending state. No-op when stateless.
    fn stop(&mut self) -> &mut Self;

    /// Write raw text; empty text is ignored.
    fn write(&mut self, text: &str) -> &mut Self {
        self.with_core(|core| {
            core.write(text);
        });
        self
    }

    /// Clear the current line and reset the cursor to column 0.
    fn clear_line(&mut self) -> &mut Self {
        self.with_core(|core| {
            core.clear_line();
        });
        self
    }

    /// Write a newline.
    fn newline(&mut self) -> &mut Self {
        self.with_core(|core| {
            core.newline();
        });
        self
    }

    /// Remove the previously rendered line.
    fn delete_last_line(&mut self) -> &mut Self {
        self.with_core(|core| {
            core.delete_last_line();
        });
        self
    }

    /// Suppress all output. Can't be undone on this instance.
    fn silent(&mut self) -> &mut Self {
        self.with_core(|core| {
            core.silence();
        });
        self
    }

    /// Suppress all colors. Can't be undone on this instance.
    fn no_color(&mut self) -> &mut Self {
        self.with_core(|core| {
            core.disable_color();
        });
        self
    }

    /// Suppress spinner glyphs and progress bars. Can't be undone on this instance.
    fn no_progress(&mut self) -> &mut Self {
        self.with_core(|core| {
            core.disable_progress();
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkCall};
    use crate::theme::LabelDecorator;

    struct TestPrinter {
        core: PrinterCore,
    }

    impl TestPrinter {
        fn new(sink: RecordingSink) -> Self {
            Self {
                core: PrinterCore::new(sink).with_decorator(Arc::new(LabelDecorator)),
            }
        }
    }

    impl Printer for TestPrinter {
        fn with_core<R>(&mut self, f: impl FnOnce(&mut PrinterCore) -> R) -> R {
            f(&mut self.core)
        }

        fn stop(&mut self) -> &mut Self {
            self
        }
    }

    #[test]
    fn test_empty_write_is_not_forwarded() {
        let sink = RecordingSink::new();
        let mut printer = TestPrinter::new(sink.clone());

        printer.write("");

        assert!(sink.calls().is_empty());
    }

    #[test]
    fn test_clear_line_resets_cursor() {
        let sink = RecordingSink::new();
        let mut printer = TestPrinter::new(sink.clone());

        printer.clear_line().write("x").newline();

        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::ClearLine,
                SinkCall::CursorToColumn(0),
                SinkCall::Write("x".into()),
                SinkCall::Write("\n".into()),
            ]
        );
    }

    #[test]
    fn test_failing_clear_skips_cursor_reset() {
        let sink = RecordingSink::new().failing_clear_line();
        let mut printer = TestPrinter::new(sink.clone());

        printer.clear_line().write("still here");

        assert_eq!(
            sink.calls(),
            vec![SinkCall::ClearLine, SinkCall::Write("still here".into())]
        );
    }

    #[test]
    fn test_failing_cursor_to_is_swallowed() {
        let sink = RecordingSink::new().failing_cursor_to();
        let mut printer = TestPrinter::new(sink.clone());

        printer.clear_line().write("ok");

        assert_eq!(sink.count(&SinkCall::CursorToColumn(0)), 1);
        assert_eq!(sink.writes(), vec!["ok".to_string()]);
    }

    #[test]
    fn test_delete_last_line_moves_up_first() {
        let sink = RecordingSink::new();
        let mut printer = TestPrinter::new(sink.clone());

        printer.delete_last_line();

        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::MoveCursor(0, -1),
                SinkCall::ClearLine,
                SinkCall::CursorToColumn(0),
            ]
        );
    }

    #[test]
    fn test_delete_last_line_without_move_capability() {
        let sink = RecordingSink::new().without_move_cursor();
        let mut printer = TestPrinter::new(sink.clone());

        printer.delete_last_line();

        assert_eq!(
            sink.calls(),
            vec![SinkCall::ClearLine, SinkCall::CursorToColumn(0)]
        );
    }

    #[test]
    fn test_silent_makes_every_primitive_a_no_op() {
        let sink = RecordingSink::new();
        let mut printer = TestPrinter::new(sink.clone());

        printer
            .silent()
            .write("some text")
            .clear_line()
            .delete_last_line()
            .newline();

        assert!(sink.calls().is_empty());
        assert!(printer.core.is_silent());
    }

    #[test]
    fn test_decorate_respects_color_flag() {
        let mut printer = TestPrinter::new(RecordingSink::new());
        assert_eq!(printer.core.warn("careful"), "yellow: ! careful");
        assert_eq!(printer.core.debug("hmm"), "magenta: ? hmm");

        printer.no_color();

        assert_eq!(printer.core.warn("careful"), "! careful");
        assert_eq!(printer.core.success("done"), "✔ done");
        assert_eq!(printer.core.error("failed"), "✘ failed");
        assert_eq!(printer.core.info("note"), "➔ note");
        assert_eq!(printer.core.debug("hmm"), "? hmm");
    }

    #[test]
    fn test_no_progress_flips_flag_only() {
        let sink = RecordingSink::new();
        let mut printer = TestPrinter::new(sink.clone());
        assert!(printer.core.progress_enabled());

        printer.no_progress();

        assert!(!printer.core.progress_enabled());
        assert!(printer.core.color_enabled());
        assert!(sink.calls().is_empty());
    }
}
