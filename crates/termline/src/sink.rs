//! Output Sinks - Where printers put their bytes
//!
//! A [`Sink`] is the capability set every printer draws through:
//!
//! - `write` (required)
//! - `clear_line` + `cursor_to_column` (required, best-effort)
//! - `move_cursor` (optional, advertised via [`Sink::supports_move_cursor`])
//!
//! [`TerminalSink`] speaks ANSI through crossterm. [`SilentSink`] swallows
//! everything. [`RecordingSink`] keeps a log of calls for tests.

use crossterm::{
    QueueableCommand,
    cursor::{MoveDown, MoveLeft, MoveRight, MoveToColumn, MoveUp},
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use std::io::{self, Stderr, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A writable stream with line-level cursor control.
pub trait Sink: Send {
    /// Write raw text at the cursor.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Clear the entire current line. The cursor column is left untouched.
    fn clear_line(&mut self) -> io::Result<()>;

    /// Move the cursor to an absolute column on the current line.
    fn cursor_to_column(&mut self, col: u16) -> io::Result<()>;

    /// Whether [`Sink::move_cursor`] is available on this sink.
    fn supports_move_cursor(&self) -> bool {
        false
    }

    /// Move the cursor relative to its position. Negative `dy` moves up.
    fn move_cursor(&mut self, _dx: i16, _dy: i16) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}

/// ANSI terminal sink over any writer.
///
/// Cursor control is only emitted when the writer is a TTY. On anything else
/// (pipes, files) the cursor operations fail with `Unsupported`, which the
/// printer layer swallows, so redirected output stays free of escape codes.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    tty: bool,
}

impl<W: Write> TerminalSink<W> {
    /// Wrap a writer. `tty` decides whether cursor control is emitted.
    pub fn new(out: W, tty: bool) -> Self {
        Self { out, tty }
    }

    /// Whether the writer is a terminal.
    pub fn is_tty(&self) -> bool {
        self.tty
    }

    fn cursor_command(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) -> io::Result<()> {
        if !self.tty {
            return Err(io::Error::from(io::ErrorKind::Unsupported));
        }
        f(&mut self.out)?;
        self.out.flush()
    }
}

impl TerminalSink<Stdout> {
    /// Sink bound to the process stdout.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let tty = out.is_tty();
        Self::new(out, tty)
    }
}

impl TerminalSink<Stderr> {
    /// Sink bound to the process stderr.
    pub fn stderr() -> Self {
        let out = io::stderr();
        let tty = out.is_tty();
        Self::new(out, tty)
    }
}

impl<W: Write + Send> Sink for TerminalSink<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.cursor_command(|out| out.queue(Clear(ClearType::CurrentLine)).map(|_| ()))
    }

    fn cursor_to_column(&mut self, col: u16) -> io::Result<()> {
        self.cursor_command(|out| out.queue(MoveToColumn(col)).map(|_| ()))
    }

    fn supports_move_cursor(&self) -> bool {
        self.tty
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) -> io::Result<()> {
        // A zero-count move is read as "one" by most terminals, so skip it.
        self.cursor_command(|out| {
            if dx > 0 {
                out.queue(MoveRight(dx.unsigned_abs()))?;
            } else if dx < 0 {
                out.queue(MoveLeft(dx.unsigned_abs()))?;
            }
            if dy > 0 {
                out.queue(MoveDown(dy.unsigned_abs()))?;
            } else if dy < 0 {
                out.queue(MoveUp(dy.unsigned_abs()))?;
            }
            Ok(())
        })
    }
}

/// Sink that accepts everything and outputs nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl Sink for SilentSink {
    fn write(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn cursor_to_column(&mut self, _col: u16) -> io::Result<()> {
        Ok(())
    }

    fn supports_move_cursor(&self) -> bool {
        true
    }

    fn move_cursor(&mut self, _dx: i16, _dy: i16) -> io::Result<()> {
        Ok(())
    }
}

/// One observed sink operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    /// `write(text)`
    Write(String),
    /// `clear_line()`
    ClearLine,
    /// `cursor_to_column(col)`
    CursorToColumn(u16),
    /// `move_cursor(dx, dy)`
    MoveCursor(i16, i16),
}

/// Sink that records every call into a shared log.
///
/// Clones share the log, so a test keeps one clone and hands the other to a
/// printer. Failures can be injected for the clear-line pair; failing calls
/// are still recorded, as an attempted call.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<SinkCall>>>,
    fail_clear_line: bool,
    fail_cursor_to: bool,
    move_cursor: bool,
}

impl RecordingSink {
    /// Recording sink with every capability and no injected failures.
    pub fn new() -> Self {
        Self {
            log: Arc::default(),
            fail_clear_line: false,
            fail_cursor_to: false,
            move_cursor: true,
        }
    }

    /// Make `clear_line` fail.
    pub fn failing_clear_line(mut self) -> Self {
        self.fail_clear_line = true;
        self
    }

    /// Make `cursor_to_column` fail.
    pub fn failing_cursor_to(mut self) -> Self {
        self.fail_cursor_to = true;
        self
    }

    /// Drop the optional `move_cursor` capability.
    pub fn without_move_cursor(mut self) -> Self {
        self.move_cursor = false;
        self
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.lock().clone()
    }

    /// Only the `write` payloads, in order.
    pub fn writes(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Write(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &SinkCall) -> usize {
        self.lock().iter().filter(|c| *c == call).count()
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SinkCall>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: SinkCall) {
        self.lock().push(call);
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for RecordingSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.record(SinkCall::Write(text.to_string()));
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.record(SinkCall::ClearLine);
        if self.fail_clear_line {
            return Err(io::Error::other("clear_line failed"));
        }
        Ok(())
    }

    fn cursor_to_column(&mut self, col: u16) -> io::Result<()> {
        self.record(SinkCall::CursorToColumn(col));
        if self.fail_cursor_to {
            return Err(io::Error::other("cursor_to failed"));
        }
        Ok(())
    }

    fn supports_move_cursor(&self) -> bool {
        self.move_cursor
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) -> io::Result<()> {
        self.record(SinkCall::MoveCursor(dx, dy));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_sink_emits_ansi_on_tty() {
        let mut sink = TerminalSink::new(Vec::new(), true);
        sink.clear_line().unwrap();
        sink.cursor_to_column(0).unwrap();
        sink.move_cursor(0, -1).unwrap();
        sink.write("hi").unwrap();

        let out = String::from_utf8(sink.out).unwrap();
        assert_eq!(out, "\x1b[2K\x1b[1G\x1b[1Ahi");
    }

    #[test]
    fn test_terminal_sink_refuses_cursor_control_off_tty() {
        let mut sink = TerminalSink::new(Vec::new(), false);
        assert!(!sink.is_tty());
        assert!(sink.clear_line().is_err());
        assert!(sink.cursor_to_column(0).is_err());
        assert!(!sink.supports_move_cursor());
        sink.write("plain").unwrap();

        assert_eq!(sink.out, b"plain");
    }

    #[test]
    fn test_zero_moves_are_skipped() {
        let mut sink = TerminalSink::new(Vec::new(), true);
        sink.move_cursor(0, 0).unwrap();
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_recording_sink_shares_log_between_clones() {
        let probe = RecordingSink::new();
        let mut sink = probe.clone();
        sink.write("a").unwrap();
        sink.clear_line().unwrap();

        assert_eq!(
            probe.calls(),
            vec![SinkCall::Write("a".into()), SinkCall::ClearLine]
        );
        assert_eq!(probe.writes(), vec!["a".to_string()]);
    }

    #[test]
    fn test_recording_sink_records_failed_calls() {
        let probe = RecordingSink::new().failing_clear_line();
        let mut sink = probe.clone();
        assert!(sink.clear_line().is_err());
        assert_eq!(probe.count(&SinkCall::ClearLine), 1);
    }
}
