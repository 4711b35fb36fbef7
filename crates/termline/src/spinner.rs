//! Spinner - Animated single-line status
//!
//! ```text
//!   Idle ──start──▶ Running ──success / error / stop──▶ Idle
//!                    │   ▲
//!                    └───┘ tick (100ms) / update
//! ```
//!
//! The running state lives behind a mutex shared with the timer callback.
//! Every `start` and every cancellation bumps a generation counter; a tick
//! only draws while its generation is current, so once `stop`, `success` or
//! `error` returns no tick can draw again, even one already waiting for the
//! lock on another runtime worker.

use crate::printer::{Printer, PrinterCore};
use crate::sink::Sink;
use crate::theme::Tag;
use crate::timer::{Scheduler, TimerHandle};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::debug;

/// Default braille animation.
pub const DEFAULT_FRAMES: &str = "⠏⠋⠙⠹⠸⠼⠴⠦⠧⠇";

/// Time between two animation frames.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Builds a completion line from an optional detail string.
pub type TextFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Final text of a spinner: fixed, or computed from a detail at finish time.
#[derive(Clone)]
pub enum Completion {
    /// Printed as-is; any detail passed on finish is ignored.
    Text(String),
    /// Called with the detail (empty when none was given).
    Dynamic(TextFn),
}

impl Completion {
    /// Completion computed from the detail passed to `success`/`error`.
    pub fn dynamic(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }
}

impl From<&str> for Completion {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Completion {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Texts for one spinner run.
#[derive(Debug, Clone)]
pub struct SpinnerConfig {
    /// Text shown next to the animation
    pub start: String,
    /// Line printed by [`Spinner::success`]
    pub success: Completion,
    /// Line printed by [`Spinner::error`]
    pub fail: Completion,
}

impl SpinnerConfig {
    /// Config from anything convertible to texts/completions.
    pub fn new(
        start: impl Into<String>,
        success: impl Into<Completion>,
        fail: impl Into<Completion>,
    ) -> Self {
        Self {
            start: start.into(),
            success: success.into(),
            fail: fail.into(),
        }
    }
}

// Literal completions are decorated once at start; dynamic ones at finish.
enum Resolved {
    Text(String),
    Dynamic(TextFn),
}

struct SpinnerState {
    core: PrinterCore,
    frames: Vec<String>,
    frame: usize,
    running_text: String,
    success_text: Option<Resolved>,
    error_text: Option<Resolved>,
    timer: Option<TimerHandle>,
    generation: u64,
}

impl SpinnerState {
    fn resolve(&self, tag: Tag, completion: Completion) -> Resolved {
        match completion {
            Completion::Text(text) => Resolved::Text(self.core.decorate(tag, &text)),
            Completion::Dynamic(f) => Resolved::Dynamic(f),
        }
    }

    fn completion_line(&self, tag: Tag, detail: Option<&str>) -> String {
        let resolved = match tag {
            Tag::Success => self.success_text.as_ref(),
            _ => self.error_text.as_ref(),
        };
        match resolved {
            None => String::new(),
            Some(Resolved::Text(text)) => text.clone(),
            Some(Resolved::Dynamic(f)) => self.core.decorate(tag, &f(detail.unwrap_or(""))),
        }
    }

    fn line(&self) -> String {
        let glyph = self
            .frames
            .get(self.frame)
            .filter(|_| self.core.progress_enabled());
        match glyph {
            Some(glyph) => format!("{glyph} {}", self.running_text),
            None => self.running_text.clone(),
        }
    }

    // The last frame is never reached: the cycle length is one short.
    fn advance(&mut self) {
        let cycle = self.frames.len().saturating_sub(1);
        self.frame = if cycle == 0 {
            0
        } else {
            (self.frame + 1) % cycle
        };
    }

    fn redraw(&mut self) {
        let line = self.line();
        self.core.clear_line().write(&line);
    }

    fn cancel_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn finish(&mut self, tag: Tag, detail: Option<&str>) {
        self.core.clear_line();
        self.cancel_timer();
        let line = self.completion_line(tag, detail);
        self.core.write(&line).newline();
    }
}

fn lock(state: &Mutex<SpinnerState>) -> MutexGuard<'_, SpinnerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn on_tick(state: &Weak<Mutex<SpinnerState>>, generation: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = lock(&state);
    if state.generation != generation {
        return;
    }
    if state.core.progress_enabled() {
        state.advance();
    }
    state.redraw();
}

/// Animated status line driven by a recurring timer.
pub struct Spinner {
    state: Arc<Mutex<SpinnerState>>,
    scheduler: Arc<dyn Scheduler>,
}

impl Spinner {
    /// Spinner with the default frames.
    pub fn new(sink: impl Sink + 'static, scheduler: Arc<dyn Scheduler>) -> Self {
        Self::from_core(PrinterCore::new(sink), scheduler, DEFAULT_FRAMES)
    }

    /// Spinner cycling through the characters of `frames`.
    pub fn with_frames(
        sink: impl Sink + 'static,
        scheduler: Arc<dyn Scheduler>,
        frames: &str,
    ) -> Self {
        Self::from_core(PrinterCore::new(sink), scheduler, frames)
    }

    /// Spinner over a prepared core.
    pub fn from_core(core: PrinterCore, scheduler: Arc<dyn Scheduler>, frames: &str) -> Self {
        let state = SpinnerState {
            core,
            frames: frames.chars().map(String::from).collect(),
            frame: 0,
            running_text: String::new(),
            success_text: None,
            error_text: None,
            timer: None,
            generation: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            scheduler,
        }
    }

    /// Start (or restart) the animation.
    ///
    /// Draws the first frame right away, without clearing: nothing of this
    /// run is on screen yet.
    pub fn start(&mut self, config: SpinnerConfig) -> &mut Self {
        let SpinnerConfig {
            start,
            success,
            fail,
        } = config;
        debug!(text = %start, "spinner started");

        let mut state = lock(&self.state);
        state.success_text = Some(state.resolve(Tag::Success, success));
        state.error_text = Some(state.resolve(Tag::Error, fail));
        state.running_text = start;

        state.cancel_timer();
        state.frame = 0;
        let generation = state.generation;
        let weak = Arc::downgrade(&self.state);
        let timer = self
            .scheduler
            .every(TICK_PERIOD, Box::new(move || on_tick(&weak, generation)));
        state.timer = Some(timer);

        let line = state.line();
        state.core.write(&line);
        drop(state);
        self
    }

    /// Replace the running text and redraw now. Ignored while idle.
    pub fn update(&mut self, text: &str) -> &mut Self {
        let mut state = lock(&self.state);
        if state.timer.is_some() {
            state.running_text = text.to_string();
            state.redraw();
        }
        drop(state);
        self
    }

    /// Stop and replace the line with the success text.
    pub fn success(&mut self, detail: Option<&str>) -> &mut Self {
        lock(&self.state).finish(Tag::Success, detail);
        debug!("spinner finished");
        self
    }

    /// Stop and replace the line with the fail text.
    pub fn error(&mut self, detail: Option<&str>) -> &mut Self {
        lock(&self.state).finish(Tag::Error, detail);
        debug!("spinner failed");
        self
    }

    /// Whether a timer is active.
    pub fn is_running(&self) -> bool {
        lock(&self.state).timer.is_some()
    }

    /// Index of the frame currently shown.
    pub fn frame_index(&self) -> usize {
        lock(&self.state).frame
    }
}

impl Printer for Spinner {
    fn with_core<R>(&mut self, f: impl FnOnce(&mut PrinterCore) -> R) -> R {
        f(&mut lock(&self.state).core)
    }

    /// Cancel the timer. Nothing is cleared or written.
    fn stop(&mut self) -> &mut Self {
        lock(&self.state).cancel_timer();
        self
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        lock(&self.state).cancel_timer();
    }
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("Spinner")
            .field("running", &state.timer.is_some())
            .field("frame", &state.frame)
            .field("text", &state.running_text)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
