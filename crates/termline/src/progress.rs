//! Progress Bar - Fraction-driven redraw with a completion transition
//!
//! ```text
//!   start_text
//!   [▓▓▓▓▓▓▓▓▓▓▓▓░░░░░░░░](2/4 files)
//! ```
//!
//! `start` prints the start line and an empty bar below it. Every
//! `fraction` call redraws the bar in place. A fraction of exactly `1.0`
//! replaces both lines with the success line and resets the bar to
//! "not started".

use crate::printer::{Printer, PrinterCore};
use crate::sink::Sink;
use crate::theme::{BarGlyphs, Segment, Tag};
use tracing::debug;

const DEFAULT_BAR_LENGTH: usize = 100;
const DEFAULT_STEPS: u32 = 50;
// Filled glyphs drawn at most, as a multiple of the bar length.
const MAX_OVERFLOW: usize = 2;

/// Texts and layout of one progress run. Unset options take the defaults
/// (`bar_length = 100`, `steps = 50`, no numeric suffix).
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Line printed above the bar
    pub start: String,
    /// Line replacing the bar on completion
    pub success: String,
    /// Line replacing the bar on [`ProgressBar::fail`]
    pub fail: String,
    /// Append `(step/steps unit)` after the bar
    pub show_numeric: Option<bool>,
    /// Number of glyphs inside the brackets
    pub bar_length: Option<usize>,
    /// Total used for the numeric suffix
    pub steps: Option<u32>,
    /// Unit shown after the numeric suffix
    pub unit: Option<String>,
}

impl ProgressConfig {
    /// Config with the three texts and default layout.
    pub fn new(
        start: impl Into<String>,
        success: impl Into<String>,
        fail: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            success: success.into(),
            fail: fail.into(),
            ..Self::default()
        }
    }

    /// Show or hide the numeric suffix.
    pub fn with_numeric(mut self, show: bool) -> Self {
        self.show_numeric = Some(show);
        self
    }

    /// Set the bar length in glyphs.
    pub fn with_bar_length(mut self, length: usize) -> Self {
        self.bar_length = Some(length);
        self
    }

    /// Set the total number of steps.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Bar {
    success: String,
    fail: String,
    show_numeric: bool,
    bar_length: usize,
    steps: u32,
    unit: Option<String>,
}

impl From<ProgressConfig> for Bar {
    fn from(config: ProgressConfig) -> Self {
        Self {
            success: config.success,
            fail: config.fail,
            show_numeric: config.show_numeric.unwrap_or(false),
            bar_length: config.bar_length.unwrap_or(DEFAULT_BAR_LENGTH),
            steps: config.steps.unwrap_or(DEFAULT_STEPS),
            unit: config.unit,
        }
    }
}

/// Progress bar printer.
#[derive(Debug)]
pub struct ProgressBar {
    core: PrinterCore,
    glyphs: BarGlyphs,
    bar: Option<Bar>,
}

impl ProgressBar {
    /// Progress bar writing to `sink`.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::from_core(PrinterCore::new(sink))
    }

    /// Progress bar over a prepared core, drawing with the glyphs of the
    /// core's decorator.
    pub fn from_core(core: PrinterCore) -> Self {
        Self {
            glyphs: core.bar_glyphs(),
            core,
            bar: None,
        }
    }

    /// Override the decorator's bar glyphs.
    pub fn with_glyphs(mut self, glyphs: BarGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Whether a bar is currently running.
    pub fn is_started(&self) -> bool {
        self.bar.is_some()
    }

    /// Print the start line and an empty bar. Replaces any running bar.
    pub fn start(&mut self, config: ProgressConfig) -> &mut Self {
        self.stop();
        debug!(text = %config.start, "progress started");
        self.core.write(&config.start).newline();
        self.bar = Some(Bar::from(config));
        self.fraction(0.0)
    }

    /// Redraw the bar at `fraction` of completion.
    ///
    /// The value is not checked against `[0, 1]`, but NaN and infinities are
    /// ignored and the filled part never exceeds twice the bar length. Only
    /// exactly `1.0` completes the bar; callers computing `done / total`
    /// should pass `1.0` explicitly at the end.
    #[allow(clippy::float_cmp)]
    pub fn fraction(&mut self, fraction: f64) -> &mut Self {
        if !self.core.progress_enabled() || !fraction.is_finite() {
            return self;
        }
        let Some(bar) = &self.bar else {
            return self;
        };

        let line = self.render(bar, fraction);
        self.core.clear_line().write(&line);

        if fraction == 1.0 {
            self.finish(Tag::Success);
        }
        self
    }

    /// Replace the bar with the fail line. Ignored when not started.
    pub fn fail(&mut self) -> &mut Self {
        self.finish(Tag::Error);
        self
    }

    fn render(&self, bar: &Bar, fraction: f64) -> String {
        let done = ((bar.bar_length as f64 * fraction).floor() as usize)
            .min(bar.bar_length.saturating_mul(MAX_OVERFLOW));
        let rest = bar.bar_length.saturating_sub(done);

        let mut line = String::from(self.glyphs.open);
        line.push_str(&self.core.segment(Segment::Done, self.glyphs.done).repeat(done));
        line.push_str(&self.core.segment(Segment::Rest, self.glyphs.rest).repeat(rest));
        line.push_str(self.glyphs.close);

        if bar.show_numeric {
            line.push_str(&self.numeric(bar, fraction));
        }
        line
    }

    fn numeric(&self, bar: &Bar, fraction: f64) -> String {
        let step = (fraction * f64::from(bar.steps)).round() as i64;
        let width = bar.steps.to_string().len();
        let unit = bar
            .unit
            .as_deref()
            .map(|unit| format!(" {unit}"))
            .unwrap_or_default();
        let numeric = format!("{step:>width$}/{}{unit}", bar.steps);

        if self.core.progress_enabled() {
            format!("({numeric})")
        } else {
            numeric
        }
    }

    fn finish(&mut self, tag: Tag) {
        let Some(bar) = self.bar.take() else {
            return;
        };
        let text = match tag {
            Tag::Success => &bar.success,
            _ => &bar.fail,
        };
        let line = self.core.decorate(tag, text);
        self.core
            .clear_line()
            .delete_last_line()
            .write(&line)
            .newline();
        debug!(%tag, "progress finished");
    }
}

impl Printer for ProgressBar {
    fn with_core<R>(&mut self, f: impl FnOnce(&mut PrinterCore) -> R) -> R {
        f(&mut self.core)
    }

    /// Forget the running bar without printing anything.
    fn stop(&mut self) -> &mut Self {
        self.bar = None;
        self
    }
}
