//! Theme - Colors, icons and bar glyphs
//!
//! This module defines the visual vocabulary every printer shares:
//! - Semantic tags and their prefix icons
//! - Colors per tag
//! - Progress bar glyphs
//!
//! Styling itself goes through the [`Decorator`] trait so tests can swap in
//! a decorator that produces readable markers instead of escape codes.

use crossterm::style::{Color, Stylize};
use std::fmt;

/// Semantic category of a decorated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Finished successfully (`✔`)
    Success,
    /// Failed (`✘`)
    Error,
    /// Needs attention (`!`)
    Warn,
    /// Plain information (`➔`)
    Info,
    /// Only shown in debug mode (`?`)
    Debug,
}

impl Tag {
    /// The fixed prefix placed before the message, including its trailing space.
    pub fn prefix(self) -> &'static str {
        match self {
            Tag::Success => "✔ ",
            Tag::Error => "✘ ",
            Tag::Warn => "! ",
            Tag::Info => "➔ ",
            Tag::Debug => "? ",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::Success => "success",
            Tag::Error => "error",
            Tag::Warn => "warn",
            Tag::Info => "info",
            Tag::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Which half of a progress bar a glyph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Completed part
    Done,
    /// Remaining part
    Rest,
}

/// Applies terminal styling. Only consulted while color is enabled.
pub trait Decorator: Send + Sync + fmt::Debug {
    /// Style an already-prefixed message for `tag`.
    fn paint(&self, tag: Tag, text: &str) -> String;

    /// Style a single progress bar glyph.
    fn segment(&self, segment: Segment, glyph: &str) -> String;

    /// Glyphs a progress bar draws with.
    fn bar_glyphs(&self) -> BarGlyphs {
        BarGlyphs::default()
    }
}

/// Color scheme for tagged output
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Success lines
    pub success: Color,
    /// Error lines
    pub error: Color,
    /// Warnings
    pub warning: Color,
    /// Informational lines
    pub info: Color,
    /// Debug lines
    pub debug: Color,
    /// Background of completed bar segments
    pub bar_done: Color,
    /// Foreground of remaining bar segments
    pub bar_rest: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            debug: Color::Magenta,
            bar_done: Color::White,
            bar_rest: Color::DarkGrey,
        }
    }
}

impl ColorScheme {
    /// Color used for a tag.
    pub fn for_tag(&self, tag: Tag) -> Color {
        match tag {
            Tag::Success => self.success,
            Tag::Error => self.error,
            Tag::Warn => self.warning,
            Tag::Info => self.info,
            Tag::Debug => self.debug,
        }
    }
}

/// Progress bar glyphs
#[derive(Debug, Clone)]
pub struct BarGlyphs {
    /// Completed segment (▓)
    pub done: &'static str,
    /// Remaining segment (░)
    pub rest: &'static str,
    /// Left cap
    pub open: &'static str,
    /// Right cap
    pub close: &'static str,
}

impl Default for BarGlyphs {
    fn default() -> Self {
        Self {
            done: "▓",
            rest: "░",
            open: "[",
            close: "]",
        }
    }
}

/// Default theme for termline output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for tags and bar segments
    pub colors: ColorScheme,
    /// Progress bar glyphs
    pub bar: BarGlyphs,
}

/// Decorator that emits ANSI colors via crossterm.
#[derive(Debug, Clone, Default)]
pub struct AnsiDecorator {
    theme: Theme,
}

impl AnsiDecorator {
    /// Decorator for a specific theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// The theme in use.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Decorator for AnsiDecorator {
    fn paint(&self, tag: Tag, text: &str) -> String {
        text.with(self.theme.colors.for_tag(tag)).to_string()
    }

    fn segment(&self, segment: Segment, glyph: &str) -> String {
        match segment {
            Segment::Done => glyph.on(self.theme.colors.bar_done).to_string(),
            Segment::Rest => glyph.with(self.theme.colors.bar_rest).to_string(),
        }
    }

    fn bar_glyphs(&self) -> BarGlyphs {
        self.theme.bar.clone()
    }
}

/// Decorator that labels text with its color name instead of styling it.
///
/// `paint(Tag::Info, "➔ x")` gives `"blue: ➔ x"`. Bar glyphs pass through
/// unchanged. Meant for tests and for logs that must stay escape-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelDecorator;

impl Decorator for LabelDecorator {
    fn paint(&self, tag: Tag, text: &str) -> String {
        let label = match tag {
            Tag::Success => "green",
            Tag::Error => "red",
            Tag::Warn => "yellow",
            Tag::Info => "blue",
            Tag::Debug => "magenta",
        };
        format!("{label}: {text}")
    }

    fn segment(&self, _segment: Segment, glyph: &str) -> String {
        glyph.to_string()
    }
}
