//! Colorization capability
//!
//! The formatter asks for a [`Style`] per span and never emits escape codes
//! itself. [`Plain`] returns text untouched; [`Ansi`] uses the `colored`
//! crate, which also honours `NO_COLOR` and `CLICOLOR_FORCE`.

use colored::Colorize as _;
use deferlog_core_types::Level;

/// Presentation role of a span of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Dim,
    Bold,
    Red,
    Yellow,
    Cyan,
    Green,
    White,
    Magenta,
    Gray,
}

/// Turns text plus a style into presentable text
pub trait Colorize: Send + Sync {
    fn paint(&self, text: &str, style: Style) -> String;
}

/// No-op colorizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Colorize for Plain {
    fn paint(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

/// ANSI terminal colorizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Colorize for Ansi {
    fn paint(&self, text: &str, style: Style) -> String {
        let painted = match style {
            Style::Dim => text.dimmed(),
            Style::Bold => text.bold(),
            Style::Red => text.red(),
            Style::Yellow => text.yellow(),
            Style::Cyan => text.cyan(),
            Style::Green => text.green(),
            Style::White => text.white(),
            Style::Magenta => text.magenta(),
            Style::Gray => text.bright_black(),
        };
        painted.to_string()
    }
}

/// Color of the level name in the line header
pub fn level_style(level: Level) -> Style {
    match level {
        Level::Error => Style::Red,
        Level::Warn => Style::Yellow,
        Level::Info => Style::Cyan,
        Level::Debug => Style::Green,
        Level::Verbose => Style::White,
        Level::Silly => Style::Magenta,
    }
}
