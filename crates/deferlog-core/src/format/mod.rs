//! Line formatter
//!
//! Turns a [`LogEntry`] into one human-readable line:
//!
//! ```text
//! <timestamp> <LEVEL> [<label>] (<pid>): <message> [<metadata>...] [+<elapsed>]
//! ```
//!
//! Formatting never fails. Metadata rendering depends on its shape:
//!
//! - structured values use [`inspect`]
//! - errors become a plain mapping at `error` level, and a stack-style
//!   description otherwise (`[Name: message]` when there is no stack)
//! - primitives are rendered as JSON text
//!
//! The trailing newline is left to the sink.

pub mod duration;
pub mod inspect;
pub mod style;

pub use duration::{format_duration, format_millis, DurationFormat};
pub use inspect::inspect;
pub use style::{level_style, Ansi, Colorize, Plain, Style};

use crate::entry::LogEntry;
use crate::metadata::{ErrorValue, Metadata};
use deferlog_core_types::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Header timestamp layout, e.g. `2026.10.18 14:05:09 PM`
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S %p";

/// How primitive metadata items are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataMode {
    /// Every item is rendered exactly once
    #[default]
    Once,
    /// Each primitive item appends a JSON rendering of the whole metadata
    /// list. Output of multi-item calls repeats; kept for consumers that
    /// parse lines produced by earlier versions.
    Repeat,
}

/// Presentation options of a formatter
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub use_color: bool,
    pub metadata_mode: MetadataMode,
    pub duration: DurationFormat,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_color: false,
            metadata_mode: MetadataMode::Once,
            duration: format_duration,
        }
    }
}

impl FormatOptions {
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_metadata_mode(mut self, mode: MetadataMode) -> Self {
        self.metadata_mode = mode;
        self
    }

    pub fn with_duration(mut self, duration: DurationFormat) -> Self {
        self.duration = duration;
        self
    }
}

/// Renders entries into text lines
#[derive(Clone)]
pub struct Formatter {
    palette: Arc<dyn Colorize>,
    metadata_mode: MetadataMode,
    duration: DurationFormat,
    pid: u32,
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("metadata_mode", &self.metadata_mode)
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        let palette: Arc<dyn Colorize> = if options.use_color {
            Arc::new(Ansi)
        } else {
            Arc::new(Plain)
        };
        Self {
            palette,
            metadata_mode: options.metadata_mode,
            duration: options.duration,
            pid: std::process::id(),
        }
    }

    /// Replace the colorizer
    pub fn with_palette(mut self, palette: Arc<dyn Colorize>) -> Self {
        self.palette = palette;
        self
    }

    fn paint(&self, text: &str, style: Style) -> String {
        self.palette.paint(text, style)
    }

    /// Render one entry, without trailing newline
    pub fn format(&self, entry: &LogEntry) -> String {
        let level = entry.level();
        let header = [
            self.paint(
                &entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
                Style::Dim,
            ),
            self.paint(&level.as_str().to_uppercase(), level_style(level)),
            self.paint(&format!("[{}]", entry.label()), Style::White),
            self.paint(&format!("({}):", self.pid), Style::Dim),
        ];

        let mut body = vec![header.join(" "), self.paint(entry.message(), Style::Yellow)];

        if let Some(metadata) = entry.metadata() {
            self.render_metadata(level, metadata, &mut body);
        }

        if let Some(elapsed) = entry.elapsed() {
            body.push(self.paint(&format!("+{}", (self.duration)(elapsed)), Style::Dim));
        }

        body.join(" ")
    }

    fn render_metadata(&self, level: Level, metadata: &[Metadata], body: &mut Vec<String>) {
        let palette = self.palette.as_ref();
        for item in metadata {
            match item {
                Metadata::Structured(value) => body.push(inspect(value, palette)),
                Metadata::Error(err) => body.push(self.render_error(level, err)),
                Metadata::Primitive(value) => match self.metadata_mode {
                    MetadataMode::Once => {
                        body.push(self.paint(&value.to_json().to_string(), Style::Gray))
                    }
                    MetadataMode::Repeat => body.extend(
                        metadata
                            .iter()
                            .map(|m| self.paint(&pretty_json(m), Style::Gray)),
                    ),
                },
            }
        }
    }

    fn render_error(&self, level: Level, err: &ErrorValue) -> String {
        let palette = self.palette.as_ref();
        if level == Level::Error {
            return inspect::inspect_map(&err.to_mapping(), palette);
        }

        let head = match err.stack() {
            Some(stack) => stack.to_string(),
            None if err.message().is_empty() => format!("[{}]", err.name()),
            None => format!("[{}: {}]", err.name(), err.message()),
        };
        if err.fields().is_empty() {
            head
        } else {
            format!("{} {}", head, inspect::inspect_map(err.fields(), palette))
        }
    }
}

fn pretty_json(item: &Metadata) -> String {
    let json = item.to_json();
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Primitive;
    use chrono::{Local, TimeZone};
    use serde_json::json;
    use std::time::Duration;

    fn fixed_entry(level: Level, message: &str) -> LogEntry {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 9)
            .single()
            .unwrap();
        LogEntry::new(level, "db", message).with_timestamp(timestamp)
    }

    fn plain() -> Formatter {
        Formatter::new(FormatOptions::default())
    }

    #[test]
    fn test_header_layout() {
        let line = plain().format(&fixed_entry(Level::Info, "connected"));
        let expected = format!(
            "2024.03.09 14:05:09 PM INFO [db] ({}): connected",
            std::process::id()
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_elapsed_suffix() {
        let entry = fixed_entry(Level::Debug, "tick").with_elapsed(Duration::from_millis(340));
        assert!(plain().format(&entry).ends_with("tick +340ms"));
    }

    #[test]
    fn test_no_trailing_newline() {
        let line = plain().format(&fixed_entry(Level::Warn, "careful"));
        assert!(!line.ends_with('\n'));
    }

    #[test]
    fn test_structured_metadata_inspected() {
        let entry = fixed_entry(Level::Info, "query")
            .with_metadata(vec![Metadata::from(json!({"rows": 3, "table": "users"}))]);
        assert!(plain()
            .format(&entry)
            .ends_with("query { rows: 3, table: 'users' }"));
    }

    #[test]
    fn test_error_at_error_level_is_serialized_mapping() {
        let err = ErrorValue::new("Error", "bad").with_field("code", "E42");
        let entry = fixed_entry(Level::Error, "boom").with_metadata(vec![Metadata::Error(err)]);
        assert!(plain()
            .format(&entry)
            .ends_with("boom { name: 'Error', message: 'bad', code: 'E42' }"));
    }

    #[test]
    fn test_error_at_other_level_uses_stack_style() {
        let err = ErrorValue::new("IoError", "disk full").with_field("errno", 28);
        let entry = fixed_entry(Level::Warn, "retrying").with_metadata(vec![Metadata::Error(err)]);
        assert!(plain()
            .format(&entry)
            .ends_with("retrying [IoError: disk full] { errno: 28 }"));

        let entry = fixed_entry(Level::Debug, "retrying")
            .with_metadata(vec![Metadata::Error(ErrorValue::new("Timeout", ""))]);
        assert!(plain().format(&entry).ends_with("retrying [Timeout]"));

        let err = ErrorValue::new("IoError", "disk full").with_stack("IoError: disk full\n    at write");
        let entry = fixed_entry(Level::Info, "retrying").with_metadata(vec![Metadata::Error(err)]);
        assert!(plain()
            .format(&entry)
            .ends_with("retrying IoError: disk full\n    at write"));
    }

    #[test]
    fn test_primitives_render_once_by_default() {
        let entry = fixed_entry(Level::Info, "values")
            .with_metadata(vec![Metadata::from("a"), Metadata::from(1)]);
        assert!(plain().format(&entry).ends_with("values \"a\" 1"));
    }

    #[test]
    fn test_repeat_mode_rerenders_list_per_primitive() {
        let formatter = Formatter::new(FormatOptions::default().with_metadata_mode(MetadataMode::Repeat));
        let entry = fixed_entry(Level::Info, "values")
            .with_metadata(vec![Metadata::from("a"), Metadata::from(1)]);
        assert!(formatter.format(&entry).ends_with("values \"a\" 1 \"a\" 1"));
    }

    #[test]
    fn test_repeat_mode_mixed_items() {
        let formatter = Formatter::new(FormatOptions::default().with_metadata_mode(MetadataMode::Repeat));
        let entry = fixed_entry(Level::Info, "mixed")
            .with_metadata(vec![Metadata::from(json!({"k": 1})), Metadata::from(true)]);
        let line = formatter.format(&entry);
        assert!(line.ends_with("mixed { k: 1 } {\n  \"k\": 1\n} true"));
    }

    #[test]
    fn test_non_finite_primitive_is_null() {
        let entry = fixed_entry(Level::Info, "ratio")
            .with_metadata(vec![Metadata::Primitive(Primitive::Float(f64::INFINITY))]);
        assert!(plain().format(&entry).ends_with("ratio null"));
    }

    #[test]
    fn test_custom_duration_format() {
        let formatter = Formatter::new(FormatOptions::default().with_duration(format_millis));
        let entry = fixed_entry(Level::Info, "slow").with_elapsed(Duration::from_secs(2));
        assert!(formatter.format(&entry).ends_with("slow +2000ms"));
    }

    #[test]
    fn test_color_line_paints_each_span() {
        use colored::Colorize as _;

        colored::control::set_override(true);
        let colored = Formatter::new(FormatOptions::default().with_color(true));
        let entry = fixed_entry(Level::Error, "boom")
            .with_metadata(vec![Metadata::from(7)])
            .with_elapsed(Duration::from_millis(5));
        let line = colored.format(&entry);

        assert!(line.contains(&"ERROR".red().to_string()));
        assert!(line.contains(&"[db]".white().to_string()));
        assert!(line.contains(&"boom".yellow().to_string()));
        assert!(line.contains(&"7".bright_black().to_string()));
        assert!(line.ends_with(&"+5ms".dimmed().to_string()));

        let warn = colored.format(&fixed_entry(Level::Warn, "careful"));
        assert!(warn.contains(&"WARN".yellow().to_string()));

        let plain_line = plain().format(&entry);
        assert!(!plain_line.contains('\u{1b}'));
        assert!(plain_line.contains(" ERROR [db] "));
    }

    #[test]
    fn test_custom_palette() {
        struct Brackets;
        impl Colorize for Brackets {
            fn paint(&self, text: &str, style: Style) -> String {
                if style == Style::Red {
                    format!("<{}>", text)
                } else {
                    text.to_string()
                }
            }
        }

        let formatter = plain().with_palette(Arc::new(Brackets));
        let line = formatter.format(&fixed_entry(Level::Error, "x"));
        assert!(line.contains(" <ERROR> [db]"));
    }
}
