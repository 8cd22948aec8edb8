//! Structural inspection of JSON values
//!
//! Renders a value the way a REPL would show it: bare identifier keys,
//! single-quoted strings, `{ a: 1 }` spacing and a nesting limit past which
//! containers collapse to `[Object]` / `[Array]`. Input is an owned JSON
//! tree, so there are no cycles to guard against and rendering cannot fail.

use super::style::{Colorize, Style};
use serde_json::{Map, Value};

/// Containers nested deeper than this collapse to a placeholder
pub const MAX_DEPTH: usize = 2;

/// Render a value on a single line
pub fn inspect(value: &Value, palette: &dyn Colorize) -> String {
    render(value, 0, palette)
}

/// Render a mapping as an object
pub fn inspect_map(map: &Map<String, Value>, palette: &dyn Colorize) -> String {
    render_object(map, 0, palette)
}

fn render(value: &Value, depth: usize, palette: &dyn Colorize) -> String {
    match value {
        Value::Null => palette.paint("null", Style::Bold),
        Value::Bool(b) => palette.paint(&b.to_string(), Style::Yellow),
        Value::Number(n) => palette.paint(&n.to_string(), Style::Yellow),
        Value::String(s) => palette.paint(&quote(s), Style::Green),
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            if depth > MAX_DEPTH {
                return palette.paint("[Array]", Style::Cyan);
            }
            let parts: Vec<String> = items
                .iter()
                .map(|item| render(item, depth + 1, palette))
                .collect();
            format!("[ {} ]", parts.join(", "))
        }
        Value::Object(map) => render_object(map, depth, palette),
    }
}

fn render_object(map: &Map<String, Value>, depth: usize, palette: &dyn Colorize) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }
    if depth > MAX_DEPTH {
        return palette.paint("[Object]", Style::Cyan);
    }
    let parts: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}: {}", render_key(key), render(value, depth + 1, palette)))
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

fn render_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::super::style::Plain;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object() {
        let value = json!({"user": "alice", "id": 7, "ok": true, "none": null});
        assert_eq!(
            inspect(&value, &Plain),
            "{ user: 'alice', id: 7, ok: true, none: null }"
        );
    }

    #[test]
    fn test_nested_collapses_past_limit() {
        let value = json!({"a": {"b": {"c": {"d": 1}}}});
        assert_eq!(inspect(&value, &Plain), "{ a: { b: { c: [Object] } } }");

        let value = json!([[[[1]]]]);
        assert_eq!(inspect(&value, &Plain), "[ [ [ [Array] ] ] ]");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(inspect(&json!({}), &Plain), "{}");
        assert_eq!(inspect(&json!({"list": []}), &Plain), "{ list: [] }");
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let value = json!({"content-type": "json", "_ok": 1});
        assert_eq!(
            inspect(&value, &Plain),
            "{ 'content-type': 'json', _ok: 1 }"
        );
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(inspect(&json!("it's"), &Plain), "\"it's\"");
        assert_eq!(inspect(&json!("a\nb"), &Plain), "'a\\nb'");
    }
}
