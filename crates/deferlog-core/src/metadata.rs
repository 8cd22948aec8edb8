//! Log metadata values
//!
//! Every extra argument passed to a logger is classified once, at call
//! time, into one of three shapes. Rendering then matches on the shape
//! instead of inspecting the value again.

use deferlog_core_types::schema::{ERR_CAUSES, ERR_MESSAGE, ERR_NAME, ERR_STACK, REDACTED};
use deferlog_core_types::Sensitive;
use serde::Serialize;
use serde_json::{Map, Value};
use std::backtrace::{Backtrace, BacktraceStatus};

/// A scalar metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Primitive {
    /// JSON form of the value; non-finite floats become `null`
    pub fn to_json(&self) -> Value {
        match self {
            Primitive::Str(s) => Value::String(s.clone()),
            Primitive::Int(n) => Value::from(*n),
            Primitive::UInt(n) => Value::from(*n),
            Primitive::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Primitive::Bool(b) => Value::Bool(*b),
            Primitive::Null => Value::Null,
        }
    }
}

/// A plain description of an error
///
/// Holds only owned text, so it can be built from any error type,
/// including malformed ones with empty names or messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    name: String,
    message: String,
    stack: Option<String>,
    fields: Map<String, Value>,
}

impl ErrorValue {
    /// Create an error description; an empty name falls back to `Error`
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: if name.trim().is_empty() {
                "Error".to_string()
            } else {
                name
            },
            message: message.into(),
            stack: None,
            fields: Map::new(),
        }
    }

    /// Describe a `std::error::Error`, recording its `source()` chain
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut value = Self::new(short_type_name::<E>(), err.to_string());

        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(Value::String(cause.to_string()));
            source = cause.source();
        }
        if !causes.is_empty() {
            value.fields.insert(ERR_CAUSES.to_string(), Value::Array(causes));
        }

        value
    }

    /// Attach `backtrace` as the stack when it was actually captured
    ///
    /// Disabled and unsupported backtraces leave the value unchanged.
    pub fn with_backtrace(self, backtrace: &Backtrace) -> Self {
        match backtrace.status() {
            BacktraceStatus::Captured => self.with_stack(backtrace.to_string()),
            _ => self,
        }
    }

    /// Attach a stack or backtrace text
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attach an extra field; values that fail to serialize are kept as text
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(&value)
            .unwrap_or_else(|e| Value::String(format!("[unserializable: {}]", e)));
        self.fields.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Serialize to a plain mapping: `name`, `message`, `stack` (when
    /// present), then the extra fields. Extra fields never shadow the
    /// first three keys.
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(ERR_NAME.to_string(), Value::String(self.name.clone()));
        map.insert(ERR_MESSAGE.to_string(), Value::String(self.message.clone()));
        if let Some(stack) = &self.stack {
            map.insert(ERR_STACK.to_string(), Value::String(stack.clone()));
        }
        for (key, value) in &self.fields {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

fn short_type_name<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    if full.starts_with("dyn ") {
        return "Error".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// One metadata argument of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    /// An object or array
    Structured(Value),
    /// An error description
    Error(ErrorValue),
    /// A scalar
    Primitive(Primitive),
}

impl Metadata {
    /// Classify any serializable value
    ///
    /// Serialization failures do not propagate: the value is replaced with a
    /// string describing the failure.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Self::from(json),
            Err(e) => Metadata::Primitive(Primitive::Str(format!("[unserializable: {}]", e))),
        }
    }

    /// Describe an error value
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Metadata::Error(ErrorValue::from_error(err))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Metadata::Primitive(_))
    }

    /// JSON form, used by the repeated-list rendering
    pub fn to_json(&self) -> Value {
        match self {
            Metadata::Structured(value) => value.clone(),
            Metadata::Error(err) => Value::Object(err.to_mapping()),
            Metadata::Primitive(p) => p.to_json(),
        }
    }
}

impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) | Value::Array(_) => Metadata::Structured(value),
            Value::String(s) => Metadata::Primitive(Primitive::Str(s)),
            Value::Bool(b) => Metadata::Primitive(Primitive::Bool(b)),
            Value::Null => Metadata::Primitive(Primitive::Null),
            Value::Number(n) => Metadata::Primitive(if let Some(i) = n.as_i64() {
                Primitive::Int(i)
            } else if let Some(u) = n.as_u64() {
                Primitive::UInt(u)
            } else {
                Primitive::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
        }
    }
}

impl From<Primitive> for Metadata {
    fn from(value: Primitive) -> Self {
        Metadata::Primitive(value)
    }
}

impl From<ErrorValue> for Metadata {
    fn from(value: ErrorValue) -> Self {
        Metadata::Error(value)
    }
}

impl From<&str> for Metadata {
    fn from(value: &str) -> Self {
        Metadata::Primitive(Primitive::Str(value.to_string()))
    }
}

impl From<String> for Metadata {
    fn from(value: String) -> Self {
        Metadata::Primitive(Primitive::Str(value))
    }
}

impl From<bool> for Metadata {
    fn from(value: bool) -> Self {
        Metadata::Primitive(Primitive::Bool(value))
    }
}

impl From<f64> for Metadata {
    fn from(value: f64) -> Self {
        Metadata::Primitive(Primitive::Float(value))
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Metadata {
            fn from(value: $t) -> Self {
                Metadata::Primitive(Primitive::Int(i64::from(value)))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Metadata {
            fn from(value: $t) -> Self {
                Metadata::Primitive(Primitive::UInt(u64::from(value)))
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for Metadata {
    fn from(value: usize) -> Self {
        Metadata::Primitive(Primitive::UInt(value as u64))
    }
}

impl<T> From<Sensitive<T>> for Metadata {
    fn from(_: Sensitive<T>) -> Self {
        Metadata::Primitive(Primitive::Str(REDACTED.to_string()))
    }
}
