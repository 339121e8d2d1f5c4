use std::io;
use thiserror::Error;

use crate::value::ValueKind;

// =============================================================================
// Error type shared by every lesson
// =============================================================================

/// Failures that are not expected misses.
///
/// A missing key or an index past the end is answered with `None`; this enum
/// covers the cases where the call itself makes no sense (wrong kind of value,
/// division by zero, a malformed input string) plus the I/O and parsing the
/// runner does.
#[derive(Error, Debug)]
pub enum LessonError {
    #[error("name '{0}' is not bound")]
    UnboundName(String),

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("expected {expected:?}, got {actual:?}")]
    TypeMismatch { expected: ValueKind, actual: ValueKind },

    #[error("cannot order {left} against {right}")]
    Unorderable { left: String, right: String },

    #[error("division by zero")]
    ZeroDivision,

    #[error("{operation} overflowed")]
    Overflow { operation: &'static str },

    #[error("{0} has no finite representation")]
    NonFinite(f64),

    #[error("invalid hexadecimal float literal: '{0}'")]
    InvalidHexFloat(String),

    #[error("key '{0}' has no 'parent.child' form")]
    MalformedKey(String),

    #[error("value contains a reference cycle")]
    CyclicValue,

    #[error("unknown lesson '{name}'{}", did_you_mean(.suggestion))]
    UnknownLesson {
        name: String,
        suggestion: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl LessonError {
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    pub fn out_of_range(index: isize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }

    pub fn unorderable(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Unorderable {
            left: left.into(),
            right: right.into(),
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, LessonError>;
