//! SQL value model and literal rendering.
//!
//! [`Value`] is the closed set of shapes the compiler accepts; [`literal`]
//! turns any of them into SQL text. Rendering is total: there is no input
//! for which it fails, and shapes with no literal form degrade to the
//! `DEFAULT` keyword rather than aborting compilation.

use crate::ident;

/// A host value heading into a SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean, rendered as `1`/`0`.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal, quoted on render.
    Text(String),
    /// Reference to another column; renders as a quoted identifier so the
    /// comparison is column-to-column instead of column-to-literal.
    Column(String),
    /// Structured data, rendered as a compact JSON string literal.
    Json(serde_json::Value),
    /// Placeholder for "use the column default".
    Default,
}

impl Value {
    /// Creates a column-reference value.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }
}

/// Renders a value as its SQL literal or sub-expression.
///
/// # Example
///
/// ```rust
/// use quarry_sql::{literal, Value};
///
/// assert_eq!(literal(&Value::Null), "NULL");
/// assert_eq!(literal(&Value::Int(3)), "3");
/// assert_eq!(literal(&Value::Bool(true)), "1");
/// assert_eq!(literal(&Value::from("it's")), "'it\\'s'");
/// ```
#[must_use]
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => String::from("NULL"),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => quote(s),
        Value::Column(name) => ident::identifier(name),
        Value::Json(json) => match serde_json::to_string(json) {
            Ok(text) => quote(&text),
            Err(_) => String::from("DEFAULT"),
        },
        Value::Default => String::from("DEFAULT"),
    }
}

/// Quotes a string as a MySQL-family literal.
///
/// Escapes the characters the wire protocol treats specially (quotes,
/// backslash, NUL, LF, CR, ctrl-Z) and wraps the result in single quotes.
/// This is the single quoting routine in the workspace; driver connectors
/// delegate here unless they override it.
#[must_use]
pub fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\x1a' => out.push_str("\\Z"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::Json(json)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_null() {
        assert_eq!(literal(&Value::Null), "NULL");
    }

    #[test]
    fn test_literal_bool() {
        assert_eq!(literal(&Value::Bool(true)), "1");
        assert_eq!(literal(&Value::Bool(false)), "0");
    }

    #[test]
    fn test_literal_numbers() {
        assert_eq!(literal(&Value::Int(3)), "3");
        assert_eq!(literal(&Value::Int(-42)), "-42");
        assert_eq!(literal(&Value::Float(2.5)), "2.5");
    }

    #[test]
    fn test_literal_text_quoted() {
        assert_eq!(literal(&Value::from("hello")), "'hello'");
        assert_eq!(literal(&Value::from("O'Brien")), "'O\\'Brien'");
    }

    #[test]
    fn test_literal_column_reference() {
        assert_eq!(literal(&Value::column("users.id")), "`users`.`id`");
    }

    #[test]
    fn test_literal_json_array() {
        assert_eq!(literal(&Value::from(json!([1, 2]))), "'[1,2]'");
    }

    #[test]
    fn test_literal_json_object() {
        assert_eq!(
            literal(&Value::from(json!({"a": 1}))),
            "'{\\\"a\\\":1}'"
        );
    }

    #[test]
    fn test_literal_default() {
        assert_eq!(literal(&Value::Default), "DEFAULT");
    }

    #[test]
    fn test_quote_escapes_injection_attempt() {
        assert_eq!(
            quote("'; DROP TABLE users; --"),
            "'\\'; DROP TABLE users; --'"
        );
    }

    #[test]
    fn test_quote_escapes_control_characters() {
        assert_eq!(quote("a\nb"), "'a\\nb'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
        assert_eq!(quote("a\0b"), "'a\\0b'");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7_i64)), Value::Int(7));
    }
}
