//! HCL value normalization
//!
//! API values arrive as loosely typed JSON. Before rendering they are
//! narrowed into [`Value`], which only admits the shapes Terraform page rule
//! arguments accept: a scalar, or a flat mapping of keys to scalars.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Number;
use std::fmt;

/// A scalar HCL value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `true` / `false`
    Bool(bool),
    /// Integer or floating point literal
    Number(Number),
    /// Quoted string
    String(String),
}

/// A renderable action or attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single scalar, rendered as `key = <scalar>`
    Scalar(Scalar),
    /// Flat mapping, rendered as a nested block in insertion order
    Mapping(IndexMap<String, Scalar>),
}

/// Render a scalar as an HCL literal.
///
/// Booleans and numbers are emitted unquoted in their canonical form;
/// strings are wrapped in one pair of double quotes and escaped with
/// [`escape_string`].
pub fn normalize(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Number(n) => n.to_string(),
        Scalar::String(s) => quote(s),
    }
}

/// Wrap a string in double quotes, escaping its content.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

/// Escape a string for use inside an HCL quoted literal.
///
/// Backslashes, double quotes and control whitespace use their backslash
/// forms. Template introducers `${` and `%{` are doubled so Terraform does
/// not interpolate them.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Reject keys that cannot be written as a bare HCL identifier.
///
/// Action ids and mapping keys become attribute and block names, which
/// must match `[A-Za-z_][A-Za-z0-9_-]*`.
pub fn validate_identifier(key: &str) -> Result<()> {
    let mut chars = key.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !valid {
        return Err(Error::render(format!(
            "{:?} is not a valid HCL identifier",
            key
        )));
    }
    Ok(())
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&normalize(self))
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl TryFrom<&serde_json::Value> for Scalar {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Bool(b) => Ok(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => Ok(Scalar::Number(n.clone())),
            serde_json::Value::String(s) => Ok(Scalar::String(s.clone())),
            other => Err(Error::render(format!(
                "expected a string, number or bool, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => {
                let mut mapping = IndexMap::with_capacity(map.len());
                for (key, v) in map {
                    validate_identifier(key)?;
                    let scalar = Scalar::try_from(v).map_err(|e| {
                        Error::render(format!("mapping key \"{}\": {}", key, e))
                    })?;
                    mapping.insert(key.clone(), scalar);
                }
                Ok(Value::Mapping(mapping))
            }
            other => Ok(Value::Scalar(Scalar::try_from(other)?)),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "mapping",
    }
}
