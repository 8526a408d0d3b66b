use std::fmt;

use serde::{Deserialize, Serialize};

/// A single non-null cell. Blank cells are represented as `None` by callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            // -0 and 0 render alike
            Value::Number(n) if *n == 0.0 => "0".to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Best-effort typing of a raw CSV cell.
///
/// Blank cells become `None`; anything that parses as a finite float becomes
/// a number; everything else is kept as trimmed text.
pub fn parse_cell(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Some(Value::Number(parsed)),
        _ => Some(Value::Text(trimmed.to_string())),
    }
}
