// src/record/coerce.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extract::normalize;
use crate::scheme::CoercePolicy;

// Matches the parenthesized secondary value in combined scores like "3 (5)".
static SECONDARY_SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d+)\)").expect("Failed to compile SECONDARY_SCORE_RE"));

/// The result of coercing a raw cell value under its declared policy.
///
/// Absent and malformed values both degrade to `Missing` (or to `Int(0)`
/// under the zero-default policy); numeric accessors never fail for missing
/// data. The tagged form lets callers match exhaustively instead of relying
/// on exception-style control flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, StatValue::Missing)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StatValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            StatValue::Float(f) => Some(*f),
            StatValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Normalize a raw value and convert it under the given policy.
pub fn coerce(raw: Option<&str>, policy: CoercePolicy) -> StatValue {
    match policy {
        CoercePolicy::Int => match normalize(raw).trim().parse::<i64>() {
            Ok(n) => StatValue::Int(n),
            Err(_) => StatValue::Missing,
        },
        CoercePolicy::Float => match normalize(raw).trim().parse::<f64>() {
            Ok(f) => StatValue::Float(f),
            Err(_) => StatValue::Missing,
        },
        CoercePolicy::IntZeroDefault => match normalize(raw).trim().parse::<i64>() {
            Ok(n) => StatValue::Int(n),
            Err(_) => StatValue::Int(0),
        },
        CoercePolicy::Text => match raw {
            Some(s) => StatValue::Text(s.to_string()),
            None => StatValue::Missing,
        },
    }
}

/// Primary component of a combined score such as `"3 (5)"` (a shootout
/// result): the value before the parenthesized part.
pub fn primary_score(raw: &str) -> Option<i64> {
    let primary = match raw.split_whitespace().next() {
        Some(head) => head,
        None => return None,
    };
    normalize(Some(primary)).parse::<i64>().ok()
}

/// Secondary component of a combined score such as `"3 (5)"`: the digits
/// inside the parentheses, if any.
pub fn secondary_score(raw: &str) -> Option<i64> {
    SECONDARY_SCORE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}
