//! Field extraction helpers for tolerant config decoding.
//!
//! Each helper pulls one field out of a JSON document; on a missing or
//! mistyped field the destination keeps its current (zero) value and one
//! `FieldIssue` is recorded.

use crate::config::{FieldIssue, NUM_COEFFS};
use serde_json::Value;

pub(crate) fn take_u32(doc: &Value, field: &'static str, dst: &mut u32, issues: &mut Vec<FieldIssue>) {
    match doc.get(field).and_then(Value::as_u64) {
        Some(v) if v <= u32::MAX as u64 => *dst = v as u32,
        Some(v) => issues.push(FieldIssue {
            field,
            reason: format!("{v} is too large for a channel/count field"),
        }),
        None => issues.push(FieldIssue {
            field,
            reason: "missing or not a non-negative integer".to_string(),
        }),
    }
}

pub(crate) fn take_f64(doc: &Value, field: &'static str, dst: &mut f64, issues: &mut Vec<FieldIssue>) {
    match doc.get(field).and_then(Value::as_f64) {
        Some(v) => *dst = v,
        None => issues.push(FieldIssue {
            field,
            reason: "missing or not a number".to_string(),
        }),
    }
}

/// The coefficient array is taken whole: exactly `NUM_COEFFS` numbers or
/// nothing, mirroring the all-or-nothing treatment of the original loader.
pub(crate) fn take_coeffs(
    doc: &Value,
    field: &'static str,
    dst: &mut [f64; NUM_COEFFS],
    issues: &mut Vec<FieldIssue>,
) {
    let Some(arr) = doc.get(field).and_then(Value::as_array) else {
        issues.push(FieldIssue {
            field,
            reason: "missing or not an array".to_string(),
        });
        return;
    };
    if arr.len() != NUM_COEFFS {
        issues.push(FieldIssue {
            field,
            reason: format!("expected {NUM_COEFFS} coefficients, got {}", arr.len()),
        });
        return;
    }
    let mut parsed = [0.0; NUM_COEFFS];
    for (i, v) in arr.iter().enumerate() {
        match v.as_f64() {
            Some(x) => parsed[i] = x,
            None => {
                issues.push(FieldIssue {
                    field,
                    reason: format!("element {i} is not a number"),
                });
                return;
            }
        }
    }
    *dst = parsed;
}
