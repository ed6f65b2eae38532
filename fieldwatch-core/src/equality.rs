//! Deep structural equality over field values.
//!
//! Field values are compared recursively:
//!
//! - objects are equal when they have the same key set and equal values per key
//!   (key order is irrelevant)
//! - arrays are equal when they have the same length and equal elements in order
//! - numbers compare by numeric value, so `1` equals `1.0`
//! - everything else compares by value and kind
//!
//! "Absent" is modelled as `None` and is never equal to a present value,
//! not even `null` or an empty container.

use serde_json::{Number, Value};

/// Compare two optional field values.
///
/// Two absent values are equal. An absent value never equals a present one.
pub fn deep_equal(before: Option<&Value>, after: Option<&Value>) -> bool {
    match (before, after) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

/// Compare two present field values structurally.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) if x.is_f64() && y.is_f64() => a == b,
        (Some(a), _) if x.is_f64() => float_equals_integer(a, y),
        (_, Some(b)) if y.is_f64() => float_equals_integer(b, x),
        _ => match (x.as_i64(), y.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => matches!((x.as_u64(), y.as_u64()), (Some(a), Some(b)) if a == b),
        },
    }
}

// 2^63 and 2^64, both exact in f64.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
const U64_END: f64 = 18_446_744_073_709_551_616.0;

/// Exact comparison of a float with an integer `Number`, without rounding
/// the integer through f64.
fn float_equals_integer(float: f64, int: &Number) -> bool {
    if !float.is_finite() || float.fract() != 0.0 {
        return false;
    }
    if let Some(i) = int.as_i64() {
        return (-I64_END..I64_END).contains(&float) && float as i64 == i;
    }
    match int.as_u64() {
        Some(u) => (0.0..U64_END).contains(&float) && float as u64 == u,
        None => false,
    }
}
