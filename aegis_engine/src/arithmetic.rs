//! Aegis Engine v1: Arithmetic Primitives
//!
//! All rounding matches the dashboard that consumes engine output:
//! halves round toward positive infinity, and one-decimal values are
//! rounded on the value scaled by ten.

/// Hard clamp of `value` into `[min, max]`, evaluated as `max(min, min(value, max))`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
