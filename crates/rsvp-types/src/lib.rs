//! RSVP Types - Pure type definitions
//!
//! Entry records as they are persisted, the request bodies they are built
//! from, and the small coercion rules shared by every storage backend.

pub mod entry;
pub mod submission;

pub use entry::*;
pub use submission::*;

/// Coerce a raw guest count to a positive integer.
///
/// Numbers keep their integer part when it is at least 1, saturating at
/// `u32::MAX`. Blank, non-numeric, zero and negative input counts as a
/// single guest.
pub fn parse_guest_count(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(n) => guests_from_number(n),
        Err(_) => 1,
    }
}

fn guests_from_number(n: f64) -> u32 {
    if !n.is_finite() || n < 1.0 {
        return 1;
    }
    if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n.trunc() as u32
    }
}

/// Coerce a guest count taken straight from a JSON body.
pub fn coerce_guest_count(value: Option<&serde_json::Value>) -> u32 {
    use serde_json::Value;

    match value {
        Some(Value::Number(n)) => n.as_f64().map(guests_from_number).unwrap_or(1),
        Some(Value::String(s)) => parse_guest_count(s),
        _ => 1,
    }
}
