//! Field rules for item input
//!
//! Two entry points share the same rules:
//! - `parse_*` / `require_text` turn raw prompt input into a typed value
//! - `check_*` re-check an already typed value before the repository stores it
//!
//! Whitespace around numbers is ignored. Text is kept exactly as typed.

use std::ops::RangeInclusive;

use super::errors::{ValidationError, ValidationResult};
use super::types::{ItemKind, Rarity};

/// Allowed required level
pub const LEVEL_RANGE: RangeInclusive<u32> = 1..=60;

/// Allowed durability
pub const DURABILITY_RANGE: RangeInclusive<u32> = 0..=100;

/// Slots accepted by interactive entry
pub const SLOTS_RANGE: RangeInclusive<u32> = 0..=999;

const ORDINAL_RANGE: RangeInclusive<u32> = 1..=4;

/// Accepts any text that is not blank.
pub fn require_text(field: &'static str, input: &str) -> ValidationResult<String> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(input.to_string())
}

/// Parses a whole number and checks it against an inclusive range.
///
/// Negative input is reported as out of range rather than malformed.
pub fn parse_int_in_range(
    field: &'static str,
    input: &str,
    range: &RangeInclusive<u32>,
) -> ValidationResult<u32> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotAnInteger { field })?;

    if value < i64::from(*range.start()) || value > i64::from(*range.end()) {
        return Err(out_of_range(field, range));
    }
    Ok(value as u32)
}

/// Parses a finite decimal number (`.` separator) no smaller than `min`.
pub fn parse_float_min(field: &'static str, input: &str, min: f64) -> ValidationResult<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })?;
    check_min(field, value, min)?;
    Ok(value)
}

/// Parses a rarity ordinal (1-4).
pub fn parse_rarity_choice(input: &str) -> ValidationResult<Rarity> {
    let ordinal = parse_int_in_range("rarity", input, &ORDINAL_RANGE)?;
    Rarity::from_ordinal(ordinal).ok_or_else(|| out_of_range("rarity", &ORDINAL_RANGE))
}

/// Parses a kind ordinal (1-4).
pub fn parse_kind_choice(input: &str) -> ValidationResult<ItemKind> {
    let ordinal = parse_int_in_range("kind", input, &ORDINAL_RANGE)?;
    ItemKind::from_ordinal(ordinal).ok_or_else(|| out_of_range("kind", &ORDINAL_RANGE))
}

pub(crate) fn check_text(field: &'static str, value: &str) -> ValidationResult<()> {
    require_text(field, value).map(|_| ())
}

pub(crate) fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> ValidationResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(out_of_range(field, range))
    }
}

pub(crate) fn check_min(field: &'static str, value: f64, min: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if value < min {
        return Err(ValidationError::BelowMinimum { field, min });
    }
    Ok(())
}

fn out_of_range(field: &'static str, range: &RangeInclusive<u32>) -> ValidationError {
    ValidationError::OutOfRange {
        field,
        min: *range.start(),
        max: *range.end(),
    }
}
