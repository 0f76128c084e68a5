//! Parsing for duration strings such as `"15m"`, `"1h30m"` or `"250ms"`.
//!
//! The grammar is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix. The bare string `"0"` is the only
//! unit-less value accepted. An optional leading sign is allowed; negative
//! durations collapse to [`Duration::ZERO`].

use std::time::Duration;

use crate::error::AppError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest representable duration, in nanoseconds (`i64::MAX`).
const MAX_NANOS: u128 = i64::MAX as u128;

/// Parse a duration string.
pub fn parse_duration(input: &str) -> Result<Duration, AppError> {
    let invalid = |reason: &str| AppError::InvalidDurationFormat {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after_fraction
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let (unit, tail) = after_fraction.split_at(unit_len);
        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| invalid(&format!("unknown unit '{unit}'")))?;

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| invalid("value out of range"))?
        };
        let mut nanos = whole_value
            .checked_mul(scale)
            .ok_or_else(|| invalid("value out of range"))?;
        nanos += fraction_nanos(fraction, scale);

        total = total
            .checked_add(nanos)
            .filter(|t| *t <= MAX_NANOS)
            .ok_or_else(|| invalid("value out of range"))?;
        rest = tail;
    }

    if negative {
        return Ok(Duration::ZERO);
    }
    // MAX_NANOS fits in u64.
    Ok(Duration::from_nanos(total as u64))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Scale fractional digits by `scale`, truncating below one nanosecond.
fn fraction_nanos(fraction: &str, scale: u128) -> u128 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    // Digits past 1e-18 cannot contribute a whole nanosecond for any unit.
    for digit in fraction.bytes().take(18) {
        numerator = numerator * 10 + u128::from(digit - b'0');
        denominator *= 10;
    }
    numerator * scale / denominator
}
