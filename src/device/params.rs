//! Request parameter parsing for range updates.
//!
//! The transport layer hands over raw query values. Bounds are accepted as
//! decimal numbers and rounded to the nearest whole degree (halves away from
//! zero); anything missing, non-numeric, non-finite or outside `i8` is a
//! `MalformedRequest`.

use crate::error::ControlError;

/// Parse one bound parameter.
pub fn parse_bound(parameter: &'static str, raw: Option<&str>) -> Result<i8, ControlError> {
    let malformed = ControlError::MalformedRequest { parameter };

    let value: f32 = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed.clone())?
        .parse()
        .map_err(|_| malformed.clone())?;

    if !value.is_finite() {
        return Err(malformed);
    }

    let rounded = (if value >= 0.0 { value + 0.5 } else { value - 0.5 }) as i32;
    i8::try_from(rounded).map_err(|_| malformed)
}

/// Parse the `lower` and `upper` parameters of a range update.
pub fn parse_range(lower: Option<&str>, upper: Option<&str>) -> Result<(i8, i8), ControlError> {
    Ok((parse_bound("lower", lower)?, parse_bound("upper", upper)?))
}
