//! Numeric scrubbing: report values carry trailing unit text (`6728 bytes`,
//! `918.11 [#/sec] (mean)`) that must be split off before parsing.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Leading numeric token at the start of a trimmed value.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9.]+)(.*)").expect("static regex must compile"));

/// Five numeric columns of a connection-time row.
static STATS_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9.]+)\s+([0-9.]+)\s+([0-9.]+)\s+([0-9.]+)\s+([0-9.]+)")
        .expect("static regex must compile")
});

/// Failure to extract a number from a report value.
#[derive(Debug, thiserror::Error)]
pub enum ScrubError {
    #[error("no leading number in {0:?}")]
    NoLeadingNumber(String),

    #[error("cannot parse {0:?} as a number: {1}")]
    Unparsable(String, String),
}

// ---------------------------------------------------------------------------
// split_value
// ---------------------------------------------------------------------------

/// Split a report value into its leading numeric token and the trailing unit
/// text, e.g. `2.178 [ms] (mean)` into `"2.178"` and `" [ms] (mean)"`.
///
/// The number must start the value (after trimming); text in front of it is
/// not searched.
pub fn split_value(value: &str) -> Result<(&str, &str), ScrubError> {
    let caps = LEADING_NUMBER
        .captures(value.trim())
        .ok_or_else(|| ScrubError::NoLeadingNumber(value.to_string()))?;
    Ok((
        caps.get(1).map_or("", |m| m.as_str()),
        caps.get(2).map_or("", |m| m.as_str()),
    ))
}

// ---------------------------------------------------------------------------
// scrub_number
// ---------------------------------------------------------------------------

/// Scrub a value down to its leading numeric token and parse it.
///
/// Works for any [`FromStr`] numeric type. The token shape `[0-9.]+` admits
/// no sign or exponent, so a decimal point inside a token parsed as an
/// integer type is an error, not a truncation.
pub fn scrub_number<T>(value: &str) -> Result<T, ScrubError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (token, _) = split_value(value)?;
    token
        .parse()
        .map_err(|err: T::Err| ScrubError::Unparsable(token.to_string(), err.to_string()))
}

// ---------------------------------------------------------------------------
// scrub_stats_row
// ---------------------------------------------------------------------------

/// Extract the five numeric columns of a connection-time row
/// (`min mean [+/-sd] median max`).
///
/// Tokens past the fifth are ignored; fewer than five numbers yields `None`.
pub fn scrub_stats_row(value: &str) -> Option<[f64; 5]> {
    let caps = STATS_ROW.captures(value)?;
    let mut row = [0.0; 5];
    for (i, slot) in row.iter_mut().enumerate() {
        *slot = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(row)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
