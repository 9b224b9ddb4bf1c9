// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-width rendering of both calendars and assembly of raw Earth input.
//!
//! | Calendar | Pattern |
//! |----------|---------|
//! | Alien | `YY-MM-DD HH:MM:SS` |
//! | Earth | `YYYY-MM-DD HH:MM:SS` |

use crate::error::{ClockError, ClockResult};
use crate::instant::{AlienInstant, EarthInstant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// chrono pattern used for Earth date-times.
pub const EARTH_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Names of the six Earth components, in input order.
const EARTH_FIELDS: [&str; 6] = ["year", "month", "day", "hour", "minute", "second"];

/// How the alien year is rendered.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum YearStyle {
    /// Last two digits only: year 2804 prints as `04`.
    #[default]
    TwoDigit,
    /// Full year, zero-padded to at least two digits: year 2804 prints as `2804`.
    Padded,
}

/// How non-numeric Earth components are treated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputMode {
    /// A component that is not an integer reads as 0.
    #[default]
    Lenient,
    /// A component that is not an integer fails with [`ClockError::Parse`].
    Strict,
}

/// Render an alien instant as `YY-MM-DD HH:MM:SS`.
///
/// ```
/// use alienclock::{format_alien, AlienInstant, YearStyle};
///
/// assert_eq!(format_alien(&AlienInstant::ANCHOR, YearStyle::TwoDigit), "04-18-31 02:02:88");
/// assert_eq!(format_alien(&AlienInstant::ANCHOR, YearStyle::Padded), "2804-18-31 02:02:88");
/// ```
pub fn format_alien(instant: &AlienInstant, style: YearStyle) -> String {
    let year = match style {
        YearStyle::TwoDigit => instant.year.rem_euclid(100),
        YearStyle::Padded => instant.year,
    };
    format!(
        "{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, instant.month, instant.day, instant.hour, instant.minute, instant.second
    )
}

/// Render an Earth instant as `YYYY-MM-DD HH:MM:SS` (UTC, fraction dropped).
///
/// # Errors
///
/// [`ClockError::OutOfRange`] when the instant has no chrono representation.
pub fn format_earth(instant: &EarthInstant) -> ClockResult<String> {
    instant
        .to_utc()
        .map(|datetime| datetime.format(EARTH_FORMAT).to_string())
        .ok_or(ClockError::OutOfRange)
}

/// Assemble six raw Earth components into an instant.
///
/// Components are `[year, month, day, hour, minute, second]`. Each one is read
/// as a signed integer; what happens when that fails depends on `mode`. The
/// assembled value must then be a real Gregorian date-time.
///
/// # Errors
///
/// - [`ClockError::Parse`] for a non-integer component in [`InputMode::Strict`].
/// - [`ClockError::InvalidDate`] when the components name no real date-time.
///
/// ```
/// use alienclock::{format_earth, parse_earth_components, InputMode};
///
/// let earth = parse_earth_components(["2024", "3", "15", "12", "30", "45"], InputMode::Lenient).unwrap();
/// assert_eq!(format_earth(&earth).unwrap(), "2024-03-15 12:30:45");
///
/// // An empty second reads as 0.
/// let earth = parse_earth_components(["2024", "3", "15", "12", "30", ""], InputMode::Lenient).unwrap();
/// assert_eq!(format_earth(&earth).unwrap(), "2024-03-15 12:30:00");
/// ```
pub fn parse_earth_components(components: [&str; 6], mode: InputMode) -> ClockResult<EarthInstant> {
    let mut values = [0i64; 6];
    for ((value, raw), field) in values.iter_mut().zip(components).zip(EARTH_FIELDS) {
        *value = parse_component(field, raw, mode)?;
    }
    let [year, month, day, hour, minute, second] = values;
    EarthInstant::from_components(year, month, day, hour, minute, second)
}

/// Assemble a whitespace-separated `year month day hour minute second` line.
///
/// Every whitespace character separates two components, so a run of them
/// yields empty components in between. Missing trailing components are
/// treated as empty strings, and anything past the sixth is ignored.
///
/// ```
/// use alienclock::{format_earth, parse_earth_line, InputMode};
///
/// let earth = parse_earth_line("2024 3 15 12  30", InputMode::Lenient).unwrap();
/// assert_eq!(format_earth(&earth).unwrap(), "2024-03-15 12:00:30");
/// ```
pub fn parse_earth_line(line: &str, mode: InputMode) -> ClockResult<EarthInstant> {
    let mut components = [""; 6];
    for (slot, token) in components.iter_mut().zip(line.split(char::is_whitespace)) {
        *slot = token;
    }
    parse_earth_components(components, mode)
}

fn parse_component(field: &'static str, raw: &str, mode: InputMode) -> ClockResult<i64> {
    match (raw.parse::<i64>(), mode) {
        (Ok(value), _) => Ok(value),
        (Err(_), InputMode::Lenient) => Ok(0),
        (Err(_), InputMode::Strict) => Err(ClockError::Parse {
            field,
            value: raw.to_string(),
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
