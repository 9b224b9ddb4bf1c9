// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants on both calendars.
//!
//! [`EarthInstant`] stores a signed [`Seconds`] quantity measured from the
//! Unix epoch (1970-01-01T00:00:00 UTC) and converts to and from
//! `chrono::DateTime<Utc>`.
//!
//! [`AlienInstant`] is a plain six-field value. Its derived ordering compares
//! year, month, day, hour, minute and second in that order, which is the
//! calendar order.

use chrono::{DateTime, NaiveDate, Utc};
use qtty::Seconds;
use std::fmt;
use std::ops::{Add, Sub};

use crate::calendar::CalendarModel;
use crate::error::{ClockError, ClockResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// AlienInstant
// ═══════════════════════════════════════════════════════════════════════════

/// A date-time on the alien calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlienInstant {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl AlienInstant {
    /// Alien instant matching Earth epoch zero in the stock calendar.
    pub const ANCHOR: Self = Self::new(2804, 18, 31, 2, 2, 88);

    #[inline]
    pub const fn new(year: i64, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check every field against `model`.
    ///
    /// # Errors
    ///
    /// [`ClockError::UnknownMonth`] when the month has no day count, and
    /// [`ClockError::InvalidAnchor`] when any other field is out of range.
    pub fn validate(&self, model: &CalendarModel) -> ClockResult<()> {
        let days = model.days_in_month(self.month)?;
        let out_of_range = |field: &str, value: u32, range: String| {
            ClockError::InvalidAnchor(format!("{field} {value} is outside {range}"))
        };
        if !(1..=days).contains(&self.day) {
            return Err(out_of_range("day", self.day, format!("1..={days}")));
        }
        if self.hour >= model.hours_per_day() {
            return Err(out_of_range("hour", self.hour, format!("0..{}", model.hours_per_day())));
        }
        if self.minute >= model.minutes_per_hour() {
            return Err(out_of_range(
                "minute",
                self.minute,
                format!("0..{}", model.minutes_per_hour()),
            ));
        }
        if self.second >= model.seconds_per_minute() {
            return Err(out_of_range(
                "second",
                self.second,
                format!("0..{}", model.seconds_per_minute()),
            ));
        }
        Ok(())
    }
}

impl Default for AlienInstant {
    fn default() -> Self {
        Self::ANCHOR
    }
}

impl fmt::Display for AlienInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EarthInstant
// ═══════════════════════════════════════════════════════════════════════════

/// A point on the Earth (UTC) time line.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct EarthInstant {
    since_epoch: Seconds,
}

impl EarthInstant {
    /// Earth epoch zero: 1970-01-01T00:00:00 UTC.
    pub const UNIX_EPOCH: Self = Self::from_unix_seconds(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from raw seconds since the Unix epoch.
    #[inline]
    pub const fn from_unix_seconds(seconds: f64) -> Self {
        Self {
            since_epoch: Seconds::new(seconds),
        }
    }

    /// Create from a [`Seconds`] quantity measured from the Unix epoch.
    #[inline]
    pub const fn from_seconds(since_epoch: Seconds) -> Self {
        Self { since_epoch }
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let whole = datetime.timestamp() as f64;
        let fraction = datetime.timestamp_subsec_nanos() as f64 / 1e9;
        Self::from_unix_seconds(whole + fraction)
    }

    /// Build an instant from Gregorian components interpreted in UTC.
    ///
    /// # Errors
    ///
    /// [`ClockError::InvalidDate`] when the components do not name a real
    /// date-time (month 13, February 30, hour 24, a negative field, ...).
    ///
    /// ```
    /// use alienclock::EarthInstant;
    ///
    /// let leap_day = EarthInstant::from_components(2024, 2, 29, 0, 0, 0).unwrap();
    /// assert_eq!(leap_day.unix_seconds(), 1_709_164_800.0);
    /// assert!(EarthInstant::from_components(2023, 2, 29, 0, 0, 0).is_err());
    /// ```
    pub fn from_components(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> ClockResult<Self> {
        let invalid =
            || ClockError::InvalidDate(format!("{year}-{month}-{day} {hour}:{minute}:{second}"));
        let narrow = |value: i64| u32::try_from(value).map_err(|_| invalid());
        let year_i32 = i32::try_from(year).map_err(|_| invalid())?;
        let datetime = NaiveDate::from_ymd_opt(year_i32, narrow(month)?, narrow(day)?)
            .ok_or_else(invalid)?
            .and_hms_opt(narrow(hour)?, narrow(minute)?, narrow(second)?)
            .ok_or_else(invalid)?;
        Ok(Self::from_utc(DateTime::<Utc>::from_naive_utc_and_offset(
            datetime, Utc,
        )))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Seconds since the Unix epoch as a quantity.
    #[inline]
    pub const fn since_epoch(&self) -> Seconds {
        self.since_epoch
    }

    /// Seconds since the Unix epoch as a scalar.
    #[inline]
    pub fn unix_seconds(&self) -> f64 {
        self.since_epoch.value()
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value is not finite or falls outside chrono's
    /// representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds = self.unix_seconds();
        if !seconds.is_finite() {
            return None;
        }
        let secs = seconds.floor();
        if secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
            return None;
        }
        let nanos = (((seconds - secs) * 1e9) as u32).min(999_999_999);
        DateTime::<Utc>::from_timestamp(secs as i64, nanos)
    }
}

impl Default for EarthInstant {
    fn default() -> Self {
        Self::UNIX_EPOCH
    }
}

impl From<DateTime<Utc>> for EarthInstant {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl fmt::Display for EarthInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unix {}", self.since_epoch)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for EarthInstant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.since_epoch + rhs)
    }
}

impl Sub<Seconds> for EarthInstant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.since_epoch - rhs)
    }
}

impl Sub for EarthInstant {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.since_epoch - rhs.since_epoch
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for EarthInstant {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.unix_seconds())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for EarthInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::from_unix_seconds(v))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
