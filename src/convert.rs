// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth ↔ Alien conversion.
//!
//! An Earth instant becomes a signed tick count measured from the Unix epoch
//! (`trunc(seconds × ticks_per_second)`), and the configured anchor is
//! advanced by that many ticks:
//!
//! ```text
//! EarthInstant → seconds since epoch → ticks → anchor + ticks → AlienInstant
//! ```
//!
//! Two implementations of the advance exist. [`TimeConverter::advance`] is
//! closed-form div/mod arithmetic and is what every conversion uses.
//! [`TimeConverter::advance_stepwise`] is the minute-by-minute carry loop
//! whose results define the expected output; it is O(ticks) and kept for
//! verification only.
//!
//! Carries move forward one minute at a time: the minute, hour, day and month
//! checks each run once per minute, in that order. Borrows for negative tick
//! counts mirror them, stepping back into the previous month (and year) when
//! the day drops below 1.

use qtty::Seconds;
use tracing::{trace, warn};

use crate::calendar::MissingMonthPolicy;
use crate::config::ClockConfig;
use crate::error::{ClockError, ClockResult};
use crate::instant::{AlienInstant, EarthInstant};

/// Stateless converter over an immutable [`ClockConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimeConverter {
    config: ClockConfig,
}

impl Default for TimeConverter {
    /// Converter over [`ClockConfig::default`], which is always valid.
    fn default() -> Self {
        let config = ClockConfig::default();
        report_missing_months(&config);
        Self { config }
    }
}

impl TimeConverter {
    /// Validate `config` and build a converter over it.
    ///
    /// A calendar with missing months under [`MissingMonthPolicy::Legacy`]
    /// is accepted but reported with a `warn!` event.
    pub fn new(config: ClockConfig) -> ClockResult<Self> {
        config.validate()?;
        report_missing_months(&config);
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    // ── Earth → Alien ─────────────────────────────────────────────────

    /// Ticks elapsed between the Unix epoch and `earth`, truncated toward zero.
    ///
    /// # Errors
    ///
    /// [`ClockError::OutOfRange`] when the count does not fit an `i64`.
    pub fn ticks_since_epoch(&self, earth: EarthInstant) -> ClockResult<i64> {
        let seconds = (earth - EarthInstant::UNIX_EPOCH).value();
        let ticks = (seconds * f64::from(self.config.ticks_per_second)).trunc();
        if !ticks.is_finite() || ticks < i64::MIN as f64 || ticks >= i64::MAX as f64 {
            return Err(ClockError::OutOfRange);
        }
        Ok(ticks as i64)
    }

    /// Convert an Earth instant to the alien calendar.
    ///
    /// ```
    /// use alienclock::{AlienInstant, EarthInstant, TimeConverter};
    ///
    /// let converter = TimeConverter::default();
    /// let alien = converter.to_alien(EarthInstant::UNIX_EPOCH).unwrap();
    /// assert_eq!(alien, AlienInstant::ANCHOR);
    /// ```
    pub fn to_alien(&self, earth: EarthInstant) -> ClockResult<AlienInstant> {
        let ticks = self.ticks_since_epoch(earth)?;
        let alien = self.advance(self.config.anchor, ticks)?;
        trace!(ticks, %alien, "converted earth instant");
        Ok(alien)
    }

    // ── Alien → Earth ─────────────────────────────────────────────────

    /// Convert an alien instant back to Earth time.
    ///
    /// Only the `second` field is read: the result is the Unix epoch plus
    /// `second / ticks_per_second` seconds. Every other field is ignored, so
    /// `to_earth(to_alien(e))` does not give back `e`.
    pub fn to_earth(&self, alien: &AlienInstant) -> EarthInstant {
        let seconds = f64::from(alien.second) / f64::from(self.config.ticks_per_second);
        EarthInstant::UNIX_EPOCH + Seconds::new(seconds)
    }

    // ── Advancing ─────────────────────────────────────────────────────

    /// Move `from` by `ticks` alien seconds (backwards when negative).
    ///
    /// # Errors
    ///
    /// - [`ClockError::UnknownMonth`] / [`ClockError::InvalidAnchor`] when
    ///   `from` is not a valid instant of the calendar.
    /// - [`ClockError::UnknownMonth`] under [`MissingMonthPolicy::Strict`]
    ///   when the move enters a month without a day count.
    /// - [`ClockError::OutOfRange`] when the year overflows an `i64`.
    pub fn advance(&self, from: AlienInstant, ticks: i64) -> ClockResult<AlienInstant> {
        let model = &self.config.model;
        from.validate(model)?;

        let seconds_per_minute = i128::from(model.seconds_per_minute());
        let minutes_per_hour = i128::from(model.minutes_per_hour());
        let hours_per_day = i128::from(model.hours_per_day());

        let total_seconds = i128::from(from.second) + i128::from(ticks);
        let second = total_seconds.rem_euclid(seconds_per_minute);
        let total_minutes = i128::from(from.minute) + total_seconds.div_euclid(seconds_per_minute);
        let minute = total_minutes.rem_euclid(minutes_per_hour);
        let total_hours = i128::from(from.hour) + total_minutes.div_euclid(minutes_per_hour);
        let hour = total_hours.rem_euclid(hours_per_day);
        let days = total_hours.div_euclid(hours_per_day);

        let position = if days >= 0 {
            self.walk_forward(&from, days, hour * minutes_per_hour + minute)?
        } else {
            self.walk_backward(&from, days)?
        };

        Ok(AlienInstant {
            year: i64::try_from(position.year).map_err(|_| ClockError::OutOfRange)?,
            month: position.month,
            day: position.day,
            hour: hour as u32,
            minute: minute as u32,
            second: second as u32,
        })
    }

    /// Minute-by-minute reference for [`TimeConverter::advance`].
    ///
    /// Runs one loop iteration per alien minute crossed, so it is only
    /// usable for small tick counts. Both functions return identical results
    /// for every input.
    pub fn advance_stepwise(&self, from: AlienInstant, ticks: i64) -> ClockResult<AlienInstant> {
        let model = &self.config.model;
        let policy = self.config.missing_months;
        from.validate(model)?;

        let seconds_per_minute = i64::from(model.seconds_per_minute());
        let minutes_per_hour = i64::from(model.minutes_per_hour());
        let hours_per_day = i64::from(model.hours_per_day());
        let months = model.months_per_year();

        let mut year = from.year;
        let mut month = from.month;
        let mut day = i64::from(from.day);
        let mut hour = i64::from(from.hour);
        let mut minute = i64::from(from.minute);
        let mut second = i64::from(from.second)
            .checked_add(ticks)
            .ok_or(ClockError::OutOfRange)?;

        while second >= seconds_per_minute {
            second -= seconds_per_minute;
            minute += 1;

            if minute >= minutes_per_hour {
                minute -= minutes_per_hour;
                hour += 1;
            }

            if hour >= hours_per_day {
                hour -= hours_per_day;
                day += 1;
            }

            let capacity = i64::from(model.carry_capacity(month, policy)?);
            if day > capacity {
                day -= capacity;
                month += 1;
            }

            if month > months {
                month = 1;
                year += 1;
            }

            model.carry_capacity(month, policy)?;
        }

        while second < 0 {
            second += seconds_per_minute;
            minute -= 1;

            if minute < 0 {
                minute += minutes_per_hour;
                hour -= 1;
            }

            if hour < 0 {
                hour += hours_per_day;
                day -= 1;
            }

            while day < 1 {
                month -= 1;
                if month < 1 {
                    month = months;
                    year -= 1;
                }
                day += i64::from(model.carry_capacity(month, policy)?);
            }
        }

        Ok(AlienInstant {
            year,
            month,
            day: day as u32,
            hour: hour as u32,
            minute: minute as u32,
            second: second as u32,
        })
    }

    // ── day walking ───────────────────────────────────────────────────

    /// Move `days` (>= 0) days forward from `from`'s date.
    ///
    /// `minutes_into_day` is the minute of the final day reached, which
    /// decides whether a legacy zero-day month is still occupied.
    fn walk_forward(
        &self,
        from: &AlienInstant,
        days: i128,
        minutes_into_day: i128,
    ) -> ClockResult<DatePosition> {
        let model = &self.config.model;
        let policy = self.config.missing_months;
        let months = model.months_per_year();
        let year_length = model
            .carry_year_length(policy)
            .map(i128::from)
            .filter(|length| *length > 0);

        let mut year = i128::from(from.year);
        let mut month = from.month;
        let mut offset = i128::from(from.day) - 1 + days;

        loop {
            if month == 1 {
                if let Some(length) = year_length {
                    year += offset / length;
                    offset %= length;
                }
            }
            let capacity = i128::from(model.carry_capacity(month, policy)?);
            if offset < capacity {
                break;
            }
            offset -= capacity;
            (year, month) = next_month(year, month, months);
        }

        // A legacy zero-day month entered by the last day carry keeps the
        // date for one minute each before the next month takes over.
        if days > 0 && offset == 0 && policy == MissingMonthPolicy::Legacy {
            let mut run = 0i128;
            let (mut y, mut m) = (year, month);
            loop {
                let (prev_year, prev_month) = previous_month(y, m, months);
                if model.carry_capacity(prev_month, policy)? != 0 {
                    break;
                }
                (y, m) = (prev_year, prev_month);
                run += 1;
            }
            if minutes_into_day < run {
                for _ in 0..(run - minutes_into_day) {
                    (year, month) = previous_month(year, month, months);
                }
            }
        }

        Ok(DatePosition {
            year,
            month,
            day: (offset + 1) as u32,
        })
    }

    /// Move `days` (< 0) days backward from `from`'s date.
    fn walk_backward(&self, from: &AlienInstant, days: i128) -> ClockResult<DatePosition> {
        let model = &self.config.model;
        let policy = self.config.missing_months;
        let months = model.months_per_year();
        let year_length = model
            .carry_year_length(policy)
            .map(i128::from)
            .filter(|length| *length > 0);

        let mut year = i128::from(from.year);
        let mut month = from.month;
        let mut offset = i128::from(from.day) - 1 + days;

        while offset < 0 {
            // Whole years are skipped only while at least one day is still
            // owed, so the walk always stops inside a month with days.
            if month == 1 {
                if let Some(length) = year_length {
                    let whole = (-offset - 1) / length;
                    year -= whole;
                    offset += whole * length;
                }
            }
            (year, month) = previous_month(year, month, months);
            offset += i128::from(model.carry_capacity(month, policy)?);
        }

        Ok(DatePosition {
            year,
            month,
            day: (offset + 1) as u32,
        })
    }
}

fn report_missing_months(config: &ClockConfig) {
    let missing = config.model.missing_months();
    if !missing.is_empty() && config.missing_months == MissingMonthPolicy::Legacy {
        warn!(
            ?missing,
            "calendar has months without a day count; carries treat them as zero days"
        );
    }
}

/// Year, month and day reached by a day walk.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct DatePosition {
    year: i128,
    month: u32,
    day: u32,
}

#[inline]
fn next_month(year: i128, month: u32, months: u32) -> (i128, u32) {
    if month >= months {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[inline]
fn previous_month(year: i128, month: u32, months: u32) -> (i128, u32) {
    if month <= 1 {
        (year - 1, months)
    } else {
        (year, month - 1)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarModel;
    use std::io;
    use std::sync::{Arc, Mutex};

    const TICKS_PER_DAY: i64 = 90 * 90 * 36;

    fn legacy() -> TimeConverter {
        TimeConverter::new(ClockConfig::default()).unwrap()
    }

    fn strict() -> TimeConverter {
        TimeConverter::new(ClockConfig::default().with_missing_months(MissingMonthPolicy::Strict))
            .unwrap()
    }

    fn complete() -> TimeConverter {
        let model = CalendarModel::alien()
            .with_days_in_month(4, 40)
            .and_then(|m| m.with_days_in_month(5, 42))
            .unwrap();
        TimeConverter::new(
            ClockConfig::default()
                .with_model(model)
                .with_missing_months(MissingMonthPolicy::Strict),
        )
        .unwrap()
    }

    fn assert_agrees(converter: &TimeConverter, from: AlienInstant, ticks: i64) {
        assert_eq!(
            converter.advance(from, ticks),
            converter.advance_stepwise(from, ticks),
            "from {from} by {ticks} ticks"
        );
    }

    #[test]
    fn test_epoch_maps_to_anchor() {
        assert_eq!(legacy().to_alien(EarthInstant::UNIX_EPOCH), Ok(AlienInstant::ANCHOR));
    }

    #[test]
    fn test_ticks_truncate_toward_zero() {
        let converter = legacy();
        let ticks = |s: f64| converter.ticks_since_epoch(EarthInstant::from_unix_seconds(s));
        assert_eq!(ticks(0.4), Ok(0));
        assert_eq!(ticks(0.5), Ok(1));
        assert_eq!(ticks(1.0), Ok(2));
        assert_eq!(ticks(-0.4), Ok(0));
        assert_eq!(ticks(-0.75), Ok(-1));
        assert_eq!(ticks(f64::INFINITY), Err(ClockError::OutOfRange));
        assert_eq!(ticks(1e300), Err(ClockError::OutOfRange));
    }

    #[test]
    fn test_small_offsets_from_epoch() {
        let converter = legacy();
        let alien = |s: f64| converter.to_alien(EarthInstant::from_unix_seconds(s)).unwrap();
        assert_eq!(alien(0.5), AlienInstant::new(2804, 18, 31, 2, 2, 89));
        assert_eq!(alien(1.0), AlienInstant::new(2804, 18, 31, 2, 3, 0));
        assert_eq!(alien(-1.0), AlienInstant::new(2804, 18, 31, 2, 2, 86));
        assert_eq!(alien(-45.0), AlienInstant::new(2804, 18, 31, 2, 1, 88));
    }

    #[test]
    fn test_year_rollover_from_anchor() {
        // Eight days on from day 31 of month 18 (38 days) is the first of the next year.
        let converter = legacy();
        let next = converter
            .advance(AlienInstant::ANCHOR, 8 * TICKS_PER_DAY)
            .unwrap();
        assert_eq!(next, AlienInstant::new(2805, 1, 1, 2, 2, 88));
    }

    #[test]
    fn test_whole_years_skip() {
        let converter = legacy();
        let year = 682 * TICKS_PER_DAY;
        assert_eq!(
            converter.advance(AlienInstant::ANCHOR, year),
            Ok(AlienInstant::new(2805, 18, 31, 2, 2, 88))
        );
        assert_eq!(
            converter.advance(AlienInstant::ANCHOR, -year),
            Ok(AlienInstant::new(2803, 18, 31, 2, 2, 88))
        );
        assert_eq!(
            converter.advance(AlienInstant::ANCHOR, 1_000 * year),
            Ok(AlienInstant::new(3804, 18, 31, 2, 2, 88))
        );
    }

    #[test]
    fn test_legacy_missing_months_are_held_for_one_minute() {
        let converter = legacy();
        let last_minute_of_month_3 = AlienInstant::new(1, 3, 48, 35, 89, 0);
        let at = |ticks| converter.advance(last_minute_of_month_3, ticks).unwrap();
        assert_eq!(at(89), AlienInstant::new(1, 3, 48, 35, 89, 89));
        assert_eq!(at(90), AlienInstant::new(1, 4, 1, 0, 0, 0));
        assert_eq!(at(180), AlienInstant::new(1, 5, 1, 0, 1, 0));
        assert_eq!(at(270), AlienInstant::new(1, 6, 1, 0, 2, 0));
        assert_eq!(at(90 + TICKS_PER_DAY), AlienInstant::new(1, 6, 2, 0, 0, 0));
    }

    #[test]
    fn test_legacy_missing_months_are_skipped_backward() {
        let converter = legacy();
        let first_minute_of_month_6 = AlienInstant::new(1, 6, 1, 0, 0, 0);
        assert_eq!(
            converter.advance(first_minute_of_month_6, -1),
            Ok(AlienInstant::new(1, 3, 48, 35, 89, 89))
        );
    }

    #[test]
    fn test_strict_policy_rejects_missing_month() {
        let converter = strict();
        let last_minute_of_month_3 = AlienInstant::new(1, 3, 48, 35, 89, 0);
        assert_eq!(
            converter.advance(last_minute_of_month_3, 90),
            Err(ClockError::UnknownMonth(4))
        );
        assert_eq!(
            converter.advance_stepwise(last_minute_of_month_3, 90),
            Err(ClockError::UnknownMonth(4))
        );
        assert_eq!(
            converter.advance(AlienInstant::new(1, 6, 1, 0, 0, 0), -1),
            Err(ClockError::UnknownMonth(5))
        );
        // Staying clear of months 4 and 5 is fine.
        assert!(converter.advance(AlienInstant::ANCHOR, 3 * TICKS_PER_DAY).is_ok());
    }

    #[test]
    fn test_invalid_start_is_rejected() {
        let converter = legacy();
        assert_eq!(
            converter.advance(AlienInstant::new(1, 4, 1, 0, 0, 0), 1),
            Err(ClockError::UnknownMonth(4))
        );
        assert!(matches!(
            converter.advance(AlienInstant::new(1, 1, 1, 0, 0, 95), 1),
            Err(ClockError::InvalidAnchor(_))
        ));
    }

    #[test]
    fn test_closed_form_matches_stepwise_around_missing_months() {
        let starts = [
            AlienInstant::new(1, 3, 48, 35, 85, 3),
            AlienInstant::new(1, 3, 47, 35, 89, 89),
            AlienInstant::new(1, 6, 1, 0, 3, 10),
        ];
        for converter in [legacy(), strict()] {
            for from in starts {
                for ticks in (-90 * 400..=90 * 400).step_by(37) {
                    assert_agrees(&converter, from, ticks);
                }
            }
        }
    }

    #[test]
    fn test_closed_form_matches_stepwise_around_year_end() {
        let starts = [
            AlienInstant::new(2804, 18, 38, 35, 89, 80),
            AlienInstant::new(2805, 1, 1, 0, 0, 0),
            AlienInstant::ANCHOR,
        ];
        for converter in [legacy(), strict(), complete()] {
            for from in starts {
                for ticks in (-9 * TICKS_PER_DAY..=9 * TICKS_PER_DAY).step_by(9_973) {
                    assert_agrees(&converter, from, ticks);
                }
            }
        }
    }

    #[test]
    fn test_closed_form_matches_stepwise_across_months() {
        let converter = complete();
        let from = AlienInstant::new(10, 2, 40, 30, 45, 12);
        for ticks in (-40 * TICKS_PER_DAY..=40 * TICKS_PER_DAY).step_by(97_531) {
            assert_agrees(&converter, from, ticks);
        }
    }

    #[test]
    fn test_closed_form_matches_stepwise_custom_models() {
        let tables = [
            vec![None, Some(3), Some(2)],
            vec![Some(2), Some(3), None],
            vec![Some(1), None, None, None, Some(2)],
        ];
        for table in tables {
            let model = CalendarModel::new(2, 3, 2, table.clone()).unwrap();
            let first = model.days_in_month(1).map_or(2, |_| 1);
            for policy in [MissingMonthPolicy::Legacy, MissingMonthPolicy::Strict] {
                let converter = TimeConverter::new(
                    ClockConfig::default()
                        .with_model(model.clone())
                        .with_anchor(AlienInstant::new(5, first, 1, 0, 0, 0))
                        .with_missing_months(policy),
                )
                .unwrap();
                for (index, days) in table.iter().enumerate() {
                    let Some(days) = *days else { continue };
                    let month = index as u32 + 1;
                    for from in [
                        AlienInstant::new(5, month, 1, 0, 0, 0),
                        AlienInstant::new(5, month, days, 1, 2, 1),
                    ] {
                        for ticks in -300..=300 {
                            assert_agrees(&converter, from, ticks);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_legacy_backward_skips_missing_first_month() {
        let model = CalendarModel::new(2, 3, 2, vec![None, Some(3), Some(2)]).unwrap();
        let converter = TimeConverter::new(
            ClockConfig::default()
                .with_model(model.clone())
                .with_anchor(AlienInstant::new(5, 2, 1, 0, 0, 0)),
        )
        .unwrap();
        let from = AlienInstant::new(5, 2, 1, 0, 0, 0);
        // Twelve ticks per day, so one legacy year of five days is sixty ticks.
        let earlier = converter.advance(from, -60).unwrap();
        assert_eq!(earlier, AlienInstant::new(4, 2, 1, 0, 0, 0));
        assert_eq!(earlier.validate(&model), Ok(()));
        assert_eq!(
            converter.advance(from, -1),
            Ok(AlienInstant::new(4, 3, 2, 1, 2, 1))
        );
        assert_eq!(
            converter.advance(from, -6_000),
            Ok(AlienInstant::new(-95, 2, 1, 0, 0, 0))
        );
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn warnings_while(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_default_converter_warns_about_missing_months() {
        let logged = warnings_while(|| {
            let _ = TimeConverter::default();
        });
        assert!(logged.contains("missing=[4, 5]"), "{logged}");

        let logged = warnings_while(|| {
            let _ = crate::clock::AlienClock::default();
        });
        assert!(logged.contains("missing=[4, 5]"), "{logged}");

        let logged = warnings_while(|| {
            let _ = strict();
            let _ = complete();
        });
        assert!(logged.is_empty(), "{logged}");
    }

    #[test]
    fn test_to_earth_reads_only_seconds() {
        let converter = legacy();
        assert_eq!(
            converter.to_earth(&AlienInstant::ANCHOR),
            EarthInstant::from_unix_seconds(44.0)
        );
        assert_eq!(
            converter.to_earth(&AlienInstant::new(9999, 1, 1, 0, 0, 3)),
            EarthInstant::from_unix_seconds(1.5)
        );
    }

    #[test]
    fn test_roundtrip_is_lossy() {
        let converter = legacy();
        let earth = EarthInstant::from_unix_seconds(1_710_505_845.0);
        let alien = converter.to_alien(earth).unwrap();
        let back = converter.to_earth(&alien);
        assert_ne!(back, earth);
        assert!(back.unix_seconds() < 45.0);
    }

    #[test]
    fn test_results_stay_normalized() {
        let converter = complete();
        let model = &converter.config().model;
        for step in 0..2_000i64 {
            let earth = EarthInstant::from_unix_seconds((step * 987_654 - 900_000_000) as f64);
            let alien = converter.to_alien(earth).unwrap();
            assert!(alien.second < 90 && alien.minute < 90 && alien.hour < 36);
            assert!((1..=18).contains(&alien.month));
            assert!(alien.day >= 1 && alien.day <= model.days_in_month(alien.month).unwrap());
        }
    }
}
