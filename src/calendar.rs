// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Alien calendar model.
//!
//! A [`CalendarModel`] describes the sizes of the alien units and how many
//! days each month holds:
//!
//! | Unit | Size |
//! |------|------|
//! | second | 1 tick |
//! | minute | 90 seconds |
//! | hour | 90 minutes |
//! | day | 36 hours |
//! | month | 38–48 days (see [`ALIEN_MONTH_DAYS`]) |
//! | year | 18 months |
//!
//! Months 4 and 5 have no day count in the stock table. Lookups for them
//! always fail with [`ClockError::UnknownMonth`]; how a conversion reacts to
//! crossing them is chosen with [`MissingMonthPolicy`].

use crate::error::{ClockError, ClockResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alien seconds in one alien minute.
pub const SECONDS_PER_MINUTE: u32 = 90;

/// Alien minutes in one alien hour.
pub const MINUTES_PER_HOUR: u32 = 90;

/// Alien hours in one alien day.
pub const HOURS_PER_DAY: u32 = 36;

/// Alien months in one alien year.
pub const MONTHS_PER_YEAR: u32 = 18;

/// Stock day counts, indexed by `month - 1`.
pub const ALIEN_MONTH_DAYS: [Option<u32>; MONTHS_PER_YEAR as usize] = [
    Some(44),
    Some(42),
    Some(48),
    None,
    None,
    Some(44),
    Some(40),
    Some(44),
    Some(42),
    Some(40),
    Some(40),
    Some(42),
    Some(44),
    Some(48),
    Some(42),
    Some(40),
    Some(44),
    Some(38),
];

// ═══════════════════════════════════════════════════════════════════════════
// MissingMonthPolicy
// ═══════════════════════════════════════════════════════════════════════════

/// What a conversion does when it reaches a month without a day count.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MissingMonthPolicy {
    /// Entering the month fails with [`ClockError::UnknownMonth`].
    Strict,
    /// The month counts as zero days. Moving forward it is occupied for a
    /// single alien minute after being entered, moving backward it is
    /// skipped.
    #[default]
    Legacy,
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarModel
// ═══════════════════════════════════════════════════════════════════════════

/// Unit sizes and month table of an alien calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarModel {
    seconds_per_minute: u32,
    minutes_per_hour: u32,
    hours_per_day: u32,
    days_per_month: Vec<Option<u32>>,
}

impl Default for CalendarModel {
    fn default() -> Self {
        Self::alien()
    }
}

impl CalendarModel {
    // ── constructors ──────────────────────────────────────────────────

    /// The stock alien calendar, months 4 and 5 included as missing entries.
    pub fn alien() -> Self {
        Self {
            seconds_per_minute: SECONDS_PER_MINUTE,
            minutes_per_hour: MINUTES_PER_HOUR,
            hours_per_day: HOURS_PER_DAY,
            days_per_month: ALIEN_MONTH_DAYS.to_vec(),
        }
    }

    /// Build a custom calendar.
    ///
    /// `days_per_month[i]` is the day count of month `i + 1`; `None` marks a
    /// month without an entry.
    ///
    /// # Errors
    ///
    /// [`ClockError::InvalidModel`] when a unit is zero-sized, the table is
    /// empty or has no entries at all, an entry is zero, or (with missing
    /// months) a day spans no more minutes than the year has months.
    pub fn new(
        seconds_per_minute: u32,
        minutes_per_hour: u32,
        hours_per_day: u32,
        days_per_month: Vec<Option<u32>>,
    ) -> ClockResult<Self> {
        let model = Self {
            seconds_per_minute,
            minutes_per_hour,
            hours_per_day,
            days_per_month,
        };
        model.validate()?;
        Ok(model)
    }

    /// Return a copy with the day count of `month` set to `days`.
    ///
    /// ```
    /// use alienclock::CalendarModel;
    ///
    /// let model = CalendarModel::alien()
    ///     .with_days_in_month(4, 40)
    ///     .and_then(|m| m.with_days_in_month(5, 40))
    ///     .unwrap();
    /// assert!(model.is_complete());
    /// assert_eq!(model.year_length(), Some(762));
    /// ```
    pub fn with_days_in_month(mut self, month: u32, days: u32) -> ClockResult<Self> {
        let slot = month
            .checked_sub(1)
            .and_then(|index| self.days_per_month.get_mut(index as usize))
            .ok_or(ClockError::UnknownMonth(month))?;
        *slot = Some(days);
        self.validate()?;
        Ok(self)
    }

    /// Check the invariants listed on [`CalendarModel::new`].
    pub fn validate(&self) -> ClockResult<()> {
        if self.seconds_per_minute == 0 || self.minutes_per_hour == 0 || self.hours_per_day == 0 {
            return Err(ClockError::InvalidModel(
                "unit sizes must be non-zero".to_string(),
            ));
        }
        if self.days_per_month.is_empty() || self.days_per_month.len() > u32::MAX as usize {
            return Err(ClockError::InvalidModel(format!(
                "a year must hold between 1 and {} months",
                u32::MAX
            )));
        }
        if let Some(index) = self.days_per_month.iter().position(|d| *d == Some(0)) {
            return Err(ClockError::InvalidModel(format!(
                "month {} has an explicit zero-day entry",
                index + 1
            )));
        }
        if self.days_per_month.iter().all(Option::is_none) {
            return Err(ClockError::InvalidModel(
                "no month has a day count".to_string(),
            ));
        }
        if !self.is_complete() && self.minutes_per_day() <= u64::from(self.months_per_year()) {
            return Err(ClockError::InvalidModel(
                "with missing months a day must span more minutes than the year has months"
                    .to_string(),
            ));
        }
        Ok(())
    }

    // ── unit sizes ────────────────────────────────────────────────────

    #[inline]
    pub const fn seconds_per_minute(&self) -> u32 {
        self.seconds_per_minute
    }

    #[inline]
    pub const fn minutes_per_hour(&self) -> u32 {
        self.minutes_per_hour
    }

    #[inline]
    pub const fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    #[inline]
    pub fn months_per_year(&self) -> u32 {
        self.days_per_month.len() as u32
    }

    /// Alien minutes in one alien day.
    #[inline]
    pub fn minutes_per_day(&self) -> u64 {
        u64::from(self.minutes_per_hour) * u64::from(self.hours_per_day)
    }

    // ── month table ───────────────────────────────────────────────────

    /// Day count of `month` (1-based).
    ///
    /// # Errors
    ///
    /// [`ClockError::UnknownMonth`] when the month is outside the year or has
    /// no entry.
    pub fn days_in_month(&self, month: u32) -> ClockResult<u32> {
        month
            .checked_sub(1)
            .and_then(|index| self.days_per_month.get(index as usize))
            .copied()
            .flatten()
            .ok_or(ClockError::UnknownMonth(month))
    }

    /// Months that have no day count, in ascending order.
    pub fn missing_months(&self) -> Vec<u32> {
        self.days_per_month
            .iter()
            .enumerate()
            .filter(|(_, days)| days.is_none())
            .map(|(index, _)| index as u32 + 1)
            .collect()
    }

    /// `true` when every month has a day count.
    pub fn is_complete(&self) -> bool {
        self.days_per_month.iter().all(Option::is_some)
    }

    /// Days in one year, or `None` while months are missing.
    pub fn year_length(&self) -> Option<u64> {
        self.days_per_month
            .iter()
            .map(|days| days.map(u64::from))
            .sum()
    }

    /// Day count used while carrying through `month` under `policy`.
    pub(crate) fn carry_capacity(&self, month: u32, policy: MissingMonthPolicy) -> ClockResult<u32> {
        match (policy, self.days_in_month(month)) {
            (_, Ok(days)) => Ok(days),
            (MissingMonthPolicy::Legacy, Err(_)) if (1..=self.months_per_year()).contains(&month) => {
                Ok(0)
            }
            (_, Err(err)) => Err(err),
        }
    }

    /// Days in one year as seen by carries under `policy`.
    pub(crate) fn carry_year_length(&self, policy: MissingMonthPolicy) -> Option<u64> {
        match policy {
            MissingMonthPolicy::Strict => self.year_length(),
            MissingMonthPolicy::Legacy => Some(
                self.days_per_month
                    .iter()
                    .map(|days| u64::from(days.unwrap_or(0)))
                    .sum(),
            ),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
