// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Immutable clock configuration.
//!
//! A [`ClockConfig`] is built once, validated by [`TimeConverter::new`], and
//! then shared by reference; nothing in the crate mutates it afterwards.
//!
//! [`TimeConverter::new`]: crate::TimeConverter::new

use crate::calendar::{CalendarModel, MissingMonthPolicy};
use crate::error::{ClockError, ClockResult};
use crate::format::{InputMode, YearStyle};
use crate::instant::AlienInstant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alien ticks per Earth second in the stock configuration.
pub const TICKS_PER_EARTH_SECOND: u32 = 2;

/// Everything a conversion needs besides its input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Unit sizes and month table.
    pub model: CalendarModel,
    /// Alien instant matching Earth epoch zero.
    pub anchor: AlienInstant,
    /// Alien ticks per Earth second.
    pub ticks_per_second: u32,
    /// Behaviour when a carry reaches a month without a day count.
    pub missing_months: MissingMonthPolicy,
    /// Rendering of the alien year.
    pub year_style: YearStyle,
    /// Treatment of non-numeric Earth components.
    pub input_mode: InputMode,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            model: CalendarModel::alien(),
            anchor: AlienInstant::ANCHOR,
            ticks_per_second: TICKS_PER_EARTH_SECOND,
            missing_months: MissingMonthPolicy::default(),
            year_style: YearStyle::default(),
            input_mode: InputMode::default(),
        }
    }
}

impl ClockConfig {
    pub fn with_model(mut self, model: CalendarModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_anchor(mut self, anchor: AlienInstant) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_ticks_per_second(mut self, ticks_per_second: u32) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    pub fn with_missing_months(mut self, policy: MissingMonthPolicy) -> Self {
        self.missing_months = policy;
        self
    }

    pub fn with_year_style(mut self, style: YearStyle) -> Self {
        self.year_style = style;
        self
    }

    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Check the model, the tick rate, and that the anchor lies in the model.
    pub fn validate(&self) -> ClockResult<()> {
        self.model.validate()?;
        if self.ticks_per_second == 0 {
            return Err(ClockError::InvalidModel(
                "ticks per second must be non-zero".to_string(),
            ));
        }
        self.anchor.validate(&self.model).map_err(|err| match err {
            ClockError::UnknownMonth(month) => {
                ClockError::InvalidAnchor(format!("month {month} has no day count"))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ClockConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.ticks_per_second, 2);
        assert_eq!(config.missing_months, MissingMonthPolicy::Legacy);
        assert_eq!(config.year_style, YearStyle::TwoDigit);
        assert_eq!(config.input_mode, InputMode::Lenient);
    }

    #[test]
    fn test_anchor_must_fit_model() {
        let config = ClockConfig::default().with_anchor(AlienInstant::new(1, 5, 1, 0, 0, 0));
        assert!(matches!(config.validate(), Err(ClockError::InvalidAnchor(_))));

        let config = ClockConfig::default().with_anchor(AlienInstant::new(1, 18, 39, 0, 0, 0));
        assert!(matches!(config.validate(), Err(ClockError::InvalidAnchor(_))));
    }

    #[test]
    fn test_zero_tick_rate_is_rejected() {
        let config = ClockConfig::default().with_ticks_per_second(0);
        assert!(matches!(config.validate(), Err(ClockError::InvalidModel(_))));
    }

    #[test]
    fn test_builders_replace_fields() {
        let config = ClockConfig::default()
            .with_year_style(YearStyle::Padded)
            .with_input_mode(InputMode::Strict)
            .with_missing_months(MissingMonthPolicy::Strict);
        assert_eq!(config.year_style, YearStyle::Padded);
        assert_eq!(config.input_mode, InputMode::Strict);
        assert_eq!(config.missing_months, MissingMonthPolicy::Strict);
        assert_eq!(config.model, CalendarModel::alien());
    }
}
