// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Boundary between the converter and whatever displays its output.
//!
//! [`AlienClock`] answers the two requests a display makes:
//!
//! - [`AlienClock::query`]: render an Earth instant on both calendars (used
//!   at startup and on reset with Earth epoch zero).
//! - [`AlienClock::set_earth_date_time`]: render six raw Earth components.
//!
//! Both hand back a [`Readout`] instead of calling into the display. A
//! request that cannot be honoured returns `None` and the display keeps what
//! it shows; the `try_*` variants return the underlying [`ClockError`].

use tracing::debug;

use crate::config::ClockConfig;
use crate::convert::TimeConverter;
use crate::error::ClockResult;
use crate::format::{format_alien, format_earth, parse_earth_components, parse_earth_line};
use crate::instant::EarthInstant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two strings a display shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Readout {
    /// Alien date-time, `YY-MM-DD HH:MM:SS`.
    pub alien: String,
    /// Earth date-time, `YYYY-MM-DD HH:MM:SS`.
    pub earth: String,
}

/// Converter plus formatting, exposed as display requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlienClock {
    converter: TimeConverter,
}

impl AlienClock {
    /// Build a clock over a validated configuration.
    pub fn new(config: ClockConfig) -> ClockResult<Self> {
        Ok(Self {
            converter: TimeConverter::new(config)?,
        })
    }

    #[inline]
    pub fn converter(&self) -> &TimeConverter {
        &self.converter
    }

    #[inline]
    pub fn config(&self) -> &ClockConfig {
        self.converter.config()
    }

    // ── strict requests ───────────────────────────────────────────────

    /// Render `earth` on both calendars.
    pub fn try_query(&self, earth: EarthInstant) -> ClockResult<Readout> {
        let alien = self.converter.to_alien(earth)?;
        Ok(Readout {
            alien: format_alien(&alien, self.config().year_style),
            earth: format_earth(&earth)?,
        })
    }

    /// Assemble six raw Earth components and render them on both calendars.
    pub fn try_set_earth_date_time(
        &self,
        year: &str,
        month: &str,
        day: &str,
        hour: &str,
        minute: &str,
        second: &str,
    ) -> ClockResult<Readout> {
        let earth = parse_earth_components(
            [year, month, day, hour, minute, second],
            self.config().input_mode,
        )?;
        self.try_query(earth)
    }

    /// Same as [`AlienClock::try_set_earth_date_time`] for a single
    /// whitespace-separated `year month day hour minute second` line.
    pub fn try_set_earth_line(&self, line: &str) -> ClockResult<Readout> {
        let earth = parse_earth_line(line, self.config().input_mode)?;
        self.try_query(earth)
    }

    // ── display requests ──────────────────────────────────────────────

    /// Render `earth`, or `None` when it cannot be converted.
    pub fn query(&self, earth: EarthInstant) -> Option<Readout> {
        self.try_query(earth)
            .map_err(|err| debug!(%err, %earth, "query declined"))
            .ok()
    }

    /// Render Earth epoch zero.
    ///
    /// ```
    /// use alienclock::AlienClock;
    ///
    /// let readout = AlienClock::default().reset().unwrap();
    /// assert_eq!(readout.alien, "04-18-31 02:02:88");
    /// assert_eq!(readout.earth, "1970-01-01 00:00:00");
    /// ```
    pub fn reset(&self) -> Option<Readout> {
        self.query(EarthInstant::UNIX_EPOCH)
    }

    /// Render six raw Earth components, or `None` when they do not parse
    /// or do not form a valid date-time.
    pub fn set_earth_date_time(
        &self,
        year: &str,
        month: &str,
        day: &str,
        hour: &str,
        minute: &str,
        second: &str,
    ) -> Option<Readout> {
        self.try_set_earth_date_time(year, month, day, hour, minute, second)
            .map_err(|err| debug!(%err, "earth date-time update declined"))
            .ok()
    }

    /// Line-based form of [`AlienClock::set_earth_date_time`].
    pub fn set_earth_line(&self, line: &str) -> Option<Readout> {
        self.try_set_earth_line(line)
            .map_err(|err| debug!(%err, line, "earth date-time update declined"))
            .ok()
    }
}
