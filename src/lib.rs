// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Alien Clock
//!
//! Conversion between Earth time (UTC, counted from the Unix epoch) and the
//! alien calendar.
//!
//! # Core types
//!
//! - [`EarthInstant`]: seconds since 1970-01-01T00:00:00 UTC.
//! - [`AlienInstant`]: year, month, day, hour, minute and second on the alien calendar.
//! - [`CalendarModel`]: alien unit sizes and the month → day-count table.
//! - [`ClockConfig`]: model, anchor, tick rate and rendering options.
//! - [`TimeConverter`]: Earth → Alien and Alien → Earth conversion.
//! - [`AlienClock`]: display-facing requests returning a [`Readout`].
//!
//! # The alien calendar
//!
//! | Unit | Size |
//! |------|------|
//! | minute | 90 seconds |
//! | hour | 90 minutes |
//! | day | 36 hours |
//! | month | 38–48 days |
//! | year | 18 months |
//!
//! One Earth second is two alien seconds (ticks). Earth epoch zero is alien
//! `2804-18-31 02:02:88`.
//!
//! ```
//! use alienclock::AlienClock;
//!
//! let clock = AlienClock::default();
//! let readout = clock.set_earth_date_time("2024", "3", "15", "12", "30", "45").unwrap();
//! assert_eq!(readout.earth, "2024-03-15 12:30:45");
//! assert_eq!(readout.alien, "22-03-44 33:13:88");
//! ```

pub mod calendar;
mod clock;
mod config;
mod convert;
mod error;
mod format;
mod instant;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{CalendarModel, MissingMonthPolicy};
pub use clock::{AlienClock, Readout};
pub use config::{ClockConfig, TICKS_PER_EARTH_SECOND};
pub use convert::TimeConverter;
pub use error::{ClockError, ClockResult};
pub use format::{
    format_alien, format_earth, parse_earth_components, parse_earth_line, InputMode, YearStyle,
    EARTH_FORMAT,
};
pub use instant::{AlienInstant, EarthInstant};
