// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building a calendar, converting, formatting or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The assembled Earth components do not form a valid Gregorian date-time.
    #[error("{0} is not a valid calendar date-time")]
    InvalidDate(String),

    /// The alien month has no entry in the day-count table.
    #[error("alien month {0} has no day count")]
    UnknownMonth(u32),

    /// A raw component could not be read as an integer.
    #[error("cannot parse {field} component {value:?} as an integer")]
    Parse { field: &'static str, value: String },

    /// The instant cannot be represented as a tick count or a UTC date-time.
    #[error("instant is outside the representable range")]
    OutOfRange,

    /// The calendar model itself is inconsistent.
    #[error("invalid calendar model: {0}")]
    InvalidModel(String),

    /// The anchor does not lie inside the calendar it is anchored to.
    #[error("invalid anchor: {0}")]
    InvalidAnchor(String),
}

/// Result alias used throughout the crate.
pub type ClockResult<T> = Result<T, ClockError>;
