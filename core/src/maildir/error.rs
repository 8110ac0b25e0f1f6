/*
 * error.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Postbox, a Maildir reader.
 *
 * Postbox is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Postbox is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Postbox.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Maildir key and lookup errors.

use super::Location;
use thiserror::Error;

/// The delivery-id segment of a unique name matched neither grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDeliveryId {
    #[error("empty delivery id")]
    Empty,

    /// A legacy `<pid>[_<seq>]` part that is not a decimal numeral (or overflows u64).
    #[error("invalid numeral {0:?} in delivery id")]
    InvalidNumeral(String),

    #[error("unknown delivery id tag {tag:?} at offset {offset}")]
    UnknownTag { tag: char, offset: usize },

    /// A tag followed by no digits, or by more digits than fit in u64.
    #[error("delivery id tag {tag:?} at offset {offset} has no valid value")]
    InvalidValue { tag: char, offset: usize },
}

/// Structural violation of `<timestamp>.<delivery-id>.<host>[,k=v]*:<flag-type>,<flags>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedKey {
    #[error("expected 3 dot-separated segments, found {0}")]
    TooFewSegments(usize),

    #[error("invalid timestamp {0:?}")]
    Timestamp(String),

    #[error("malformed delivery id: {0}")]
    DeliveryId(#[from] MalformedDeliveryId),

    #[error("missing ':' before the flag section")]
    MissingInfo,

    #[error("parameter {0:?} is not a single key=value pair")]
    Parameter(String),

    #[error("invalid flag type {0:?}")]
    FlagType(String),
}

/// Failure to find a message by its raw key in `cur` or `new`.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("message {0} not found in cur or new")]
    NotFound(String),

    #[error("reading {name} from {location}: {error}")]
    Io {
        name: String,
        location: Location,
        #[source]
        error: std::io::Error,
    },
}
