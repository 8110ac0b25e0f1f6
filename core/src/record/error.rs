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

//! Record assembly errors.

use crate::maildir::{Location, MalformedKey, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssembleError {
    /// The source could not list a subdirectory.
    #[error("listing {location}: {error}")]
    Listing {
        location: Location,
        #[source]
        error: std::io::Error,
    },

    /// A raw key passed for lookup does not parse.
    #[error(transparent)]
    Key(#[from] MalformedKey),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
