/*
 * config.rs
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

//! Reader settings. Any serde format can load them; missing fields take their defaults.

use crate::maildir::Location;
use crate::mime::DecodeMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How Subject and other header values are decoded.
    pub decode_mode: DecodeMode,
    /// Subdirectory listed when the caller does not name one.
    pub default_location: Location,
    /// Header fields carried in summaries. Empty keeps them all.
    pub summary_headers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            decode_mode: DecodeMode::Compat,
            default_location: Location::Cur,
            summary_headers: Vec::new(),
        }
    }
}

impl Config {
    /// Location to list for a request naming `location`; `Unresolved` means "no preference".
    pub fn location_or_default(&self, location: Location) -> Location {
        match location {
            Location::Unresolved => self.default_location,
            other => other,
        }
    }
}
