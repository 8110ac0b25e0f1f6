/*
 * listing.rs
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

//! One subdirectory's keys, newest first, with the names that failed to parse.

use crate::maildir::{sort_keys, Key, Location, MalformedKey};
use tracing::warn;

/// A file name that is not a valid unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub name: String,
    pub error: MalformedKey,
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
    keys: Vec<Key>,
    rejected: Vec<Rejected>,
}

impl Listing {
    /// Parse every name found in `location`. Dot-files are skipped; malformed names are
    /// logged and kept aside, never fatal.
    pub fn from_names<I, S>(names: I, location: Location) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys = Vec::new();
        let mut rejected = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.starts_with('.') {
                continue;
            }
            match Key::parse(name) {
                Ok(key) => keys.push(key.with_location(location)),
                Err(error) => {
                    warn!(name, %location, %error, "skipping malformed maildir name");
                    rejected.push(Rejected {
                        name: name.to_string(),
                        error,
                    });
                }
            }
        }
        sort_keys(&mut keys);
        Listing { keys, rejected }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys `offset..offset + limit`, clamped to the listing. `None` runs to the end.
    pub fn page(&self, offset: usize, limit: Option<usize>) -> &[Key] {
        let start = offset.min(self.keys.len());
        let end = match limit {
            Some(limit) => start.saturating_add(limit).min(self.keys.len()),
            None => self.keys.len(),
        };
        &self.keys[start..end]
    }

    pub fn into_keys(self) -> Vec<Key> {
        self.keys
    }
}
