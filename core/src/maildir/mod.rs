/*
 * mod.rs
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

//! Maildir unique names (cur, new, tmp).
//!
//! Nothing here touches the file system. Listings and message bytes come from a
//! [`MessageSource`] implemented by the caller.

mod delivery_id;
mod error;
mod key;
mod ordering;

pub use delivery_id::{DeliveryId, Grammar};
pub use error::{MalformedDeliveryId, MalformedKey, ResolveError};
pub use key::{FlagType, Key};
pub use ordering::{listing_order, sort_delivery_ids, sort_keys};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use tracing::debug;

/// Maildir subdirectory a key was found in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Cur,
    New,
    Tmp,
    /// Parsed from a bare name; not yet looked up.
    #[default]
    Unresolved,
}

impl Location {
    /// Subdirectory by name. Anything other than `new` or `tmp` is `cur`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "new" => Location::New,
            "tmp" => Location::Tmp,
            _ => Location::Cur,
        }
    }

    /// Directory name; empty for [`Location::Unresolved`].
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Cur => "cur",
            Location::New => "new",
            Location::Tmp => "tmp",
            Location::Unresolved => "",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unresolved => f.write_str("(unresolved)"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Supplies directory listings and message bytes for one Maildir.
/// Implementations own path resolution and all I/O.
pub trait MessageSource {
    /// File names in `location` (never called with [`Location::Unresolved`]).
    fn list(&self, location: Location) -> io::Result<Vec<String>>;

    /// Bytes of the file `name` in `location`. A missing file is `ErrorKind::NotFound`.
    fn read(&self, location: Location, name: &str) -> io::Result<Vec<u8>>;
}

/// Find a message by raw key alone: `cur` first, then `new`.
/// Returns the bytes and where they were found; the caller decides whether to keep the location.
pub fn resolve<S: MessageSource + ?Sized>(
    source: &S,
    raw: &str,
) -> Result<(Vec<u8>, Location), ResolveError> {
    for location in [Location::Cur, Location::New] {
        match source.read(location, raw) {
            Ok(bytes) => {
                debug!(key = raw, %location, "resolved message");
                return Ok((bytes, location));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(error) => {
                return Err(ResolveError::Io {
                    name: raw.to_string(),
                    location,
                    error,
                })
            }
        }
    }
    Err(ResolveError::NotFound(raw.to_string()))
}

/// Unsigned decimal numeral: ASCII digits only, no sign, fits in u64.
pub(crate) fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<(Location, String), Vec<u8>>);

    impl MessageSource for MapSource {
        fn list(&self, location: Location) -> io::Result<Vec<String>> {
            Ok(self
                .0
                .keys()
                .filter(|(l, _)| *l == location)
                .map(|(_, n)| n.clone())
                .collect())
        }

        fn read(&self, location: Location, name: &str) -> io::Result<Vec<u8>> {
            if name == "broken" {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.0
                .get(&(location, name.to_string()))
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn source() -> MapSource {
        let mut m = HashMap::new();
        m.insert((Location::Cur, "a".to_string()), b"in cur".to_vec());
        m.insert((Location::New, "a".to_string()), b"in new".to_vec());
        m.insert((Location::New, "b".to_string()), b"only new".to_vec());
        m.insert((Location::Tmp, "c".to_string()), b"only tmp".to_vec());
        MapSource(m)
    }

    #[test]
    fn resolve_prefers_cur() {
        let (bytes, loc) = resolve(&source(), "a").unwrap();
        assert_eq!(bytes, b"in cur");
        assert_eq!(loc, Location::Cur);
    }

    #[test]
    fn resolve_falls_back_to_new() {
        let (bytes, loc) = resolve(&source(), "b").unwrap();
        assert_eq!(bytes, b"only new");
        assert_eq!(loc, Location::New);
    }

    #[test]
    fn resolve_ignores_tmp() {
        assert!(matches!(resolve(&source(), "c"), Err(ResolveError::NotFound(_))));
    }

    #[test]
    fn resolve_surfaces_io_errors() {
        match resolve(&source(), "broken") {
            Err(ResolveError::Io { location, .. }) => assert_eq!(location, Location::Cur),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn location_names() {
        assert_eq!(Location::from_name("new"), Location::New);
        assert_eq!(Location::from_name("tmp"), Location::Tmp);
        assert_eq!(Location::from_name("cur"), Location::Cur);
        assert_eq!(Location::from_name("bogus"), Location::Cur);
        assert_eq!(Location::Unresolved.as_str(), "");
        assert_eq!(Location::New.to_string(), "new");
    }

    #[test]
    fn decimal_numerals() {
        assert_eq!(parse_decimal("0042"), Some(42));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal("+1"), None);
        assert_eq!(parse_decimal("18446744073709551616"), None);
    }
}
