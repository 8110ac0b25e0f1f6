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

//! Structured, display-ready records built from Maildir names and message bytes.

mod error;
mod listing;

pub use error::AssembleError;
pub use listing::{Listing, Rejected};

use crate::config::Config;
use crate::maildir::{resolve, Key, Location, MessageSource};
use crate::mime::{EmailAddress, Header};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::{debug, warn};

/// One line of a mailbox listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailSummary {
    pub key: Key,
    pub location: Location,
    pub subject: String,
    /// Decoded header fields, narrowed to `Config::summary_headers` when that is set.
    pub headers: Header,
}

/// A whole message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailRecord {
    pub key: Key,
    pub location: Location,
    pub subject: String,
    pub from: Vec<EmailAddress>,
    pub to: Vec<EmailAddress>,
    pub cc: Vec<EmailAddress>,
    pub date: Option<DateTime<FixedOffset>>,
    pub headers: Header,
    /// Everything after the header block, undecoded.
    pub body: String,
}

/// Builds listings and records from a [`MessageSource`]. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: Config,
}

impl Assembler {
    pub fn new(config: Config) -> Self {
        Assembler { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Keys in `location`, newest first. `Unresolved` lists the configured default location.
    pub fn listing<S: MessageSource + ?Sized>(
        &self,
        source: &S,
        location: Location,
    ) -> Result<Listing, AssembleError> {
        let location = self.config.location_or_default(location);
        let names = source
            .list(location)
            .map_err(|error| AssembleError::Listing { location, error })?;
        let listing = Listing::from_names(names, location);
        debug!(
            %location,
            keys = listing.len(),
            rejected = listing.rejected().len(),
            "listed maildir"
        );
        Ok(listing)
    }

    /// Summaries for every key in `location`, newest first.
    pub fn summaries<S: MessageSource + ?Sized>(
        &self,
        source: &S,
        location: Location,
    ) -> Result<Vec<MailSummary>, AssembleError> {
        let listing = self.listing(source, location)?;
        Ok(self.summarize(source, listing.keys()))
    }

    /// Summaries for `keys` (e.g. one page of a listing). Messages that cannot be read
    /// are logged and left out.
    pub fn summarize<S: MessageSource + ?Sized>(&self, source: &S, keys: &[Key]) -> Vec<MailSummary> {
        keys.iter()
            .filter_map(|key| match source.read(key.location, &key.raw) {
                Ok(bytes) => Some(self.summary(key.clone(), &bytes)),
                Err(error) => {
                    warn!(key = %key, location = %key.location, %error, "skipping unreadable message");
                    None
                }
            })
            .collect()
    }

    pub fn summary(&self, key: Key, message: &[u8]) -> MailSummary {
        let (header, _) = Header::parse(message);
        let mode = self.config.decode_mode;
        let subject = header.get_with("Subject", mode).unwrap_or_default();
        let header = if self.config.summary_headers.is_empty() {
            header
        } else {
            header.select(&self.config.summary_headers)
        };
        MailSummary {
            location: key.location,
            key,
            subject,
            headers: header.decode_all_with(mode),
        }
    }

    /// Pair a key with its message bytes.
    pub fn record(&self, key: Key, message: &[u8]) -> MailRecord {
        let (header, body_start) = Header::parse(message);
        let mode = self.config.decode_mode;
        let addresses = |name: &str| header.address_list_with(name, mode).unwrap_or_default();
        MailRecord {
            location: key.location,
            subject: header.get_with("Subject", mode).unwrap_or_default(),
            from: addresses("From"),
            to: addresses("To"),
            cc: addresses("Cc"),
            date: header.date(),
            headers: header.decode_all_with(mode),
            body: String::from_utf8_lossy(&message[body_start..]).into_owned(),
            key,
        }
    }

    /// Find a message by raw name alone (`cur`, then `new`) and build its record.
    pub fn lookup<S: MessageSource + ?Sized>(
        &self,
        source: &S,
        raw: &str,
    ) -> Result<MailRecord, AssembleError> {
        let key = Key::parse(raw)?;
        let (bytes, location) = resolve(source, raw)?;
        Ok(self.record(key.with_location(location), &bytes))
    }
}
