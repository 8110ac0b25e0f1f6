/*
 * header.rs
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

//! Header block of a message: canonical name -> raw (unfolded) values, in arrival order.

use super::address_parser::parse_email_address_list;
use super::date_time::parse_rfc5322_date;
use super::email_address::EmailAddress;
use crate::mime::rfc2047::{decode_header_value_with, DecodeMode};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Header {
    fields: BTreeMap<String, Vec<String>>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the header block at the start of `message`, up to the first empty line.
    /// Returns the header and the offset at which the body starts.
    pub fn parse(message: &[u8]) -> (Self, usize) {
        let mut header = Header::new();
        let mut current: Option<(String, String)> = None;
        let mut pos = 0;

        while pos < message.len() {
            let line_end = message[pos..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|i| pos + i + 1)
                .unwrap_or(message.len());
            let line = trim_trailing_crlf(&message[pos..line_end]);
            pos = line_end;
            if line.is_empty() {
                break;
            }
            if line[0] == b' ' || line[0] == b'\t' {
                match current.as_mut() {
                    Some((_, value)) => {
                        let more = bytes_to_string(line);
                        let more = more.trim();
                        if !more.is_empty() {
                            if !value.is_empty() {
                                value.push(' ');
                            }
                            value.push_str(more);
                        }
                    }
                    None => debug!("continuation line before the first header field"),
                }
                continue;
            }
            if let Some((name, value)) = current.take() {
                header.append(&name, value);
            }
            match split_header(line) {
                Some((name, value)) => {
                    current = Some((
                        bytes_to_string(name).trim_end().to_string(),
                        bytes_to_string(value).trim().to_string(),
                    ));
                }
                None => debug!(
                    line = %String::from_utf8_lossy(line),
                    "skipping header line without a colon"
                ),
            }
        }
        if let Some((name, value)) = current.take() {
            header.append(&name, value);
        }
        (header, pos)
    }

    /// Add a value under the canonical form of `name`.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.fields
            .entry(canonical_name(name))
            .or_default()
            .push(value.into());
    }

    /// All raw values of `name` (case-insensitive), in order.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields
            .get(&canonical_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First raw value of `name`.
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// First value of `name`, decoded for display.
    pub fn get(&self, name: &str) -> Option<String> {
        self.get_with(name, DecodeMode::Compat)
    }

    pub fn get_with(&self, name: &str, mode: DecodeMode) -> Option<String> {
        self.get_raw(name).map(|v| decode_header_value_with(v, mode))
    }

    /// Same header with every value decoded.
    pub fn decode_all(&self) -> Header {
        self.decode_all_with(DecodeMode::Compat)
    }

    pub fn decode_all_with(&self, mode: DecodeMode) -> Header {
        let fields = self
            .fields
            .iter()
            .map(|(name, values)| {
                let decoded = values.iter().map(|v| decode_header_value_with(v, mode)).collect();
                (name.clone(), decoded)
            })
            .collect();
        Header { fields }
    }

    /// Addresses in the first value of `name`, display names decoded, addresses untouched.
    pub fn address_list(&self, name: &str) -> Option<Vec<EmailAddress>> {
        self.address_list_with(name, DecodeMode::Compat)
    }

    pub fn address_list_with(&self, name: &str, mode: DecodeMode) -> Option<Vec<EmailAddress>> {
        let list = parse_email_address_list(self.get_raw(name)?)?;
        Some(
            list.into_iter()
                .map(|a| a.map_display_name(|n| decode_header_value_with(n, mode)))
                .collect(),
        )
    }

    /// The `Date` header.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        parse_rfc5322_date(self.get_raw("Date")?)
    }

    /// Only the named fields (case-insensitive).
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Header {
        let wanted: Vec<String> = names.iter().map(|n| canonical_name(n.as_ref())).collect();
        let fields = self
            .fields
            .iter()
            .filter(|(name, _)| wanted.contains(name))
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect();
        Header { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `content-TYPE` -> `Content-Type`.
pub fn canonical_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn trim_trailing_crlf(s: &[u8]) -> &[u8] {
    let mut end = s.len();
    if end >= 1 && s[end - 1] == b'\n' {
        end -= 1;
    }
    if end >= 1 && s[end - 1] == b'\r' {
        end -= 1;
    }
    &s[..end]
}

fn split_header(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let colon = line.iter().position(|&b| b == b':')?;
    if colon == 0 {
        return None;
    }
    Some((&line[..colon], &line[colon + 1..]))
}

/// UTF-8 when valid, otherwise ISO-8859-1.
fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
