/*
 * key.rs
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

//! Maildir unique-name key.
//! Format: <timestamp>.<delivery-id>.<host>[,<k>=<v>]*:<flag-type>,<flags>
//! e.g. 1000000000.#1P100.myhost,U=1,S=2:2,SA

use super::delivery_id::DeliveryId;
use super::error::MalformedKey;
use super::{parse_decimal, Location};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Meaning of the flag section. `2` is the usual `:2,` info; `1` is experimental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagType {
    Experimental,
    Normal,
    /// Any other numeral; kept rather than rejected.
    Other(u8),
}

impl FlagType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FlagType::Experimental,
            2 => FlagType::Normal,
            v => FlagType::Other(v),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            FlagType::Experimental => 1,
            FlagType::Normal => 2,
            FlagType::Other(v) => v,
        }
    }
}

impl Serialize for FlagType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Parsed Maildir filename. `raw` is authoritative; every other field is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub raw: String,
    pub timestamp: u64,
    pub delivery_id: DeliveryId,
    pub host: String,
    pub params: HashMap<String, String>,
    pub flag_type: FlagType,
    pub flags: Vec<char>,
    pub location: Location,
}

impl Key {
    /// Parse a unique name. The result's location is [`Location::Unresolved`].
    pub fn parse(raw: &str) -> Result<Self, MalformedKey> {
        let segments: Vec<&str> = raw.splitn(3, '.').collect();
        if segments.len() < 3 {
            return Err(MalformedKey::TooFewSegments(segments.len()));
        }
        let timestamp = parse_decimal(segments[0])
            .ok_or_else(|| MalformedKey::Timestamp(segments[0].to_string()))?;
        let delivery_id = DeliveryId::parse(segments[1])?;

        let (host_part, flag_part) = segments[2].split_once(':').ok_or(MalformedKey::MissingInfo)?;

        let mut tokens = host_part.split(',');
        let host = tokens.next().unwrap_or_default().to_string();
        let mut params = HashMap::new();
        for token in tokens {
            let (k, v) = token
                .split_once('=')
                .filter(|(_, v)| !v.contains('='))
                .ok_or_else(|| MalformedKey::Parameter(token.to_string()))?;
            params.insert(k.to_string(), v.to_string());
        }

        let (flag_type, flags) = match flag_part.split_once(',') {
            Some((t, f)) => (t, f),
            None => (flag_part, ""),
        };
        let flag_type = flag_type
            .parse::<u8>()
            .ok()
            .filter(|_| flag_type.bytes().all(|b| b.is_ascii_digit()))
            .map(FlagType::from_u8)
            .ok_or_else(|| MalformedKey::FlagType(flag_type.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            timestamp,
            delivery_id,
            host,
            params,
            flag_type,
            flags: flags.chars().collect(),
            location: Location::Unresolved,
        })
    }

    /// Same key, placed in `location`.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Message size from the `S=` parameter, when present and numeric.
    pub fn size(&self) -> Option<u64> {
        self.param("S").and_then(parse_decimal)
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(&flag)
    }
}

impl std::str::FromStr for Key {
    type Err = MalformedKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Key::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maildir::MalformedDeliveryId;

    #[test]
    fn parse_full_format() {
        let raw = "123123.#123123X123123R123123I123123V123123M123123P123123Q123123.hostname,U=123123,S=123123:2,AB";
        let key = Key::parse(raw).unwrap();
        assert_eq!(key.raw, raw);
        assert_eq!(key.timestamp, 123123);
        assert_eq!(key.delivery_id.unix_seq, 123123);
        assert_eq!(key.delivery_id.seq, 123123);
        assert_eq!(key.host, "hostname");
        assert_eq!(key.params.len(), 2);
        assert_eq!(key.param("U"), Some("123123"));
        assert_eq!(key.size(), Some(123123));
        assert_eq!(key.flag_type, FlagType::Normal);
        assert_eq!(key.flags, vec!['A', 'B']);
        assert_eq!(key.location, Location::Unresolved);
    }

    #[test]
    fn parse_tagged_example() {
        let key = Key::parse("1000000000.#1P100.myhost,U=1,S=2:2,SA").unwrap();
        assert_eq!(key.timestamp, 1000000000);
        assert_eq!(
            key.delivery_id,
            DeliveryId { unix_seq: 1, pid: 100, ..Default::default() }
        );
        assert_eq!(key.host, "myhost");
        let expected: HashMap<String, String> =
            [("U", "1"), ("S", "2")].iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        assert_eq!(key.params, expected);
        assert_eq!(key.flag_type, FlagType::Normal);
        assert_eq!(key.flags, vec!['S', 'A']);
        assert!(key.has_flag('S'));
        assert!(!key.has_flag('T'));
    }

    #[test]
    fn display_reproduces_raw() {
        let raw = "1000000000.123_4.mail.example.com:2,";
        let key: Key = raw.parse().unwrap();
        assert_eq!(key.to_string(), raw);
        assert_eq!(key.host, "mail.example.com");
        assert!(key.flags.is_empty());
    }

    #[test]
    fn host_keeps_dots_and_may_be_empty() {
        let key = Key::parse("1.2.,S=5:2,S").unwrap();
        assert_eq!(key.host, "");
        assert_eq!(key.size(), Some(5));
    }

    #[test]
    fn duplicate_param_overwrites() {
        let key = Key::parse("1.2.h,S=5,S=6:2,").unwrap();
        assert_eq!(key.param("S"), Some("6"));
    }

    #[test]
    fn flags_preserve_order_and_duplicates() {
        let key = Key::parse("1.2.h:2,SSa,").unwrap();
        assert_eq!(key.flags, vec!['S', 'S', 'a', ',']);
    }

    #[test]
    fn other_flag_type_kept() {
        let key = Key::parse("1.2.h:7,S").unwrap();
        assert_eq!(key.flag_type, FlagType::Other(7));
        let key = Key::parse("1.2.h:1,x").unwrap();
        assert_eq!(key.flag_type, FlagType::Experimental);
    }

    #[test]
    fn missing_flag_comma_gives_no_flags() {
        let key = Key::parse("1.2.h:2").unwrap();
        assert_eq!(key.flag_type, FlagType::Normal);
        assert!(key.flags.is_empty());
    }

    #[test]
    fn malformed_keys() {
        assert_eq!(Key::parse("1.2"), Err(MalformedKey::TooFewSegments(2)));
        assert_eq!(Key::parse("abc"), Err(MalformedKey::TooFewSegments(1)));
        assert_eq!(Key::parse("x1.2.h:2,S"), Err(MalformedKey::Timestamp("x1".into())));
        assert_eq!(Key::parse("+1.2.h:2,S"), Err(MalformedKey::Timestamp("+1".into())));
        assert_eq!(Key::parse("1.2.h,S=1"), Err(MalformedKey::MissingInfo));
        assert_eq!(Key::parse("1.2.h,S:2,S"), Err(MalformedKey::Parameter("S".into())));
        assert_eq!(Key::parse("1.2.h,a=b=c:2,S"), Err(MalformedKey::Parameter("a=b=c".into())));
        assert_eq!(Key::parse("1.2.h:x,S"), Err(MalformedKey::FlagType("x".into())));
        assert_eq!(Key::parse("1.2.h:256,S"), Err(MalformedKey::FlagType("256".into())));
        assert_eq!(Key::parse("1.2.h:+2,S"), Err(MalformedKey::FlagType("+2".into())));
    }

    #[test]
    fn delivery_id_failure_propagates() {
        assert_eq!(
            Key::parse("1.hogehoge.h:2,S"),
            Err(MalformedKey::DeliveryId(MalformedDeliveryId::UnknownTag { tag: 'h', offset: 0 }))
        );
        assert_eq!(
            Key::parse("1..h:2,S"),
            Err(MalformedKey::DeliveryId(MalformedDeliveryId::Empty))
        );
    }

    #[test]
    fn with_location() {
        let key = Key::parse("1.2.h:2,S").unwrap().with_location(Location::New);
        assert_eq!(key.location, Location::New);
    }

    #[test]
    fn serde_uses_raw() {
        let raw = "1000000000.#1P100.myhost,U=1,S=2:2,SA";
        let key = Key::parse(raw).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", raw));
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<Key>("\"nope\"").is_err());
    }
}
