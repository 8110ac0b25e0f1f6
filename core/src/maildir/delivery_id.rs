/*
 * delivery_id.rs
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

//! Delivery identifier: the middle segment of a Maildir unique name.
//! Legacy form `<pid>[_<seq>]`, or tagged form `#<n>X<n>R<n>I<n>V<n>M<n>P<n>Q<n>`
//! (any subset, any order).

use super::error::MalformedDeliveryId;
use super::parse_decimal;
use serde::Serialize;

/// Parsed delivery identifier. A zero field means the field was absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DeliveryId {
    pub unix_seq: u64,
    pub boot: u64,
    pub urandom: u64,
    pub inode: u64,
    pub dev: u64,
    pub microsecond: u64,
    pub pid: u64,
    pub seq: u64,
}

/// Which of the two delivery-id grammars a segment is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Legacy,
    Tagged,
}

impl Grammar {
    /// Legacy when the text contains `_` or is all decimal digits, tagged otherwise.
    pub fn classify(text: &str) -> Self {
        if text.contains('_') || text.bytes().all(|b| b.is_ascii_digit()) {
            Grammar::Legacy
        } else {
            Grammar::Tagged
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    UnixSeq,
    Boot,
    Urandom,
    Inode,
    Dev,
    Microsecond,
    Pid,
    Seq,
}

const TAGS: [(u8, Field); 8] = [
    (b'#', Field::UnixSeq),
    (b'X', Field::Boot),
    (b'R', Field::Urandom),
    (b'I', Field::Inode),
    (b'V', Field::Dev),
    (b'M', Field::Microsecond),
    (b'P', Field::Pid),
    (b'Q', Field::Seq),
];

fn field_for_tag(tag: u8) -> Option<Field> {
    TAGS.iter().find(|(t, _)| *t == tag).map(|&(_, f)| f)
}

impl DeliveryId {
    /// Parse a delivery-id segment, picking the grammar with [`Grammar::classify`].
    pub fn parse(text: &str) -> Result<Self, MalformedDeliveryId> {
        if text.is_empty() {
            return Err(MalformedDeliveryId::Empty);
        }
        match Grammar::classify(text) {
            Grammar::Legacy => Self::parse_legacy(text),
            Grammar::Tagged => Self::parse_tagged(text),
        }
    }

    /// `<pid>` or `<pid>_<seq>`; split on the first underscore only.
    pub fn parse_legacy(text: &str) -> Result<Self, MalformedDeliveryId> {
        let (pid, seq) = match text.split_once('_') {
            Some((pid, seq)) => (pid, Some(seq)),
            None => (text, None),
        };
        let mut id = DeliveryId {
            pid: parse_decimal(pid)
                .ok_or_else(|| MalformedDeliveryId::InvalidNumeral(pid.to_string()))?,
            ..DeliveryId::default()
        };
        if let Some(seq) = seq {
            id.seq = parse_decimal(seq)
                .ok_or_else(|| MalformedDeliveryId::InvalidNumeral(seq.to_string()))?;
        }
        Ok(id)
    }

    /// Sequence of `<tag><digits>`. A repeated tag overwrites the earlier value.
    pub fn parse_tagged(text: &str) -> Result<Self, MalformedDeliveryId> {
        if text.is_empty() {
            return Err(MalformedDeliveryId::Empty);
        }
        let bytes = text.as_bytes();
        let mut id = DeliveryId::default();
        let mut pos = 0;
        while pos < bytes.len() {
            let offset = pos;
            let tag = bytes[pos];
            let field = field_for_tag(tag).ok_or_else(|| MalformedDeliveryId::UnknownTag {
                tag: text[offset..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
                offset,
            })?;
            pos += 1;
            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            let value = parse_decimal(&text[start..pos]).ok_or(MalformedDeliveryId::InvalidValue {
                tag: tag as char,
                offset,
            })?;
            *id.field_mut(field) = value;
        }
        Ok(id)
    }

    fn field_mut(&mut self, field: Field) -> &mut u64 {
        match field {
            Field::UnixSeq => &mut self.unix_seq,
            Field::Boot => &mut self.boot,
            Field::Urandom => &mut self.urandom,
            Field::Inode => &mut self.inode,
            Field::Dev => &mut self.dev,
            Field::Microsecond => &mut self.microsecond,
            Field::Pid => &mut self.pid,
            Field::Seq => &mut self.seq,
        }
    }
}

impl std::str::FromStr for DeliveryId {
    type Err = MalformedDeliveryId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_grammar() {
        assert_eq!(Grammar::classify("123123"), Grammar::Legacy);
        assert_eq!(Grammar::classify("123_45"), Grammar::Legacy);
        assert_eq!(Grammar::classify("#1_2"), Grammar::Legacy);
        assert_eq!(Grammar::classify("#1X2"), Grammar::Tagged);
        assert_eq!(Grammar::classify("hogehoge"), Grammar::Tagged);
    }

    #[test]
    fn legacy_pid_only() {
        let id = DeliveryId::parse("123123").unwrap();
        assert_eq!(id, DeliveryId { pid: 123123, ..Default::default() });
    }

    #[test]
    fn legacy_pid_and_seq() {
        let id = DeliveryId::parse("123123_45").unwrap();
        assert_eq!(id, DeliveryId { pid: 123123, seq: 45, ..Default::default() });
    }

    #[test]
    fn legacy_rejects_non_numeric_parts() {
        assert!(DeliveryId::parse("123_").is_err());
        assert!(DeliveryId::parse("_45").is_err());
        assert!(DeliveryId::parse("12a_45").is_err());
        assert!(DeliveryId::parse("12_4_5").is_err());
    }

    #[test]
    fn tagged_full() {
        let id = DeliveryId::parse("#123123X123123R123123I123123V123123M123123P123123Q123123").unwrap();
        assert_eq!(
            id,
            DeliveryId {
                unix_seq: 123123,
                boot: 123123,
                urandom: 123123,
                inode: 123123,
                dev: 123123,
                microsecond: 123123,
                pid: 123123,
                seq: 123123,
            }
        );
    }

    #[test]
    fn tagged_order_independent() {
        let a = DeliveryId::parse("#1X2").unwrap();
        let b = DeliveryId::parse("X2#1").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, DeliveryId { unix_seq: 1, boot: 2, ..Default::default() });
    }

    #[test]
    fn tagged_repeat_overwrites() {
        let id = DeliveryId::parse("P1P7").unwrap();
        assert_eq!(id.pid, 7);
    }

    #[test]
    fn tagged_single_field() {
        let id = DeliveryId::parse("#123123").unwrap();
        assert_eq!(id, DeliveryId { unix_seq: 123123, ..Default::default() });
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(DeliveryId::parse(""), Err(MalformedDeliveryId::Empty));
        assert!(matches!(
            DeliveryId::parse("hogehoge"),
            Err(MalformedDeliveryId::UnknownTag { tag: 'h', offset: 0 })
        ));
        assert!(DeliveryId::parse("x1r2").is_err());
        assert!(DeliveryId::parse("x123123r123123").is_err());
    }

    #[test]
    fn tag_without_digits() {
        assert_eq!(
            DeliveryId::parse("#X1"),
            Err(MalformedDeliveryId::InvalidValue { tag: '#', offset: 0 })
        );
        assert!(DeliveryId::parse("P1Q").is_err());
    }

    #[test]
    fn value_overflow_rejected() {
        assert!(DeliveryId::parse("P99999999999999999999999").is_err());
        assert!(DeliveryId::parse("99999999999999999999999").is_err());
    }

    #[test]
    fn non_ascii_tag() {
        assert!(matches!(
            DeliveryId::parse("P1é2"),
            Err(MalformedDeliveryId::UnknownTag { tag: 'é', offset: 2 })
        ));
    }
}
