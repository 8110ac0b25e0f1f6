/*
 * rfc2047.rs
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

//! RFC 2047 encoded-word decoding (e.g. =?ISO-2022-JP?B?...?=) for header values.
//!
//! Two modes. [`DecodeMode::Compat`] is the default and reproduces the long-standing
//! listing behaviour: six charset/encoding prefixes, whitespace-split fields, and the
//! joining rule described on [`decode_header_value`]. [`DecodeMode::Strict`] follows
//! RFC 2047 for any charset encoding_rs knows.

use super::charset::{self, Charset};
use super::error::DecodeError;
use super::{base64, quoted_printable};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How header values are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    #[default]
    Compat,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordEncoding {
    Base64,
    QuotedPrintable,
}

impl WordEncoding {
    fn from_letter(letter: u8) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            b'B' => Some(WordEncoding::Base64),
            b'Q' => Some(WordEncoding::QuotedPrintable),
            _ => None,
        }
    }

    fn decode(self, payload: &[u8], dst: &mut Vec<u8>) -> Result<(), DecodeError> {
        match self {
            WordEncoding::Base64 => base64::decode(payload, dst),
            WordEncoding::QuotedPrintable => quoted_printable::decode(payload, dst),
        }
    }
}

const PREFIXES: [(&str, Charset, WordEncoding); 6] = [
    ("=?ISO-2022-JP?B?", Charset::Iso2022Jp, WordEncoding::Base64),
    ("=?ISO-2022-JP?Q?", Charset::Iso2022Jp, WordEncoding::QuotedPrintable),
    ("=?SHIFT_JIS?B?", Charset::ShiftJis, WordEncoding::Base64),
    ("=?SHIFT_JIS?Q?", Charset::ShiftJis, WordEncoding::QuotedPrintable),
    ("=?UTF-8?B?", Charset::Utf8, WordEncoding::Base64),
    ("=?UTF-8?Q?", Charset::Utf8, WordEncoding::QuotedPrintable),
];

/// A whitespace-delimited field recognized by the compatibility decoder.
struct EncodedWord<'a> {
    charset: Charset,
    encoding: WordEncoding,
    payload: &'a str,
}

impl<'a> EncodedWord<'a> {
    /// Prefix match is case-insensitive; the payload runs to the last `?=` of the field.
    fn recognize(field: &'a str) -> Option<Self> {
        PREFIXES.iter().find_map(|&(prefix, charset, encoding)| {
            let head = field.get(..prefix.len())?;
            if !head.eq_ignore_ascii_case(prefix) {
                return None;
            }
            let rest = &field[prefix.len()..];
            let end = rest.rfind("?=")?;
            Some(EncodedWord {
                charset,
                encoding,
                payload: &rest[..end],
            })
        })
    }

    /// Append the decoded text as UTF-8. Whatever decoded before a failure is still appended.
    fn decode_into(&self, dst: &mut Vec<u8>) -> Result<(), DecodeError> {
        let mut bytes = Vec::with_capacity(self.payload.len());
        let decoded = self.encoding.decode(self.payload.as_bytes(), &mut bytes);
        let transcoded = self.charset.append(&bytes, dst);
        decoded.and(transcoded)
    }
}

/// Decode a raw (unfolded) header value for display. Never fails.
///
/// The value is split on runs of ASCII whitespace (vertical tab included). A literal field is copied followed by
/// one space, except the first field, which gets none. A decoded field gets no space. So
/// adjacent encoded words fuse, literal words stay apart, and a literal last word leaves a
/// trailing space: `"foo =?UTF-8?Q?bar?= baz"` becomes `"foobarbaz "`.
///
/// If an encoded word fails to decode, the output stops there and what was produced so far
/// is returned.
pub fn decode_header_value(raw: &str) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let fields = raw
        .split(|c: char| c.is_ascii_whitespace() || c == '\x0b')
        .filter(|f| !f.is_empty());
    for (i, field) in fields.enumerate() {
        match EncodedWord::recognize(field) {
            Some(word) => {
                if let Err(e) = word.decode_into(&mut out) {
                    trace!(field, error = %e, "encoded word decoding stopped");
                    break;
                }
            }
            None => {
                out.extend_from_slice(field.as_bytes());
                if i > 0 {
                    out.push(b' ');
                }
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Decode a header value in the given mode.
pub fn decode_header_value_with(raw: &str, mode: DecodeMode) -> String {
    match mode {
        DecodeMode::Compat => decode_header_value(raw),
        DecodeMode::Strict => decode_encoded_words(raw),
    }
}

/// RFC 2047 decoding: expand every well-formed encoded word, drop whitespace between
/// adjacent encoded words, keep all other text as is. Words that cannot be decoded stay
/// verbatim.
pub fn decode_encoded_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    let mut after_word = false;

    while pos < s.len() {
        let start = match s[pos..].find("=?") {
            Some(i) => pos + i,
            None => {
                out.push_str(&s[pos..]);
                break;
            }
        };
        let literal = &s[pos..start];
        match decode_one_encoded_word(&s[start..]) {
            Some((decoded, consumed)) => {
                let between_words = after_word && literal.bytes().all(|b| b.is_ascii_whitespace());
                if !between_words {
                    out.push_str(literal);
                }
                out.push_str(&decoded);
                pos = start + consumed;
                after_word = true;
            }
            None => {
                out.push_str(&s[pos..start + 2]);
                pos = start + 2;
                after_word = false;
            }
        }
    }
    out
}

/// Decode one encoded word at the start of `s`. Returns (text, bytes consumed including `?=`).
fn decode_one_encoded_word(s: &str) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    if !s.starts_with("=?") {
        return None;
    }
    let charset_end = 2 + s[2..].find('?')?;
    if charset_end == 2 || charset_end + 2 >= bytes.len() || bytes[charset_end + 2] != b'?' {
        return None;
    }
    let encoding = WordEncoding::from_letter(bytes[charset_end + 1])?;
    let payload_start = charset_end + 3;
    let payload_end = payload_start + s[payload_start..].find("?=")?;
    let payload = &s[payload_start..payload_end];
    if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        return None;
    }

    // RFC 2231 language suffix: charset*lang
    let label = s[2..charset_end].split('*').next().unwrap_or_default();
    let encoding_rs = Encoding::for_label(label.trim().as_bytes())?;

    let mut decoded = Vec::with_capacity(payload.len());
    match encoding {
        WordEncoding::Base64 => base64::decode(payload.as_bytes(), &mut decoded).ok()?,
        WordEncoding::QuotedPrintable => {
            let unescaped: Vec<u8> = payload
                .bytes()
                .map(|b| if b == b'_' { b' ' } else { b })
                .collect();
            quoted_printable::decode(&unescaped, &mut decoded).ok()?
        }
    }
    Some((charset::decode_lossy(encoding_rs, &decoded), payload_end + 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_base64() {
        assert_eq!(decode_header_value("=?UTF-8?B?aMOpbGxv?="), "héllo");
    }

    #[test]
    fn prefix_is_case_insensitive() {
        assert_eq!(decode_header_value("=?utf-8?b?aMOpbGxv?="), "héllo");
        assert_eq!(decode_header_value("=?Shift_JIS?B?grGC8YLJgr+CzQ==?="), "こんにちは");
    }

    #[test]
    fn mixed_fields_spacing() {
        assert_eq!(decode_header_value("foo =?UTF-8?Q?bar?= baz"), "foobarbaz ");
    }

    #[test]
    fn literal_only() {
        assert_eq!(decode_header_value("Hello"), "Hello");
        assert_eq!(decode_header_value("Hello  big\tworld"), "Hellobig world ");
        assert_eq!(decode_header_value(""), "");
        assert_eq!(decode_header_value("   "), "");
    }

    #[test]
    fn adjacent_words_fuse() {
        assert_eq!(
            decode_header_value("=?UTF-8?B?5pel5pys6Kqe?= =?UTF-8?B?44Gu44OG44K544OI?="),
            "日本語のテスト"
        );
    }

    #[test]
    fn utf8_character_split_across_words() {
        assert_eq!(
            decode_header_value("=?UTF-8?B?5Lu25Q==?= =?UTF-8?B?kI3jg4bjgrnjg4g=?="),
            "件名テスト"
        );
    }

    #[test]
    fn iso_2022_jp() {
        assert_eq!(decode_header_value("=?ISO-2022-JP?B?GyRCJDMkcyRLJEEkTxsoQg==?="), "こんにちは");
        assert_eq!(
            decode_header_value("Re: =?iso-2022-jp?B?GyRCJUYlOSVIGyhC?="),
            "Re:テスト"
        );
    }

    #[test]
    fn iso_2022_jp_quoted_printable() {
        assert_eq!(
            decode_header_value("=?ISO-2022-JP?Q?=1B$B$3$s$K$A$O=1B(B?="),
            "こんにちは"
        );
    }

    #[test]
    fn iso_2022_jp_word_without_text() {
        assert_eq!(decode_header_value("x =?ISO-2022-JP?B?GyRCGyhC?= y"), "xy ");
    }

    #[test]
    fn vertical_tab_separates_fields() {
        assert_eq!(decode_header_value("a\x0bb"), "ab ");
        assert_eq!(decode_header_value("\x0b a \x0c\x0bb\x0b"), "ab ");
    }

    #[test]
    fn shift_jis_quoted_printable() {
        assert_eq!(
            decode_header_value("=?SHIFT_JIS?Q?=82=B1=82=F1=82=C9=82=BF=82=CD?="),
            "こんにちは"
        );
    }

    #[test]
    fn payload_runs_to_last_terminator() {
        assert_eq!(decode_header_value("=?UTF-8?Q?a?=3Fb?="), "a??b");
    }

    #[test]
    fn unknown_charset_is_literal() {
        assert_eq!(
            decode_header_value("x =?ISO-8859-1?Q?caf=E9?="),
            "x=?ISO-8859-1?Q?caf=E9?= "
        );
    }

    #[test]
    fn missing_terminator_is_literal() {
        assert_eq!(decode_header_value("a =?UTF-8?B?aMOp"), "a=?UTF-8?B?aMOp ");
    }

    #[test]
    fn failure_truncates_output() {
        assert_eq!(decode_header_value("ok =?UTF-8?B?SGVs!G8h?= more"), "okHel");
        assert_eq!(decode_header_value("=?UTF-8?Q?ab=ZZ?= tail"), "ab");
    }

    #[test]
    fn strict_mode() {
        assert_eq!(decode_encoded_words("=?UTF-8?B?SGVsbG8=?="), "Hello");
        assert_eq!(decode_encoded_words("=?UTF-8?Q?Hello_World?="), "Hello World");
        assert_eq!(decode_encoded_words("Hello =?UTF-8?B?V29ybGQ=?=!"), "Hello World!");
        assert_eq!(decode_encoded_words("foo =?UTF-8?Q?bar?= baz"), "foo bar baz");
    }

    #[test]
    fn strict_drops_space_between_words() {
        assert_eq!(
            decode_encoded_words("=?UTF-8?Q?a?=  =?UTF-8?Q?b?= c"),
            "ab c"
        );
    }

    #[test]
    fn strict_other_charsets() {
        assert_eq!(decode_encoded_words("=?ISO-8859-1?Q?caf=E9?="), "café");
        assert_eq!(decode_encoded_words("=?utf-8*en?Q?hi?="), "hi");
    }

    #[test]
    fn strict_leaves_bad_words() {
        assert_eq!(decode_encoded_words("=?bogus?Q?x?="), "=?bogus?Q?x?=");
        assert_eq!(decode_encoded_words("=?UTF-8?B?!!?="), "=?UTF-8?B?!!?=");
        assert_eq!(decode_encoded_words("a =? b"), "a =? b");
    }

    #[test]
    fn mode_dispatch() {
        let raw = "foo =?UTF-8?Q?bar?= baz";
        assert_eq!(decode_header_value_with(raw, DecodeMode::Compat), "foobarbaz ");
        assert_eq!(decode_header_value_with(raw, DecodeMode::Strict), "foo bar baz");
    }
}
