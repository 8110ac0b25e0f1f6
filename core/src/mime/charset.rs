/*
 * charset.rs
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

//! Charset transcoding for encoded-word payloads (encoding_rs).

use super::error::DecodeError;
use encoding_rs::{DecoderResult, Encoding, ISO_2022_JP, SHIFT_JIS, UTF_8};
use std::borrow::Cow;

/// Charsets understood by the compatibility decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Charset {
    Iso2022Jp,
    ShiftJis,
    Utf8,
}

impl Charset {
    pub(crate) fn encoding(self) -> &'static Encoding {
        match self {
            Charset::Iso2022Jp => ISO_2022_JP,
            Charset::ShiftJis => SHIFT_JIS,
            Charset::Utf8 => UTF_8,
        }
    }

    /// Append payload bytes to `dst` as UTF-8. UTF-8 payloads are copied untouched so that
    /// a character split across adjacent encoded words joins up again.
    pub(crate) fn append(self, bytes: &[u8], dst: &mut Vec<u8>) -> Result<(), DecodeError> {
        match self {
            Charset::Utf8 => {
                dst.extend_from_slice(bytes);
                Ok(())
            }
            Charset::Iso2022Jp => transcode(self.encoding(), &drop_empty_escapes(bytes), dst),
            Charset::ShiftJis => transcode(self.encoding(), bytes, dst),
        }
    }
}

const ESC: u8 = 0x1b;

/// Length of the ISO-2022-JP designation at the start of `bytes`, if any.
fn escape_len(bytes: &[u8]) -> Option<usize> {
    match bytes {
        [ESC, b'(', b'B' | b'J' | b'I', ..] | [ESC, b'$', b'@' | b'B', ..] => Some(3),
        _ => None,
    }
}

/// Drop designations immediately followed by another one; encoding_rs rejects such a pair.
fn drop_empty_escapes(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !bytes.contains(&ESC) {
        return Cow::Borrowed(bytes);
    }
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if let Some(n) = escape_len(&bytes[i..]) {
            if escape_len(&bytes[i + n..]).is_none() {
                out.extend_from_slice(&bytes[i..i + n]);
            }
            i += n;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    Cow::Owned(out)
}

/// Decode `bytes` from `encoding` and append the UTF-8 result to `dst`.
/// Stops at the first malformed sequence; text decoded before it is kept.
pub(crate) fn transcode(
    encoding: &'static Encoding,
    bytes: &[u8],
    dst: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len());
    let mut out = String::with_capacity(capacity);
    let mut read = 0;
    let result = loop {
        let (result, n) = decoder.decode_to_string_without_replacement(&bytes[read..], &mut out, true);
        read += n;
        match result {
            DecoderResult::InputEmpty => break Ok(()),
            DecoderResult::OutputFull => {
                let more = decoder
                    .max_utf8_buffer_length_without_replacement(bytes.len() - read)
                    .unwrap_or(0);
                out.reserve(more.max(16));
            }
            DecoderResult::Malformed(_, _) => {
                break Err(DecodeError::new("malformed byte sequence", read));
            }
        }
    };
    dst.extend_from_slice(out.as_bytes());
    result
}

/// Decode a whole payload, replacing malformed sequences with U+FFFD.
pub(crate) fn decode_lossy(encoding: &'static Encoding, bytes: &[u8]) -> String {
    encoding.decode_without_bom_handling(bytes).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KONNICHIWA_JIS: &[u8] = b"\x1b$B$3$s$K$A$O\x1b(B";
    const KONNICHIWA_SJIS: &[u8] = b"\x82\xb1\x82\xf1\x82\xc9\x82\xbf\x82\xcd";

    #[test]
    fn iso_2022_jp() {
        let mut out = Vec::new();
        Charset::Iso2022Jp.append(KONNICHIWA_JIS, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "こんにちは");
    }

    #[test]
    fn shift_jis() {
        let mut out = Vec::new();
        Charset::ShiftJis.append(KONNICHIWA_SJIS, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "こんにちは");
    }

    #[test]
    fn utf8_bytes_pass_through() {
        let mut out = Vec::new();
        Charset::Utf8.append(&[0xe4, 0xbb], &mut out).unwrap();
        assert_eq!(out, vec![0xe4, 0xbb]);
    }

    #[test]
    fn malformed_shift_jis_keeps_prefix() {
        let mut out = Vec::new();
        let r = Charset::ShiftJis.append(b"\x82\xb1\x82\xf1\xff\x82\xc9", &mut out);
        assert!(r.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "こん");
    }

    #[test]
    fn back_to_back_escapes_carry_no_text() {
        let mut out = Vec::new();
        Charset::Iso2022Jp.append(b"\x1b$B\x1b(B", &mut out).unwrap();
        assert!(out.is_empty());

        let mut out = Vec::new();
        Charset::Iso2022Jp
            .append(b"\x1b(B\x1b$B$3$s\x1b(B\x1b$B$K$A$O\x1b(B", &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "こんにちは");
    }

    #[test]
    fn redundant_escapes_collapsed() {
        assert_eq!(&*drop_empty_escapes(b"ab"), b"ab");
        assert_eq!(&*drop_empty_escapes(b"\x1b$B\x1b(Bx"), b"\x1b(Bx");
        assert_eq!(&*drop_empty_escapes(b"\x1b$B$3\x1b(B"), b"\x1b$B$3\x1b(B");
    }

    #[test]
    fn lossy() {
        assert_eq!(decode_lossy(SHIFT_JIS, KONNICHIWA_SJIS), "こんにちは");
    }
}
