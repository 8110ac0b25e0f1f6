/*
 * quoted_printable.rs
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

//! Quoted-Printable decoder (RFC 2045 6.7) for the "Q" payloads of encoded words.

use super::error::DecodeError;

const HEX_DECODE: [i8; 256] = {
    let mut t = [-1i8; 256];
    let mut i = 0u8;
    while i < 10 {
        t[(b'0' + i) as usize] = i as i8;
        i = i.wrapping_add(1);
    }
    let mut i = 0u8;
    while i < 6 {
        t[(b'A' + i) as usize] = (10 + i) as i8;
        t[(b'a' + i) as usize] = (10 + i) as i8;
        i = i.wrapping_add(1);
    }
    t
};

/// Decode quoted-printable from `src`, appending to `dst`. Handles =XX (either hex case)
/// and soft line breaks (=CRLF, =LF, a lone `=` at the end). Other bytes pass through.
/// Stops at the first malformed escape, keeping what was decoded before it.
pub(crate) fn decode(src: &[u8], dst: &mut Vec<u8>) -> Result<(), DecodeError> {
    let mut pos = 0;
    while pos < src.len() {
        let b = src[pos];
        if b != b'=' {
            dst.push(b);
            pos += 1;
            continue;
        }
        match (src.get(pos + 1).copied(), src.get(pos + 2).copied()) {
            (None, _) => pos += 1,
            (Some(b'\n'), _) => pos += 2,
            (Some(b'\r'), Some(b'\n')) => pos += 3,
            (Some(hex1), Some(hex2)) => {
                let v1 = HEX_DECODE[hex1 as usize];
                let v2 = HEX_DECODE[hex2 as usize];
                if v1 < 0 || v2 < 0 {
                    return Err(DecodeError::new("invalid quoted-printable escape", pos));
                }
                dst.push(((v1 as u8) << 4) | v2 as u8);
                pos += 3;
            }
            (Some(_), None) => {
                return Err(DecodeError::new("truncated quoted-printable escape", pos));
            }
        }
    }
    Ok(())
}
