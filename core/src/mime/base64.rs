/*
 * base64.rs
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

//! Base64 decoder for the "B" encoding (RFC 2047 4.1, standard alphabet, padded).

use super::error::DecodeError;
use std::sync::OnceLock;

fn decode_table() -> &'static [i8; 256] {
    static TABLE: OnceLock<[i8; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = [INVALID; 256];
        t[32] = WHITESPACE;
        t[9] = WHITESPACE;
        t[13] = WHITESPACE;
        t[10] = WHITESPACE;
        for i in 0..26u8 {
            t[(b'A' + i) as usize] = i as i8;
            t[(b'a' + i) as usize] = (26 + i) as i8;
        }
        for i in 0..10u8 {
            t[(b'0' + i) as usize] = (52 + i) as i8;
        }
        t[b'+' as usize] = 62;
        t[b'/' as usize] = 63;
        t
    })
}

const INVALID: i8 = -1;
const WHITESPACE: i8 = -2;

/// Decode base64 from `src`, appending to `dst`. Whitespace is skipped.
/// On error, every complete quantum before the bad input has already been appended.
pub(crate) fn decode(src: &[u8], dst: &mut Vec<u8>) -> Result<(), DecodeError> {
    let table = decode_table();
    let mut quantum: u32 = 0;
    let mut quantum_bits: u32 = 0;

    for (pos, &b) in src.iter().enumerate() {
        let val = table[b as usize];
        if val >= 0 {
            quantum = (quantum << 6) | (val as u32);
            quantum_bits += 6;
            if quantum_bits == 24 {
                dst.extend_from_slice(&[(quantum >> 16) as u8, (quantum >> 8) as u8, quantum as u8]);
                quantum = 0;
                quantum_bits = 0;
            }
        } else if val == WHITESPACE {
            continue;
        } else if b == b'=' {
            return finish_padded(src, pos, quantum, quantum_bits, dst);
        } else {
            return Err(DecodeError::new("invalid base64 character", pos));
        }
    }

    if quantum_bits == 0 {
        Ok(())
    } else {
        Err(DecodeError::new("unpadded final base64 quantum", src.len()))
    }
}

/// `src[pos]` is the first `=`. Flush the short quantum once its padding is complete;
/// nothing but whitespace may follow.
fn finish_padded(
    src: &[u8],
    pos: usize,
    quantum: u32,
    quantum_bits: u32,
    dst: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    let table = decode_table();
    let needed = match quantum_bits {
        12 => 2,
        18 => 1,
        _ => return Err(DecodeError::new("misplaced base64 padding", pos)),
    };
    let mut pads = 0;
    let mut i = pos;
    while i < src.len() {
        let b = src[i];
        if b == b'=' && pads < needed {
            pads += 1;
        } else if table[b as usize] != WHITESPACE {
            break;
        }
        i += 1;
    }
    if pads < needed {
        return Err(DecodeError::new("incomplete base64 padding", i));
    }
    if quantum_bits == 12 {
        dst.push((quantum >> 4) as u8);
    } else {
        dst.push((quantum >> 10) as u8);
        dst.push((quantum >> 2) as u8);
    }
    if i < src.len() {
        return Err(DecodeError::new("data after base64 padding", i));
    }
    Ok(())
}
