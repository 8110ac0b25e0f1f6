/*
 * address_parser.rs
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

//! RFC 5322 address list parsing (From, To, Cc, etc.).

use super::email_address::EmailAddress;

/// Parse a comma-separated list of addresses from a raw header value.
/// Supports `"Quoted Name" <local@domain>`, `Bare Name <local@domain>`, `<local@domain>`
/// and bare `local@domain`. Display names are returned still encoded.
pub fn parse_email_address_list(value: &str) -> Option<Vec<EmailAddress>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(Vec::new());
    }
    let mut out = Vec::new();
    let mut pos = 0;
    let bytes = value.as_bytes();
    let len = bytes.len();

    while pos < len {
        skip_ws(bytes, len, &mut pos);
        if pos >= len {
            break;
        }
        if bytes[pos] == b',' {
            pos += 1;
            continue;
        }
        let addr = parse_one_address(value, &mut pos)?;
        out.push(addr);
        skip_ws(bytes, len, &mut pos);
        if pos < len && bytes[pos] == b',' {
            pos += 1;
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn skip_ws(bytes: &[u8], len: usize, pos: &mut usize) {
    while *pos < len && matches!(bytes[*pos], b' ' | b'\t' | b'\r' | b'\n') {
        *pos += 1;
    }
}

/// Quoted string starting at `*pos` (on the opening quote). Backslash escapes are removed.
fn parse_quoted(value: &str, pos: &mut usize) -> Option<String> {
    let bytes = value.as_bytes();
    *pos += 1;
    let mut out = String::new();
    let mut seg = *pos;
    while *pos < bytes.len() {
        match bytes[*pos] {
            b'\\' if *pos + 1 < bytes.len() => {
                out.push_str(&value[seg..*pos]);
                seg = *pos + 1;
                *pos += 2;
            }
            b'"' => {
                out.push_str(&value[seg..*pos]);
                *pos += 1;
                return Some(out);
            }
            _ => *pos += 1,
        }
    }
    None
}

fn parse_one_address(value: &str, pos: &mut usize) -> Option<EmailAddress> {
    let bytes = value.as_bytes();
    let len = bytes.len();
    let mut display_name: Option<String> = None;
    if bytes[*pos] == b'"' {
        display_name = Some(parse_quoted(value, pos)?);
        skip_ws(bytes, len, pos);
    }

    let start = *pos;
    while *pos < len && bytes[*pos] != b',' && bytes[*pos] != b'<' {
        *pos += 1;
    }
    let phrase = value[start..*pos].trim();

    if *pos < len && bytes[*pos] == b'<' {
        if display_name.is_none() && !phrase.is_empty() {
            display_name = Some(phrase.to_string());
        }
        *pos += 1;
        let inner_start = *pos;
        while *pos < len && bytes[*pos] != b'>' {
            *pos += 1;
        }
        if *pos >= len {
            return None;
        }
        let addr = EmailAddress::from_addr_spec(&value[inner_start..*pos], display_name)?;
        *pos += 1;
        return Some(addr);
    }

    // A quoted name must be followed by an angle address.
    if display_name.is_some() {
        return None;
    }
    EmailAddress::from_addr_spec(phrase, None)
}
