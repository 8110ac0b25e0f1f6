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

//! Message text: header parsing and RFC 2047 decoding of header values.

mod base64;
mod charset;
mod error;
mod quoted_printable;
mod rfc2047;
mod rfc5322;

pub use rfc2047::{decode_encoded_words, decode_header_value, decode_header_value_with, DecodeMode};
pub use rfc5322::{
    canonical_name, parse_email_address_list, parse_rfc5322_date, EmailAddress, Header,
};
