/*
 * lib.rs
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

//! Postbox core: reads Maildir unique names into ordered keys and decodes message
//! headers for display.
//!
//! The crate does no I/O of its own. Directory listings and message bytes come from a
//! [`maildir::MessageSource`]; the [`record::Assembler`] turns them into
//! [`record::MailSummary`] and [`record::MailRecord`] values ready for serialization.

pub mod config;
pub mod maildir;
pub mod mime;
pub mod record;

pub use config::Config;
pub use maildir::{resolve, DeliveryId, Key, Location, MalformedKey, MessageSource, ResolveError};
pub use mime::{decode_header_value, DecodeMode, Header};
pub use record::{AssembleError, Assembler, Listing, MailRecord, MailSummary};
