/*
 * email_address.rs
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

//! One mailbox of an address list.

use serde::Serialize;
use std::fmt;

/// A mailbox: optional display name plus `local-part@domain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    pub display_name: Option<String>,
    pub local_part: String,
    pub domain: String,
}

impl EmailAddress {
    pub fn new(
        display_name: Option<impl Into<String>>,
        local_part: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.map(Into::into),
            local_part: local_part.into(),
            domain: domain.into(),
        }
    }

    /// Split an addr-spec at its last `@`. Both sides must be non-empty.
    pub fn from_addr_spec(spec: &str, display_name: Option<String>) -> Option<Self> {
        let (local, domain) = spec.trim().rsplit_once('@')?;
        let (local, domain) = (local.trim(), domain.trim());
        if local.is_empty() || domain.is_empty() {
            return None;
        }
        Some(Self::new(display_name, local, domain))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn address(&self) -> String {
        format!("{}@{}", self.local_part, self.domain)
    }

    /// What a listing shows for this mailbox: the display name, or the address without one.
    pub fn display_or_address(&self) -> String {
        match self.display_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.address(),
        }
    }

    /// Same mailbox with the display name passed through `f`; the address is untouched.
    pub fn map_display_name(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.display_name = self.display_name.as_deref().map(f);
        self
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) if name.contains(|c: char| "()<>[]:;@\\,.\"".contains(c)) => {
                write!(f, "\"{}\" ", name.replace('\\', "\\\\").replace('"', "\\\""))?;
            }
            Some(name) if !name.is_empty() => write!(f, "{} ", name)?,
            _ => {}
        }
        write!(f, "<{}@{}>", self.local_part, self.domain)
    }
}
