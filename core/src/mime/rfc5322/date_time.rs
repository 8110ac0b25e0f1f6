/*
 * date_time.rs
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

//! RFC 5322 date-time parsing (section 3.3, plus the obsolete forms of 4.3).

use chrono::{DateTime, FixedOffset};

/// Parse a Date header value (e.g. "Fri, 21 Nov 1997 09:55:06 -0600 (CST)").
pub fn parse_rfc5322_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = strip_trailing_comment(value.trim());
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(value)
        .ok()
        .or_else(|| parse_obsolete_date(value))
}

fn strip_trailing_comment(value: &str) -> &str {
    match value.strip_suffix(')').and_then(|v| v.rfind('(')) {
        Some(open) => value[..open].trim_end(),
        None => value,
    }
}

/// Day name dropped, 2-digit years expanded, zone names mapped to offsets, seconds optional.
fn parse_obsolete_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let mut tokens: Vec<String> = value
        .split_whitespace()
        .filter(|t| !t.ends_with(','))
        .map(str::to_string)
        .collect();
    if tokens.len() < 5 {
        return None;
    }
    if let Ok(yy) = tokens[2].parse::<u32>() {
        if tokens[2].len() == 2 {
            let full = if yy <= 49 { 2000 + yy } else { 1900 + yy };
            tokens[2] = full.to_string();
        }
    }
    let last = tokens.len() - 1;
    if let Some(offset) = zone_offset(&tokens[last]) {
        tokens[last] = offset.to_string();
    }
    let normalized = tokens[..5].join(" ");
    DateTime::parse_from_str(&normalized, "%d %b %Y %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_str(&normalized, "%d %b %Y %H:%M %z"))
        .ok()
}

fn zone_offset(zone: &str) -> Option<&'static str> {
    const ZONES: &[(&str, &str)] = &[
        ("GMT", "+0000"),
        ("UT", "+0000"),
        ("UTC", "+0000"),
        ("Z", "+0000"),
        ("EST", "-0500"),
        ("EDT", "-0400"),
        ("CST", "-0600"),
        ("CDT", "-0500"),
        ("MST", "-0700"),
        ("MDT", "-0600"),
        ("PST", "-0800"),
        ("PDT", "-0700"),
        ("JST", "+0900"),
    ];
    ZONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        .map(|&(_, offset)| offset)
}
