/*
 * ordering.rs
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

//! Listing order: newest first.
//! Rank is (timestamp, unix_seq, microsecond, seq), each descending. Sorting is stable, so
//! keys of equal rank stay in directory-listing order.

use super::delivery_id::DeliveryId;
use super::key::Key;
use std::cmp::Ordering;

fn id_rank(id: &DeliveryId) -> (u64, u64, u64) {
    (id.unix_seq, id.microsecond, id.seq)
}

fn rank(key: &Key) -> (u64, (u64, u64, u64)) {
    (key.timestamp, id_rank(&key.delivery_id))
}

/// Comparator for listings: `Less` means `a` is shown before `b`.
pub fn listing_order(a: &Key, b: &Key) -> Ordering {
    rank(b).cmp(&rank(a))
}

/// Sort keys newest first.
pub fn sort_keys(keys: &mut [Key]) {
    keys.sort_by(listing_order);
}

/// Sort delivery ids by (unix_seq, microsecond, seq), largest first.
pub fn sort_delivery_ids(ids: &mut [DeliveryId]) {
    ids.sort_by(|a, b| id_rank(b).cmp(&id_rank(a)));
}
