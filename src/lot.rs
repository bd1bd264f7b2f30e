// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Slot inventory and capacity tracking.
//!
//! The [`ParkingLot`] owns every [`Slot`] and the `available_slots` counter.
//! Counter and per-slot statuses are updated together inside the service's
//! critical section and must never drift apart; this is checked after every
//! mutation.

use crate::base::SlotId;
use crate::error::ParkingError;
use crate::slot::{Slot, SlotStatus, SlotType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the lot is accepting vehicles.
///
/// `Full` is set when the counter reaches zero or when an allocation attempt
/// finds no compatible slot; any vacate restores `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LotStatus {
    Open,
    Full,
}

/// Slot-type distribution used to build a lot.
///
/// Slots are numbered from 1 in the order the groups are declared, so the
/// declaration order fixes the "nearest first" scan order.
///
/// # Example
///
/// ```
/// use carpark_rs::{LotLayout, SlotType};
///
/// let layout = LotLayout::new()
///     .with_slots(SlotType::Motorcycle, 2)
///     .with_slots(SlotType::Compact, 4);
/// assert_eq!(layout.total_slots(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LotLayout {
    groups: Vec<(SlotType, u32)>,
}

impl LotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` slots of the given type.
    #[must_use]
    pub fn with_slots(mut self, slot_type: SlotType, count: u32) -> Self {
        self.groups.push((slot_type, count));
        self
    }

    pub fn total_slots(&self) -> u32 {
        self.groups.iter().map(|(_, count)| count).sum()
    }
}

/// The slot inventory of one facility.
#[derive(Debug)]
pub struct ParkingLot {
    /// Slots keyed by id; BTreeMap iteration gives ascending-id order.
    slots: BTreeMap<SlotId, Slot>,
    total_slots: usize,
    available_slots: usize,
    status: LotStatus,
}

impl ParkingLot {
    /// Builds the inventory from a layout.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::EmptyLayout`] if the layout declares no slots.
    pub fn new(layout: &LotLayout) -> Result<Self, ParkingError> {
        if layout.total_slots() == 0 {
            return Err(ParkingError::EmptyLayout);
        }

        let mut slots = BTreeMap::new();
        let mut next_id = 1u32;
        for &(slot_type, count) in &layout.groups {
            for _ in 0..count {
                let slot_id = SlotId(next_id);
                next_id += 1;
                slots.insert(slot_id, Slot::new(slot_id, slot_type));
            }
        }

        let total_slots = slots.len();
        Ok(Self {
            slots,
            total_slots,
            available_slots: total_slots,
            status: LotStatus::Open,
        })
    }

    /// All slots in ascending id order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    pub fn slot(&self, slot_id: SlotId) -> Option<&Slot> {
        self.slots.get(&slot_id)
    }

    /// Currently available slots, ascending id order.
    pub fn get_available_slots(&self) -> Vec<&Slot> {
        self.slots.values().filter(|slot| slot.is_available()).collect()
    }

    pub fn slot_count_by_status(&self, status: SlotStatus) -> usize {
        self.slots.values().filter(|slot| slot.status() == status).count()
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn available_slots(&self) -> usize {
        self.available_slots
    }

    pub fn status(&self) -> LotStatus {
        self.status
    }

    /// Occupies `slot_id` and decrements the availability counter.
    ///
    /// The id must come from a selection over this same lot inside the same
    /// critical section.
    pub(crate) fn occupy(&mut self, slot_id: SlotId, now: DateTime<Utc>) {
        let slot = self
            .slots
            .get_mut(&slot_id)
            .expect("occupied slot id was issued by this lot");
        slot.occupy(now);
        self.available_slots -= 1;
        if self.available_slots == 0 {
            self.status = LotStatus::Full;
        }
        self.assert_invariants();
    }

    /// Vacates `slot_id`, increments the counter, and reopens the lot.
    pub(crate) fn vacate(&mut self, slot_id: SlotId) {
        let slot = self
            .slots
            .get_mut(&slot_id)
            .expect("vacated slot id was issued by this lot");
        slot.vacate();
        self.available_slots += 1;
        self.status = LotStatus::Open;
        self.assert_invariants();
    }

    /// Marks the lot full after a failed allocation, enabling the fast-path
    /// rejection on the next park attempt.
    pub(crate) fn mark_full(&mut self) {
        self.status = LotStatus::Full;
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.available_slots <= self.total_slots,
            "available counter {} exceeds total {}",
            self.available_slots,
            self.total_slots
        );
        debug_assert_eq!(
            self.available_slots,
            self.slot_count_by_status(SlotStatus::Available),
            "available counter drifted from per-slot statuses"
        );
    }
}
