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

//! Parking slots and the slot/vehicle compatibility table.
//!
//! Compatibility is a closed table:
//!
//! | Slot type  | Eligible vehicles      |
//! |------------|------------------------|
//! | Motorcycle | Small                  |
//! | Compact    | Small, Medium          |
//! | Large      | Small, Medium, Large   |
//! | Electric   | Electric               |

use crate::base::SlotId;
use crate::vehicle::VehicleType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical slot class. The declaration order is smallest to largest; the
/// tightest-fit strategy relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum SlotType {
    Motorcycle,
    Compact,
    Large,
    Electric,
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Motorcycle => "motorcycle",
            Self::Compact => "compact",
            Self::Large => "large",
            Self::Electric => "electric",
        };
        write!(f, "{name}")
    }
}

/// Occupancy state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SlotStatus {
    Available,
    Occupied,
}

/// One physical resource unit holding at most one vehicle at a time.
///
/// `status` is mutated only by the service under its lot lock. A slot is
/// `Occupied` iff exactly one live ticket references it; `occupied_since` is
/// a display cache cleared on vacate, never authoritative for billing (the
/// ticket's timestamps are).
#[derive(Debug, Clone)]
pub struct Slot {
    slot_id: SlotId,
    slot_type: SlotType,
    status: SlotStatus,
    occupied_since: Option<DateTime<Utc>>,
}

impl Slot {
    pub(crate) fn new(slot_id: SlotId, slot_type: SlotType) -> Self {
        Self {
            slot_id,
            slot_type,
            status: SlotStatus::Available,
            occupied_since: None,
        }
    }

    pub fn slot_id(&self) -> SlotId {
        self.slot_id
    }

    pub fn slot_type(&self) -> SlotType {
        self.slot_type
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }

    /// When the current occupant arrived, if any. Display cache only.
    pub fn occupied_since(&self) -> Option<DateTime<Utc>> {
        self.occupied_since
    }

    /// Marks the slot occupied.
    ///
    /// Callers must have checked availability first; occupying an occupied
    /// slot means the select-then-claim sequence was not atomic, which is a
    /// synchronization defect rather than a recoverable condition.
    pub(crate) fn occupy(&mut self, now: DateTime<Utc>) {
        debug_assert!(
            self.status == SlotStatus::Available,
            "slot {} occupied twice",
            self.slot_id
        );
        self.status = SlotStatus::Occupied;
        self.occupied_since = Some(now);
    }

    /// Marks the slot available again, unconditionally.
    pub(crate) fn vacate(&mut self) {
        self.status = SlotStatus::Available;
        self.occupied_since = None;
    }

    /// Whether a vehicle of the given type may occupy this slot.
    pub fn is_compatible(&self, vehicle_type: VehicleType) -> bool {
        match self.slot_type {
            SlotType::Motorcycle => matches!(vehicle_type, VehicleType::Small),
            SlotType::Compact => {
                matches!(vehicle_type, VehicleType::Small | VehicleType::Medium)
            }
            SlotType::Large => matches!(
                vehicle_type,
                VehicleType::Small | VehicleType::Medium | VehicleType::Large
            ),
            SlotType::Electric => matches!(vehicle_type, VehicleType::Electric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(slot_type: SlotType) -> Slot {
        Slot::new(SlotId(1), slot_type)
    }

    #[test]
    fn compatibility_table_is_exact() {
        let cases = [
            (SlotType::Motorcycle, [true, false, false, false]),
            (SlotType::Compact, [true, true, false, false]),
            (SlotType::Large, [true, true, true, false]),
            (SlotType::Electric, [false, false, false, true]),
        ];
        let vehicles = [
            VehicleType::Small,
            VehicleType::Medium,
            VehicleType::Large,
            VehicleType::Electric,
        ];

        for (slot_type, expected) in cases {
            let slot = slot(slot_type);
            for (vehicle_type, allowed) in vehicles.iter().zip(expected) {
                assert_eq!(
                    slot.is_compatible(*vehicle_type),
                    allowed,
                    "{slot_type} slot vs {vehicle_type} vehicle"
                );
            }
        }
    }

    #[test]
    fn new_slot_is_available() {
        let slot = slot(SlotType::Compact);
        assert!(slot.is_available());
        assert_eq!(slot.status(), SlotStatus::Available);
        assert!(slot.occupied_since().is_none());
    }

    #[test]
    fn occupy_then_vacate_round_trip() {
        let mut slot = slot(SlotType::Large);
        let now = Utc::now();

        slot.occupy(now);
        assert_eq!(slot.status(), SlotStatus::Occupied);
        assert_eq!(slot.occupied_since(), Some(now));

        slot.vacate();
        assert!(slot.is_available());
        assert!(slot.occupied_since().is_none());
    }

    #[test]
    fn vacate_is_unconditional() {
        let mut slot = slot(SlotType::Motorcycle);
        slot.vacate();
        assert!(slot.is_available());
    }
}
