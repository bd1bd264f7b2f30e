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

//! Pluggable slot allocation strategies.
//!
//! Strategies only *select*; the service *claims*. Keeping selection free of
//! mutation lets the service run select-then-occupy as one atomic unit under
//! its lock, and lets new strategies drop in without touching allocation
//! semantics.

use crate::base::SlotId;
use crate::lot::ParkingLot;
use crate::slot::SlotType;
use crate::vehicle::VehicleType;

/// Chooses a slot for a vehicle from the lot's inventory.
///
/// Implementations must not mutate anything and must be deterministic for a
/// given lot state. Returning `None` means no available compatible slot
/// exists right now.
pub trait AllocationStrategy: Send + Sync {
    fn select_slot(&self, lot: &ParkingLot, vehicle_type: VehicleType) -> Option<SlotId>;
}

/// First fit: the lowest-numbered slot that is available and compatible.
///
/// Slot ids follow creation order, so this is the "nearest to the gate"
/// baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestSlot;

impl AllocationStrategy for NearestSlot {
    fn select_slot(&self, lot: &ParkingLot, vehicle_type: VehicleType) -> Option<SlotId> {
        lot.slots()
            .find(|slot| slot.is_available() && slot.is_compatible(vehicle_type))
            .map(|slot| slot.slot_id())
    }
}

/// Best fit by type exactness: prefers the smallest compatible slot class,
/// leaving roomier slots free for vehicles that need them. Ties break on
/// ascending slot id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TightestFit;

/// Rank of a slot class by size; smaller rank is a tighter fit.
fn fit_rank(slot_type: SlotType) -> u8 {
    match slot_type {
        SlotType::Motorcycle | SlotType::Electric => 0,
        SlotType::Compact => 1,
        SlotType::Large => 2,
    }
}

impl AllocationStrategy for TightestFit {
    fn select_slot(&self, lot: &ParkingLot, vehicle_type: VehicleType) -> Option<SlotId> {
        lot.slots()
            .filter(|slot| slot.is_available() && slot.is_compatible(vehicle_type))
            .min_by_key(|slot| (fit_rank(slot.slot_type()), slot.slot_id()))
            .map(|slot| slot.slot_id())
    }
}
