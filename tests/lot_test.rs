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

//! Lot and layout public API tests.

use carpark_rs::{
    AllocationStrategy, LotLayout, LotStatus, NearestSlot, ParkingError, ParkingLot, SlotId,
    SlotStatus, SlotType, VehicleType,
};

fn downtown_layout() -> LotLayout {
    LotLayout::new()
        .with_slots(SlotType::Motorcycle, 2)
        .with_slots(SlotType::Compact, 3)
        .with_slots(SlotType::Large, 2)
        .with_slots(SlotType::Electric, 1)
}

#[test]
fn layout_totals_sum_over_groups() {
    assert_eq!(downtown_layout().total_slots(), 8);
    assert_eq!(LotLayout::new().total_slots(), 0);
}

#[test]
fn lot_construction_requires_slots() {
    assert_eq!(
        ParkingLot::new(&LotLayout::new()).unwrap_err(),
        ParkingError::EmptyLayout
    );
}

#[test]
fn fresh_lot_is_open_and_fully_available() {
    let lot = ParkingLot::new(&downtown_layout()).unwrap();

    assert_eq!(lot.status(), LotStatus::Open);
    assert_eq!(lot.total_slots(), 8);
    assert_eq!(lot.available_slots(), 8);
    assert_eq!(lot.slot_count_by_status(SlotStatus::Available), 8);
    assert_eq!(lot.slot_count_by_status(SlotStatus::Occupied), 0);
}

#[test]
fn slot_ids_ascend_in_declaration_order() {
    let lot = ParkingLot::new(&downtown_layout()).unwrap();

    let ids: Vec<_> = lot.slots().map(|slot| slot.slot_id().0).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());

    assert_eq!(lot.slot(SlotId(1)).unwrap().slot_type(), SlotType::Motorcycle);
    assert_eq!(lot.slot(SlotId(3)).unwrap().slot_type(), SlotType::Compact);
    assert_eq!(lot.slot(SlotId(6)).unwrap().slot_type(), SlotType::Large);
    assert_eq!(lot.slot(SlotId(8)).unwrap().slot_type(), SlotType::Electric);
}

#[test]
fn available_listing_matches_counter() {
    let lot = ParkingLot::new(&downtown_layout()).unwrap();
    assert_eq!(lot.get_available_slots().len(), lot.available_slots());
}

#[test]
fn strategy_scans_a_fresh_lot_in_id_order() {
    let lot = ParkingLot::new(&downtown_layout()).unwrap();

    assert_eq!(NearestSlot.select_slot(&lot, VehicleType::Small), Some(SlotId(1)));
    assert_eq!(NearestSlot.select_slot(&lot, VehicleType::Medium), Some(SlotId(3)));
    assert_eq!(NearestSlot.select_slot(&lot, VehicleType::Large), Some(SlotId(6)));
    assert_eq!(NearestSlot.select_slot(&lot, VehicleType::Electric), Some(SlotId(8)));
}

#[test]
fn compatibility_is_queryable_per_slot() {
    let lot = ParkingLot::new(&downtown_layout()).unwrap();

    let motorcycle_slot = lot.slot(SlotId(1)).unwrap();
    assert!(motorcycle_slot.is_compatible(VehicleType::Small));
    assert!(!motorcycle_slot.is_compatible(VehicleType::Medium));

    let electric_slot = lot.slot(SlotId(8)).unwrap();
    assert!(electric_slot.is_compatible(VehicleType::Electric));
    assert!(!electric_slot.is_compatible(VehicleType::Small));
}
