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

//! Parking orchestration service.
//!
//! The [`ParkingService`] is the synchronization boundary of the facility:
//! it owns the lot, the configured allocation strategy, and the active
//! tickets, and it is the only component that mutates any of them. Any
//! number of gates may share one service across threads.
//!
//! # Concurrency
//!
//! The whole lot sits behind a single [`Mutex`]: the strategy scan touches
//! many slots and must never observe a half-updated pool, so
//! select-then-occupy (park) and close-then-vacate (unpark) each run as one
//! critical section, serialized against each other. Both are O(slots) with
//! no I/O under the lock. The plate-to-slot lookup index lives in a
//! [`DashMap`] beside the lock because it is a non-authoritative
//! convenience; the active ticket map is the source of truth.

use crate::base::{LicensePlate, SlotId, TicketId};
use crate::error::ParkingError;
use crate::lot::{LotLayout, LotStatus, ParkingLot};
use crate::strategy::AllocationStrategy;
use crate::ticket::Ticket;
use crate::ticket_log::TicketLog;
use crate::vehicle::Vehicle;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Everything the lot lock protects: inventory, active tickets, and the
/// ticket-id counter.
struct LotState {
    lot: ParkingLot,
    tickets: HashMap<TicketId, Ticket>,
    next_ticket_id: u64,
}

/// Allocates slots on entry and settles occupancies on exit.
///
/// # Invariants
///
/// - `available_slots` equals the number of slots with status `Available`.
/// - A slot is referenced by at most one active ticket.
/// - Ticket ids are unique for the lifetime of the service.
pub struct ParkingService {
    state: Mutex<LotState>,
    strategy: Box<dyn AllocationStrategy>,
    /// Plate-to-slot lookup, set on park and cleared eagerly on unpark.
    slot_index: DashMap<LicensePlate, SlotId>,
    closed: TicketLog,
}

impl ParkingService {
    /// Builds the lot from `layout` and wires in the allocation strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::EmptyLayout`] if the layout has no slots.
    pub fn new(
        layout: &LotLayout,
        strategy: Box<dyn AllocationStrategy>,
    ) -> Result<Self, ParkingError> {
        Ok(Self {
            state: Mutex::new(LotState {
                lot: ParkingLot::new(layout)?,
                tickets: HashMap::new(),
                next_ticket_id: 1,
            }),
            strategy,
            slot_index: DashMap::new(),
            closed: TicketLog::new(),
        })
    }

    /// Parks a vehicle, issuing a ticket stamped with the current time.
    ///
    /// Returns `None` when the lot is full or no compatible slot is
    /// available; a failed allocation marks the lot full so later arrivals
    /// take the fast-path rejection.
    pub fn park(&self, vehicle: &Vehicle) -> Option<Ticket> {
        self.park_at(vehicle, Utc::now())
    }

    /// [`park`](Self::park) with an explicit entry time.
    pub fn park_at(&self, vehicle: &Vehicle, entry_time: DateTime<Utc>) -> Option<Ticket> {
        let mut state = self.state.lock();

        if state.lot.status() == LotStatus::Full {
            return None;
        }

        let slot_id = match self.strategy.select_slot(&state.lot, vehicle.vehicle_type()) {
            Some(slot_id) => slot_id,
            None => {
                state.lot.mark_full();
                return None;
            }
        };

        // Still inside the critical section: nobody else can claim slot_id
        // between the selection above and the occupation here.
        state.lot.occupy(slot_id, entry_time);

        let ticket_id = TicketId(state.next_ticket_id);
        state.next_ticket_id += 1;
        let ticket = Ticket::new(
            ticket_id,
            vehicle.license_plate().clone(),
            slot_id,
            entry_time,
        );
        state.tickets.insert(ticket_id, ticket.clone());
        self.slot_index
            .insert(vehicle.license_plate().clone(), slot_id);
        Some(ticket)
    }

    /// Closes the ticket, frees its slot, and returns the closed ticket for
    /// billing.
    ///
    /// Returns `None` for an unknown or already-closed ticket id; that is an
    /// expected, recoverable outcome, not a fault.
    pub fn unpark(&self, ticket_id: TicketId) -> Option<Ticket> {
        self.unpark_at(ticket_id, Utc::now())
    }

    /// [`unpark`](Self::unpark) with an explicit exit time.
    pub fn unpark_at(&self, ticket_id: TicketId, exit_time: DateTime<Utc>) -> Option<Ticket> {
        let mut state = self.state.lock();

        let mut ticket = state.tickets.remove(&ticket_id)?;
        ticket.close(exit_time);
        state.lot.vacate(ticket.slot_id());
        self.slot_index.remove(ticket.license_plate());
        self.closed.push(ticket.clone());
        Some(ticket)
    }

    /// Where the vehicle with this plate is currently parked, if anywhere.
    ///
    /// Lookup convenience only; the active ticket is authoritative.
    pub fn current_slot(&self, plate: &LicensePlate) -> Option<SlotId> {
        self.slot_index.get(plate).map(|entry| *entry.value())
    }

    /// Number of active (unclosed) tickets.
    pub fn active_tickets(&self) -> usize {
        self.state.lock().tickets.len()
    }

    pub fn available_slots(&self) -> usize {
        self.state.lock().lot.available_slots()
    }

    pub fn total_slots(&self) -> usize {
        self.state.lock().lot.total_slots()
    }

    pub fn lot_status(&self) -> LotStatus {
        self.state.lock().lot.status()
    }

    /// The queue of closed tickets awaiting archival.
    pub fn closed_tickets(&self) -> &TicketLog {
        &self.closed
    }

    /// Drains all closed tickets not yet handed to a collaborator.
    pub fn drain_closed(&self) -> Vec<Ticket> {
        self.closed.drain()
    }
}
