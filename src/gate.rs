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

//! Entry and exit gate façades.
//!
//! Gates are the concurrency entry points of the facility, yet they are
//! deliberately thin: no locks, no shared state with other gates beyond the
//! service reference. Each call opens the checkpoint flag, delegates to the
//! service, and closes the flag on every path. All real synchronization
//! happens inside [`ParkingService`].

use crate::base::TicketId;
use crate::billing::{BillingPolicy, PaymentGateway, PaymentMethod, Receipt};
use crate::service::ParkingService;
use crate::ticket::Ticket;
use crate::vehicle::Vehicle;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Inbound checkpoint; admits vehicles.
pub struct EntryGate {
    gate_id: String,
    checkpoint_open: AtomicBool,
    service: Arc<ParkingService>,
}

impl EntryGate {
    pub fn new(gate_id: impl Into<String>, service: Arc<ParkingService>) -> Self {
        Self {
            gate_id: gate_id.into(),
            checkpoint_open: AtomicBool::new(false),
            service,
        }
    }

    pub fn gate_id(&self) -> &str {
        &self.gate_id
    }

    /// Observability flag: whether a vehicle is currently being processed.
    pub fn is_checkpoint_open(&self) -> bool {
        self.checkpoint_open.load(Ordering::SeqCst)
    }

    /// Admits a vehicle; `None` means the lot turned it away.
    pub fn process_vehicle_entry(&self, vehicle: &Vehicle) -> Option<Ticket> {
        self.checkpoint_open.store(true, Ordering::SeqCst);
        let ticket = self.service.park(vehicle);
        self.checkpoint_open.store(false, Ordering::SeqCst);
        ticket
    }
}

/// Outbound checkpoint; settles tickets and releases slots.
pub struct ExitGate {
    gate_id: String,
    checkpoint_open: AtomicBool,
    service: Arc<ParkingService>,
    policy: BillingPolicy,
    gateway: Arc<dyn PaymentGateway>,
}

impl ExitGate {
    pub fn new(
        gate_id: impl Into<String>,
        service: Arc<ParkingService>,
        policy: BillingPolicy,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            gate_id: gate_id.into(),
            checkpoint_open: AtomicBool::new(false),
            service,
            policy,
            gateway,
        }
    }

    pub fn gate_id(&self) -> &str {
        &self.gate_id
    }

    pub fn is_checkpoint_open(&self) -> bool {
        self.checkpoint_open.load(Ordering::SeqCst)
    }

    /// Releases the vehicle if the ticket is known and the charge succeeds.
    pub fn process_vehicle_exit(&self, ticket_id: TicketId, method: PaymentMethod) -> bool {
        self.checkout(ticket_id, method).is_some()
    }

    /// Like [`process_vehicle_exit`](Self::process_vehicle_exit) but hands
    /// back the settlement record on success.
    pub fn checkout(&self, ticket_id: TicketId, method: PaymentMethod) -> Option<Receipt> {
        self.checkpoint_open.store(true, Ordering::SeqCst);
        let receipt = self.settle(ticket_id, method);
        self.checkpoint_open.store(false, Ordering::SeqCst);
        receipt
    }

    fn settle(&self, ticket_id: TicketId, method: PaymentMethod) -> Option<Receipt> {
        let ticket = self.service.unpark(ticket_id)?;
        // The ticket is closed at this point, so receipt() cannot fail.
        let receipt = self.policy.receipt(&ticket, method).ok()?;
        self.gateway.charge(receipt.amount).then_some(receipt)
    }
}
