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

//! # Carpark
//!
//! This library models a parking facility: a typed slot inventory, a
//! pluggable allocation strategy, tickets for active occupancies, and
//! entry/exit gates driving the two state transitions under concurrent
//! access.
//!
//! ## Core Components
//!
//! - [`ParkingService`]: the orchestration core and synchronization boundary
//! - [`LotLayout`] / [`ParkingLot`]: slot inventory and capacity counters
//! - [`AllocationStrategy`]: slot selection ([`NearestSlot`], [`TightestFit`])
//! - [`Ticket`]: one occupancy episode with entry/exit timestamps
//! - [`BillingPolicy`]: time-based charges settled through a [`PaymentGateway`]
//! - [`EntryGate`] / [`ExitGate`]: checkpoint façades over the service
//!
//! ## Example
//!
//! ```
//! use carpark_rs::{LotLayout, NearestSlot, ParkingService, SlotType, Vehicle};
//!
//! let layout = LotLayout::new()
//!     .with_slots(SlotType::Compact, 2)
//!     .with_slots(SlotType::Large, 1);
//! let service = ParkingService::new(&layout, Box::new(NearestSlot)).unwrap();
//!
//! let ticket = service.park(&Vehicle::car("KA-01-1234")).unwrap();
//! assert_eq!(service.available_slots(), 2);
//!
//! let closed = service.unpark(ticket.ticket_id()).unwrap();
//! assert!(closed.is_closed());
//! assert_eq!(service.available_slots(), 3);
//! ```
//!
//! ## Thread Safety
//!
//! Multiple gates may share one service across threads. The service keeps
//! the whole lot behind a single mutex so the select-then-occupy and
//! close-then-vacate sequences are atomic; gates themselves hold no locks.

mod base;
pub mod billing;
pub mod error;
mod gate;
mod lot;
mod service;
mod slot;
mod strategy;
mod ticket;
mod ticket_log;
mod vehicle;

pub use base::{LicensePlate, SlotId, TicketId};
pub use billing::{BillingPolicy, PaymentGateway, PaymentMethod, Receipt};
pub use error::ParkingError;
pub use gate::{EntryGate, ExitGate};
pub use lot::{LotLayout, LotStatus, ParkingLot};
pub use service::ParkingService;
pub use slot::{Slot, SlotStatus, SlotType};
pub use strategy::{AllocationStrategy, NearestSlot, TightestFit};
pub use ticket::Ticket;
pub use ticket_log::TicketLog;
pub use vehicle::{Vehicle, VehicleType};
