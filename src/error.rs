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

//! Error types for lot construction and billing.
//!
//! Steady-state conditions are deliberately *not* errors: a full lot and an
//! unknown ticket id are `None` returns from the service, so gates branch
//! without error-based control flow. Errors here are the hard failures that
//! reject a bad configuration up front, and the one billing misuse
//! (charging an open ticket). Invariant violations — double-occupy,
//! counter/status drift — are debug assertions, since they indicate a
//! synchronization bug rather than bad input.

use thiserror::Error;

/// Parking facility errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// The lot layout declares no slots.
    #[error("parking layout contains no slots")]
    EmptyLayout,

    /// The hourly billing rate is negative.
    #[error("hourly rate must not be negative")]
    InvalidRate,

    /// A charge was requested for a ticket that has not been closed.
    #[error("ticket is still open")]
    TicketStillOpen,
}
