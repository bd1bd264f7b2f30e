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

//! Time-based billing.
//!
//! A charge is `rate_per_hour x duration`, where the duration comes from the
//! closed ticket's entry/exit timestamps and is never negative. All money
//! arithmetic is [`Decimal`]; charges round to two decimal places. The
//! payment side of the world is reduced to one seam: [`PaymentGateway`].

use crate::base::{LicensePlate, SlotId, TicketId};
use crate::error::ParkingError;
use crate::ticket::Ticket;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// How an exiting driver settles the charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    MobilePayment,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
            Self::MobilePayment => "mobile_payment",
        };
        write!(f, "{name}")
    }
}

/// The single call the core makes into the payment world.
pub trait PaymentGateway: Send + Sync {
    /// Attempts to collect `amount`; `true` on success.
    fn charge(&self, amount: Decimal) -> bool;
}

/// Itemized settlement for one closed ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub ticket_id: TicketId,
    pub license_plate: LicensePlate,
    pub slot_id: SlotId,
    pub hours: Decimal,
    pub amount: Decimal,
    pub method: PaymentMethod,
}

/// Configured hourly rate and charge computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingPolicy {
    rate_per_hour: Decimal,
}

impl BillingPolicy {
    const CHARGE_PRECISION: u32 = 2;

    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidRate`] for a negative rate. A zero
    /// rate is allowed (free parking).
    pub fn new(rate_per_hour: Decimal) -> Result<Self, ParkingError> {
        if rate_per_hour < Decimal::ZERO {
            return Err(ParkingError::InvalidRate);
        }
        Ok(Self { rate_per_hour })
    }

    pub fn rate_per_hour(&self) -> Decimal {
        self.rate_per_hour
    }

    /// Charge for a closed ticket, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::TicketStillOpen`] if the ticket has no exit
    /// time yet.
    pub fn charge_for(&self, ticket: &Ticket) -> Result<Decimal, ParkingError> {
        if !ticket.is_closed() {
            return Err(ParkingError::TicketStillOpen);
        }
        Ok((self.rate_per_hour * ticket.duration_hours()).round_dp(Self::CHARGE_PRECISION))
    }

    /// Builds the settlement record for a closed ticket.
    ///
    /// # Errors
    ///
    /// Same as [`BillingPolicy::charge_for`].
    pub fn receipt(&self, ticket: &Ticket, method: PaymentMethod) -> Result<Receipt, ParkingError> {
        let amount = self.charge_for(ticket)?;
        Ok(Receipt {
            ticket_id: ticket.ticket_id(),
            license_plate: ticket.license_plate().clone(),
            slot_id: ticket.slot_id(),
            hours: ticket.duration_hours().round_dp(Self::CHARGE_PRECISION),
            amount,
            method,
        })
    }
}
