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

//! Parking tickets.
//!
//! A [`Ticket`] records one occupancy episode and is the source of truth for
//! it: which vehicle, which slot, and the entry/exit timestamps billing is
//! computed from. The service owns a ticket only while it is active; closed
//! tickets are handed off through the ticket log for collaborators to
//! archive.

use crate::base::{LicensePlate, SlotId, TicketId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Record of one occupancy episode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ticket {
    ticket_id: TicketId,
    license_plate: LicensePlate,
    slot_id: SlotId,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
}

impl Ticket {
    pub(crate) fn new(
        ticket_id: TicketId,
        license_plate: LicensePlate,
        slot_id: SlotId,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            ticket_id,
            license_plate,
            slot_id,
            entry_time,
            exit_time: None,
        }
    }

    pub fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    pub fn license_plate(&self) -> &LicensePlate {
        &self.license_plate
    }

    pub fn slot_id(&self) -> SlotId {
        self.slot_id
    }

    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    pub fn exit_time(&self) -> Option<DateTime<Utc>> {
        self.exit_time
    }

    pub fn is_closed(&self) -> bool {
        self.exit_time.is_some()
    }

    /// Stamps the exit time. A ticket is closed exactly once, by the service
    /// that removes it from the active map.
    pub(crate) fn close(&mut self, exit_time: DateTime<Utc>) {
        debug_assert!(self.exit_time.is_none(), "ticket {} closed twice", self.ticket_id);
        self.exit_time = Some(exit_time);
    }

    /// Occupancy duration in hours, never negative. Zero while the ticket is
    /// still open.
    pub fn duration_hours(&self) -> Decimal {
        let Some(exit_time) = self.exit_time else {
            return Decimal::ZERO;
        };
        let seconds = (exit_time - self.entry_time).num_seconds().max(0);
        Decimal::from(seconds) / Decimal::from(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn open_ticket(entry_time: DateTime<Utc>) -> Ticket {
        Ticket::new(TicketId(7), LicensePlate::from("KA-01"), SlotId(3), entry_time)
    }

    #[test]
    fn open_ticket_has_zero_duration() {
        let ticket = open_ticket(Utc::now());
        assert!(!ticket.is_closed());
        assert_eq!(ticket.duration_hours(), Decimal::ZERO);
    }

    #[test]
    fn close_stamps_exit_time() {
        let entry = Utc::now();
        let exit = entry + Duration::minutes(90);
        let mut ticket = open_ticket(entry);

        ticket.close(exit);
        assert!(ticket.is_closed());
        assert_eq!(ticket.exit_time(), Some(exit));
        assert_eq!(ticket.duration_hours(), Decimal::new(15, 1)); // 1.5h
    }

    #[test]
    fn duration_clamps_negative_intervals_to_zero() {
        let entry = Utc::now();
        let mut ticket = open_ticket(entry);
        ticket.close(entry - Duration::hours(1));
        assert_eq!(ticket.duration_hours(), Decimal::ZERO);
    }

    #[test]
    fn two_hour_stay_is_two_hours() {
        let entry = Utc::now();
        let mut ticket = open_ticket(entry);
        ticket.close(entry + Duration::hours(2));
        assert_eq!(ticket.duration_hours(), Decimal::from(2));
    }

    #[test]
    fn ticket_serializes_with_identifiers() {
        let entry = Utc::now();
        let mut ticket = open_ticket(entry);
        ticket.close(entry + Duration::hours(1));

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["ticket_id"], 7);
        assert_eq!(json["license_plate"], "KA-01");
        assert_eq!(json["slot_id"], 3);
        assert!(json["exit_time"].is_string());
    }
}
