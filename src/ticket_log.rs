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

//! Lock-free hand-off queue for closed tickets.
//!
//! The core does not retain closed tickets; the service pushes them here on
//! unpark and an external collaborator (billing, audit, reporting) drains
//! them at its own pace. Pushes happen inside the service's critical section
//! but the queue itself is lock-free, so draining never contends with gate
//! traffic.

use crate::ticket::Ticket;
use crossbeam::queue::SegQueue;

/// FIFO queue of closed tickets awaiting archival.
#[derive(Debug, Default)]
pub struct TicketLog {
    closed: SegQueue<Ticket>,
}

impl TicketLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, ticket: Ticket) {
        self.closed.push(ticket);
    }

    /// Number of closed tickets not yet drained.
    pub fn len(&self) -> usize {
        self.closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closed.is_empty()
    }

    /// Removes and returns all queued tickets in close order.
    pub fn drain(&self) -> Vec<Ticket> {
        let mut drained = Vec::with_capacity(self.closed.len());
        while let Some(ticket) = self.closed.pop() {
            drained.push(ticket);
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{LicensePlate, SlotId, TicketId};
    use chrono::Utc;

    fn ticket(id: u64) -> Ticket {
        let entry = Utc::now();
        let mut ticket =
            Ticket::new(TicketId(id), LicensePlate::from("T-1"), SlotId(1), entry);
        ticket.close(entry);
        ticket
    }

    #[test]
    fn drain_returns_tickets_in_close_order() {
        let log = TicketLog::new();
        log.push(ticket(1));
        log.push(ticket(2));
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        let ids: Vec<_> = drained.iter().map(|t| t.ticket_id().0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(log.is_empty());
    }

    #[test]
    fn drain_on_empty_log_is_empty() {
        let log = TicketLog::new();
        assert!(log.drain().is_empty());
    }
}
