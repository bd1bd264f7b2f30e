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

//! Vehicle request descriptors.
//!
//! A [`Vehicle`] is what arrives at an entry gate: a license plate plus a
//! size class. Which slot it may occupy is decided by the compatibility
//! table on [`Slot`](crate::Slot). The vehicle does not own its slot; the
//! active [`Ticket`](crate::Ticket) is the source of truth for an occupancy,
//! and the service keeps a plate-to-slot lookup purely as a convenience.

use crate::base::LicensePlate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size class of an incoming vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum VehicleType {
    Small,
    Medium,
    Large,
    Electric,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Electric => "electric",
        };
        write!(f, "{name}")
    }
}

/// A vehicle requesting a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    license_plate: LicensePlate,
    vehicle_type: VehicleType,
}

impl Vehicle {
    pub fn new(plate: impl Into<String>, vehicle_type: VehicleType) -> Self {
        Self {
            license_plate: LicensePlate::new(plate),
            vehicle_type,
        }
    }

    /// A small vehicle (fits any non-electric slot type).
    pub fn motorcycle(plate: impl Into<String>) -> Self {
        Self::new(plate, VehicleType::Small)
    }

    /// A medium vehicle (compact or large slots).
    pub fn car(plate: impl Into<String>) -> Self {
        Self::new(plate, VehicleType::Medium)
    }

    /// A large vehicle (large slots only).
    pub fn truck(plate: impl Into<String>) -> Self {
        Self::new(plate, VehicleType::Large)
    }

    /// An electric vehicle (electric slots only).
    pub fn electric(plate: impl Into<String>) -> Self {
        Self::new(plate, VehicleType::Electric)
    }

    pub fn license_plate(&self) -> &LicensePlate {
        &self.license_plate
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_assign_expected_types() {
        assert_eq!(Vehicle::motorcycle("M-1").vehicle_type(), VehicleType::Small);
        assert_eq!(Vehicle::car("C-1").vehicle_type(), VehicleType::Medium);
        assert_eq!(Vehicle::truck("T-1").vehicle_type(), VehicleType::Large);
        assert_eq!(Vehicle::electric("E-1").vehicle_type(), VehicleType::Electric);
    }

    #[test]
    fn plate_is_preserved() {
        let vehicle = Vehicle::car("KA-01-1234");
        assert_eq!(vehicle.license_plate().as_str(), "KA-01-1234");
    }

    #[test]
    fn vehicle_type_display() {
        assert_eq!(VehicleType::Small.to_string(), "small");
        assert_eq!(VehicleType::Electric.to_string(), "electric");
    }
}
