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

use carpark_rs::{
    AllocationStrategy, BillingPolicy, EntryGate, ExitGate, LicensePlate, LotLayout, NearestSlot,
    ParkingService, PaymentGateway, PaymentMethod, Receipt, SlotType, TicketId, TightestFit,
    Vehicle, VehicleType,
};
use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// Carpark - Process gate-event CSV files
///
/// Reads entry/exit events from a CSV file, runs them through one entry and
/// one exit gate, and writes the settled receipts to stdout.
#[derive(Parser, Debug)]
#[command(name = "carpark-rs")]
#[command(about = "A parking facility driver that processes gate-event CSVs", long_about = None)]
struct Args {
    /// Path to CSV file with gate events
    ///
    /// Expected format: action,plate,vehicle,method
    /// Example: cargo run -- events.csv > receipts.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Hourly billing rate
    #[arg(long, default_value = "2.50")]
    rate: Decimal,

    /// Number of motorcycle slots
    #[arg(long, default_value_t = 2)]
    motorcycle: u32,

    /// Number of compact slots
    #[arg(long, default_value_t = 10)]
    compact: u32,

    /// Number of large slots
    #[arg(long, default_value_t = 5)]
    large: u32,

    /// Number of electric slots
    #[arg(long, default_value_t = 2)]
    electric: u32,

    /// Slot allocation strategy
    #[arg(long, value_enum, default_value = "nearest")]
    strategy: StrategyKind,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// First available compatible slot, nearest to the gate
    Nearest,
    /// Smallest compatible slot class first
    Tightest,
}

/// Payment terminal that approves every charge. The driver has no real
/// payment backend; declined charges are a collaborator concern.
struct AutoApprove;

impl PaymentGateway for AutoApprove {
    fn charge(&self, _amount: Decimal) -> bool {
        true
    }
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    let layout = LotLayout::new()
        .with_slots(SlotType::Motorcycle, args.motorcycle)
        .with_slots(SlotType::Compact, args.compact)
        .with_slots(SlotType::Large, args.large)
        .with_slots(SlotType::Electric, args.electric);

    let strategy: Box<dyn AllocationStrategy> = match args.strategy {
        StrategyKind::Nearest => Box::new(NearestSlot),
        StrategyKind::Tightest => Box::new(TightestFit),
    };

    let service = match ParkingService::new(&layout, strategy) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            eprintln!("Error building parking lot: {}", e);
            process::exit(1);
        }
    };

    let policy = match BillingPolicy::new(args.rate) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Error in billing configuration: {}", e);
            process::exit(1);
        }
    };

    let entry_gate = EntryGate::new("ENTRY-1", Arc::clone(&service));
    let exit_gate = ExitGate::new("EXIT-1", service, policy, Arc::new(AutoApprove));

    // Open input file
    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // Drive the gates from the event CSV
    let receipts = match process_events(BufReader::new(file), &entry_gate, &exit_gate) {
        Ok(receipts) => receipts,
        Err(e) => {
            eprintln!("Error processing events: {}", e);
            process::exit(1);
        }
    };

    // Write receipts to stdout
    if let Err(e) = write_receipts(&receipts, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `action, plate, vehicle, method`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    action: String,
    plate: String,
    #[serde(default)]
    vehicle: String,
    #[serde(default)]
    method: String,
}

/// One parsed gate event.
#[derive(Debug)]
enum GateEvent {
    Entry(Vehicle),
    Exit {
        plate: LicensePlate,
        method: PaymentMethod,
    },
}

impl CsvRecord {
    /// Converts the CSV record to a gate event.
    ///
    /// Returns `None` for unknown actions, vehicle types, or payment
    /// methods.
    fn into_event(self) -> Option<GateEvent> {
        match self.action.to_lowercase().as_str() {
            "entry" => {
                let vehicle_type = parse_vehicle_type(&self.vehicle)?;
                Some(GateEvent::Entry(Vehicle::new(self.plate, vehicle_type)))
            }
            "exit" => Some(GateEvent::Exit {
                plate: LicensePlate::new(self.plate),
                method: parse_method(&self.method)?,
            }),
            _ => None,
        }
    }
}

fn parse_vehicle_type(raw: &str) -> Option<VehicleType> {
    match raw.to_lowercase().as_str() {
        "small" | "motorcycle" => Some(VehicleType::Small),
        "medium" | "car" => Some(VehicleType::Medium),
        "large" | "truck" => Some(VehicleType::Large),
        "electric" | "ev" => Some(VehicleType::Electric),
        _ => None,
    }
}

fn parse_method(raw: &str) -> Option<PaymentMethod> {
    match raw.to_lowercase().as_str() {
        // Unattended exits default to the cash machine.
        "" | "cash" => Some(PaymentMethod::Cash),
        "card" | "credit_card" => Some(PaymentMethod::CreditCard),
        "mobile" | "mobile_payment" => Some(PaymentMethod::MobilePayment),
        _ => None,
    }
}

/// Runs gate events from a CSV reader through the gates.
///
/// Streaming parse; the file is never fully buffered. Malformed rows,
/// unknown actions, exits for unknown plates, and rejected entries are
/// skipped silently - the receipts of settled exits are the only output.
///
/// # CSV Format
///
/// Expected columns: `action, plate, vehicle, method`
/// - `action`: `entry` or `exit`
/// - `plate`: license plate of the vehicle
/// - `vehicle`: vehicle type for entries (small/medium/large/electric)
/// - `method`: payment method for exits (cash/card/mobile, default cash)
///
/// # Example
///
/// ```csv
/// action,plate,vehicle,method
/// entry,KA-01,medium,
/// exit,KA-01,,card
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader itself fails.
fn process_events<R: Read>(
    reader: R,
    entry_gate: &EntryGate,
    exit_gate: &ExitGate,
) -> Result<Vec<Receipt>, csv::Error> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Plates mapped to their issued tickets; the driver's session state.
    let mut active: HashMap<LicensePlate, TicketId> = HashMap::new();
    let mut receipts = Vec::new();

    for result in csv_reader.deserialize::<CsvRecord>() {
        let Ok(record) = result else {
            continue; // skip malformed rows
        };
        let Some(event) = record.into_event() else {
            continue;
        };

        match event {
            GateEvent::Entry(vehicle) => {
                if let Some(ticket) = entry_gate.process_vehicle_entry(&vehicle) {
                    active.insert(ticket.license_plate().clone(), ticket.ticket_id());
                }
            }
            GateEvent::Exit { plate, method } => {
                let Some(ticket_id) = active.remove(&plate) else {
                    continue;
                };
                if let Some(receipt) = exit_gate.checkout(ticket_id, method) {
                    receipts.push(receipt);
                }
            }
        }
    }

    Ok(receipts)
}

/// Writes settled receipts as CSV.
fn write_receipts<W: Write>(receipts: &[Receipt], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = Writer::from_writer(writer);
    for receipt in receipts {
        csv_writer.serialize(receipt)?;
    }
    csv_writer.flush()?;
    Ok(())
}
