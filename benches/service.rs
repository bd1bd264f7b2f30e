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

//! Benchmarks for the parking service.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single-threaded park/unpark cycles
//! - Strategy scan cost as the lot grows
//! - Contended gate traffic across threads

use carpark_rs::{
    AllocationStrategy, LotLayout, NearestSlot, ParkingService, SlotType, TightestFit, Vehicle,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rayon::prelude::*;
use std::sync::Arc;

fn lot_with(compact: u32, large: u32) -> LotLayout {
    LotLayout::new()
        .with_slots(SlotType::Compact, compact)
        .with_slots(SlotType::Large, large)
}

// =============================================================================
// Single-Threaded Benchmarks
// =============================================================================

fn bench_park_unpark_cycle(c: &mut Criterion) {
    let service = ParkingService::new(&lot_with(64, 32), Box::new(NearestSlot)).unwrap();
    let vehicle = Vehicle::car("BENCH-1");

    c.bench_function("park_unpark_cycle", |b| {
        b.iter(|| {
            let ticket = service.park(black_box(&vehicle)).unwrap();
            service.unpark(black_box(ticket.ticket_id())).unwrap();
        })
    });
}

fn bench_strategy_scan_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy_scan");
    for slots in [16u32, 256, 4096] {
        group.throughput(Throughput::Elements(u64::from(slots)));
        for (name, strategy) in [
            ("nearest", Box::new(NearestSlot) as Box<dyn AllocationStrategy>),
            ("tightest", Box::new(TightestFit) as Box<dyn AllocationStrategy>),
        ] {
            let service = ParkingService::new(&lot_with(slots, 0), strategy).unwrap();
            // Fill all but the last slot so the scan walks the whole pool.
            for i in 0..slots - 1 {
                service.park(&Vehicle::car(format!("FILL-{i}"))).unwrap();
            }

            group.bench_with_input(
                BenchmarkId::new(name, slots),
                &service,
                |b, service| {
                    let vehicle = Vehicle::car("SCAN-1");
                    b.iter(|| {
                        let ticket = service.park(black_box(&vehicle)).unwrap();
                        service.unpark(ticket.ticket_id()).unwrap();
                    })
                },
            );
        }
    }
    group.finish();
}

// =============================================================================
// Contended Benchmarks
// =============================================================================

fn bench_contended_gates(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_gates");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("park_unpark_x1000_par", |b| {
        b.iter(|| {
            let service =
                Arc::new(ParkingService::new(&lot_with(128, 0), Box::new(NearestSlot)).unwrap());
            (0..1000u32).into_par_iter().for_each(|i| {
                let vehicle = Vehicle::car(format!("P-{i}"));
                if let Some(ticket) = service.park(&vehicle) {
                    let _ = service.unpark(ticket.ticket_id());
                }
            });
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_park_unpark_cycle,
    bench_strategy_scan_scaling,
    bench_contended_gates
);
criterion_main!(benches);
