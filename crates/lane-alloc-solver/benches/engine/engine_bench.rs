// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lane_alloc_core::length::Length;
use lane_alloc_model::generator::{VehicleGenerator, VehicleMixConfig};
use lane_alloc_solver::{
    engine::AllocationEngine, greedy::GreedyOfflineSolver, lanes::LanePool, selector::Policy,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const LANES: usize = 85;
const CAPACITY: usize = 3000;

fn ferry_vehicles(seed: u64) -> Vec<Length> {
    let generator = VehicleGenerator::new(VehicleMixConfig::default().with_seed(seed))
        .expect("default mix is valid");
    generator.generate_with(&mut ChaCha8Rng::seed_from_u64(seed))
}

#[inline]
fn fresh_pool() -> LanePool {
    LanePool::new(LANES, Length::new(CAPACITY)).expect("valid deck")
}

fn online_benches(c: &mut Criterion) {
    let vehicles = ferry_vehicles(1);
    let mut group = c.benchmark_group("engine_online/ferry");
    group.throughput(Throughput::Elements(vehicles.len() as u64));

    for policy in Policy::ALL {
        let engine = AllocationEngine::new(policy);
        group.bench_function(BenchmarkId::new("run", policy), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            b.iter_batched(
                fresh_pool,
                |pool| {
                    let a = engine
                        .run(black_box(&vehicles), pool, &mut rng)
                        .expect("run succeeds");
                    black_box(a.overflow_total())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn chunked_benches(c: &mut Criterion) {
    let vehicles = ferry_vehicles(2);
    let mut group = c.benchmark_group("engine_chunked/ferry");
    group.throughput(Throughput::Elements(vehicles.len() as u64));

    let engine = AllocationEngine::new(Policy::FullestFit);
    for k in [1usize, 10, 50, 500] {
        group.bench_function(BenchmarkId::new("fullest-fit", k), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            b.iter_batched(
                fresh_pool,
                |pool| {
                    let a = engine
                        .run_chunked(black_box(&vehicles), pool, k, &mut rng)
                        .expect("run succeeds");
                    black_box(a.overflow_total())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn greedy_benches(c: &mut Criterion) {
    let vehicles = ferry_vehicles(3);
    let mut group = c.benchmark_group("greedy_offline/ferry");
    group.throughput(Throughput::Elements(vehicles.len() as u64));

    let solver = GreedyOfflineSolver::new();
    group.bench_function("allocate", |b| {
        b.iter_batched(
            fresh_pool,
            |pool| {
                let a = solver
                    .allocate(black_box(&vehicles), pool)
                    .expect("allocation succeeds");
                black_box(a.overflow_total())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, online_benches, chunked_benches, greedy_benches);
criterion_main!(benches);
