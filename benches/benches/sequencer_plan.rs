// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_flow::sequencer::{Sequencer, SequencerConfig, plan};
use understory_flow::types::Capabilities;
use understory_route_stack::{Route, RouteStack, Style};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// A root followed by `len - 1` routes; roughly one in four is a sheet or cover.
fn gen_routes(len: usize, seed: u64) -> Vec<Route<u32>> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(len);
    out.push(Route::root(0, true));
    for i in 1..len {
        let style = match rng.next_u64() % 8 {
            0 => Style::Sheet,
            1 => Style::Cover,
            _ => Style::Push,
        };
        let embed = style != Style::Push;
        out.push(Route::new(i as u32, style, embed));
    }
    out
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let caps = [
        ("stepwise", Capabilities::COVER),
        ("atomic_push", Capabilities::COVER | Capabilities::ATOMIC_PUSH),
        ("atomic", Capabilities::all()),
    ];
    for &n in &[8usize, 64, 512] {
        let root = gen_routes(1, 1);
        let deep = gen_routes(n, 0xCAFE_F00D_DEAD_BEEF);
        let other = gen_routes(n, 0xBADC_F00D_1234_5678);
        group.throughput(Throughput::Elements(n as u64));
        for (name, caps) in caps {
            group.bench_function(format!("grow_{name}_n{n}"), |b| {
                b.iter(|| black_box(plan(&root, &deep, caps)).len())
            });
            group.bench_function(format!("diverge_{name}_n{n}"), |b| {
                b.iter(|| black_box(plan(&deep, &other, caps)).len())
            });
        }
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequencer");
    for &n in &[8usize, 64] {
        let target = gen_routes(n, 0xFACE_FEED_CAFE_BABE);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("drain_n{n}"), |b| {
            b.iter_batched(
                || {
                    let routes: Vec<Route<u32>> =
                        target.iter().map(Route::detached).collect();
                    (RouteStack::with_root(0_u32, true), RouteStack::from_routes(routes))
                },
                |(mut live, target)| {
                    let mut seq = Sequencer::new(SequencerConfig {
                        step_delay: Duration::ZERO,
                        capabilities: Capabilities::COVER,
                    });
                    seq.begin(&mut live, target, Duration::ZERO);
                    while !seq.is_idle() {
                        seq.frame_rendered();
                        let _ = seq.poll(&mut live, Duration::ZERO);
                    }
                    black_box(live.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plan, bench_run);
criterion_main!(benches);
