// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_flow::node::{NodeStates, Renderer};
use understory_flow::router::Router;
use understory_route_stack::{Route, RouteStack};

fn gen_stack(len: usize) -> RouteStack<u32> {
    let mut stack = RouteStack::with_root(0_u32, true);
    for i in 1..len {
        match i % 5 {
            0 => stack.present_sheet(i as u32, true),
            3 => stack.present_cover(i as u32, true),
            _ => stack.push(i as u32),
        }
    }
    stack
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &n in &[4usize, 32, 256] {
        let mut stack = gen_stack(n);
        let mut states = NodeStates::new();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("renderer_n{n}"), |b| {
            let renderer = Renderer::default();
            let mut build = |s: &mut u32, i: usize| *s as usize + i;
            b.iter(|| black_box(renderer.render(&mut stack, 0, &mut build)).depth())
        });
        group.bench_function(format!("router_body_n{n}"), |b| {
            b.iter(|| {
                let mut router = Router::from_values(&mut stack, &mut states, |s: &u32, _| *s);
                black_box(router.body()).depth()
            })
        });
    }
    group.finish();
}

fn bench_dismiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("dismiss");
    let template: Vec<Route<u32>> = gen_stack(64).iter().map(Route::detached).collect();
    group.bench_function("set_child_active_mid_n64", |b| {
        b.iter_batched(
            || {
                let stack: RouteStack<u32> = template.iter().map(Route::detached).collect();
                let mut states = NodeStates::new();
                for i in 0..stack.len() {
                    states.appeared(&stack, i);
                }
                (stack, states)
            },
            |(mut stack, mut states)| {
                let mut router = Router::from_values(&mut stack, &mut states, |s: &u32, _| *s);
                black_box(router.set_child_active(31, false));
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_render, bench_dismiss);
criterion_main!(benches);
