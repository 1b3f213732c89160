// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep links through the sequencer.
//!
//! Parses `numbers/1/2/3`-style links, then replaces the live stack on a host that can run only
//! one transition at a time. Steps are applied against a simulated clock and frame loop.
//! A second link arrives mid-sequence and supersedes the first.
//!
//! Run:
//! - `cargo run -p understory_demos --example deep_link`
//! - `cargo run -p understory_demos --example deep_link -- numbers/4/5/6`

use core::time::Duration;

use tracing::info;
use understory_flow::node::NodeStates;
use understory_flow::router::Router;
use understory_flow::sequencer::{Sequencer, SequencerConfig};
use understory_flow::types::Capabilities;
use understory_route_stack::{Route, RouteStack};

const FRAME: Duration = Duration::from_millis(16);

fn parse(link: &str) -> Option<Vec<u32>> {
    let rest = link.strip_prefix("numbers/")?;
    rest.split('/').map(|n| n.parse().ok()).collect()
}

fn describe(routes: &RouteStack<u32>) -> String {
    routes
        .iter()
        .map(|r| format!("{:?}({})", r.style(), r.screen))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,understory_flow=debug".into()),
        )
        .init();

    let link = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("numbers/1/2/3"));
    let Some(numbers) = parse(&link) else {
        eprintln!("unrecognized link: {link}");
        return;
    };

    let mut routes = RouteStack::from_routes([Route::root(0, true), Route::sheet(7, true)]);
    let mut states = NodeStates::new();
    let mut seq = Sequencer::new(SequencerConfig {
        capabilities: Capabilities::COVER,
        ..SequencerConfig::default()
    });

    info!(%link, count = numbers.len(), "following deep link");
    let mut now = Duration::ZERO;
    println!("{now:>8?}  {}", describe(&routes));
    let planned = seq.begin_with(&mut routes, now, |draft| {
        draft.go_back_to_root();
        for n in numbers {
            draft.push(n);
        }
    });
    println!("{now:>8?}  {}  ({planned} steps)", describe(&routes));

    let mut superseded = false;
    while !seq.is_idle() {
        now += FRAME;
        let tree = Router::from_values(&mut routes, &mut states, |n: &u32, _| *n).body();
        for node in tree.screens() {
            states.appeared(&routes, node.index);
        }
        seq.frame_rendered();
        if seq.poll(&mut routes, now).is_some() {
            println!("{now:>8?}  {}", describe(&routes));
        }
        if !superseded && routes.len() == 3 {
            superseded = true;
            let target = RouteStack::from_routes([
                Route::root(0, true),
                Route::push(1),
                Route::cover(2, true),
                Route::push(3),
            ]);
            info!("second link arrived mid-sequence");
            let planned = seq.begin(&mut routes, target, now);
            println!("{now:>8?}  {}  (new link, {planned} steps)", describe(&routes));
        }
    }
}
