// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a sheet down to dismiss it.
//!
//! Replays two pointer traces against a sheet: a short, slow drag that settles back, and a flick
//! that dismisses the sheet and truncates the stack.
//!
//! Run:
//! - `cargo run -p understory_demos --example drag_dismiss`

use core::time::Duration;

use kurbo::Point;
use tracing::info;
use understory_flow::gesture::{DragOutcome, SheetDrag};
use understory_flow::node::NodeStates;
use understory_flow::router::Router;
use understory_route_stack::{Route, RouteStack};

fn replay(drag: &mut SheetDrag, trace: &[(f64, u64)]) -> Option<DragOutcome> {
    let (&(y0, t0), rest) = trace.split_first()?;
    drag.start(Point::new(0.0, y0), Duration::from_millis(t0));
    let (&(y1, t1), moves) = rest.split_last()?;
    for &(y, t) in moves {
        let offset = drag.update(Point::new(0.0, y), Duration::from_millis(t));
        println!("  t={t:>4}ms offset={:>6.1}", offset.unwrap_or_default());
    }
    drag.end(Point::new(0.0, y1), Duration::from_millis(t1))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,understory_flow=debug".into()),
        )
        .init();

    let mut routes = RouteStack::from_routes([Route::root(0_u32, true), Route::sheet(1, true)]);
    let mut states = NodeStates::new();
    states.appeared(&routes, 0);
    states.appeared(&routes, 1);

    let mut drag = SheetDrag::default();
    let traces: [&[(f64, u64)]; 2] = [
        &[(300.0, 0), (320.0, 100), (340.0, 200), (350.0, 400)],
        &[(300.0, 0), (310.0, 16), (340.0, 32), (380.0, 48)],
    ];
    for trace in traces {
        println!("== drag ==");
        let outcome = replay(&mut drag, trace);
        println!("  outcome: {outcome:?}");
        if outcome == Some(DragOutcome::Dismiss) {
            let mut router = Router::from_values(&mut routes, &mut states, |n: &u32, _| *n);
            let dismissed = router.set_child_active(0, false);
            info!(dismissed, "sheet drag released past threshold");
        }
        println!("  stack length: {}", routes.len());
    }
}
