// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showing coordinator.
//!
//! A "Show 42" button presents a stack that starts empty. Screens inside can present doubles,
//! push the next number, or go back; going back from the first screen returns to the button.
//!
//! Run:
//! - `cargo run -p understory_demos --example showing_coordinator`

use understory_flow::node::NodeStates;
use understory_flow::showing::{Showing, Shown};
use understory_route_stack::RouteStack;

fn print_shown(shown: &Shown<String>) {
    println!("  {}", shown.content);
    let Some(child) = &shown.child else {
        return;
    };
    println!("    ↳ {:?}", child.presentation);
    for node in child.node.screens() {
        let via = node
            .child
            .as_ref()
            .map(|c| format!(" ↳ {:?}", c.presentation))
            .unwrap_or_default();
        println!("    {:w$}{}{via}", "", node.content, w = node.index * 2);
    }
}

fn render(routes: &mut RouteStack<u32>, states: &mut NodeStates) {
    let mut showing = Showing::from_values(routes, states, true, |n: &u32, _| format!("Number {n}"));
    let shown = showing.body(String::from("[Show 42]"));
    showing.host_appeared();
    if let Some(child) = &shown.child {
        for node in child.node.screens() {
            showing.appeared(node.index);
        }
    }
    print_shown(&shown);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,understory_flow=trace".into()),
        )
        .init();

    let mut routes: RouteStack<u32> = RouteStack::new();
    let mut states = NodeStates::new();

    println!("== start ==");
    render(&mut routes, &mut states);

    println!("== tap Show 42 ==");
    routes.push(42);
    render(&mut routes, &mut states);

    println!("== push next, present double (sheet) ==");
    routes.push(43);
    routes.present_sheet(86, true);
    render(&mut routes, &mut states);

    println!("== go back twice ==");
    let _ = routes.go_back();
    let _ = routes.go_back();
    render(&mut routes, &mut states);

    println!("== swipe back to the button ==");
    {
        let mut showing = Showing::from_values(&mut routes, &mut states, true, |n: &u32, _| *n);
        showing.set_active(false);
    }
    render(&mut routes, &mut states);
}
