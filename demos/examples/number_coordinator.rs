// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number coordinator.
//!
//! A scripted session over a stack of numbered screens. Each screen can present its double as
//! a sheet or cover, push the next number, go back, or go back to the root. Screen buttons go
//! through a `FlowNavigator` and land on the next frame. The tree is printed after every action.
//!
//! Run:
//! - `cargo run -p understory_demos --example number_coordinator`
//! - `RUST_LOG=trace cargo run -p understory_demos --example number_coordinator`

use tracing::info;
use understory_flow::navigator::FlowNavigator;
use understory_flow::node::NodeStates;
use understory_flow::router::Router;
use understory_flow::types::{Capabilities, Presentation, Rendered};
use understory_route_stack::RouteStack;

#[derive(Copy, Clone, Debug)]
enum Action {
    PresentDoubleCover,
    PresentDoubleSheet,
    PushNext,
    Step,
    GoBack,
    GoBackToRoot,
    /// The user swipes away whatever the node at this index shows.
    Swipe(usize),
}

fn act(
    routes: &mut RouteStack<i32>,
    states: &mut NodeStates,
    nav: &FlowNavigator<i32>,
    action: Action,
) {
    let top = routes.last().map_or(0, |r| r.screen);
    info!(?action, top, "user action");
    match action {
        Action::PresentDoubleCover => nav.present_cover(top * 2, true),
        Action::PresentDoubleSheet => nav.present_sheet(top * 2, true),
        Action::PushNext => nav.push(top + 1),
        Action::Step => {
            let last = routes.len().saturating_sub(1);
            if let Some(n) = routes.screen_mut(last) {
                *n += 1;
            }
        }
        // Only offered when there is somewhere to go back to.
        Action::GoBack if routes.len() > 1 => nav.go_back(),
        Action::GoBackToRoot if routes.len() > 1 => nav.go_back_to_root(),
        Action::GoBack | Action::GoBackToRoot => info!("no back buttons on the root"),
        Action::Swipe(index) => {
            let mut router = Router::from_values(routes, states, |n: &i32, _| *n);
            if !router.set_child_active(index, false) {
                info!(index, "swipe ignored");
            }
        }
    }
}

fn print_tree(tree: &Rendered<String>) {
    for node in tree.screens() {
        let depth = node.index * 2;
        let container = if node.wraps_container { " [container]" } else { "" };
        println!("  {:depth$}{}{container}", "", node.content);
        if let Some(child) = &node.child {
            let how = match child.presentation {
                Presentation::Push => "push",
                Presentation::Sheet => "sheet",
                Presentation::Cover => "cover",
            };
            println!("  {:depth$}  ↳ {how}", "");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,understory_route_stack=debug,understory_flow=debug".into()),
        )
        .init();

    let mut routes = RouteStack::with_root(0, true);
    let mut states = NodeStates::new();
    let nav = FlowNavigator::new();
    // Without native covers, covers are shown as sheets.
    let capabilities = if std::env::args().any(|a| a == "--no-cover") {
        Capabilities::empty()
    } else {
        Capabilities::default()
    };

    let script = [
        Action::GoBack,
        Action::PushNext,
        Action::Step,
        Action::PresentDoubleSheet,
        Action::PushNext,
        Action::PresentDoubleCover,
        Action::Swipe(3),
        Action::GoBack,
        Action::GoBackToRoot,
    ];

    for action in script {
        println!("== {action:?} ==");
        act(&mut routes, &mut states, &nav, action);
        let tree = Router::from_values(&mut routes, &mut states, |n: &i32, i| {
            format!("#{i}: {n}")
        })
        .with_capabilities(capabilities)
        .with_navigator(nav.clone())
        .body();
        // The host mounts every rendered node.
        for node in tree.screens() {
            states.appeared(&routes, node.index);
        }
        info!(depth = tree.depth(), "frame rendered");
        print_tree(&tree);
    }
}
