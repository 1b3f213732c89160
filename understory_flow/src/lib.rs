// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flow --heading-base-level=0

//! Understory Flow: render a route stack as nested push, sheet and cover presentations.
//!
//! ## Overview
//!
//! This crate turns an [`understory_route_stack::RouteStack`] into a host-agnostic presentation
//! tree and feeds user dismissals back into the stack. It does not draw anything.
//! The host maps each [`ScreenNode`](crate::types::ScreenNode) to its own views, and each
//! [`Child`](crate::types::Child) to a navigation push, a sheet or a full-screen cover.
//!
//! ## Rendering
//!
//! The node at index `i` renders screen `i` and, if the stack continues, a child for index `i + 1`
//! shown with that route's [`Presentation`](crate::types::Presentation). Nodes that start a
//! navigation container are marked, and pushes inherit their parent's container.
//! Indices past the end render as [`Rendered::Empty`](crate::types::Rendered::Empty) so a stack
//! that shrinks mid-frame never panics.
//!
//! ## Dismissals
//!
//! The host reports that a child stopped being shown (a back-swipe, a sheet drag, a system back)
//! through an [`ActiveBinding`](crate::node::ActiveBinding). The binding truncates the stack to
//! the child's index, dropping the child and everything above it. Spurious reports are ignored:
//! those arriving before the parent appeared, those for a child already gone, and activations.
//!
//! ## Composition roots
//!
//! - [`Router`](crate::router::Router) renders a stack from its root route.
//! - [`Showing`](crate::showing::Showing) presents a stack from host content that is not a route.
//!
//! Screens navigate through a [`FlowNavigator`](crate::navigator::FlowNavigator): commands they
//! queue while being built apply at the start of the root's next `body`.
//!
//! ## Capabilities
//!
//! One renderer serves every host. [`Capabilities`](crate::types::Capabilities) describes what the
//! host can do: hosts without full-screen covers show covers as sheets, and hosts that cannot run
//! several transitions at once get compound changes sliced by the
//! [`Sequencer`](crate::sequencer::Sequencer).
//!
//! ## Example
//!
//! ```
//! use understory_flow::node::NodeStates;
//! use understory_flow::router::Router;
//! use understory_flow::types::Presentation;
//! use understory_route_stack::{Route, RouteStack};
//!
//! let mut routes = RouteStack::from_routes([Route::root(0, true), Route::push(1)]);
//! let mut states = NodeStates::new();
//! let mut router = Router::from_values(&mut routes, &mut states, |n: &u32, _| *n);
//!
//! let tree = router.body();
//! let root = tree.as_screen().unwrap();
//! assert_eq!(root.child.as_ref().map(|c| c.presentation), Some(Presentation::Push));
//!
//! // The user swipes back from screen 1 once the root is on screen.
//! router.appeared(0);
//! assert!(router.set_child_active(0, false));
//! assert_eq!(router.routes().len(), 1);
//! ```
//!
//! ## Features
//!
//! - `drag_dismiss`: the [`gesture`](crate::gesture) module, a sheet drag-to-dismiss recognizer
//!   built on `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "drag_dismiss")]
pub mod gesture;
pub mod navigator;
pub mod node;
pub mod router;
pub mod sequencer;
pub mod showing;
pub mod types;

pub use understory_route_stack::{BackPolicy, NavigationError, Route, RouteId, RouteStack, Style};
