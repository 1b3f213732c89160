// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_route_stack --heading-base-level=0

//! Understory Route Stack: the navigation state of a declarative UI as one ordered list.
//!
//! ## Overview
//!
//! A [`RouteStack`] is the single source of navigation truth for a flow of screens.
//! Each [`Route`] pairs an opaque screen payload with the [`Style`] it was introduced with
//! (root, push, sheet or cover) and an optional dismissal callback.
//!
//! The stack is owned by the host application. Renderers and sequencers borrow it; they never
//! keep a private copy that could drift from it.
//!
//! ## Algebra
//!
//! - Growth: [`RouteStack::push`], [`RouteStack::present_sheet`], [`RouteStack::present_cover`].
//! - Removal is always prefix preserving: [`RouteStack::go_back`], [`RouteStack::go_back_by`],
//!   [`RouteStack::go_back_to`], [`RouteStack::go_back_to_root`], [`RouteStack::dismiss`],
//!   [`RouteStack::dismiss_all`] and [`RouteStack::truncate_to_index`] all reduce to truncation.
//! - [`RouteStack::replace`] swaps the whole stack.
//!
//! Removing a route invokes its `on_dismiss` callback exactly once. When several routes go at
//! once, callbacks run innermost first.
//!
//! ## Stale state
//!
//! Navigation state can lag the UI by a frame. Lookups past the end return `None`, truncating past
//! the end does nothing, and back operations on a stack that only holds its root follow the
//! stack's [`BackPolicy`]: silently ignored by default, or reported as a [`NavigationError`].
//!
//! ## Example
//!
//! ```
//! use understory_route_stack::{Route, RouteStack};
//!
//! let mut routes = RouteStack::from_routes([Route::root(0, true)]);
//! routes.present_sheet(1, true);
//! routes.push(2);
//! assert_eq!(routes.len(), 3);
//!
//! routes.go_back_to_root();
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes.get(0).map(|r| r.screen), Some(0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod route;
mod stack;

pub use error::{BackPolicy, NavigationError};
pub use route::{Route, RouteId, Style};
pub use stack::RouteStack;
