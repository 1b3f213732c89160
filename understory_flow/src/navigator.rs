// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred stack commands for screens that do not own the stack.
//!
//! ## Overview
//!
//! A screen builder only sees its own screen. To navigate from inside it (a "push next" button,
//! a "go back to root" link), hand it a [`FlowNavigator`]: a cloneable handle that queues
//! [`Command`]s. A [`Router`](crate::router::Router) or [`Showing`](crate::showing::Showing)
//! built [`with_navigator`](crate::router::Router::with_navigator) drains the queue at the start
//! of its next `body`, before rendering, so the stack is never edited while a frame is built.
//!
//! Commands apply in the order they were queued. A back operation the stack refuses is logged and
//! skipped; later commands still apply. Commands queued while the queue is being applied (from an
//! `on_dismiss` callback, say) wait for the next drain.
//!
//! ```
//! use understory_flow::navigator::FlowNavigator;
//! use understory_route_stack::RouteStack;
//!
//! let mut routes = RouteStack::with_root(0_u32, true);
//! let nav = FlowNavigator::new();
//!
//! let from_screen = nav.clone();
//! from_screen.push(1);
//! from_screen.present_sheet(2, true);
//! assert_eq!(routes.len(), 1);
//!
//! assert_eq!(nav.apply(&mut routes), 2);
//! assert_eq!(routes.len(), 3);
//! assert!(nav.is_empty());
//! ```

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use tracing::debug;
use understory_route_stack::{NavigationError, Route, RouteStack};

/// One queued stack operation.
pub enum Command<S> {
    /// Append a route (push, sheet or cover).
    Push(Route<S>),
    /// [`RouteStack::go_back`].
    GoBack,
    /// [`RouteStack::go_back_by`].
    GoBackBy(usize),
    /// [`RouteStack::go_back_to`].
    GoBackTo(usize),
    /// [`RouteStack::go_back_to_root`].
    GoBackToRoot,
    /// [`RouteStack::dismiss`].
    Dismiss,
    /// [`RouteStack::dismiss_all`].
    DismissAll,
    /// [`RouteStack::replace`].
    Replace(Vec<Route<S>>),
}

impl<S: core::fmt::Debug> core::fmt::Debug for Command<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Push(route) => f.debug_tuple("Push").field(route).finish(),
            Self::GoBack => f.write_str("GoBack"),
            Self::GoBackBy(count) => f.debug_tuple("GoBackBy").field(count).finish(),
            Self::GoBackTo(index) => f.debug_tuple("GoBackTo").field(index).finish(),
            Self::GoBackToRoot => f.write_str("GoBackToRoot"),
            Self::Dismiss => f.write_str("Dismiss"),
            Self::DismissAll => f.write_str("DismissAll"),
            Self::Replace(routes) => f.debug_tuple("Replace").field(&routes.len()).finish(),
        }
    }
}

impl<S> Command<S> {
    fn apply(self, stack: &mut RouteStack<S>) -> Result<(), NavigationError> {
        match self {
            Self::Push(route) => stack.push_route(route),
            Self::GoBack => stack.go_back()?,
            Self::GoBackBy(count) => stack.go_back_by(count)?,
            Self::GoBackTo(index) => stack.go_back_to(index)?,
            Self::GoBackToRoot => stack.go_back_to_root(),
            Self::Dismiss => stack.dismiss()?,
            Self::DismissAll => stack.dismiss_all(),
            Self::Replace(routes) => stack.replace(routes),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Push(_) => "push",
            Self::GoBack => "go_back",
            Self::GoBackBy(_) => "go_back_by",
            Self::GoBackTo(_) => "go_back_to",
            Self::GoBackToRoot => "go_back_to_root",
            Self::Dismiss => "dismiss",
            Self::DismissAll => "dismiss_all",
            Self::Replace(_) => "replace",
        }
    }
}

/// Cloneable handle queueing [`Command`]s for a route stack.
///
/// Clones share one queue. The handle is single-threaded, like the screen builders it is
/// captured by.
pub struct FlowNavigator<S> {
    queue: Rc<RefCell<VecDeque<Command<S>>>>,
}

impl<S> Clone for FlowNavigator<S> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<S> Default for FlowNavigator<S> {
    fn default() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }
}

impl<S> core::fmt::Debug for FlowNavigator<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlowNavigator")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl<S> FlowNavigator<S> {
    /// Create a handle with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command`.
    pub fn send(&self, command: Command<S>) {
        self.queue.borrow_mut().push_back(command);
    }

    /// Queue a push of `screen`.
    pub fn push(&self, screen: S) {
        self.send(Command::Push(Route::push(screen)));
    }

    /// Queue a sheet presenting `screen`.
    pub fn present_sheet(&self, screen: S, embed_in_container: bool) {
        self.send(Command::Push(Route::sheet(screen, embed_in_container)));
    }

    /// Queue a full-screen cover presenting `screen`.
    pub fn present_cover(&self, screen: S, embed_in_container: bool) {
        self.send(Command::Push(Route::cover(screen, embed_in_container)));
    }

    /// Queue an arbitrary route.
    pub fn push_route(&self, route: Route<S>) {
        self.send(Command::Push(route));
    }

    /// Queue [`RouteStack::go_back`].
    pub fn go_back(&self) {
        self.send(Command::GoBack);
    }

    /// Queue [`RouteStack::go_back_by`].
    pub fn go_back_by(&self, count: usize) {
        self.send(Command::GoBackBy(count));
    }

    /// Queue [`RouteStack::go_back_to`].
    pub fn go_back_to(&self, index: usize) {
        self.send(Command::GoBackTo(index));
    }

    /// Queue [`RouteStack::go_back_to_root`].
    pub fn go_back_to_root(&self) {
        self.send(Command::GoBackToRoot);
    }

    /// Queue [`RouteStack::dismiss`].
    pub fn dismiss(&self) {
        self.send(Command::Dismiss);
    }

    /// Queue [`RouteStack::dismiss_all`].
    pub fn dismiss_all(&self) {
        self.send(Command::DismissAll);
    }

    /// Queue [`RouteStack::replace`].
    pub fn replace(&self, routes: impl IntoIterator<Item = Route<S>>) {
        self.send(Command::Replace(routes.into_iter().collect()));
    }

    /// Number of queued commands.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Drop every queued command.
    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }

    /// Apply the queued commands to `stack` in order.
    ///
    /// Returns how many were applied. Refused commands are skipped.
    pub fn apply(&self, stack: &mut RouteStack<S>) -> usize {
        // Taken first: dismiss callbacks may queue more commands.
        let commands = core::mem::take(&mut *self.queue.borrow_mut());
        let mut applied = 0;
        for command in commands {
            let name = command.name();
            match command.apply(stack) {
                Ok(()) => applied += 1,
                Err(err) => debug!(command = name, %err, "navigator command refused"),
            }
        }
        if applied > 0 {
            debug!(applied, len = stack.len(), "applied navigator commands");
        }
        applied
    }
}
