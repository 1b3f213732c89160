// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Binds a host-owned [`RouteStack`], the host's [`NodeStates`], and a screen builder to the
//! [`Renderer`], starting at index 0. The router holds references only; the stack stays the single
//! source of truth.
//!
//! ## Builders
//!
//! The screen builder can take the screen mutably or by shared reference, with or without its
//! index. All four forms are adapted to the same `(&mut S, usize) -> V` callback:
//!
//! - [`Router::new`]: `(&mut S, usize)`.
//! - [`Router::from_values`]: `(&S, usize)`.
//! - [`Router::without_index`]: `&mut S`.
//! - [`Router::from_values_without_index`]: `&S`.
//!
//! ## Host events
//!
//! Forward mount/unmount to [`Router::appeared`] / [`Router::disappeared`], and user dismissals
//! (back-swipe, sheet drag) to [`Router::set_child_active`] with `false`.
//!
//! ## See Also
//!
//! [`showing`](crate::showing) for flows presented from host content instead of a root route.

use alloc::boxed::Box;
use understory_route_stack::RouteStack;

use crate::navigator::FlowNavigator;
use crate::node::{ActiveBinding, NodeStates, Renderer};
use crate::types::{Capabilities, Rendered};

/// Screen builder stored by a [`Router`].
pub type ScreenBuilder<'a, S, V> = Box<dyn FnMut(&mut S, usize) -> V + 'a>;

/// Composition root for a route stack.
///
/// ## Usage
///
/// - Construct with one of the builder forms listed in the [module docs](self).
/// - Optionally set host capabilities with [`Router::with_capabilities`].
/// - Call [`Router::body`] each frame to get the [`Rendered`] tree.
/// - Feed host lifecycle and dismissal events back through the router.
pub struct Router<'a, S, V> {
    routes: &'a mut RouteStack<S>,
    states: &'a mut NodeStates,
    renderer: Renderer,
    build: ScreenBuilder<'a, S, V>,
    navigator: Option<FlowNavigator<S>>,
}

impl<S, V> core::fmt::Debug for Router<'_, S, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("len", &self.routes.len())
            .field("states", &self.states)
            .field("renderer", &self.renderer)
            .field("navigator", &self.navigator)
            .finish_non_exhaustive()
    }
}

impl<'a, S, V> Router<'a, S, V> {
    /// Create a router whose builder gets a mutable screen and its index.
    pub fn new(
        routes: &'a mut RouteStack<S>,
        states: &'a mut NodeStates,
        build: impl FnMut(&mut S, usize) -> V + 'a,
    ) -> Self {
        Self {
            routes,
            states,
            renderer: Renderer::default(),
            build: Box::new(build),
            navigator: None,
        }
    }

    /// Create a router whose builder gets a read-only screen and its index.
    pub fn from_values(
        routes: &'a mut RouteStack<S>,
        states: &'a mut NodeStates,
        mut build: impl FnMut(&S, usize) -> V + 'a,
    ) -> Self {
        Self::new(routes, states, move |screen: &mut S, index| {
            build(&*screen, index)
        })
    }

    /// Create a router whose builder gets a mutable screen only.
    pub fn without_index(
        routes: &'a mut RouteStack<S>,
        states: &'a mut NodeStates,
        mut build: impl FnMut(&mut S) -> V + 'a,
    ) -> Self {
        Self::new(routes, states, move |screen: &mut S, _| build(screen))
    }

    /// Create a router whose builder gets a read-only screen only.
    pub fn from_values_without_index(
        routes: &'a mut RouteStack<S>,
        states: &'a mut NodeStates,
        mut build: impl FnMut(&S) -> V + 'a,
    ) -> Self {
        Self::new(routes, states, move |screen: &mut S, _| build(&*screen))
    }

    /// Use the style table for a host with `capabilities`.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.renderer = Renderer::new(capabilities);
        self
    }

    /// Replace the renderer.
    pub fn set_renderer(&mut self, renderer: Renderer) {
        self.renderer = renderer;
    }

    /// Apply commands queued on `navigator` at the start of each [`body`](Self::body).
    pub fn with_navigator(mut self, navigator: FlowNavigator<S>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// The bound stack.
    pub fn routes(&self) -> &RouteStack<S> {
        &*self.routes
    }

    /// Render the whole stack.
    pub fn body(&mut self) -> Rendered<V> {
        if let Some(navigator) = &self.navigator {
            navigator.apply(self.routes);
        }
        self.states.truncate(self.routes.len());
        self.renderer.render(self.routes, 0, &mut self.build)
    }

    /// The node at `index` was mounted.
    pub fn appeared(&mut self, index: usize) {
        self.states.appeared(&*self.routes, index);
    }

    /// The node at `index` was torn down.
    pub fn disappeared(&mut self, index: usize) {
        self.states.disappeared(index);
    }

    /// Binding for the child of the node at `index`.
    pub fn child_binding(&mut self, index: usize) -> ActiveBinding<'_, S> {
        ActiveBinding::new(&mut *self.routes, &*self.states, index)
    }

    /// Whether the node at `index` shows a child.
    pub fn is_child_active(&mut self, index: usize) -> bool {
        self.child_binding(index).get()
    }

    /// Report a visibility change of the child of the node at `index`.
    ///
    /// Returns `true` when the stack was truncated.
    pub fn set_child_active(&mut self, index: usize, active: bool) -> bool {
        self.child_binding(index).set(active)
    }
}
