// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flows presented from host content.
//!
//! [`Showing`] is the one-level case of the [`Router`](crate::router::Router): a piece of host
//! content that is not itself a route (a button, a list) presents the first route of a stack,
//! which is shown at most once. Whatever follows it renders recursively as usual.
//!
//! ```
//! use understory_flow::node::NodeStates;
//! use understory_flow::showing::Showing;
//! use understory_flow::types::Presentation;
//! use understory_route_stack::RouteStack;
//!
//! let mut routes: RouteStack<u32> = RouteStack::new();
//! let mut states = NodeStates::new();
//!
//! routes.push(42);
//! let mut showing = Showing::from_values(&mut routes, &mut states, true, |n: &u32, _| *n);
//! let shown = showing.body(0);
//! assert!(shown.wraps_container);
//! assert_eq!(shown.child.as_ref().map(|c| c.presentation), Some(Presentation::Push));
//!
//! // The user swipes back once the host content is on screen.
//! showing.host_appeared();
//! assert!(showing.set_active(false));
//! assert!(showing.routes().is_empty());
//! ```

use alloc::boxed::Box;
use understory_route_stack::RouteStack;

use crate::navigator::FlowNavigator;
use crate::node::{ActiveBinding, NodeStates, Renderer};
use crate::router::ScreenBuilder;
use crate::types::{Capabilities, Child, Presentation};

/// Host content plus whatever it presents.
#[derive(Clone, Debug, PartialEq)]
pub struct Shown<V> {
    /// Host content, as passed to [`Showing::body`].
    pub content: V,
    /// Whether the host content is wrapped in a fresh navigation container.
    pub wraps_container: bool,
    /// Route 0 and its descendants, if the stack is not empty.
    pub child: Option<Child<V>>,
}

/// Composition root for a stack presented from host content.
pub struct Showing<'a, S, V> {
    routes: &'a mut RouteStack<S>,
    states: &'a mut NodeStates,
    renderer: Renderer,
    embed_in_container: bool,
    build: ScreenBuilder<'a, S, V>,
    navigator: Option<FlowNavigator<S>>,
}

impl<S, V> core::fmt::Debug for Showing<'_, S, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Showing")
            .field("len", &self.routes.len())
            .field("embed_in_container", &self.embed_in_container)
            .field("states", &self.states)
            .field("navigator", &self.navigator)
            .finish_non_exhaustive()
    }
}

impl<'a, S, V> Showing<'a, S, V> {
    /// Create a flow whose builder gets a mutable screen and its index.
    ///
    /// With `embed_in_container`, the host content (and routes pushed from it) sit in a fresh
    /// navigation container.
    pub fn new(
        routes: &'a mut RouteStack<S>,
        states: &'a mut NodeStates,
        embed_in_container: bool,
        build: impl FnMut(&mut S, usize) -> V + 'a,
    ) -> Self {
        Self {
            routes,
            states,
            renderer: Renderer::default(),
            embed_in_container,
            build: Box::new(build),
            navigator: None,
        }
    }

    /// Create a flow whose builder gets a read-only screen and its index.
    pub fn from_values(
        routes: &'a mut RouteStack<S>,
        states: &'a mut NodeStates,
        embed_in_container: bool,
        mut build: impl FnMut(&S, usize) -> V + 'a,
    ) -> Self {
        Self::new(routes, states, embed_in_container, move |s: &mut S, i| {
            build(&*s, i)
        })
    }

    /// Use the style table for a host with `capabilities`.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.renderer = Renderer::new(capabilities);
        self
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

    /// Wrap host `content` and render whatever it presents.
    pub fn body(&mut self, content: V) -> Shown<V> {
        if let Some(navigator) = &self.navigator {
            navigator.apply(self.routes);
        }
        self.states.truncate(self.routes.len());
        let child = match self.routes.get(0) {
            Some(first) => {
                let presentation = self.renderer.styles().resolve(first.style());
                let inherit = self.embed_in_container && presentation == Presentation::Push;
                let node = self
                    .renderer
                    .render_in(self.routes, 0, inherit, &mut self.build);
                Some(Child {
                    presentation,
                    node: Box::new(node),
                })
            }
            None => None,
        };
        Shown {
            content,
            wraps_container: self.embed_in_container,
            child,
        }
    }

    /// Host content was mounted.
    pub fn host_appeared(&mut self) {
        self.states.host_appeared();
    }

    /// Host content was torn down.
    pub fn host_disappeared(&mut self) {
        self.states.host_disappeared();
    }

    /// The node at `index` was mounted.
    pub fn appeared(&mut self, index: usize) {
        self.states.appeared(&*self.routes, index);
    }

    /// The node at `index` was torn down.
    pub fn disappeared(&mut self, index: usize) {
        self.states.disappeared(index);
    }

    /// Whether route 0 is shown.
    pub fn is_active(&mut self) -> bool {
        ActiveBinding::host(&mut *self.routes, &*self.states).get()
    }

    /// Report a visibility change of route 0. Dismissing it empties the stack.
    pub fn set_active(&mut self, active: bool) -> bool {
        ActiveBinding::host(&mut *self.routes, &*self.states).set(active)
    }

    /// Report a visibility change of the child of the node at `index`.
    pub fn set_child_active(&mut self, index: usize, active: bool) -> bool {
        ActiveBinding::new(&mut *self.routes, &*self.states, index).set(active)
    }
}
