// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive node renderer.
//!
//! ## Overview
//!
//! [`Renderer::render`] walks a [`RouteStack`] from an index downwards. At index `i` it builds the
//! screen, then looks at route `i + 1` to decide how (and whether) to show a child:
//!
//! - [`Style::Push`](understory_route_stack::Style::Push) → pushed destination,
//! - [`Style::Sheet`](understory_route_stack::Style::Sheet) → sheet,
//! - [`Style::Cover`](understory_route_stack::Style::Cover) → cover, or a sheet on hosts without
//!   [`Capabilities::COVER`](crate::types::Capabilities::COVER),
//! - no route → no child.
//!
//! An index past the end renders [`Rendered::Empty`]. Hosts can report a child as still present
//! for a frame after its route is gone; that must not be an error.
//!
//! ## Dismissal
//!
//! Whether a child is shown is exposed as an [`ActiveBinding`]: an explicit getter and a setter.
//! Reading it tells whether the stack continues past the node. Setting it to `false` (the host
//! saying the user dismissed the child) truncates the stack, but only when:
//!
//! - the stack still has the child (duplicate or stale signals are dropped), and
//! - the parent node has appeared (hosts can emit spurious dismissals while mounting).
//!
//! Setting it to `true` does nothing; presentation follows stack growth only.
//!
//! Appearance is tracked in [`NodeStates`], fed by the host's mount/unmount events. It records
//! which route appeared at each index, so a route pushed where a dismissed one used to be starts
//! out not appeared.

use alloc::boxed::Box;
use alloc::vec::Vec;
use tracing::{debug, trace};
use understory_route_stack::{Route, RouteId, RouteStack};

use crate::types::{Capabilities, Child, Presentation, Rendered, ScreenNode, StyleTable};

/// Appearance lifecycle of rendered nodes.
///
/// The host reports [`appeared`](Self::appeared) when a node is mounted on screen and
/// [`disappeared`](Self::disappeared) when it is torn down. Nodes start out not appeared.
///
/// Each slot remembers the [`RouteId`] shown at that index when it appeared. A node counts as
/// appeared only while the same route is still at its index.
///
/// The extra host slot is used by [`Showing`](crate::showing::Showing), whose parent is host
/// content rather than a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeStates {
    appeared: Vec<Option<RouteId>>,
    host_appeared: bool,
}

impl NodeStates {
    /// Create a lifecycle table with nothing appeared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the node showing `stack[index]` as appeared.
    ///
    /// Indices outside the stack are ignored.
    pub fn appeared<S>(&mut self, stack: &RouteStack<S>, index: usize) {
        let Some(id) = stack.get(index).and_then(Route::id) else {
            trace!(index, len = stack.len(), "appearance outside the stack ignored");
            return;
        };
        if self.appeared.len() < stack.len() {
            self.appeared.resize(stack.len(), None);
        }
        if let Some(slot) = self.appeared.get_mut(index) {
            *slot = Some(id);
        }
    }

    /// Mark the node at `index` as gone.
    pub fn disappeared(&mut self, index: usize) {
        if let Some(slot) = self.appeared.get_mut(index) {
            *slot = None;
        }
    }

    /// Whether the route now at `stack[index]` is the one that appeared there.
    pub fn is_appeared<S>(&self, stack: &RouteStack<S>, index: usize) -> bool {
        match (
            self.appeared.get(index).copied().flatten(),
            stack.get(index).and_then(Route::id),
        ) {
            (Some(seen), Some(live)) => seen == live,
            _ => false,
        }
    }

    /// Forget appearances at `len` and above.
    pub fn truncate(&mut self, len: usize) {
        self.appeared.truncate(len);
    }

    /// Mark host content as appeared.
    pub fn host_appeared(&mut self) {
        self.host_appeared = true;
    }

    /// Mark host content as gone.
    pub fn host_disappeared(&mut self) {
        self.host_appeared = false;
    }

    /// Whether host content is currently appeared.
    pub fn is_host_appeared(&self) -> bool {
        self.host_appeared
    }

    /// Forget every appearance.
    pub fn reset(&mut self) {
        self.appeared.clear();
        self.host_appeared = false;
    }
}

/// Two-way "is the child shown" toggle for one node.
///
/// See the [module docs](self) for the guards applied on dismissal.
pub struct ActiveBinding<'a, S> {
    stack: &'a mut RouteStack<S>,
    states: &'a NodeStates,
    // `None` when the parent is host content (the child is route 0).
    parent: Option<usize>,
}

impl<S> core::fmt::Debug for ActiveBinding<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActiveBinding")
            .field("parent", &self.parent)
            .field("len", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<'a, S> ActiveBinding<'a, S> {
    /// Binding for the child of the node at `index`.
    pub fn new(stack: &'a mut RouteStack<S>, states: &'a NodeStates, index: usize) -> Self {
        Self {
            stack,
            states,
            parent: Some(index),
        }
    }

    /// Binding for route 0 as presented by host content.
    pub fn host(stack: &'a mut RouteStack<S>, states: &'a NodeStates) -> Self {
        Self {
            stack,
            states,
            parent: None,
        }
    }

    fn child_index(&self) -> usize {
        self.parent.map_or(0, |i| i + 1)
    }

    fn parent_appeared(&self) -> bool {
        match self.parent {
            Some(i) => self.states.is_appeared(&*self.stack, i),
            None => self.states.is_host_appeared(),
        }
    }

    /// Whether the stack continues past the parent.
    pub fn get(&self) -> bool {
        self.stack.len() > self.child_index()
    }

    /// Apply a visibility change reported by the host.
    ///
    /// Returns `true` when the stack was truncated.
    pub fn set(&mut self, active: bool) -> bool {
        let child = self.child_index();
        if active {
            trace!(index = child, "activation ignored; presentation follows the stack");
            return false;
        }
        if self.stack.len() <= child {
            trace!(
                index = child,
                len = self.stack.len(),
                "stale dismissal ignored"
            );
            return false;
        }
        if !self.parent_appeared() {
            trace!(index = child, "dismissal before appearance ignored");
            return false;
        }
        debug!(index = child, "host dismissed child");
        self.stack.truncate_to_index(child);
        true
    }
}

/// Turns a route stack into a [`Rendered`] tree.
///
/// Holds only the style table resolved from the host's [`Capabilities`]; the stack and the
/// screen builder are passed per call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Renderer {
    styles: StyleTable,
}

impl Renderer {
    /// Create a renderer for a host with the given capabilities.
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_styles(StyleTable::for_capabilities(capabilities))
    }

    /// Create a renderer with an explicit style table.
    pub fn with_styles(styles: StyleTable) -> Self {
        Self { styles }
    }

    /// The style table in use.
    pub fn styles(&self) -> StyleTable {
        self.styles
    }

    /// How the node at `index` shows its child, if the stack continues past it.
    pub fn child_presentation<S>(
        &self,
        stack: &RouteStack<S>,
        index: usize,
    ) -> Option<Presentation> {
        stack
            .get(index + 1)
            .map(|next| self.styles.resolve(next.style()))
    }

    /// Render the stack from `index` downwards.
    ///
    /// `build` receives a mutable reference to each screen and its index, once per rendered node.
    pub fn render<S, V, F>(
        &self,
        stack: &mut RouteStack<S>,
        index: usize,
        build: &mut F,
    ) -> Rendered<V>
    where
        F: FnMut(&mut S, usize) -> V,
    {
        self.render_in(stack, index, false, build)
    }

    /// Render with an explicit inherited container state.
    pub(crate) fn render_in<S, V, F>(
        &self,
        stack: &mut RouteStack<S>,
        index: usize,
        inherited_container: bool,
        build: &mut F,
    ) -> Rendered<V>
    where
        F: FnMut(&mut S, usize) -> V,
    {
        let Some(route) = stack.get_mut(index) else {
            return Rendered::Empty;
        };
        let wraps_container = route.embeds_container();
        let in_container = wraps_container || inherited_container;
        let content = build(&mut route.screen, index);

        let presentation = self.child_presentation(stack, index);
        let child = presentation.map(|presentation| {
            // Modals start outside any container; pushes stay in ours.
            let inherit = in_container && presentation == Presentation::Push;
            Child {
                presentation,
                node: Box::new(self.render_in(stack, index + 1, inherit, build)),
            }
        });

        Rendered::Screen(ScreenNode {
            index,
            content,
            wraps_container,
            in_container,
            child,
        })
    }
}
