// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The route stack and its algebra.

use alloc::vec::Vec;
use tracing::{debug, trace};

use crate::error::{BackPolicy, NavigationError};
use crate::route::{Route, RouteId, Style};

/// Ordered list of [`Route`]s: the whole navigation state of one flow.
///
/// ## Semantics
///
/// - Index 0 is the outermost screen. Entry `i` is only visible while entry `i - 1` is.
/// - Every structural removal is a truncation, so the remaining routes are always a prefix of
///   the previous stack.
/// - A leading [`Style::Root`] route is never removed by back operations; only
///   [`truncate_to_index`](Self::truncate_to_index) and [`replace`](Self::replace) can remove it.
/// - Removed routes run their dismissal callbacks after the stack has been updated, innermost
///   first.
/// - Every route entering the stack gets a fresh [`RouteId`], so a route re-pushed at an index
///   that was truncated away is distinguishable from the one it replaced.
pub struct RouteStack<S> {
    routes: Vec<Route<S>>,
    policy: BackPolicy,
    next_id: u64,
}

impl<S> Default for RouteStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: core::fmt::Debug> core::fmt::Debug for RouteStack<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RouteStack")
            .field("routes", &self.routes)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<S> From<Vec<Route<S>>> for RouteStack<S> {
    fn from(mut routes: Vec<Route<S>>) -> Self {
        for (id, route) in (0_u64..).zip(routes.iter_mut()) {
            route.assign_id(id);
        }
        Self {
            next_id: routes.len() as u64,
            routes,
            policy: BackPolicy::default(),
        }
    }
}

impl<S> FromIterator<Route<S>> for RouteStack<S> {
    fn from_iter<I: IntoIterator<Item = Route<S>>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<S> RouteStack<S> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            policy: BackPolicy::default(),
            next_id: 0,
        }
    }

    /// Create a stack holding a single [`Style::Root`] route.
    pub fn with_root(screen: S, embed_in_container: bool) -> Self {
        Self::from_routes([Route::root(screen, embed_in_container)])
    }

    /// Create a stack from routes, outermost first.
    pub fn from_routes(routes: impl IntoIterator<Item = Route<S>>) -> Self {
        routes.into_iter().collect()
    }

    /// Builder form of [`set_policy`](Self::set_policy).
    pub fn with_policy(mut self, policy: BackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Choose what back operations do when there is nothing they may remove.
    pub fn set_policy(&mut self, policy: BackPolicy) {
        self.policy = policy;
    }

    /// Current back policy.
    pub fn policy(&self) -> BackPolicy {
        self.policy
    }

    /// Number of routes.
    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if there are no routes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Route<S>> {
        self.routes.get(index)
    }

    /// Mutable route at `index`, if present.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Route<S>> {
        self.routes.get_mut(index)
    }

    /// Mutable screen payload at `index`, if present.
    #[inline]
    pub fn screen_mut(&mut self, index: usize) -> Option<&mut S> {
        self.routes.get_mut(index).map(|r| &mut r.screen)
    }

    /// Innermost route.
    #[inline]
    pub fn last(&self) -> Option<&Route<S>> {
        self.routes.last()
    }

    /// Routes, outermost first.
    pub fn iter(&self) -> core::slice::Iter<'_, Route<S>> {
        self.routes.iter()
    }

    /// Routes as a slice, outermost first.
    pub fn as_slice(&self) -> &[Route<S>] {
        &self.routes
    }

    /// A copy of every route without callbacks, sharing this stack's policy.
    ///
    /// Useful as a draft to edit before handing it back as a target state. The copy assigns its
    /// own ids.
    pub fn detached(&self) -> Self
    where
        S: Clone,
    {
        self.iter()
            .map(Route::detached)
            .collect::<Self>()
            .with_policy(self.policy)
    }

    /// Ids of the routes, outermost first.
    pub fn ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.iter().filter_map(Route::id)
    }

    fn adopt(&mut self, mut route: Route<S>) -> Route<S> {
        route.assign_id(self.next_id);
        self.next_id += 1;
        route
    }

    /// Consume the stack without running any dismissal callback.
    pub fn into_routes(self) -> Vec<Route<S>> {
        self.routes
    }

    /// Append an arbitrary route.
    pub fn push_route(&mut self, route: Route<S>) {
        debug!(
            index = self.routes.len(),
            style = ?route.style(),
            "appending route"
        );
        let route = self.adopt(route);
        self.routes.push(route);
    }

    /// Push `screen` inside the current navigation container.
    pub fn push(&mut self, screen: S) {
        self.push_route(Route::push(screen));
    }

    /// Present `screen` as a sheet.
    pub fn present_sheet(&mut self, screen: S, embed_in_container: bool) {
        self.push_route(Route::sheet(screen, embed_in_container));
    }

    /// Present `screen` as a full-screen cover.
    pub fn present_cover(&mut self, screen: S, embed_in_container: bool) {
        self.push_route(Route::cover(screen, embed_in_container));
    }

    /// Replace the route at `index`, dismissing the previous one.
    ///
    /// Returns `false` (and drops `route` without running its callback) when `index` is not in
    /// the stack.
    pub fn set_route(&mut self, index: usize, route: Route<S>) -> bool {
        if index >= self.routes.len() {
            trace!(index, len = self.routes.len(), "set_route past the end");
            return false;
        }
        let route = self.adopt(route);
        let old = core::mem::replace(&mut self.routes[index], route);
        debug!(index, "replacing route");
        old.dismiss();
        true
    }

    /// Replace the whole stack.
    ///
    /// Every previous route is dismissed, innermost first.
    pub fn replace(&mut self, routes: impl IntoIterator<Item = Route<S>>) {
        let fresh = routes.into_iter().map(|r| self.adopt(r)).collect();
        let old = core::mem::replace(&mut self.routes, fresh);
        debug!(removed = old.len(), len = self.routes.len(), "replacing route stack");
        dismiss_all_of(old);
    }

    /// Remove every route with index `>= index`.
    ///
    /// Indices at or past the end leave the stack unchanged.
    pub fn truncate_to_index(&mut self, index: usize) {
        if index >= self.routes.len() {
            trace!(index, len = self.routes.len(), "truncate past the end");
            return;
        }
        let removed = self.routes.split_off(index);
        debug!(index, removed = removed.len(), "truncating route stack");
        dismiss_all_of(removed);
    }

    /// Number of leading routes back operations may not remove.
    fn floor(&self) -> usize {
        match self.routes.first() {
            Some(r) if r.style() == Style::Root => 1,
            _ => 0,
        }
    }

    /// Whether [`go_back`](Self::go_back) would remove anything.
    pub fn can_go_back(&self) -> bool {
        self.routes.len() > self.floor()
    }

    fn refuse(&self, err: NavigationError) -> Result<(), NavigationError> {
        match self.policy {
            BackPolicy::Ignore => {
                trace!(%err, "ignoring back operation");
                Ok(())
            }
            BackPolicy::Report => Err(err),
        }
    }

    /// Remove the innermost route.
    pub fn go_back(&mut self) -> Result<(), NavigationError> {
        self.go_back_by(1)
    }

    /// Remove the `count` innermost routes.
    ///
    /// Nothing is removed when fewer than `count` routes sit above the root.
    pub fn go_back_by(&mut self, count: usize) -> Result<(), NavigationError> {
        let available = self.routes.len() - self.floor();
        if count > available {
            return self.refuse(if available == 0 {
                NavigationError::AtRoot
            } else {
                NavigationError::NotEnoughRoutes {
                    requested: count,
                    available,
                }
            });
        }
        self.truncate_to_index(self.routes.len() - count);
        Ok(())
    }

    /// Keep routes `0..=index`, removing everything above.
    pub fn go_back_to(&mut self, index: usize) -> Result<(), NavigationError> {
        if index >= self.routes.len() {
            return self.refuse(NavigationError::OutOfRange {
                index,
                len: self.routes.len(),
            });
        }
        self.truncate_to_index(index + 1);
        Ok(())
    }

    /// Keep only the first route.
    ///
    /// A no-op on stacks with one route or none.
    pub fn go_back_to_root(&mut self) {
        self.truncate_to_index(1);
    }

    /// Remove the innermost sheet or cover, along with everything pushed above it.
    pub fn dismiss(&mut self) -> Result<(), NavigationError> {
        match self.routes.iter().rposition(|r| r.style().is_presented()) {
            Some(index) => {
                self.truncate_to_index(index);
                Ok(())
            }
            None => self.refuse(NavigationError::NothingPresented),
        }
    }

    /// Remove every sheet and cover, keeping the routes beneath the outermost one.
    pub fn dismiss_all(&mut self) {
        if let Some(index) = self.routes.iter().position(|r| r.style().is_presented()) {
            self.truncate_to_index(index);
        }
    }
}

fn dismiss_all_of<S>(routes: Vec<Route<S>>) {
    for route in routes.into_iter().rev() {
        route.dismiss();
    }
}
