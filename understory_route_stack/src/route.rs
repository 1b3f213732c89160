// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single stack entry: a screen plus how it was presented.

use alloc::boxed::Box;

/// How a route was introduced relative to its predecessor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Style {
    /// First entry of a stack; never presented by anything.
    Root,
    /// Stacked inside the current navigation container.
    Push,
    /// Modal sheet over the current content.
    Sheet,
    /// Full-screen modal cover over the current content.
    Cover,
}

impl Style {
    /// True for modal styles ([`Sheet`](Self::Sheet) and [`Cover`](Self::Cover)).
    #[inline]
    pub const fn is_presented(self) -> bool {
        matches!(self, Self::Sheet | Self::Cover)
    }

    /// True for [`Sheet`](Self::Sheet).
    #[inline]
    pub const fn is_sheet(self) -> bool {
        matches!(self, Self::Sheet)
    }

    /// True for [`Cover`](Self::Cover).
    #[inline]
    pub const fn is_cover(self) -> bool {
        matches!(self, Self::Cover)
    }
}

/// Identity of a route within one [`RouteStack`](crate::RouteStack).
///
/// Assigned when the route enters the stack and never reused by that stack, so a route pushed at
/// an index some earlier route used to occupy gets a different id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RouteId(u64);

/// One entry in a [`RouteStack`](crate::RouteStack).
///
/// The `screen` payload may be mutated in place (for example stepping a counter); doing so never
/// changes the route's index, style or container flag.
///
/// The optional dismissal callback runs when the route leaves a live stack, either through
/// truncation or because a replace discarded it. It is an `FnOnce`, so it runs at most once.
pub struct Route<S> {
    /// Opaque payload identifying what to render.
    pub screen: S,
    style: Style,
    embed_in_container: bool,
    id: Option<RouteId>,
    on_dismiss: Option<Box<dyn FnOnce()>>,
}

impl<S: core::fmt::Debug> core::fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Route")
            .field("screen", &self.screen)
            .field("style", &self.style)
            .field("embed_in_container", &self.embed_in_container)
            .field("id", &self.id)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

impl<S> Route<S> {
    /// Create a route with an explicit style.
    pub fn new(screen: S, style: Style, embed_in_container: bool) -> Self {
        Self {
            screen,
            style,
            embed_in_container,
            id: None,
            on_dismiss: None,
        }
    }

    /// A [`Style::Root`] route.
    pub fn root(screen: S, embed_in_container: bool) -> Self {
        Self::new(screen, Style::Root, embed_in_container)
    }

    /// A [`Style::Push`] route. Pushed routes live in their parent's container.
    pub fn push(screen: S) -> Self {
        Self::new(screen, Style::Push, false)
    }

    /// A [`Style::Sheet`] route.
    pub fn sheet(screen: S, embed_in_container: bool) -> Self {
        Self::new(screen, Style::Sheet, embed_in_container)
    }

    /// A [`Style::Cover`] route.
    pub fn cover(screen: S, embed_in_container: bool) -> Self {
        Self::new(screen, Style::Cover, embed_in_container)
    }

    /// Attach a callback that runs when this route is removed from a stack.
    pub fn with_on_dismiss(mut self, on_dismiss: impl FnOnce() + 'static) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }

    /// How this route was introduced.
    #[inline]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Whether this route starts a fresh navigation container.
    #[inline]
    pub fn embeds_container(&self) -> bool {
        self.embed_in_container
    }

    /// Identity assigned by the stack holding this route; `None` before it enters one.
    #[inline]
    pub fn id(&self) -> Option<RouteId> {
        self.id
    }

    /// Whether a dismissal callback is still attached.
    #[inline]
    pub fn has_on_dismiss(&self) -> bool {
        self.on_dismiss.is_some()
    }

    /// Same style and container flag, ignoring the payload.
    pub fn same_structure(&self, other: &Self) -> bool {
        self.style == other.style && self.embed_in_container == other.embed_in_container
    }

    /// A copy of this route's payload, style and container flag, without its callback or id.
    pub fn detached(&self) -> Self
    where
        S: Clone,
    {
        Self::new(self.screen.clone(), self.style, self.embed_in_container)
    }

    pub(crate) fn assign_id(&mut self, id: u64) {
        self.id = Some(RouteId(id));
    }

    /// Consume the route, running its dismissal callback if one is attached.
    pub(crate) fn dismiss(mut self) -> S {
        if let Some(on_dismiss) = self.on_dismiss.take() {
            on_dismiss();
        }
        self.screen
    }
}

impl<S: PartialEq> Route<S> {
    /// Same structure and an equal payload.
    ///
    /// Callbacks are not compared.
    pub fn same_destination(&self, other: &Self) -> bool {
        self.same_structure(other) && self.screen == other.screen
    }
}
