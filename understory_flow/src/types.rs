// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for flows: host capabilities, presentations, and the rendered tree.
//!
//! ## Overview
//!
//! These types describe what the host runtime can do and what the
//! [`node`](crate::node) renderer hands back to it.

use alloc::boxed::Box;
use understory_route_stack::Style;

bitflags::bitflags! {
    /// Transition support of the host runtime.
    ///
    /// Resolved once when a flow is configured. The renderer consults it through a
    /// [`StyleTable`]; the [`Sequencer`](crate::sequencer::Sequencer) uses it to decide how finely
    /// a compound change must be sliced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Several push levels can open or close in a single transition.
        const ATOMIC_PUSH         = 0b0000_0001;
        /// Several sheets or covers can open in a single transition.
        const ATOMIC_PRESENTATION = 0b0000_0010;
        /// Full-screen covers exist. Without it, covers are shown as sheets.
        const COVER               = 0b0000_0100;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::COVER
    }
}

/// How a child node is shown by its parent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Presentation {
    /// Push-navigated destination inside the parent's container.
    Push,
    /// Modal sheet.
    Sheet,
    /// Full-screen modal cover.
    Cover,
}

impl Presentation {
    /// True for [`Sheet`](Self::Sheet) and [`Cover`](Self::Cover).
    #[inline]
    pub const fn is_modal(self) -> bool {
        matches!(self, Self::Sheet | Self::Cover)
    }
}

/// Maps a requested [`Style`] to the presentation the host can actually show.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StyleTable {
    sheet: Presentation,
    cover: Presentation,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::for_capabilities(Capabilities::default())
    }
}

impl StyleTable {
    /// Build the table for a host.
    pub fn for_capabilities(capabilities: Capabilities) -> Self {
        Self {
            sheet: Presentation::Sheet,
            cover: if capabilities.contains(Capabilities::COVER) {
                Presentation::Cover
            } else {
                Presentation::Sheet
            },
        }
    }

    /// Presentation used for a child introduced with `style`.
    ///
    /// A [`Style::Root`] entry below index 0 cannot be presented and is shown as a push.
    pub fn resolve(&self, style: Style) -> Presentation {
        match style {
            Style::Root | Style::Push => Presentation::Push,
            Style::Sheet => self.sheet,
            Style::Cover => self.cover,
        }
    }
}

/// Result of rendering one stack index.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered<V> {
    /// The index is past the end of the stack, for example during an in-flight dismissal.
    Empty,
    /// A screen and, recursively, whatever it presents.
    Screen(ScreenNode<V>),
}

impl<V> Rendered<V> {
    /// The screen node, if any.
    pub fn as_screen(&self) -> Option<&ScreenNode<V>> {
        match self {
            Self::Empty => None,
            Self::Screen(node) => Some(node),
        }
    }

    /// Number of screens in this subtree.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self;
        while let Self::Screen(node) = cur {
            depth += 1;
            match &node.child {
                Some(child) => cur = &child.node,
                None => break,
            }
        }
        depth
    }

    /// Iterate over screen nodes, outermost first.
    pub fn screens(&self) -> impl Iterator<Item = &ScreenNode<V>> {
        let mut cur = self.as_screen();
        core::iter::from_fn(move || {
            let node = cur?;
            cur = node.child.as_ref().and_then(|c| c.node.as_screen());
            Some(node)
        })
    }
}

/// A rendered screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenNode<V> {
    /// Stack index of the route this node shows.
    pub index: usize,
    /// Content produced by the screen builder.
    pub content: V,
    /// Whether this node is wrapped in a fresh navigation container.
    pub wraps_container: bool,
    /// Whether this node is shown inside any navigation container (its own or an ancestor's).
    pub in_container: bool,
    /// The next route, if the stack continues.
    pub child: Option<Child<V>>,
}

/// A child shown by a [`ScreenNode`].
#[derive(Clone, Debug, PartialEq)]
pub struct Child<V> {
    /// How the parent shows it.
    pub presentation: Presentation,
    /// The child subtree.
    pub node: Box<Rendered<V>>,
}
