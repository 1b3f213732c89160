// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Back-navigation policy and the errors it can report.

/// What a back operation does when there is nothing it may remove.
///
/// Set on a [`RouteStack`](crate::RouteStack) with
/// [`RouteStack::set_policy`](crate::RouteStack::set_policy).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum BackPolicy {
    /// Leave the stack unchanged and return `Ok(())`.
    #[default]
    Ignore,
    /// Leave the stack unchanged and return a [`NavigationError`].
    Report,
}

/// A back operation that could not be carried out.
///
/// Only returned under [`BackPolicy::Report`]. The stack is never modified when an error is
/// returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum NavigationError {
    /// The stack holds only its root (or nothing), so there is no route to go back from.
    #[error("cannot go back: no route above the root")]
    AtRoot,
    /// A back operation asked for more routes than can be removed.
    #[error("cannot go back by {requested}: only {available} routes above the root")]
    NotEnoughRoutes {
        /// Number of routes the caller asked to remove.
        requested: usize,
        /// Number of routes that could have been removed.
        available: usize,
    },
    /// The target index is not in the stack.
    #[error("index {index} is out of range for a stack of {len} routes")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Stack length at the time of the request.
        len: usize,
    },
    /// [`RouteStack::dismiss`](crate::RouteStack::dismiss) found no sheet or cover to dismiss.
    #[error("nothing is presented")]
    NothingPresented,
}
