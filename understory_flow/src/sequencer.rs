// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack mutation sequencer: apply compound changes one transition at a time.
//!
//! ## Overview
//!
//! Many UI runtimes cannot present two modals, or jump several push levels, in a single state
//! transition. When the target stack differs from the live one by more than one presentation
//! boundary, [`plan`] breaks the change into single steps and [`Sequencer`] applies them in order,
//! waiting for the previous transition to settle between steps.
//!
//! ## Plan
//!
//! 1. Retarget: routes in the structurally shared prefix whose screens differ are swapped for
//!    their targets in one step. Structure is unchanged.
//! 2. Dismiss: extra sheets and covers close one at a time, innermost first. Routes pushed above a
//!    modal close with it.
//! 3. Pop: extra pushed routes go in one step.
//! 4. Append: each new route opens in its own step.
//!
//! With [`Capabilities::ATOMIC_PUSH`], a run of pushes opens in one step. With both
//! [`Capabilities::ATOMIC_PUSH`] and [`Capabilities::ATOMIC_PRESENTATION`] the whole change is a
//! single [`Step::Replace`].
//!
//! ## Timing
//!
//! The sequencer never blocks and owns no clock. The host passes its own notion of "now" and
//! reports render passes with [`Sequencer::frame_rendered`]. The first step applies as soon as a
//! sequence begins; each later step applies on a [`Sequencer::poll`] once
//! [`SequencerConfig::step_delay`] has elapsed since the previous step and at least one frame has
//! been rendered since.
//!
//! ## Interruptions
//!
//! - Beginning a new sequence replans from the live stack and drops the remaining steps.
//! - If the live stack no longer holds exactly the routes the last step left (the user dismissed
//!   something mid-sequence, possibly pushing something else in the same frame), the remaining
//!   steps are dropped so dismissed routes are not brought back and stale targets are not stacked
//!   on routes the plan never saw.
//!
//! ```
//! use core::time::Duration;
//! use understory_flow::sequencer::{Sequencer, SequencerConfig};
//! use understory_route_stack::{Route, RouteStack};
//!
//! let mut live = RouteStack::with_root(0, true);
//! let mut seq = Sequencer::new(SequencerConfig::default());
//!
//! let target = RouteStack::from_routes([Route::root(0, true), Route::push(1), Route::sheet(2, true)]);
//! let planned = seq.begin(&mut live, target, Duration::ZERO);
//! assert_eq!(planned, 2);
//! assert_eq!(live.len(), 2);
//!
//! seq.frame_rendered();
//! let later = Duration::ZERO + seq.config().step_delay;
//! assert!(seq.poll(&mut live, later).is_some());
//! assert_eq!(live.len(), 3);
//! assert!(seq.is_idle());
//! ```

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;
use tracing::debug;
use understory_route_stack::{Route, RouteId, RouteStack, Style};

use crate::types::Capabilities;

/// Default wait between steps, long enough for a typical modal transition to settle.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(650);

/// Sequencer configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Time between consecutive steps.
    pub step_delay: Duration,
    /// Host transition support.
    pub capabilities: Capabilities,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            capabilities: Capabilities::default(),
        }
    }
}

/// One transition of a sequenced change.
///
/// Each variant records the stack length after the step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Swap routes `0..len` whose screens differ for their targets.
    Retarget {
        /// Length of the structurally shared prefix.
        len: usize,
    },
    /// Truncate the stack to `len` routes.
    Truncate {
        /// Length after truncation.
        len: usize,
    },
    /// Append target routes until the stack holds `len`.
    Append {
        /// Length after appending.
        len: usize,
    },
    /// Apply the whole target at once.
    Replace {
        /// Target length.
        len: usize,
    },
}

impl Step {
    /// Stack length once this step has been applied.
    pub fn resulting_len(self) -> usize {
        match self {
            Self::Retarget { len }
            | Self::Truncate { len }
            | Self::Append { len }
            | Self::Replace { len } => len,
        }
    }
}

/// Plan the steps that turn `current` into `target`.
///
/// Steps that would leave the stack unchanged are omitted; equal stacks yield an empty plan.
pub fn plan<S: PartialEq>(
    current: &[Route<S>],
    target: &[Route<S>],
    capabilities: Capabilities,
) -> Vec<Step> {
    let shared = current
        .iter()
        .zip(target)
        .take_while(|(c, t)| c.same_structure(t))
        .count();
    let retarget = current[..shared]
        .iter()
        .zip(&target[..shared])
        .any(|(c, t)| c.screen != t.screen);

    let mut steps = Vec::new();
    if capabilities.contains(Capabilities::ATOMIC_PUSH | Capabilities::ATOMIC_PRESENTATION) {
        if retarget || current.len() != shared || target.len() != shared {
            steps.push(Step::Replace { len: target.len() });
        }
        return steps;
    }

    if retarget {
        steps.push(Step::Retarget { len: shared });
    }

    let mut len = current.len();
    let first_presented = current[shared..]
        .iter()
        .position(|r| r.style().is_presented())
        .map_or(len, |p| p + shared);
    while len > first_presented {
        len = current[first_presented..len]
            .iter()
            .rposition(|r| r.style().is_presented())
            .map_or(first_presented, |p| p + first_presented);
        steps.push(Step::Truncate { len });
    }

    if len > shared {
        len = shared;
        steps.push(Step::Truncate { len });
    }

    let atomic_push = capabilities.contains(Capabilities::ATOMIC_PUSH);
    while len < target.len() {
        let mut next = len + 1;
        if atomic_push && is_push(target[len].style()) {
            while next < target.len() && is_push(target[next].style()) {
                next += 1;
            }
        }
        len = next;
        steps.push(Step::Append { len });
    }
    steps
}

fn is_push(style: Style) -> bool {
    !style.is_presented()
}

/// Applies a planned change to a live stack, one step per settled transition.
///
/// See the [module docs](self) for the plan and timing rules.
pub struct Sequencer<S> {
    config: SequencerConfig,
    // Target routes not yet moved into the live stack.
    target: Vec<Option<Route<S>>>,
    steps: VecDeque<Step>,
    // Route ids the last step left in the live stack.
    expected: Vec<RouteId>,
    due: Duration,
    rendered: bool,
}

impl<S> core::fmt::Debug for Sequencer<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sequencer")
            .field("config", &self.config)
            .field("steps", &self.steps)
            .field("expected", &self.expected)
            .field("due", &self.due)
            .field("rendered", &self.rendered)
            .finish_non_exhaustive()
    }
}

impl<S> Default for Sequencer<S> {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

impl<S> Sequencer<S> {
    /// Create an idle sequencer.
    pub fn new(config: SequencerConfig) -> Self {
        Self {
            config,
            target: Vec::new(),
            steps: VecDeque::new(),
            expected: Vec::new(),
            due: Duration::ZERO,
            rendered: true,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> SequencerConfig {
        self.config
    }

    /// True when no steps are outstanding.
    pub fn is_idle(&self) -> bool {
        self.steps.is_empty()
    }

    /// Outstanding steps, in application order.
    pub fn pending(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().copied()
    }

    /// Earliest time the next step may apply, if any remain.
    pub fn next_deadline(&self) -> Option<Duration> {
        (!self.steps.is_empty()).then_some(self.due)
    }

    /// Report that the host rendered a frame.
    pub fn frame_rendered(&mut self) {
        self.rendered = true;
    }

    /// Drop the remaining steps.
    ///
    /// Target routes that never reached the live stack are dropped without running callbacks.
    pub fn cancel(&mut self) {
        if !self.steps.is_empty() {
            debug!(remaining = self.steps.len(), "cancelling sequence");
        }
        self.steps.clear();
        self.target.clear();
    }
}

impl<S: PartialEq> Sequencer<S> {
    /// Start moving `stack` towards `target`, applying the first step immediately.
    ///
    /// Any sequence in flight is superseded. Returns the number of planned steps.
    pub fn begin(&mut self, stack: &mut RouteStack<S>, target: RouteStack<S>, now: Duration) -> usize {
        self.cancel();
        let steps = plan(stack.as_slice(), target.as_slice(), self.config.capabilities);
        debug!(
            from = stack.len(),
            to = target.len(),
            steps = steps.len(),
            "sequencing route stack change"
        );
        let planned = steps.len();
        self.target = target.into_routes().into_iter().map(Some).collect();
        self.steps = steps.into();
        self.expected = stack.ids().collect();
        self.due = now;
        self.rendered = true;
        let _ = self.poll(stack, now);
        planned
    }

    /// Edit a copy of the live stack and sequence the result.
    ///
    /// The draft starts as a callback-free copy of `stack`. Routes the edit leaves in place are
    /// kept as they are in the live stack, callbacks included.
    pub fn begin_with(
        &mut self,
        stack: &mut RouteStack<S>,
        now: Duration,
        edit: impl FnOnce(&mut RouteStack<S>),
    ) -> usize
    where
        S: Clone,
    {
        let mut draft = stack.detached();
        edit(&mut draft);
        self.begin(stack, draft, now)
    }

    /// Apply the next step if it is due.
    ///
    /// Returns the applied step.
    pub fn poll(&mut self, stack: &mut RouteStack<S>, now: Duration) -> Option<Step> {
        let step = *self.steps.front()?;
        if !self.rendered || now < self.due {
            return None;
        }
        if !stack.ids().eq(self.expected.iter().copied()) {
            debug!(
                expected = self.expected.len(),
                actual = stack.len(),
                "route stack changed mid-sequence"
            );
            self.cancel();
            return None;
        }
        self.steps.pop_front();
        self.apply(stack, step);
        self.expected = stack.ids().collect();
        self.rendered = false;
        self.due = now + self.config.step_delay;
        debug!(?step, remaining = self.steps.len(), "applied sequence step");
        if self.steps.is_empty() {
            self.target.clear();
        }
        Some(step)
    }

    fn apply(&mut self, stack: &mut RouteStack<S>, step: Step) {
        match step {
            Step::Retarget { len } => {
                for i in 0..len {
                    let differs = match (stack.get(i), self.target.get(i)) {
                        (Some(live), Some(Some(t))) => !live.same_destination(t),
                        _ => false,
                    };
                    if differs && let Some(route) = self.target[i].take() {
                        stack.set_route(i, route);
                    }
                }
            }
            Step::Truncate { len } => stack.truncate_to_index(len),
            Step::Append { len } => self.append(stack, len),
            Step::Replace { len } => {
                let keep = stack
                    .iter()
                    .zip(&self.target)
                    .take_while(|(live, t)| t.as_ref().is_some_and(|t| live.same_destination(t)))
                    .count();
                stack.truncate_to_index(keep);
                self.append(stack, len);
            }
        }
    }

    fn append(&mut self, stack: &mut RouteStack<S>, len: usize) {
        while stack.len() < len {
            match self.target.get_mut(stack.len()).and_then(Option::take) {
                Some(route) => stack.push_route(route),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn numbers() -> Vec<Route<u32>> {
        vec![
            Route::root(0, true),
            Route::push(1),
            Route::push(2),
            Route::push(3),
            Route::sheet(4, true),
            Route::push(5),
        ]
    }

    fn lens(steps: &[Step]) -> Vec<usize> {
        steps.iter().map(|s| s.resulting_len()).collect()
    }

    fn screens(s: &RouteStack<u32>) -> Vec<u32> {
        s.iter().map(|r| r.screen).collect()
    }

    const NONE: Capabilities = Capabilities::empty();

    #[test]
    fn root_to_deep_stack_appends_one_route_per_step() {
        let steps = plan(&[Route::root(0, true)], &numbers(), NONE);
        assert_eq!(
            steps,
            vec![
                Step::Append { len: 2 },
                Step::Append { len: 3 },
                Step::Append { len: 4 },
                Step::Append { len: 5 },
                Step::Append { len: 6 },
            ]
        );
    }

    #[test]
    fn equal_stacks_need_no_steps() {
        assert!(plan(&numbers(), &numbers(), NONE).is_empty());
        assert!(plan(&numbers(), &numbers(), Capabilities::all()).is_empty());
    }

    #[test]
    fn modals_close_one_at_a_time() {
        let current = vec![
            Route::root(0_u32, true),
            Route::sheet(1, true),
            Route::push(2),
            Route::cover(3, true),
            Route::push(4),
        ];
        let steps = plan(&current, &[Route::root(0, true)], NONE);
        assert_eq!(
            steps,
            vec![Step::Truncate { len: 3 }, Step::Truncate { len: 1 }]
        );
    }

    #[test]
    fn extra_pushes_pop_together() {
        let current = vec![Route::root(0_u32, true), Route::push(1), Route::push(2)];
        let steps = plan(&current, &[Route::root(0, true)], NONE);
        assert_eq!(steps, vec![Step::Truncate { len: 1 }]);
    }

    #[test]
    fn differing_screens_retarget_in_place() {
        let current = vec![Route::root(0_u32, true), Route::push(1)];
        let target = vec![Route::root(5_u32, true), Route::push(1)];
        assert_eq!(plan(&current, &target, NONE), vec![Step::Retarget { len: 2 }]);
    }

    #[test]
    fn structural_divergence_dismisses_then_appends() {
        let current = vec![Route::root(0_u32, true), Route::push(1), Route::sheet(2, true)];
        let target = vec![
            Route::root(0_u32, true),
            Route::push(1),
            Route::push(7),
            Route::cover(8, true),
        ];
        assert_eq!(
            lens(&plan(&current, &target, NONE)),
            vec![2, 3, 4],
        );
    }

    #[test]
    fn atomic_push_collapses_push_runs() {
        let steps = plan(&[Route::root(0, true)], &numbers(), Capabilities::ATOMIC_PUSH);
        assert_eq!(lens(&steps), vec![4, 5, 6]);
    }

    #[test]
    fn fully_atomic_host_replaces_in_one_step() {
        let steps = plan(&[Route::root(0, true)], &numbers(), Capabilities::all());
        assert_eq!(steps, vec![Step::Replace { len: 6 }]);
    }

    #[test]
    fn steps_wait_for_delay_and_a_rendered_frame() {
        let mut live = RouteStack::with_root(0_u32, true);
        let mut seq = Sequencer::new(SequencerConfig {
            step_delay: Duration::from_millis(100),
            capabilities: NONE,
        });
        let t = Duration::from_millis;
        assert_eq!(seq.begin(&mut live, numbers().into(), t(0)), 5);
        assert_eq!(screens(&live), vec![0, 1]);

        // Delay elapsed, but nothing rendered yet.
        assert_eq!(seq.poll(&mut live, t(150)), None);
        seq.frame_rendered();
        // Rendered, but delay not elapsed.
        assert_eq!(seq.poll(&mut live, t(50)), None);
        assert_eq!(seq.next_deadline(), Some(t(100)));

        let mut snapshots = vec![screens(&live)];
        let mut now = 100;
        while !seq.is_idle() {
            seq.frame_rendered();
            let step = seq.poll(&mut live, t(now));
            assert!(step.is_some());
            snapshots.push(screens(&live));
            now += 100;
        }
        for pair in snapshots.windows(2) {
            assert_eq!(pair[1].len(), pair[0].len() + 1);
            assert_eq!(pair[1][..pair[0].len()], pair[0][..]);
        }
        assert_eq!(screens(&live), vec![0, 1, 2, 3, 4, 5]);
        assert!(live.get(4).unwrap().style().is_sheet());
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn user_dismissal_mid_sequence_drops_the_rest() {
        let mut live = RouteStack::with_root(0_u32, true);
        let mut seq = Sequencer::new(SequencerConfig {
            step_delay: Duration::ZERO,
            capabilities: NONE,
        });
        seq.begin(&mut live, numbers().into(), Duration::ZERO);
        seq.frame_rendered();
        seq.poll(&mut live, Duration::ZERO);
        assert_eq!(live.len(), 3);

        // Back-swipe from the host.
        live.truncate_to_index(2);
        seq.frame_rendered();
        assert_eq!(seq.poll(&mut live, Duration::ZERO), None);
        assert!(seq.is_idle());
        assert_eq!(screens(&live), vec![0, 1]);
    }

    #[test]
    fn dismissal_and_push_in_one_frame_drops_the_rest() {
        let mut live = RouteStack::with_root(0_u32, true);
        let mut seq = Sequencer::new(SequencerConfig {
            step_delay: Duration::ZERO,
            capabilities: NONE,
        });
        let target =
            RouteStack::from_routes([Route::root(0, true), Route::push(1), Route::push(2), Route::sheet(3, true)]);
        seq.begin(&mut live, target, Duration::ZERO);
        assert_eq!(screens(&live), vec![0, 1]);

        // Same length as before, different route on top.
        live.truncate_to_index(1);
        live.push(9);
        while !seq.is_idle() {
            seq.frame_rendered();
            let _ = seq.poll(&mut live, Duration::ZERO);
        }
        assert_eq!(screens(&live), vec![0, 9]);
    }

    #[test]
    fn payload_edits_mid_sequence_do_not_cancel() {
        let mut live = RouteStack::with_root(0_u32, true);
        let mut seq = Sequencer::new(SequencerConfig {
            step_delay: Duration::ZERO,
            capabilities: NONE,
        });
        let target = RouteStack::from_routes([Route::root(0, true), Route::push(1), Route::push(2)]);
        seq.begin(&mut live, target, Duration::ZERO);
        *live.screen_mut(1).unwrap() += 10;
        seq.frame_rendered();
        assert_eq!(seq.poll(&mut live, Duration::ZERO), Some(Step::Append { len: 3 }));
        assert_eq!(screens(&live), vec![0, 11, 2]);
    }

    #[test]
    fn new_sequence_supersedes_and_replans_from_live_stack() {
        let mut live = RouteStack::with_root(0_u32, true);
        let mut seq = Sequencer::new(SequencerConfig {
            step_delay: Duration::ZERO,
            capabilities: NONE,
        });
        seq.begin(&mut live, numbers().into(), Duration::ZERO);
        assert_eq!(live.len(), 2);

        let target = RouteStack::from_routes([Route::root(0, true), Route::cover(9, true)]);
        // Pop push(1), then present the cover.
        assert_eq!(seq.begin(&mut live, target, Duration::ZERO), 2);
        assert_eq!(screens(&live), vec![0]);
        seq.frame_rendered();
        seq.poll(&mut live, Duration::ZERO);
        assert_eq!(screens(&live), vec![0, 9]);
        assert!(seq.is_idle());
    }

    #[test]
    fn begin_with_keeps_live_routes_and_their_callbacks() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let f = fired.clone();
        let mut live = RouteStack::from_routes([
            Route::root(0_u32, true).with_on_dismiss(move || f.borrow_mut().push(0)),
        ]);
        let mut seq = Sequencer::default();
        let planned = seq.begin_with(&mut live, Duration::ZERO, |draft| {
            for n in [1, 2, 3] {
                draft.push(n);
            }
        });
        assert_eq!(planned, 3);
        assert!(live.get(0).unwrap().has_on_dismiss());
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn retarget_dismisses_replaced_routes() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let f = fired.clone();
        let mut live = RouteStack::from_routes([
            Route::root(0_u32, true),
            Route::push(1).with_on_dismiss(move || f.borrow_mut().push(1)),
        ]);
        let mut seq = Sequencer::default();
        let target = RouteStack::from_routes([Route::root(0, true), Route::push(2)]);
        assert_eq!(seq.begin(&mut live, target, Duration::ZERO), 1);
        assert_eq!(screens(&live), vec![0, 2]);
        assert_eq!(*fired.borrow(), vec![1]);
    }

    #[test]
    fn replace_keeps_matching_prefix() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let f = fired.clone();
        let mut live = RouteStack::from_routes([
            Route::root(0_u32, true).with_on_dismiss(move || f.borrow_mut().push(0)),
            Route::push(1),
        ]);
        let mut seq = Sequencer::new(SequencerConfig {
            step_delay: DEFAULT_STEP_DELAY,
            capabilities: Capabilities::all(),
        });
        assert_eq!(seq.begin(&mut live, numbers().into(), Duration::ZERO), 1);
        assert_eq!(screens(&live), vec![0, 1, 2, 3, 4, 5]);
        assert!(seq.is_idle());
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn cancel_drops_pending_steps() {
        let mut live = RouteStack::with_root(0_u32, true);
        let mut seq = Sequencer::default();
        seq.begin(&mut live, numbers().into(), Duration::ZERO);
        assert_eq!(seq.pending().count(), 4);
        seq.cancel();
        assert!(seq.is_idle());
        seq.frame_rendered();
        assert_eq!(seq.poll(&mut live, Duration::from_secs(10)), None);
        assert_eq!(live.len(), 2);
    }
}
