// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the route stack algebra.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use understory_route_stack::{Route, RouteStack, Style};

type Log = Rc<RefCell<Vec<usize>>>;

fn style() -> impl Strategy<Value = Style> {
    prop_oneof![Just(Style::Push), Just(Style::Sheet), Just(Style::Cover)]
}

/// A root followed by up to 12 routes of arbitrary style; screens are their own indices.
fn shape() -> impl Strategy<Value = Vec<(Style, bool)>> {
    prop::collection::vec((style(), any::<bool>()), 0..12)
}

fn build(shape: &[(Style, bool)], log: &Log) -> RouteStack<usize> {
    let root = core::iter::once((Style::Root, true));
    root.chain(shape.iter().copied())
        .enumerate()
        .map(|(i, (style, embed))| {
            let log = log.clone();
            Route::new(i, style, embed && style != Style::Push)
                .with_on_dismiss(move || log.borrow_mut().push(i))
        })
        .collect()
}

fn snapshot(s: &RouteStack<usize>) -> Vec<(usize, Style, bool)> {
    s.iter()
        .map(|r| (r.screen, r.style(), r.embeds_container()))
        .collect()
}

proptest! {
    #[test]
    fn truncation_keeps_prefix_and_dismisses_suffix_in_reverse(
        shape in shape(),
        cut in 0_usize..16,
    ) {
        let log = Log::default();
        let mut s = build(&shape, &log);
        let before = snapshot(&s);
        s.truncate_to_index(cut);

        let kept = cut.min(before.len());
        prop_assert_eq!(snapshot(&s), before[..kept].to_vec());
        let expected: Vec<usize> = (kept..before.len()).rev().collect();
        prop_assert_eq!(log.borrow().clone(), expected);
    }

    #[test]
    fn push_then_go_back_restores_stack(shape in shape(), screen in 100_usize..200) {
        let log = Log::default();
        let mut s = build(&shape, &log);
        let before = snapshot(&s);
        s.push(screen);
        s.go_back().unwrap();
        prop_assert_eq!(snapshot(&s), before);
        prop_assert!(log.borrow().is_empty());
    }

    #[test]
    fn callbacks_fire_once_across_repeated_removals(shape in shape()) {
        let log = Log::default();
        let mut s = build(&shape, &log);
        let len = s.len();
        s.dismiss_all();
        s.go_back_to_root();
        s.go_back_to_root();
        s.truncate_to_index(0);
        s.truncate_to_index(0);

        let mut fired = log.borrow().clone();
        fired.sort_unstable();
        prop_assert_eq!(fired, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn payload_edits_leave_structure_alone(shape in shape(), at in 0_usize..13) {
        let log = Log::default();
        let mut s = build(&shape, &log);
        let structure: Vec<_> = s.iter().map(|r| (r.style(), r.embeds_container())).collect();
        if let Some(screen) = s.screen_mut(at) {
            *screen += 1000;
        }
        let after: Vec<_> = s.iter().map(|r| (r.style(), r.embeds_container())).collect();
        prop_assert_eq!(structure, after);
        prop_assert_eq!(s.len(), shape.len() + 1);
    }
}
