#![forbid(unsafe_code)]

//! Property tests: random interleavings of user flips, raw writes to
//! shown, commits and ticks never break shown/actual reconciliation.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use stateview_runtime::reactive::{BatchScope, Observable};
use stateview_runtime::tick::TickQueue;
use stateview_widgets::{Commit, CommitOutcome, StateView, Toggle};

#[derive(Debug, Clone)]
enum Op {
    /// User flips the control (respecting its disabled state).
    Flip,
    /// Resolve the oldest parked commit.
    Resolve(bool),
    /// Resolve through the view rather than a handle.
    ViewCommit(bool),
    /// Resolve the oldest parked commit inside a notification batch.
    BatchedResolve(bool),
    /// Write shown directly, ignoring whether the control is enabled.
    RawWrite(bool),
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Flip),
        2 => any::<bool>().prop_map(Op::Resolve),
        1 => any::<bool>().prop_map(Op::ViewCommit),
        1 => any::<bool>().prop_map(Op::BatchedResolve),
        2 => any::<bool>().prop_map(Op::RawWrite),
        3 => Just(Op::Tick),
    ]
}

struct Model {
    actual: Observable<bool>,
    ticks: TickQueue,
    view: StateView,
    parked: Rc<RefCell<Vec<Commit>>>,
    hook_calls: Rc<RefCell<usize>>,
}

fn model(initial: bool) -> Model {
    let actual = Observable::new(initial);
    let ticks = TickQueue::new();
    let parked: Rc<RefCell<Vec<Commit>>> = Rc::default();
    let hook_calls: Rc<RefCell<usize>> = Rc::default();

    let park = |parked: &Rc<RefCell<Vec<Commit>>>, calls: &Rc<RefCell<usize>>| {
        let (p, c) = (Rc::clone(parked), Rc::clone(calls));
        move |commit: Commit| {
            *c.borrow_mut() += 1;
            p.borrow_mut().push(commit);
        }
    };
    let view = StateView::with_tick_queue(&actual, ticks.clone())
        .on_request_enable(park(&parked, &hook_calls))
        .on_request_disable(park(&parked, &hook_calls));

    Model {
        actual,
        ticks,
        view,
        parked,
        hook_calls,
    }
}

proptest! {
    #[test]
    fn idle_means_shown_equals_actual(
        initial in any::<bool>(),
        ops in proptest::collection::vec(op(), 0..64),
    ) {
        let m = model(initial);
        let mut opened = 0usize;
        let mut expected_actual = initial;

        for op in ops {
            let before = m.view.phase();
            let mut flipped = false;
            match op {
                Op::Flip => {
                    flipped = m.view.view(|ctx| {
                        Toggle::new(ctx.shown()).disabled(!ctx.is_interactive()).flip()
                    });
                }
                Op::Resolve(approved) => {
                    let commit = {
                        let mut parked = m.parked.borrow_mut();
                        (!parked.is_empty()).then(|| parked.remove(0))
                    };
                    if let Some(commit) = commit {
                        let desired = commit.desired();
                        if let CommitOutcome::Applied(v) = commit.resolve(approved) {
                            prop_assert_eq!(v, desired);
                            expected_actual = v;
                        }
                    }
                }
                Op::ViewCommit(approved) => {
                    let desired = m.view.phase().desired();
                    match m.view.commit(approved) {
                        CommitOutcome::Applied(v) => {
                            prop_assert_eq!(Some(v), desired);
                            expected_actual = v;
                        }
                        CommitOutcome::Declined(_) | CommitOutcome::NoPending => {}
                        other => prop_assert!(false, "unexpected outcome {:?}", other),
                    }
                    // The parked handle for that request is now stale.
                    m.parked.borrow_mut().clear();
                }
                Op::BatchedResolve(approved) => {
                    let commit = {
                        let mut parked = m.parked.borrow_mut();
                        (!parked.is_empty()).then(|| parked.remove(0))
                    };
                    if let Some(commit) = commit {
                        let _batch = BatchScope::new();
                        if let CommitOutcome::Applied(v) = commit.resolve(approved) {
                            expected_actual = v;
                        }
                    }
                }
                Op::RawWrite(value) => {
                    m.view.shown().set(value);
                }
                Op::Tick => {
                    m.ticks.run_tick();
                }
            }

            let after = m.view.phase();
            let request_opened = after.is_pending() && after != before;
            if request_opened {
                opened += 1;
            }
            if flipped {
                prop_assert!(request_opened, "an accepted flip must open a request");
            }

            prop_assert_eq!(m.actual.get(), expected_actual);
            if !m.view.is_pending() && !m.view.is_suppressing() {
                prop_assert_eq!(m.view.shown_value(), m.actual.get(), "idle but diverged");
            }
            prop_assert_eq!(
                *m.hook_calls.borrow(),
                opened,
                "every hook call must open exactly one request"
            );
            prop_assert!(m.parked.borrow().len() <= 1, "at most one request outstanding");
        }
    }

    #[test]
    fn commit_false_never_changes_actual(
        initial in any::<bool>(),
        repeats in 1usize..5,
    ) {
        let m = model(initial);
        m.view.view(|ctx| Toggle::new(ctx.shown()).flip());
        for _ in 0..repeats {
            m.view.commit(false);
            prop_assert_eq!(m.actual.get(), initial);
            prop_assert_eq!(m.view.shown_value(), initial);
            m.ticks.run_tick();
        }
        prop_assert_eq!(*m.hook_calls.borrow(), 1);
    }
}
