#![forbid(unsafe_code)]

//! Confirm-before-commit binding between a toggle and an authoritative flag.
//!
//! A [`StateView`] keeps two booleans apart:
//!
//! - **actual**: the host's authoritative [`Observable<bool>`]. It changes
//!   only through a confirmed commit.
//! - **shown**: owned by the view and written by the toggle control. It may
//!   run ahead of actual while a confirmation is pending.
//!
//! When the user flips the control the view does not touch actual. It
//! enters [`Phase::Pending`] and invokes the matching request hook with a
//! [`Commit`] bound to that request. The host confirms however it likes and
//! resolves the commit; the view then applies or discards the change and
//! resets shown to actual without firing a hook for that reset.
//!
//! # Usage
//!
//! ```ignore
//! let developer_mode = Observable::new(false);
//! let parked = Rc::new(RefCell::new(None));
//!
//! let p = Rc::clone(&parked);
//! let view = StateView::new(&developer_mode)
//!     .on_request_enable(move |commit| *p.borrow_mut() = Some(commit));
//!
//! view.view(|ctx| Toggle::new(ctx.shown()).disabled(!ctx.is_interactive()).flip());
//! // ... the host shows a warning, the user approves ...
//! parked.borrow_mut().take().map(Commit::approve);
//! assert!(developer_mode.get());
//!
//! // Once per UI event; ends the reset's suppression window.
//! TickQueue::current().run_tick();
//! assert!(view.is_interactive());
//! ```
//!
//! # Invariants
//!
//! 1. While [`Phase::Idle`] outside a suppression window, shown equals
//!    actual once the triggering notification cycle has finished.
//! 2. At most one request is pending per view.
//! 3. A reset of shown performed by the view never fires a request hook,
//!    even when its notification is delivered late. The suppression flag is
//!    set before the write and cleared on the next [`TickQueue`] tick.
//!    Any other write to shown inside that window is not lost: the clearing
//!    tick opens a request for it.
//! 4. Actual is written only by an approved commit (and by the host).
//!
//! # Failure Modes
//!
//! - Commit with nothing pending: resets shown to actual; outcome
//!   [`CommitOutcome::NoPending`].
//! - Commit for a request that was already resolved while a newer one is
//!   pending: ignored; outcome [`CommitOutcome::Stale`].
//! - Commit after the view was dropped: ignored; outcome
//!   [`CommitOutcome::Detached`].
//! - Host never runs ticks: suppression stays set and later flips are
//!   swallowed. The control reports itself non-interactive in that state.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use stateview_runtime::reactive::{Binding, BindingScope, Observable, bind_mapped2};
use stateview_runtime::tick::TickQueue;
use tracing::{debug, trace};

/// The two intents a user flip can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Request {
    /// The user turned the control on.
    Enable,
    /// The user turned the control off.
    Disable,
}

impl Request {
    /// The request that asks for `desired`.
    #[must_use]
    pub const fn for_desired(desired: bool) -> Self {
        if desired { Self::Enable } else { Self::Disable }
    }

    /// The value actual takes if this request is approved.
    #[must_use]
    pub const fn desired(self) -> bool {
        matches!(self, Self::Enable)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// Identifies one request within a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Reconciliation state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request outstanding.
    #[default]
    Idle,
    /// A request awaits its commit.
    Pending { id: RequestId, request: Request },
}

impl Phase {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Requested value, if a request is pending.
    #[must_use]
    pub const fn desired(&self) -> Option<bool> {
        match self {
            Self::Idle => None,
            Self::Pending { request, .. } => Some(request.desired()),
        }
    }
}

/// What a commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Approved: actual now holds the carried value.
    Applied(bool),
    /// Declined: actual kept the carried value.
    Declined(bool),
    /// Nothing was pending; shown was reset to actual.
    NoPending,
    /// The commit belonged to an earlier request; nothing changed.
    Stale,
    /// The view no longer exists; nothing changed.
    Detached,
}

impl CommitOutcome {
    /// Whether actual was changed by this commit.
    #[must_use]
    pub const fn applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

type Hook = Rc<dyn Fn(Commit)>;

#[derive(Default)]
struct Hooks {
    enable: Option<Hook>,
    disable: Option<Hook>,
}

impl Hooks {
    fn get(&self, request: Request) -> Option<Hook> {
        match request {
            Request::Enable => self.enable.clone(),
            Request::Disable => self.disable.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Reconciler {
    phase: Phase,
    suppressing: bool,
    /// Bumped per reset; only the latest reset's tick clears suppression.
    suppress_epoch: u64,
    next_id: u64,
}

struct Core {
    actual: Observable<bool>,
    shown: Observable<bool>,
    state: RefCell<Reconciler>,
    hooks: RefCell<Hooks>,
    ticks: TickQueue,
}

impl Core {
    fn on_shown_changed(self: &Rc<Self>, value: bool) {
        let commit = {
            let mut state = self.state.borrow_mut();
            if state.suppressing {
                trace!(value, "shown state change suppressed");
                return;
            }
            if let Phase::Pending { id, .. } = state.phase {
                debug!(request = id.0, value, "shown state changed while pending; ignored");
                return;
            }
            if value == self.actual.get() {
                return;
            }
            let id = RequestId(state.next_id);
            state.next_id += 1;
            let request = Request::for_desired(value);
            state.phase = Phase::Pending { id, request };
            debug!(request = id.0, kind = request.name(), "confirmation requested");
            Commit {
                core: Rc::downgrade(self),
                id,
                request,
            }
        };

        // Hooks run with no borrow held so they may commit synchronously.
        let hook = self.hooks.borrow().get(commit.request);
        match hook {
            Some(hook) => hook(commit),
            None => debug!(
                request = commit.id.0,
                kind = commit.request.name(),
                "no hook registered; request stays pending"
            ),
        }
    }

    fn on_actual_changed(self: &Rc<Self>, value: bool) {
        if self.state.borrow().phase.is_pending() {
            return;
        }
        if self.shown.get() != value {
            debug!(value, "actual state changed outside commit; resyncing");
            self.reset_shown();
        }
    }

    fn resolve(self: &Rc<Self>, id: Option<RequestId>, approved: bool) -> CommitOutcome {
        let request = {
            let mut state = self.state.borrow_mut();
            match (state.phase, id) {
                (Phase::Pending { id: pending, .. }, Some(id)) if pending != id => {
                    debug!(request = id.0, pending = pending.0, "stale commit ignored");
                    return CommitOutcome::Stale;
                }
                (Phase::Pending { request, .. }, _) => {
                    state.phase = Phase::Idle;
                    Some(request)
                }
                (Phase::Idle, _) => None,
            }
        };

        let outcome = match request {
            Some(request) if approved => {
                self.actual.set(request.desired());
                CommitOutcome::Applied(request.desired())
            }
            Some(_) => CommitOutcome::Declined(self.actual.get()),
            None => CommitOutcome::NoPending,
        };
        self.reset_shown();
        debug!(?outcome, approved, "commit resolved");
        outcome
    }

    /// Write actual into shown with request hooks suppressed.
    fn reset_shown(self: &Rc<Self>) {
        let epoch = {
            let mut state = self.state.borrow_mut();
            state.suppressing = true;
            state.suppress_epoch += 1;
            state.suppress_epoch
        };

        self.shown.set(self.actual.get());

        // The write's notification may still be held in a batch; the tick
        // queue refuses to run until every held notification is out.
        let weak = Rc::downgrade(self);
        self.ticks.defer(move || {
            let Some(core) = weak.upgrade() else {
                return;
            };
            {
                let mut state = core.state.borrow_mut();
                if state.suppress_epoch != epoch {
                    return;
                }
                state.suppressing = false;
                trace!(epoch, "suppression cleared");
            }
            // A write to shown inside the window was swallowed; it is a
            // real change, so it opens a request now.
            let shown = core.shown.get();
            if shown != core.actual.get() {
                debug!(value = shown, "shown changed while suppressed; requesting");
                core.on_shown_changed(shown);
            }
        });
    }
}

/// Reconciles a user-visible toggle with an authoritative boolean.
///
/// See the [module documentation](self) for the protocol.
pub struct StateView {
    core: Rc<Core>,
    _scope: BindingScope,
}

impl StateView {
    /// Bind to `actual`, clearing suppression on [`TickQueue::current`].
    ///
    /// The host must run that queue's ticks, or every reset leaves the
    /// control non-interactive.
    #[must_use]
    pub fn new(actual: &Observable<bool>) -> Self {
        Self::with_tick_queue(actual, TickQueue::current())
    }

    /// Bind to `actual`, clearing suppression on `ticks`.
    #[must_use]
    pub fn with_tick_queue(actual: &Observable<bool>, ticks: TickQueue) -> Self {
        let core = Rc::new(Core {
            actual: actual.clone(),
            shown: Observable::new(actual.get()),
            state: RefCell::new(Reconciler::default()),
            hooks: RefCell::new(Hooks::default()),
            ticks,
        });

        let mut scope = BindingScope::new();
        let weak = Rc::downgrade(&core);
        scope.subscribe(&core.shown, move |value| {
            if let Some(core) = weak.upgrade() {
                core.on_shown_changed(*value);
            }
        });
        let weak = Rc::downgrade(&core);
        scope.subscribe(&core.actual, move |value| {
            if let Some(core) = weak.upgrade() {
                core.on_actual_changed(*value);
            }
        });

        Self {
            core,
            _scope: scope,
        }
    }

    /// Called with a [`Commit`] when the user flips the control on.
    #[must_use]
    pub fn on_request_enable(self, hook: impl Fn(Commit) + 'static) -> Self {
        self.core.hooks.borrow_mut().enable = Some(Rc::new(hook));
        self
    }

    /// Called with a [`Commit`] when the user flips the control off.
    #[must_use]
    pub fn on_request_disable(self, hook: impl Fn(Commit) + 'static) -> Self {
        self.core.hooks.borrow_mut().disable = Some(Rc::new(hook));
        self
    }

    /// Build the visual control from the current state.
    pub fn view<R>(&self, content: impl FnOnce(&StateViewContext<'_>) -> R) -> R {
        content(&StateViewContext { view: self })
    }

    /// Resolve whatever request is pending.
    pub fn commit(&self, approved: bool) -> CommitOutcome {
        self.core.resolve(None, approved)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.core.state.borrow().phase
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase().is_pending()
    }

    /// Whether a reset of shown is still inside its suppression window.
    #[must_use]
    pub fn is_suppressing(&self) -> bool {
        self.core.state.borrow().suppressing
    }

    /// Whether the control should accept a flip right now.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        let state = self.core.state.borrow();
        !state.phase.is_pending() && !state.suppressing && !self.is_diverged()
    }

    /// Whether shown and actual currently differ.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        self.core.shown.get() != self.core.actual.get()
    }

    #[must_use]
    pub fn shown_value(&self) -> bool {
        self.core.shown.get()
    }

    #[must_use]
    pub fn actual_value(&self) -> bool {
        self.core.actual.get()
    }

    /// The observable the toggle control writes.
    #[must_use]
    pub fn shown(&self) -> &Observable<bool> {
        &self.core.shown
    }

    /// The host's authoritative value.
    #[must_use]
    pub fn actual(&self) -> &Observable<bool> {
        &self.core.actual
    }

    /// A binding that reads `true` while shown and actual differ.
    ///
    /// This is divergence, not [`is_pending`](Self::is_pending): a host
    /// write to actual during a request can make the two agree early.
    #[must_use]
    pub fn diverged_binding(&self) -> Binding<bool> {
        bind_mapped2(&self.core.shown, &self.core.actual, |shown, actual| {
            shown != actual
        })
    }
}

impl fmt::Debug for StateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.state.borrow();
        f.debug_struct("StateView")
            .field("shown", &self.core.shown.get())
            .field("actual", &self.core.actual.get())
            .field("phase", &state.phase)
            .field("suppressing", &state.suppressing)
            .finish()
    }
}

/// What the content builder of [`StateView::view`] sees.
pub struct StateViewContext<'a> {
    view: &'a StateView,
}

impl StateViewContext<'_> {
    /// The observable to bind the toggle control to.
    #[must_use]
    pub fn shown(&self) -> &Observable<bool> {
        self.view.shown()
    }

    #[must_use]
    pub fn shown_value(&self) -> bool {
        self.view.shown_value()
    }

    #[must_use]
    pub fn actual_value(&self) -> bool {
        self.view.actual_value()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.view.phase()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.view.is_pending()
    }

    /// Shown differs from actual; drives the progress indicator.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        self.view.is_diverged()
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.view.is_interactive()
    }

    /// Resolve whatever request is pending.
    pub fn commit(&self, approved: bool) -> CommitOutcome {
        self.view.commit(approved)
    }
}

impl fmt::Debug for StateViewContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateViewContext")
            .field("view", self.view)
            .finish()
    }
}

/// Resolves one specific request. Consumed on use.
pub struct Commit {
    core: Weak<Core>,
    id: RequestId,
    request: Request,
}

impl Commit {
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub const fn request(&self) -> Request {
        self.request
    }

    /// The value the user asked for.
    #[must_use]
    pub const fn desired(&self) -> bool {
        self.request.desired()
    }

    /// Apply (`true`) or discard (`false`) the request.
    pub fn resolve(self, approved: bool) -> CommitOutcome {
        match self.core.upgrade() {
            Some(core) => core.resolve(Some(self.id), approved),
            None => {
                debug!(request = self.id.0, "commit after view dropped; ignored");
                CommitOutcome::Detached
            }
        }
    }

    pub fn approve(self) -> CommitOutcome {
        self.resolve(true)
    }

    pub fn cancel(self) -> CommitOutcome {
        self.resolve(false)
    }
}

impl fmt::Debug for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("id", &self.id)
            .field("request", &self.request)
            .finish()
    }
}
