//! Observable state container
//!
//! An [`Atom`] holds one state value and notifies registered observers with
//! every committed value, synchronously, in registration order. This is the
//! single point through which all state mutations flow.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::patch::{Patch, Patchable};

/// Token returned by [`Atom::observe`], used to remove the registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// One committed value together with the observers registered at commit time.
struct Pass<S> {
    value: S,
    observers: Vec<Observer<S>>,
}

struct Inner<S> {
    value: Mutex<S>,
    observers: Mutex<Vec<(ObserverId, Observer<S>)>>,
    next_observer: AtomicU64,
    /// Committed values awaiting delivery, in commit order.
    pending: Mutex<VecDeque<Pass<S>>>,
    /// Set while some call stack is draining `pending`.
    draining: AtomicBool,
}

/// Observable container for a single state value.
///
/// The handle is cheap to clone; clones share the same value and observer
/// set. Construct atoms explicitly and pass them where they are needed;
/// there is no global instance.
///
/// All mutations serialize through an internal mutex, so observers always
/// see a fully merged value. Observer callbacks run outside the lock and may
/// call back into the atom: a mutation triggered from inside an observer is
/// queued, and its notification pass runs after the current pass completes.
///
/// # Example
/// ```
/// use todo_atom_core::Atom;
///
/// let atom = Atom::new(0u32);
/// let token = atom.observe(|n: &u32| {
///     // called with every committed value
///     let _ = n;
/// });
///
/// atom.update(|n| n + 1);
/// assert_eq!(atom.get(), 1);
///
/// assert!(atom.unobserve(token));
/// assert!(!atom.unobserve(token));
/// ```
pub struct Atom<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for Atom<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for Atom<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("observers", &self.observer_count())
            .finish_non_exhaustive()
    }
}

/// Recover the guard from a poisoned lock; the protected data is a plain
/// value and stays usable after a panicking observer.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S> Atom<S> {
    /// Create an atom holding `value`.
    pub fn new(value: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(value),
                observers: Mutex::new(Vec::new()),
                next_observer: AtomicU64::new(0),
                pending: Mutex::new(VecDeque::new()),
                draining: AtomicBool::new(false),
            }),
        }
    }

    /// Borrow the current snapshot without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.inner.value))
    }

    /// Register an observer called with every future committed value.
    ///
    /// Observers run in registration order. Returns a token for
    /// [`unobserve`](Self::unobserve).
    pub fn observe<F>(&self, f: F) -> ObserverId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = ObserverId(self.inner.next_observer.fetch_add(1, Ordering::Relaxed));
        lock(&self.inner.observers).push((id, Arc::new(f)));
        trace!(observer = id.0, "Observer registered");
        id
    }

    /// Remove a previously registered observer.
    ///
    /// Returns `false`, removing nothing, for tokens that were never issued
    /// or were already removed.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = lock(&self.inner.observers);
        let before = observers.len();
        observers.retain(|(oid, _)| *oid != id);
        let removed = observers.len() != before;
        if removed {
            trace!(observer = id.0, "Observer removed");
        }
        removed
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        lock(&self.inner.observers).len()
    }
}

impl<S: Clone> Atom<S> {
    /// Clone of the current snapshot.
    pub fn get(&self) -> S {
        lock(&self.inner.value).clone()
    }

    /// Replace the value with `f(current)`, then notify observers.
    ///
    /// Every observer registered at commit time receives exactly one call
    /// with the new value.
    pub fn update(&self, f: impl FnOnce(&S) -> S) {
        {
            let mut value = lock(&self.inner.value);
            let next = f(&value);
            *value = next;
            self.enqueue_pass(&value);
        }
        self.drain();
    }

    /// Snapshot the committed value and the current observers onto the
    /// pending queue. Must run under the value lock so queue order is
    /// commit order.
    fn enqueue_pass(&self, value: &S) {
        let pass = Pass {
            value: value.clone(),
            observers: lock(&self.inner.observers)
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect(),
        };
        lock(&self.inner.pending).push_back(pass);
    }

    /// Drain the pending queue unless a pass is already running further up
    /// the stack (or on another thread); that pass picks queued values up
    /// after its current delivery finishes.
    fn drain(&self) {
        if self.inner.draining.swap(true, Ordering::AcqRel) {
            return;
        }
        loop {
            let next = lock(&self.inner.pending).pop_front();
            let Some(pass) = next else {
                self.inner.draining.store(false, Ordering::Release);
                // A commit may have slipped in between the pop and the
                // store; reclaim delivery for it if nobody else has.
                if lock(&self.inner.pending).is_empty()
                    || self.inner.draining.swap(true, Ordering::AcqRel)
                {
                    break;
                }
                continue;
            };
            trace!(observers = pass.observers.len(), "Notifying observers");
            for observer in &pass.observers {
                observer(&pass.value);
            }
        }
    }
}

impl<S: Clone + Patchable> Atom<S> {
    /// Resolve `patch` against the current value, shallow-merge the result
    /// onto the top-level fields, then notify observers exactly as
    /// [`update`](Self::update) does.
    ///
    /// [`Patch::Compute`] functions run under the value lock, making the
    /// read-modify-write atomic.
    pub fn patch(&self, patch: Patch<S>) {
        debug!(kind = patch.kind(), "Committing patch");
        {
            let mut value = lock(&self.inner.value);
            let partial = patch.resolve(&value);
            value.merge(partial);
            self.enqueue_pass(&value);
        }
        self.drain();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        label: String,
        count: i32,
    }

    #[derive(Debug, Default)]
    struct TestStatePartial {
        label: Option<String>,
        count: Option<i32>,
    }

    impl Patchable for TestState {
        type Partial = TestStatePartial;

        fn merge(&mut self, partial: TestStatePartial) {
            if let Some(label) = partial.label {
                self.label = label;
            }
            if let Some(count) = partial.count {
                self.count = count;
            }
        }
    }

    #[test]
    fn test_get_and_update() {
        let atom = Atom::new(TestState::default());

        atom.update(|s| TestState {
            count: s.count + 1,
            ..s.clone()
        });

        assert_eq!(atom.get().count, 1);
        assert_eq!(atom.read(|s| s.count), 1);
    }

    #[test]
    fn test_observers_called_in_registration_order() {
        let atom = Atom::new(0i32);
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            atom.observe(move |n: &i32| lock(&log).push((tag, *n)));
        }

        atom.update(|n| n + 1);

        assert_eq!(
            *lock(&log),
            vec![("first", 1), ("second", 1), ("third", 1)]
        );
    }

    #[test]
    fn test_one_notification_per_mutation() {
        let atom = Atom::new(0i32);
        let calls = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&calls);
        atom.observe(move |_: &i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        atom.update(|n| n + 1);
        atom.update(|n| n + 1);
        atom.update(|n| n + 1);

        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_unobserve_stops_delivery() {
        let atom = Atom::new(0i32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let token = atom.observe(move |n: &i32| lock(&sink).push(*n));

        atom.update(|n| n + 1);
        assert!(atom.unobserve(token));
        atom.update(|n| n + 1);

        assert_eq!(*lock(&seen), vec![1]);
    }

    #[test]
    fn test_unobserve_unknown_token_is_noop() {
        let atom = Atom::new(0i32);
        let token = atom.observe(|_: &i32| {});

        assert!(atom.unobserve(token));
        assert!(!atom.unobserve(token));
        assert_eq!(atom.observer_count(), 0);
    }

    #[test]
    fn test_patch_replace_shallow_merge() {
        let atom = Atom::new(TestState {
            label: "keep".into(),
            count: 1,
        });

        atom.patch(Patch::replace(TestStatePartial {
            count: Some(2),
            ..Default::default()
        }));

        let state = atom.get();
        assert_eq!(state.label, "keep");
        assert_eq!(state.count, 2);
    }

    #[test]
    fn test_patch_compute_sees_current_value() {
        let atom = Atom::new(TestState {
            count: 10,
            ..Default::default()
        });

        atom.patch(Patch::compute(|s: &TestState| TestStatePartial {
            count: Some(s.count * 2),
            ..Default::default()
        }));

        assert_eq!(atom.get().count, 20);
    }

    #[test]
    fn test_observer_sees_fully_merged_value() {
        let atom = Atom::new(TestState {
            label: "a".into(),
            count: 1,
        });
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        atom.observe(move |s: &TestState| lock(&sink).push(s.clone()));

        atom.patch(Patch::replace(TestStatePartial {
            label: Some("b".into()),
            count: Some(2),
        }));

        assert_eq!(
            *lock(&seen),
            vec![TestState {
                label: "b".into(),
                count: 2,
            }]
        );
    }

    #[test]
    fn test_reentrant_update_runs_after_current_pass() {
        let atom = Atom::new(1i32);
        let log = Arc::new(Mutex::new(Vec::new()));

        // The first observer triggers a follow-up mutation from inside its
        // callback; the second must still see the original value first.
        let reentrant = atom.clone();
        let log_a = Arc::clone(&log);
        atom.observe(move |n: &i32| {
            log_a.lock().unwrap().push(("a", *n));
            if *n == 1 {
                reentrant.update(|n| n + 10);
            }
        });
        let log_b = Arc::clone(&log);
        atom.observe(move |n: &i32| lock(&log_b).push(("b", *n)));

        atom.update(|_| 1);

        assert_eq!(
            *lock(&log),
            vec![("a", 1), ("b", 1), ("a", 11), ("b", 11)]
        );
    }

    #[test]
    fn test_concurrent_commits_deliver_in_commit_order() {
        let atom = Atom::new(0i64);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        atom.observe(move |n: &i64| lock(&sink).push(*n));

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let atom = atom.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        atom.update(|n| n + 1);
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        // Commit and enqueue happen under one lock, so deliveries arrive
        // in commit order and the last one is the final value.
        let seen = lock(&seen);
        assert_eq!(seen.len(), 2000);
        assert_eq!(*seen, (1..=2000).collect::<Vec<i64>>());
        assert_eq!(atom.get(), 2000);
    }

    #[test]
    fn test_clone_shares_value_and_observers() {
        let atom = Atom::new(0i32);
        let other = atom.clone();

        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        other.observe(move |_: &i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        atom.update(|n| n + 1);

        assert_eq!(other.get(), 1);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
