//! Test utilities for todo-atom applications
//!
//! - [`StateProbe`]: recording observer that keeps every snapshot it sees
//! - [`channel_observer`]: forwards snapshots into a tokio channel so
//!   event-loop applications can consume notifications as messages
//!
//! # Example
//!
//! ```
//! use todo_atom_core::testing::StateProbe;
//! use todo_atom_core::TodoList;
//!
//! let list = TodoList::new();
//! let probe = StateProbe::new();
//! probe.attach(list.atom());
//!
//! list.add("a").unwrap();
//! list.toggle_all();
//!
//! assert_eq!(probe.len(), 2);
//! assert!(probe.last().unwrap().items[0].completed);
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::atom::{lock, Atom, ObserverId};

/// Recording observer for assertions on notification behavior.
///
/// Records every snapshot delivered after [`attach`](Self::attach), in
/// notification order. One probe can be attached to several atoms.
#[derive(Clone, Debug, Default)]
pub struct StateProbe<S> {
    snapshots: Arc<Mutex<Vec<S>>>,
}

impl<S: Clone + Send + 'static> StateProbe<S> {
    /// Create an empty probe.
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register this probe as an observer on `atom`.
    pub fn attach(&self, atom: &Atom<S>) -> ObserverId {
        let snapshots = Arc::clone(&self.snapshots);
        atom.observe(move |state: &S| lock(&snapshots).push(state.clone()))
    }

    /// All recorded snapshots, in notification order.
    pub fn snapshots(&self) -> Vec<S> {
        lock(&self.snapshots).clone()
    }

    /// The most recent snapshot, if any.
    pub fn last(&self) -> Option<S> {
        lock(&self.snapshots).last().cloned()
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        lock(&self.snapshots).len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        lock(&self.snapshots).is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        lock(&self.snapshots).clear();
    }
}

/// Create an observer that forwards every snapshot into an unbounded
/// channel, plus the receiving end.
///
/// Send failures are ignored: a dropped receiver just means nobody is
/// listening anymore.
///
/// # Example
///
/// ```
/// use todo_atom_core::testing::channel_observer;
/// use todo_atom_core::{TodoList, TodoState};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let list = TodoList::new();
/// let (observer, mut rx) = channel_observer::<TodoState>();
/// list.observe(observer);
///
/// list.add("a").unwrap();
///
/// let state = rx.recv().await.unwrap();
/// assert_eq!(state.items[0].text, "a");
/// # }
/// ```
pub fn channel_observer<S: Clone + Send + 'static>(
) -> (impl Fn(&S) + Send + Sync + 'static, mpsc::UnboundedReceiver<S>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let observer = move |state: &S| {
        let _ = tx.send(state.clone());
    };
    (observer, rx)
}
