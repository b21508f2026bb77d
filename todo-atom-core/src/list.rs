//! Task-list facade
//!
//! [`TodoList`] wires the user intents of the task list (add, toggle, edit,
//! toggle-all, remove, clear-completed) through an [`Atom<TodoState>`].
//! Every intent commits via [`Patch::compute`], so the read-modify-write is
//! atomic under the container's lock.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::atom::{Atom, ObserverId};
use crate::error::Error;
use crate::patch::Patch;
use crate::state::{TodoId, TodoItem, TodoState, TodoStatePartial};
use crate::transitions;

/// An owned, explicitly constructed task list.
///
/// The handle is cheap to clone and shares its state with all clones.
/// Construct as many independent lists as you need and pass them where they
/// are used; there is no global instance.
///
/// # Example
/// ```
/// use todo_atom_core::TodoList;
///
/// let list = TodoList::builder().seed("Use Redux").build();
/// let id = list.add("Write tests").unwrap();
///
/// assert!(list.toggle_completed(id));
/// list.clear_completed();
/// assert_eq!(list.items().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TodoList {
    atom: Atom<TodoState>,
}

impl TodoList {
    /// Empty list, ids starting at 0.
    pub fn new() -> Self {
        Self {
            atom: Atom::new(TodoState::new()),
        }
    }

    /// Start building a list with bootstrap configuration.
    pub fn builder() -> TodoListBuilder {
        TodoListBuilder::default()
    }

    /// The underlying atom, for observation or bridging.
    pub fn atom(&self) -> &Atom<TodoState> {
        &self.atom
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TodoState {
        self.atom.get()
    }

    /// Snapshot of the current items, in insertion order.
    pub fn items(&self) -> Vec<TodoItem> {
        self.atom.read(|state| state.items.clone())
    }

    /// Register an observer for every future committed state.
    pub fn observe<F>(&self, f: F) -> ObserverId
    where
        F: Fn(&TodoState) + Send + Sync + 'static,
    {
        self.atom.observe(f)
    }

    /// Remove a previously registered observer.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        self.atom.unobserve(id)
    }

    /// Add an item and return its assigned id.
    ///
    /// Empty or whitespace-only text is rejected with [`Error::BlankText`];
    /// the pure [`transitions::add_item`] stays permissive, so callers
    /// composing their own facade may choose otherwise.
    pub fn add(&self, text: impl Into<String>) -> Result<TodoId, Error> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::BlankText);
        }
        debug!(text = %text, "Adding item");

        let assigned = Arc::new(AtomicU64::new(0));
        let slot = Arc::clone(&assigned);
        self.atom.patch(Patch::compute(move |state: &TodoState| {
            slot.store(state.counter, Ordering::Relaxed);
            transitions::add_item(state, text)
        }));
        Ok(TodoId(assigned.load(Ordering::Relaxed)))
    }

    /// Flip completion of the item with `id`.
    ///
    /// Returns whether any item matched. An unknown id still commits (and
    /// notifies) an unchanged list.
    pub fn toggle_completed(&self, id: TodoId) -> bool {
        debug!(%id, "Toggling completion");
        self.commit_matching(id, move |state| transitions::toggle_completed(state, id))
    }

    /// Replace the text of the item with `id`; see
    /// [`toggle_completed`](Self::toggle_completed) for the unknown-id
    /// behavior.
    pub fn edit_text(&self, id: TodoId, text: impl Into<String>) -> bool {
        let text = text.into();
        debug!(%id, text = %text, "Editing item");
        self.commit_matching(id, move |state| transitions::edit_text(state, id, text))
    }

    /// Remove the item with `id`; see
    /// [`toggle_completed`](Self::toggle_completed) for the unknown-id
    /// behavior.
    pub fn remove(&self, id: TodoId) -> bool {
        debug!(%id, "Removing item");
        self.commit_matching(id, move |state| transitions::remove_item(state, id))
    }

    /// Complete every item, or un-complete all when all are completed.
    pub fn toggle_all(&self) {
        debug!("Toggling all items");
        self.atom.patch(Patch::compute(transitions::toggle_all));
    }

    /// Drop every completed item.
    pub fn clear_completed(&self) {
        debug!("Clearing completed items");
        self.atom.patch(Patch::compute(transitions::clear_completed));
    }

    /// True when every item is completed. Vacuously true when empty.
    pub fn all_completed(&self) -> bool {
        self.atom.read(transitions::all_completed)
    }

    fn commit_matching<F>(&self, id: TodoId, f: F) -> bool
    where
        F: FnOnce(&TodoState) -> TodoStatePartial + Send + 'static,
    {
        let matched = Arc::new(AtomicBool::new(false));
        let slot = Arc::clone(&matched);
        self.atom.patch(Patch::compute(move |state: &TodoState| {
            slot.store(state.contains(id), Ordering::Relaxed);
            f(state)
        }));
        matched.load(Ordering::Relaxed)
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

/// Bootstrap configuration for [`TodoList`].
#[derive(Clone, Debug, Default)]
pub struct TodoListBuilder {
    seed: Option<String>,
}

impl TodoListBuilder {
    /// Seed the list with one starter item (id 0, counter 1).
    pub fn seed(mut self, text: impl Into<String>) -> Self {
        self.seed = Some(text.into());
        self
    }

    /// Build the list.
    pub fn build(self) -> TodoList {
        let state = match self.seed {
            Some(text) => TodoState::seeded(text),
            None => TodoState::new(),
        };
        TodoList {
            atom: Atom::new(state),
        }
    }
}
