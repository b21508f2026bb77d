//! Bridge between the state container and a view layer

use std::sync::{Arc, Mutex};

use crate::atom::{lock, Atom, ObserverId};
use crate::filter::{self, Filter};
use crate::state::{TodoItem, TodoState};

/// Mirrors committed container state into a view's render state.
///
/// Registers exactly one observer at construction; every committed state has
/// its `items` copied into an internal mirror. The view never reads
/// `counter`, only items and the counts derived from them. The selected
/// filter is view-local state and lives here, not in [`TodoState`].
///
/// Dropping the bridge removes its observer from the atom.
///
/// # Example
/// ```
/// use todo_atom_core::{Filter, TodoList, ViewBridge};
///
/// let list = TodoList::builder().seed("Use Redux").build();
/// let mut view = ViewBridge::new(list.atom());
///
/// let id = list.add("Write tests").unwrap();
/// list.toggle_completed(id);
///
/// assert_eq!(view.completed_count(), 1);
/// view.set_filter(Filter::Active);
/// assert_eq!(view.visible().len(), 1);
/// ```
#[derive(Debug)]
pub struct ViewBridge {
    atom: Atom<TodoState>,
    observer: ObserverId,
    mirror: Arc<Mutex<Vec<TodoItem>>>,
    filter: Filter,
}

impl ViewBridge {
    /// Attach a bridge to an atom.
    ///
    /// The mirror starts from the current state, so a bridge attached after
    /// some mutations still renders the latest items.
    pub fn new(atom: &Atom<TodoState>) -> Self {
        let mirror = Arc::new(Mutex::new(atom.read(|state| state.items.clone())));
        let shared = Arc::clone(&mirror);
        let observer = atom.observe(move |state: &TodoState| {
            *lock(&shared) = state.items.clone();
        });
        Self {
            atom: atom.clone(),
            observer,
            mirror,
            filter: Filter::default(),
        }
    }

    /// Snapshot of the mirrored items, in insertion order.
    pub fn items(&self) -> Vec<TodoItem> {
        lock(&self.mirror).clone()
    }

    /// Items admitted by the selected filter, recomputed per call.
    pub fn visible(&self) -> Vec<TodoItem> {
        let items = lock(&self.mirror);
        filter::filter_items(&items, self.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The currently selected filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Select a filter. Affects only this bridge.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Count of completed items.
    pub fn completed_count(&self) -> usize {
        filter::completed_count(&lock(&self.mirror))
    }

    /// Count of items not yet completed.
    pub fn active_count(&self) -> usize {
        filter::active_count(&lock(&self.mirror))
    }

    /// Whether every item is completed; drives the toggle-all checkbox.
    pub fn all_completed(&self) -> bool {
        lock(&self.mirror).iter().all(|item| item.completed)
    }

    /// Number of mirrored items.
    pub fn len(&self) -> usize {
        lock(&self.mirror).len()
    }

    /// Whether there is nothing to render; hides the footer and the
    /// toggle-all checkbox.
    pub fn is_empty(&self) -> bool {
        lock(&self.mirror).is_empty()
    }
}

impl Drop for ViewBridge {
    fn drop(&mut self) {
        self.atom.unobserve(self.observer);
    }
}
