//! Core types for todo-atom
//!
//! This crate provides an observable application-state container (the
//! atom/store pattern) together with the pure state transitions, filter
//! table, and view bridge of a task-list application.
//!
//! # Core Concepts
//!
//! - **Atom**: holds one state value and notifies observers with every
//!   committed value, synchronously, in registration order
//! - **Patch**: tagged partial update, either a literal partial or a
//!   function of the current value, merged shallowly onto the top-level
//!   fields
//! - **Transitions**: pure functions computing the partial for each user
//!   intent (add, toggle, edit, toggle-all, remove, clear-completed)
//! - **TodoList**: owned facade wiring the intents through an atom; no
//!   global instance anywhere
//! - **ViewBridge**: mirrors committed items into a view's render state and
//!   holds the view-local filter
//!
//! # Basic Example
//!
//! ```
//! use todo_atom_core::{Filter, TodoList, ViewBridge};
//!
//! let list = TodoList::builder().seed("Use Redux").build();
//! let mut view = ViewBridge::new(list.atom());
//!
//! let id = list.add("Write tests").unwrap();
//! list.toggle_completed(id);
//!
//! view.set_filter(Filter::Completed);
//! assert_eq!(view.visible().len(), 1);
//! assert_eq!(view.active_count(), 1);
//! ```
//!
//! # Concurrency
//!
//! The model is logically synchronous and run-to-completion: every commit
//! and its notification pass finish before the triggering call returns. On a
//! multi-threaded runtime the atom serializes mutations through an internal
//! mutex, and observers run outside of it, so they always see a fully merged
//! value and may call back into the atom. A mutation triggered from inside
//! an observer runs its notification pass after the current pass completes.

pub mod atom;
pub mod bridge;
pub mod error;
pub mod filter;
pub mod list;
pub mod patch;
pub mod state;
pub mod testing;
pub mod transitions;

// Container exports
pub use atom::{Atom, ObserverId};
pub use patch::{Patch, Patchable};

// State model exports
pub use state::{TodoId, TodoItem, TodoState, TodoStatePartial};

// Facade and view exports
pub use bridge::ViewBridge;
pub use error::Error;
pub use filter::{active_count, completed_count, filter_items, Filter};
pub use list::{TodoList, TodoListBuilder};

// Testing exports
pub use testing::{channel_observer, StateProbe};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::atom::{Atom, ObserverId};
    pub use crate::bridge::ViewBridge;
    pub use crate::error::Error;
    pub use crate::filter::{active_count, completed_count, filter_items, Filter};
    pub use crate::list::{TodoList, TodoListBuilder};
    pub use crate::patch::{Patch, Patchable};
    pub use crate::state::{TodoId, TodoItem, TodoState, TodoStatePartial};
    pub use crate::testing::{channel_observer, StateProbe};
    pub use crate::transitions;
}
