//! todo-atom: observable state container with pure transitions
//!
//! One atom holds the whole application state; pure transition functions
//! compute partial updates; every committed value is pushed synchronously to
//! registered observers. The classic client-side task list ships as the
//! built-in state model, and `#[derive(Patchable)]` extends the same
//! container to your own state types.
//!
//! # Example
//! ```
//! use todo_atom::prelude::*;
//!
//! let list = TodoList::builder().seed("Use Redux").build();
//! let mut view = ViewBridge::new(list.atom());
//!
//! let id = list.add("Write tests").unwrap();
//! list.toggle_completed(id);
//!
//! view.set_filter(Filter::Active);
//! assert_eq!(view.visible().len(), 1);
//! ```

// Re-export everything from core
pub use todo_atom_core::*;

// Re-export derive macros
pub use todo_atom_macros::Patchable;

/// Prelude for convenient imports
pub mod prelude {
    // Container
    pub use todo_atom_core::{Atom, ObserverId, Patch, Patchable};

    // State model
    pub use todo_atom_core::{TodoId, TodoItem, TodoState, TodoStatePartial};

    // Facade and view
    pub use todo_atom_core::{
        active_count, completed_count, filter_items, Error, Filter, TodoList, TodoListBuilder,
        ViewBridge,
    };

    // Transitions
    pub use todo_atom_core::transitions;

    // Testing helpers
    pub use todo_atom_core::{channel_observer, StateProbe};

    // Derive macros
    pub use todo_atom_macros::Patchable;
}
