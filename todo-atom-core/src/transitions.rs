//! Pure state transitions
//!
//! Each transition computes the partial fields to merge from the current
//! state and its arguments, mutating nothing. Committing the partial and
//! notifying observers is the container's job; nothing here touches either.

use crate::state::{TodoId, TodoItem, TodoState, TodoStatePartial};

/// Append a new item with the next free id and bump the allocator.
///
/// Accepts any text, including blank. Rejecting blank input is a policy
/// decision made at the [`TodoList`](crate::TodoList) boundary, not here.
pub fn add_item(state: &TodoState, text: impl Into<String>) -> TodoStatePartial {
    let mut items = state.items.clone();
    items.push(TodoItem::new(TodoId(state.counter), text));
    TodoStatePartial {
        items: Some(items),
        counter: Some(state.counter + 1),
    }
}

/// Flip `completed` on the matching item.
///
/// All other items pass through unchanged, in order. An unknown id yields an
/// identical list.
pub fn toggle_completed(state: &TodoState, id: TodoId) -> TodoStatePartial {
    let mut items = state.items.clone();
    if let Some(item) = items.iter_mut().find(|item| item.id == id) {
        item.completed = !item.completed;
    }
    TodoStatePartial {
        items: Some(items),
        counter: None,
    }
}

/// Replace the text of the matching item, leaving `id` and `completed`
/// untouched. An unknown id yields an identical list.
pub fn edit_text(state: &TodoState, id: TodoId, text: impl Into<String>) -> TodoStatePartial {
    let mut items = state.items.clone();
    if let Some(item) = items.iter_mut().find(|item| item.id == id) {
        item.text = text.into();
    }
    TodoStatePartial {
        items: Some(items),
        counter: None,
    }
}

/// Complete every item, or un-complete every item when all are already
/// completed.
pub fn toggle_all(state: &TodoState) -> TodoStatePartial {
    let target = !all_completed(state);
    let items = state
        .items
        .iter()
        .map(|item| TodoItem {
            completed: target,
            ..item.clone()
        })
        .collect();
    TodoStatePartial {
        items: Some(items),
        counter: None,
    }
}

/// True when every item is completed. Vacuously true for an empty list.
pub fn all_completed(state: &TodoState) -> bool {
    state.items.iter().all(|item| item.completed)
}

/// Exclude the matching item, preserving the order of the rest.
pub fn remove_item(state: &TodoState, id: TodoId) -> TodoStatePartial {
    let items = state
        .items
        .iter()
        .filter(|item| item.id != id)
        .cloned()
        .collect();
    TodoStatePartial {
        items: Some(items),
        counter: None,
    }
}

/// Exclude every completed item.
pub fn clear_completed(state: &TodoState) -> TodoStatePartial {
    let items = state
        .items
        .iter()
        .filter(|item| !item.completed)
        .cloned()
        .collect();
    TodoStatePartial {
        items: Some(items),
        counter: None,
    }
}
