//! Task-list state model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::patch::Patchable;

/// Identifier of a single task-list item.
///
/// Ids come from the monotonic allocator in [`TodoState::counter`] and are
/// never reused, including after deletion.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task-list item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// Create a not-yet-completed item.
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// The whole application state.
///
/// Invariants:
/// - no two items share an id
/// - `counter` is strictly greater than every id ever assigned
/// - `items` is in insertion order; filtering produces a view, never a reorder
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order.
    pub items: Vec<TodoItem>,
    /// Next id to assign.
    pub counter: u64,
}

impl TodoState {
    /// Empty state, ids starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with one starter item: id 0, counter 1.
    pub fn seeded(text: impl Into<String>) -> Self {
        Self {
            items: vec![TodoItem::new(TodoId(0), text)],
            counter: 1,
        }
    }

    /// Find an item by id.
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an item with the given id exists.
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shallow-merge partial form of [`TodoState`].
///
/// A present `items` replaces the item list wholesale; there is no per-item
/// deep merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStatePartial {
    pub items: Option<Vec<TodoItem>>,
    pub counter: Option<u64>,
}

impl Patchable for TodoState {
    type Partial = TodoStatePartial;

    fn merge(&mut self, partial: TodoStatePartial) {
        if let Some(items) = partial.items {
            self.items = items;
        }
        if let Some(counter) = partial.counter {
            self.counter = counter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_bootstrap() {
        let state = TodoState::seeded("Use Redux");

        assert_eq!(state.len(), 1);
        assert_eq!(state.counter, 1);
        assert_eq!(state.items[0].id, TodoId(0));
        assert_eq!(state.items[0].text, "Use Redux");
        assert!(!state.items[0].completed);
    }

    #[test]
    fn test_get_and_contains() {
        let state = TodoState::seeded("a");

        assert!(state.contains(TodoId(0)));
        assert!(!state.contains(TodoId(1)));
        assert_eq!(state.get(TodoId(0)).map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn test_merge_replaces_only_present_fields() {
        let mut state = TodoState::seeded("a");

        state.merge(TodoStatePartial {
            items: Some(vec![]),
            counter: None,
        });

        assert!(state.is_empty());
        // Counter untouched by an items-only partial.
        assert_eq!(state.counter, 1);
    }

    #[test]
    fn test_snapshot_serializes_and_restores() {
        let state = TodoState::seeded("Use Redux");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{"id": 0, "text": "Use Redux", "completed": false}],
                "counter": 1
            })
        );

        let restored: TodoState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_merge_replaces_items_wholesale() {
        let mut state = TodoState::seeded("a");
        let replacement = vec![TodoItem::new(TodoId(3), "b")];

        state.merge(TodoStatePartial {
            items: Some(replacement.clone()),
            counter: Some(4),
        });

        assert_eq!(state.items, replacement);
        assert_eq!(state.counter, 4);
    }
}
