//! Filter predicate table and derived counts
//!
//! A fixed three-way mapping from filter identifier to item predicate, plus
//! the derived counts the footer of a task-list UI shows. Everything here is
//! recomputed per call; nothing is cached. That is O(n) per render pass and
//! fine for the small n of a client-side task list.

use serde::{Deserialize, Serialize};

use crate::state::TodoItem;

/// The three visibility filters of the classic task list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Admit every item.
    #[default]
    All,
    /// Admit items not yet completed.
    Active,
    /// Admit completed items.
    Completed,
}

impl Filter {
    /// Whether this filter admits the given item.
    pub fn admits(&self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }

    /// Stable identifier for this filter.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Look up a filter by its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" => Some(Filter::Completed),
            _ => None,
        }
    }

    /// All filters, in display order.
    pub fn all_filters() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }
}

/// Order-preserving view of `items` under `filter`.
pub fn filter_items(items: &[TodoItem], filter: Filter) -> Vec<&TodoItem> {
    items.iter().filter(|item| filter.admits(item)).collect()
}

/// Count of completed items.
pub fn completed_count(items: &[TodoItem]) -> usize {
    items.iter().filter(|item| item.completed).count()
}

/// Count of items not yet completed.
pub fn active_count(items: &[TodoItem]) -> usize {
    items.len() - completed_count(items)
}
