//! Error types

use thiserror::Error;

/// Errors surfaced by the task-list facade.
///
/// Transitions themselves are pure and infallible; everything here is a
/// policy decision made at the [`TodoList`](crate::TodoList) boundary.
/// Operating on an id that does not exist is intentionally *not* an error:
/// it commits an unchanged list and reports the miss through a `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// `add` was called with empty or whitespace-only text.
    #[error("todo text must not be blank")]
    BlankText,
}
