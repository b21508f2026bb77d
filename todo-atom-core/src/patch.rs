//! Tagged partial updates for state containers
//!
//! A patch describes a shallow merge onto the top-level fields of a state
//! value. It is either a literal partial (`Replace`) or a function that
//! derives the partial from the current value at commit time (`Compute`).
//! The tagged form makes a malformed patch unrepresentable.

use std::fmt;

/// A state type that supports shallow partial merges.
///
/// `Partial` is the all-fields-optional form of the type. Merging replaces
/// only the fields present in the partial; present fields replace the
/// current value wholesale (nested containers are never deep-merged).
///
/// Use `#[derive(Patchable)]` from `todo-atom-macros` to generate the
/// partial struct and this impl for your own state types.
pub trait Patchable {
    /// The all-fields-optional form of this type.
    type Partial;

    /// Shallow-merge `partial` onto `self`.
    fn merge(&mut self, partial: Self::Partial);
}

/// A partial update for a [`Patchable`] state.
///
/// # Example
/// ```
/// use todo_atom_core::{Patch, TodoState, TodoStatePartial};
///
/// // Literal partial: the caller already holds the fields.
/// let p: Patch<TodoState> = Patch::replace(TodoStatePartial {
///     counter: Some(5),
///     ..Default::default()
/// });
/// assert_eq!(p.kind(), "replace");
///
/// // Derived partial: resolved against the current value at commit time.
/// let p: Patch<TodoState> = Patch::compute(|state: &TodoState| TodoStatePartial {
///     counter: Some(state.counter + 1),
///     ..Default::default()
/// });
/// assert_eq!(p.kind(), "compute");
/// ```
pub enum Patch<S: Patchable> {
    /// Merge a literal partial.
    Replace(S::Partial),
    /// Derive the partial from the current value.
    Compute(Box<dyn FnOnce(&S) -> S::Partial + Send>),
}

impl<S: Patchable> Patch<S> {
    /// Create a literal patch.
    pub fn replace(partial: S::Partial) -> Self {
        Self::Replace(partial)
    }

    /// Create a patch derived from the current value.
    ///
    /// The function runs under the container's lock, so read-modify-write
    /// sequences expressed this way are atomic.
    pub fn compute<F>(f: F) -> Self
    where
        F: FnOnce(&S) -> S::Partial + Send + 'static,
    {
        Self::Compute(Box::new(f))
    }

    /// Get the patch kind for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replace(_) => "replace",
            Self::Compute(_) => "compute",
        }
    }

    /// Resolve this patch to its partial fields against the current value.
    pub(crate) fn resolve(self, current: &S) -> S::Partial {
        match self {
            Self::Replace(partial) => partial,
            Self::Compute(f) => f(current),
        }
    }
}

impl<S: Patchable> fmt::Debug for Patch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(_) => f.write_str("Patch::Replace(..)"),
            Self::Compute(_) => f.write_str("Patch::Compute(..)"),
        }
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
    fn test_replace_resolves_to_literal() {
        let state = TestState::default();
        let patch: Patch<TestState> = Patch::replace(TestStatePartial {
            count: Some(7),
            ..Default::default()
        });

        let partial = patch.resolve(&state);
        assert_eq!(partial.count, Some(7));
        assert_eq!(partial.label, None);
    }

    #[test]
    fn test_compute_sees_current_value() {
        let state = TestState {
            label: "x".into(),
            count: 10,
        };
        let patch: Patch<TestState> = Patch::compute(|s: &TestState| TestStatePartial {
            count: Some(s.count * 2),
            ..Default::default()
        });

        let partial = patch.resolve(&state);
        assert_eq!(partial.count, Some(20));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut state = TestState {
            label: "keep".into(),
            count: 1,
        };
        state.merge(TestStatePartial {
            count: Some(2),
            ..Default::default()
        });

        assert_eq!(state.label, "keep");
        assert_eq!(state.count, 2);
    }

    #[test]
    fn test_kind_names() {
        let p: Patch<TestState> = Patch::replace(TestStatePartial::default());
        assert_eq!(p.kind(), "replace");

        let p: Patch<TestState> = Patch::compute(|_: &TestState| TestStatePartial::default());
        assert_eq!(p.kind(), "compute");
    }
}
