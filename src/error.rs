//! Error types for building a history and for actions it refused to record.

use std::fmt;

use thiserror::Error;

use crate::traits::action::Action;

/// Result type for history construction and configuration.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised by misuse of the history API itself.
///
/// Navigation past either end of a history is never an error: `undo`, `redo`
/// and `jump_to` report it as `Ok(false)`. Failures raised by a target while
/// an action is applied or reverted surface as the action's own error type,
/// wrapped in [`Rejected`] when it happens on `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A capacity of zero was requested.
    #[error("Invalid history capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

/// An action that failed to apply, handed back together with its error.
///
/// The history records nothing when an action fails, but the target may
/// already carry part of the action's work (a [`CompositeAction`] stops at
/// its first failing step). The action is returned so the caller can
/// [`revert`](Action::revert) what it did before touching the history again.
/// An action that fails without changing anything has nothing to revert.
///
/// [`CompositeAction`]: crate::composite_action::CompositeAction
pub struct Rejected<A: Action> {
    error: A::Error,
    action: A,
}

impl<A: Action> Rejected<A> {
    pub(crate) fn new(error: A::Error, action: A) -> Self {
        Self { error, action }
    }

    #[must_use]
    pub fn error(&self) -> &A::Error {
        &self.error
    }

    #[must_use]
    pub fn action(&self) -> &A {
        &self.action
    }

    #[must_use]
    pub fn into_error(self) -> A::Error {
        self.error
    }

    #[must_use]
    pub fn into_action(self) -> A {
        self.action
    }

    #[must_use]
    pub fn into_parts(self) -> (A::Error, A) {
        (self.error, self.action)
    }
}

impl<A: Action> fmt::Debug for Rejected<A>
where
    A::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .field("action", &self.action.description())
            .finish()
    }
}

impl<A: Action> fmt::Display for Rejected<A>
where
    A::Error: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was rejected: {}", self.action.description(), self.error)
    }
}

impl<A: Action> std::error::Error for Rejected<A>
where
    A::Error: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
