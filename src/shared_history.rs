use parking_lot::{Mutex, MutexGuard};
use std::{fmt, sync::Arc};

use crate::{history_manager::HistoryManager, traits::strategy::Strategy};

/// A [`HistoryManager`] behind a single lock, shareable between threads.
///
/// The manager itself does no locking. When several threads need the same
/// history, every operation has to go through one lock that guards the whole
/// manager; this type is that lock. Each call to `lock` or `modify` holds it
/// for the full duration of the operation, so a record, undo or redo is never
/// interleaved with another one.
///
/// The target being versioned is not covered by this lock. Callers that share
/// the target as well should always take the history lock first.
///
/// # Examples
///
/// ```
/// use versioned_history::prelude::*;
/// use versioned_history::text::{TextBuffer, TextEdit};
///
/// let history = SharedHistory::new(ActionHistory::with_capacity(10).unwrap());
/// let mut buffer = TextBuffer::from("Hello");
///
/// history
///     .modify(|history| history.apply(TextEdit::append("!"), &mut buffer))
///     .unwrap();
/// assert_eq!(history.lock().size(), 1);
///
/// let other = history.clone();
/// assert!(other.lock().undo(&mut buffer).unwrap());
/// assert_eq!(buffer.content(), "Hello");
/// ```
pub struct SharedHistory<S: Strategy> {
    inner: Arc<Mutex<HistoryManager<S>>>,
}

impl<S: Strategy> SharedHistory<S> {
    pub fn new(history: HistoryManager<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }

    /// Locks the history, blocking until it is available.
    pub fn lock(&self) -> MutexGuard<'_, HistoryManager<S>> {
        self.inner.lock()
    }

    /// Locks the history if no other thread holds it.
    #[allow(clippy::must_use_candidate)]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, HistoryManager<S>>> {
        self.inner.try_lock()
    }

    /// Runs `f` with the history locked and returns its result.
    pub fn modify<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HistoryManager<S>) -> R,
    {
        let mut history = self.lock();
        f(&mut history)
    }

    /// Takes the history back out if this is the last handle to it.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when other handles still exist.
    pub fn into_inner(self) -> Result<HistoryManager<S>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<S: Strategy> Clone for SharedHistory<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Strategy + Default> Default for SharedHistory<S> {
    fn default() -> Self {
        Self::new(HistoryManager::default())
    }
}

impl<S: Strategy> From<HistoryManager<S>> for SharedHistory<S> {
    fn from(history: HistoryManager<S>) -> Self {
        Self::new(history)
    }
}

impl<S: Strategy> fmt::Debug for SharedHistory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(history) => write!(f, "SharedHistory({:?})", *history),
            None => write!(f, "SharedHistory(<locked>)"),
        }
    }
}
