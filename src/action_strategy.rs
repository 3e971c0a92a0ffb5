use std::{fmt, marker::PhantomData};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::{
    error::Rejected,
    history_log::HistoryLog,
    history_manager::HistoryManager,
    traits::{action::Action, strategy::Strategy},
};

/// Records reversible actions; navigation reverts and re-applies them in order.
///
/// Position `None` is the target before any recorded action, so every
/// recorded action can be undone.
pub struct ActionStrategy<A> {
    _marker: PhantomData<fn() -> A>,
}

/// A history of reversible actions.
///
/// # Example
///
/// ```
/// use versioned_history::prelude::*;
/// use versioned_history::text::{TextBuffer, TextEdit};
///
/// let mut buffer = TextBuffer::from("Hello");
/// let mut history = ActionHistory::with_capacity(100).unwrap();
///
/// history.apply(TextEdit::append(" World"), &mut buffer).unwrap();
/// assert_eq!(buffer.content(), "Hello World");
///
/// assert!(history.undo(&mut buffer).unwrap());
/// assert_eq!(buffer.content(), "Hello");
/// assert!(!history.undo(&mut buffer).unwrap());
/// ```
pub type ActionHistory<A> = HistoryManager<ActionStrategy<A>>;

impl<A> Default for ActionStrategy<A> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<A> fmt::Debug for ActionStrategy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionStrategy")
    }
}

fn apply_at<A: Action>(
    log: &mut HistoryLog<A>,
    index: usize,
    target: &mut A::Target,
) -> Result<(), A::Error> {
    match log.item_mut(index) {
        Some(action) => action.apply(target),
        None => Ok(()),
    }
}

fn revert_at<A: Action>(
    log: &mut HistoryLog<A>,
    index: usize,
    target: &mut A::Target,
) -> Result<(), A::Error> {
    match log.item_mut(index) {
        Some(action) => action.revert(target),
        None => Ok(()),
    }
}

impl<A: Action> Strategy for ActionStrategy<A> {
    type Target = A::Target;
    type Item = A;
    type Error = A::Error;

    fn floor(&self, _len: usize) -> Option<usize> {
        None
    }

    fn forward(
        &mut self,
        log: &mut HistoryLog<A>,
        from: Option<usize>,
        to: usize,
        target: &mut A::Target,
    ) -> Result<(), A::Error> {
        let start = from.map_or(0, |cursor| cursor + 1);

        for index in start..=to {
            if let Err(error) = apply_at(log, index, target) {
                for done in (start..index).rev() {
                    if revert_at(log, done, target).is_err() {
                        warn!(index = done, "revert failed while rolling back a jump");
                        break;
                    }
                }
                return Err(error);
            }
        }

        Ok(())
    }

    fn backward(
        &mut self,
        log: &mut HistoryLog<A>,
        from: usize,
        to: Option<usize>,
        target: &mut A::Target,
    ) -> Result<(), A::Error> {
        let stop = to.map_or(0, |cursor| cursor + 1);

        for index in (stop..=from).rev() {
            if let Err(error) = revert_at(log, index, target) {
                for done in index + 1..=from {
                    if apply_at(log, done, target).is_err() {
                        warn!(index = done, "apply failed while rolling back a jump");
                        break;
                    }
                }
                return Err(error);
            }
        }

        Ok(())
    }

    fn label(&self, item: &A, _recorded_at: DateTime<Local>) -> String {
        item.description().into_owned()
    }
}

impl<A: Action> HistoryManager<ActionStrategy<A>> {
    /// Applies `action` to `target` and records it.
    ///
    /// # Errors
    ///
    /// Returns the action's error together with the action itself. Nothing
    /// is recorded, but the target keeps whatever part of the action landed
    /// before it failed, such as the completed steps of a
    /// [`CompositeAction`](crate::composite_action::CompositeAction). Revert
    /// the returned action to bring the target back in line with the history.
    pub fn apply(&mut self, mut action: A, target: &mut A::Target) -> Result<(), Rejected<A>> {
        if let Err(error) = action.apply(target) {
            debug!(action = %action.description(), "action rejected, not recorded");
            return Err(Rejected::new(error, action));
        }
        self.record(action);
        Ok(())
    }

    /// Same as [`apply`](Self::apply), with a display label.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_labeled(
        &mut self,
        mut action: A,
        label: impl Into<String>,
        target: &mut A::Target,
    ) -> Result<(), Rejected<A>> {
        if let Err(error) = action.apply(target) {
            debug!(action = %action.description(), "action rejected, not recorded");
            return Err(Rejected::new(error, action));
        }
        self.record_labeled(action, label);
        Ok(())
    }

    /// Applies and records each action in turn, each as its own entry.
    ///
    /// # Errors
    ///
    /// Stops at the first failing action and hands it back as in
    /// [`apply`](Self::apply). Actions before it stay applied and recorded.
    pub fn apply_batch<I>(&mut self, actions: I, target: &mut A::Target) -> Result<(), Rejected<A>>
    where
        I: IntoIterator<Item = A>,
    {
        for action in actions {
            self.apply(action, target)?;
        }
        Ok(())
    }
}
