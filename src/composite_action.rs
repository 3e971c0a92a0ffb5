use std::borrow::Cow;

use crate::traits::action::Action;

/// An ordered group of actions recorded as a single entry.
///
/// `apply` runs the actions front to back and `revert` runs them back to
/// front. The group counts how many of its actions have been applied, so if
/// action `i` fails during `apply`, a following `revert` undoes only actions
/// `0..i`. A failed group is not rolled back automatically.
///
/// # Example
///
/// ```
/// use versioned_history::prelude::*;
/// use versioned_history::text::{TextBuffer, TextEdit};
///
/// let mut buffer = TextBuffer::from("start");
/// let mut group = CompositeAction::new(vec![TextEdit::append("1"), TextEdit::append("2")]);
///
/// group.apply(&mut buffer).unwrap();
/// assert_eq!(buffer.content(), "start12");
///
/// group.revert(&mut buffer).unwrap();
/// assert_eq!(buffer.content(), "start");
/// ```
#[derive(Debug, Clone)]
pub struct CompositeAction<A> {
    actions: Vec<A>,
    applied: usize,
    label: Option<String>,
}

impl<A> CompositeAction<A> {
    #[must_use]
    pub fn new(actions: Vec<A>) -> Self {
        Self {
            actions,
            applied: 0,
            label: None,
        }
    }

    #[must_use]
    pub fn labeled(actions: Vec<A>, label: impl Into<String>) -> Self {
        Self {
            actions,
            applied: 0,
            label: Some(label.into()),
        }
    }

    /// Appends an action to the end of the group.
    pub fn push(&mut self, action: A) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// How many actions, counted from the front, are currently applied.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.actions.iter()
    }
}

impl<A> Default for CompositeAction<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<A> FromIterator<A> for CompositeAction<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<A: Action> Action for CompositeAction<A> {
    type Target = A::Target;
    type Error = A::Error;

    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        while let Some(action) = self.actions.get_mut(self.applied) {
            action.apply(target)?;
            self.applied += 1;
        }
        Ok(())
    }

    fn revert(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        while let Some(last) = self.applied.checked_sub(1) {
            self.actions[last].revert(target)?;
            self.applied = last;
        }
        Ok(())
    }

    fn description(&self) -> Cow<'_, str> {
        match &self.label {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Owned(format!("Batch of {} actions", self.actions.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action_strategy::ActionHistory,
        text::{TextBuffer, TextEdit, TextError},
    };

    #[test]
    fn test_empty_group_round_trip() {
        let mut buffer = TextBuffer::from("abc");
        let mut group = CompositeAction::<TextEdit>::default();

        group.apply(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "abc");
        group.revert(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "abc");
        assert_eq!(group.applied(), 0);
    }

    #[test]
    fn test_single_action_round_trip() {
        let mut buffer = TextBuffer::from("abc");
        let mut group = CompositeAction::new(vec![TextEdit::delete(0, 1)]);

        group.apply(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "bc");
        group.revert(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "abc");
    }

    #[test]
    fn test_reverts_in_reverse_order() {
        let mut buffer = TextBuffer::from("Hello");
        let mut group: CompositeAction<TextEdit> = [
            TextEdit::append(" World"),
            TextEdit::delete(0, 5),
            TextEdit::insert(0, "Hi"),
        ]
        .into_iter()
        .collect();

        group.apply(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "Hi World");
        assert_eq!(group.applied(), 3);

        group.revert(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "Hello");
        assert_eq!(group.applied(), 0);
    }

    #[test]
    fn test_partial_apply_reverts_only_completed() {
        let mut buffer = TextBuffer::from("abc");
        let mut group = CompositeAction::new(vec![
            TextEdit::append("d"),
            TextEdit::insert(0, "x"),
            TextEdit::delete(10, 2),
            TextEdit::append("never"),
        ]);

        let result = group.apply(&mut buffer);
        assert!(matches!(result, Err(TextError::InvalidRange { .. })));
        assert_eq!(buffer.content(), "xabcd");
        assert_eq!(group.applied(), 2);

        group.revert(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "abc");
        assert_eq!(group.applied(), 0);
    }

    #[test]
    fn test_description() {
        let mut group = CompositeAction::new(vec![TextEdit::append("a")]);
        group.push(TextEdit::append("b"));
        assert_eq!(group.len(), 2);
        assert_eq!(group.description(), "Batch of 2 actions");

        let labeled = CompositeAction::labeled(vec![TextEdit::append("a")], "Paste");
        assert_eq!(labeled.description(), "Paste");
    }

    #[test]
    fn test_recorded_as_one_entry() {
        let mut buffer = TextBuffer::from("start");
        let mut history = ActionHistory::with_capacity(10).unwrap();

        history
            .apply(
                CompositeAction::new(vec![TextEdit::append("1"), TextEdit::append("2")]),
                &mut buffer,
            )
            .unwrap();
        history
            .apply(CompositeAction::new(vec![TextEdit::append("3")]), &mut buffer)
            .unwrap();
        assert_eq!(buffer.content(), "start123");
        assert_eq!(history.size(), 2);

        history.undo(&mut buffer).unwrap();
        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "start");

        history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "start12");
    }

    #[test]
    fn test_failed_group_is_handed_back() {
        let mut buffer = TextBuffer::from("abc");
        let mut history = ActionHistory::with_capacity(10).unwrap();

        history
            .apply(CompositeAction::new(vec![TextEdit::append("!")]), &mut buffer)
            .unwrap();

        let rejected = history
            .apply(
                CompositeAction::new(vec![TextEdit::append("d"), TextEdit::delete(99, 1)]),
                &mut buffer,
            )
            .unwrap_err();
        assert_eq!(buffer.content(), "abc!d");
        assert_eq!(history.size(), 1);
        assert_eq!(history.position(), Some(0));
        assert_eq!(rejected.action().applied(), 1);

        rejected.into_action().revert(&mut buffer).unwrap();
        assert_eq!(buffer.content(), "abc!");

        assert!(history.undo(&mut buffer).unwrap());
        assert_eq!(buffer.content(), "abc");
        assert!(history.redo(&mut buffer).unwrap());
        assert_eq!(buffer.content(), "abc!");
    }
}
