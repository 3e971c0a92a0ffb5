//! The single indexed log must behave exactly like the classic two-stack
//! design: an undo stack bounded at `max_history` (oldest dropped first) and
//! a redo stack that is emptied by every new command.

use std::convert::Infallible;

use proptest::prelude::*;
use versioned_history::prelude::{Action, ActionHistory};

#[derive(Debug, Clone, Copy)]
struct Add(i64);

impl Action for Add {
    type Target = i64;
    type Error = Infallible;

    fn apply(&mut self, target: &mut i64) -> Result<(), Infallible> {
        *target += self.0;
        Ok(())
    }

    fn revert(&mut self, target: &mut i64) -> Result<(), Infallible> {
        *target -= self.0;
        Ok(())
    }
}

/// Reference invoker built from two stacks.
struct TwoStackInvoker {
    history: Vec<Add>,
    redo_stack: Vec<Add>,
    max_history: usize,
}

impl TwoStackInvoker {
    fn new(max_history: usize) -> Self {
        Self {
            history: Vec::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    fn execute(&mut self, mut command: Add, target: &mut i64) {
        let Ok(()) = command.apply(target);
        self.history.push(command);
        self.redo_stack.clear();

        if self.history.len() > self.max_history {
            self.history.remove(0);
        }
    }

    fn undo(&mut self, target: &mut i64) -> bool {
        let Some(mut command) = self.history.pop() else {
            return false;
        };
        let Ok(()) = command.revert(target);
        self.redo_stack.push(command);
        true
    }

    fn redo(&mut self, target: &mut i64) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        let Ok(()) = command.apply(target);
        self.history.push(command);
        true
    }

    fn clear(&mut self) {
        self.history.clear();
        self.redo_stack.clear();
    }
}

#[derive(Debug, Clone)]
enum Op {
    Execute(i64),
    Undo,
    Redo,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (-100i64..100).prop_map(Op::Execute),
        3 => Just(Op::Undo),
        3 => Just(Op::Redo),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn log_matches_two_stacks(
        max_history in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..100),
    ) {
        let mut reference = TwoStackInvoker::new(max_history);
        let mut reference_target = 0i64;

        let mut history = ActionHistory::with_capacity(max_history).unwrap();
        let mut target = 0i64;

        for op in ops {
            match op {
                Op::Execute(value) => {
                    reference.execute(Add(value), &mut reference_target);
                    history.apply(Add(value), &mut target).unwrap();
                }
                Op::Undo => {
                    let expected = reference.undo(&mut reference_target);
                    prop_assert_eq!(history.undo(&mut target).unwrap(), expected);
                }
                Op::Redo => {
                    let expected = reference.redo(&mut reference_target);
                    prop_assert_eq!(history.redo(&mut target).unwrap(), expected);
                }
                Op::Clear => {
                    reference.clear();
                    history.clear();
                }
            }

            let undo_len = history.position().map_or(0, |p| p + 1);
            prop_assert_eq!(target, reference_target);
            prop_assert_eq!(undo_len, reference.history.len());
            prop_assert_eq!(history.size() - undo_len, reference.redo_stack.len());
            prop_assert_eq!(history.can_undo(), !reference.history.is_empty());
            prop_assert_eq!(history.can_redo(), !reference.redo_stack.is_empty());
        }
    }
}

#[test]
fn eviction_matches_two_stacks() {
    let mut reference = TwoStackInvoker::new(3);
    let mut reference_target = 0;
    let mut history = ActionHistory::with_capacity(3).unwrap();
    let mut target = 0;

    for value in 1..=6 {
        reference.execute(Add(value), &mut reference_target);
        history.apply(Add(value), &mut target).unwrap();
    }

    while reference.undo(&mut reference_target) {
        assert!(history.undo(&mut target).unwrap());
        assert_eq!(target, reference_target);
    }
    assert!(!history.undo(&mut target).unwrap());
    assert_eq!(target, 6);
}
