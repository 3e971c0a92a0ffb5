use std::{collections::VecDeque, fmt};

use chrono::{DateTime, Local};

/// One recorded unit of a history: an action or a snapshot, with display metadata.
///
/// The label and timestamp are for display only and play no part in
/// navigation; order is strictly insertion order.
#[derive(Debug, Clone)]
pub struct HistoryEntry<T> {
    item: T,
    label: String,
    recorded_at: DateTime<Local>,
}

impl<T> HistoryEntry<T> {
    pub(crate) fn new(item: T, label: String, recorded_at: DateTime<Local>) -> Self {
        Self {
            item,
            label,
            recorded_at,
        }
    }

    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Local> {
        self.recorded_at
    }

    pub(crate) fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

/// A display row produced by `list_history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub index: usize,
    pub label: String,
    pub recorded_at: DateTime<Local>,
    pub is_current: bool,
}

impl fmt::Display for EntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} [{}]",
            self.index + 1,
            self.label,
            self.recorded_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        if self.is_current {
            write!(f, " <- current")?;
        }
        Ok(())
    }
}

/// The ordered entries of a history, oldest first.
///
/// Entries are only added at the back and only dropped from the front
/// (eviction) or the back (discarding redo history). Outside this crate the
/// log is read-only, so a recorded entry cannot be changed through it:
///
/// ```compile_fail
/// use versioned_history::prelude::HistoryLog;
///
/// fn rewrite(log: &mut HistoryLog<i32>) {
///     *log.item_mut(0).unwrap() = 0;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HistoryLog<T> {
    entries: VecDeque<HistoryEntry<T>>,
}

impl<T> HistoryLog<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry<T>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry<T>> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Mutable access to the item at `index`.
    ///
    /// Only the action strategy uses this, to let an action keep its own
    /// bookkeeping (removed text, composite progress) between apply and revert.
    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index).map(HistoryEntry::item_mut)
    }

    pub(crate) fn push_back(&mut self, entry: HistoryEntry<T>) {
        self.entries.push_back(entry);
    }

    pub(crate) fn pop_front(&mut self) -> Option<HistoryEntry<T>> {
        self.entries.pop_front()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
