use std::{convert::Infallible, fmt, marker::PhantomData};

use chrono::{DateTime, Local};

use crate::{
    history_log::HistoryLog,
    history_manager::HistoryManager,
    traits::{snapshot::Snapshotable, strategy::Strategy},
};

/// Records full copies of a target; navigation restores the copy at the new position.
///
/// The first capture is the baseline: undo stops at position 0 and never
/// moves before it.
pub struct SnapshotStrategy<T: ?Sized> {
    _marker: PhantomData<fn(&T)>,
}

/// A history of state snapshots.
///
/// Restoring is infallible, so navigation results can be destructured directly.
///
/// # Example
///
/// ```
/// use versioned_history::prelude::*;
/// use versioned_history::text::TextBuffer;
///
/// let mut doc = TextBuffer::new("My Essay");
/// let mut history = SnapshotHistory::with_capacity(100).unwrap();
///
/// history.capture_labeled(&doc, "Empty");
/// doc.append("The quick brown fox");
/// history.capture_labeled(&doc, "Initial draft");
///
/// let Ok(undone) = history.undo(&mut doc);
/// assert!(undone);
/// assert_eq!(doc.content(), "");
///
/// let Ok(undone) = history.undo(&mut doc);
/// assert!(!undone);
/// ```
pub type SnapshotHistory<T> = HistoryManager<SnapshotStrategy<T>>;

impl<T: ?Sized> Default for SnapshotStrategy<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for SnapshotStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SnapshotStrategy")
    }
}

fn restore_at<T: Snapshotable + ?Sized>(
    log: &HistoryLog<T::Snapshot>,
    index: usize,
    target: &mut T,
) {
    if let Some(entry) = log.get(index) {
        target.restore(entry.item());
    }
}

impl<T: Snapshotable + ?Sized> Strategy for SnapshotStrategy<T> {
    type Target = T;
    type Item = T::Snapshot;
    type Error = Infallible;

    fn floor(&self, _len: usize) -> Option<usize> {
        Some(0)
    }

    fn forward(
        &mut self,
        log: &mut HistoryLog<T::Snapshot>,
        _from: Option<usize>,
        to: usize,
        target: &mut T,
    ) -> Result<(), Infallible> {
        restore_at(log, to, target);
        Ok(())
    }

    fn backward(
        &mut self,
        log: &mut HistoryLog<T::Snapshot>,
        _from: usize,
        to: Option<usize>,
        target: &mut T,
    ) -> Result<(), Infallible> {
        if let Some(to) = to {
            restore_at(log, to, target);
        }
        Ok(())
    }

    fn label(&self, _item: &T::Snapshot, recorded_at: DateTime<Local>) -> String {
        format!("Snapshot at {}", recorded_at.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl<T: Snapshotable + ?Sized> HistoryManager<SnapshotStrategy<T>> {
    /// Records a copy of the target's current state.
    pub fn capture(&mut self, target: &T) {
        self.record(target.snapshot());
    }

    /// Same as [`capture`](Self::capture), with a display label.
    pub fn capture_labeled(&mut self, target: &T, label: impl Into<String>) {
        self.record_labeled(target.snapshot(), label);
    }

    /// An owned copy of the snapshot at `index`. Changing it never touches the stored one.
    #[must_use]
    pub fn snapshot_at(&self, index: usize) -> Option<T::Snapshot> {
        self.get(index).map(|entry| entry.item().clone())
    }
}
