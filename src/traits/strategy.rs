use chrono::{DateTime, Local};

use crate::history_log::HistoryLog;

/// How a [`HistoryManager`](crate::history_manager::HistoryManager) turns
/// cursor movement into changes on a target.
///
/// A strategy fixes the kind of item a log holds, so a single history never
/// mixes actions with snapshots. The manager owns the log and the cursor and
/// only asks the strategy to move the target between two positions.
///
/// Positions are `Option<usize>`: `None` is the point before the first entry.
/// Strategies defined outside this crate see the log read-only.
pub trait Strategy {
    type Target: ?Sized;
    type Item;
    type Error;

    /// The lowest position `undo` may reach in a log of `len` entries.
    fn floor(&self, len: usize) -> Option<usize>;

    /// Brings `target` from the state at `from` to the state at `to`, where `to` is after `from`.
    ///
    /// # Errors
    ///
    /// Returns the target's error. On failure the target must be left in the
    /// state at `from`.
    fn forward(
        &mut self,
        log: &mut HistoryLog<Self::Item>,
        from: Option<usize>,
        to: usize,
        target: &mut Self::Target,
    ) -> Result<(), Self::Error>;

    /// Brings `target` from the state at `from` back to the state at `to`, where `to` is before `from`.
    ///
    /// # Errors
    ///
    /// Returns the target's error. On failure the target must be left in the
    /// state at `from`.
    fn backward(
        &mut self,
        log: &mut HistoryLog<Self::Item>,
        from: usize,
        to: Option<usize>,
        target: &mut Self::Target,
    ) -> Result<(), Self::Error>;

    /// Display label for an entry recorded without one.
    fn label(&self, item: &Self::Item, recorded_at: DateTime<Local>) -> String;
}
