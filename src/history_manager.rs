use std::{fmt, num::NonZeroUsize};

use chrono::Local;
use tracing::{debug, trace};

use crate::{
    config::HistoryConfig,
    error::HistoryResult,
    history_log::{EntryInfo, HistoryEntry, HistoryLog},
    traits::strategy::Strategy,
};

/// A bounded, linear undo/redo history.
///
/// The manager owns an ordered log of entries and a cursor into it. The
/// strategy `S` decides what an entry is (a reversible action or a state
/// snapshot) and how moving the cursor changes the target. The target itself
/// stays with the caller and is only borrowed for the duration of a call.
///
/// The cursor is exposed as `Option<usize>`, where `None` means "before the
/// first entry". Recording a new entry discards everything after the cursor.
/// When the log grows past its capacity the oldest entries are evicted.
///
/// Navigation past either end is not an error: `undo`, `redo` and `jump_to`
/// return `Ok(false)` and change nothing.
pub struct HistoryManager<S: Strategy> {
    log: HistoryLog<S::Item>,
    cursor: Option<usize>,
    capacity: Option<NonZeroUsize>,
    strategy: S,
}

impl<S: Strategy + Default> HistoryManager<S> {
    /// A history that keeps at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::from_config(HistoryConfig::new(capacity))
    }

    /// A history with no bound on its length.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::from_config(HistoryConfig::unbounded())
    }

    /// A history that keeps at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`](crate::error::HistoryError::InvalidCapacity)
    /// when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> HistoryResult<Self> {
        HistoryConfig::with_capacity(capacity).map(Self::from_config)
    }

    #[must_use]
    pub fn from_config(config: HistoryConfig) -> Self {
        Self::with_strategy(S::default(), config)
    }
}

impl<S: Strategy> HistoryManager<S> {
    #[must_use]
    pub fn with_strategy(strategy: S, config: HistoryConfig) -> Self {
        let capacity = config.capacity();
        let log = match capacity {
            Some(limit) => HistoryLog::with_capacity(limit.get()),
            None => HistoryLog::new(),
        };

        Self {
            log,
            cursor: None,
            capacity,
            strategy,
        }
    }

    /// Records an entry whose change has already been made to the target.
    ///
    /// Any entries after the cursor are discarded, the new entry becomes the
    /// current one, and the oldest entry is evicted if the log is over capacity.
    pub fn record(&mut self, item: S::Item) {
        self.push_entry(item, None);
    }

    /// Same as [`record`](Self::record), with a display label.
    pub fn record_labeled(&mut self, item: S::Item, label: impl Into<String>) {
        self.push_entry(item, Some(label.into()));
    }

    fn push_entry(&mut self, item: S::Item, label: Option<String>) {
        let recorded_at = Local::now();
        let label = label.unwrap_or_else(|| self.strategy.label(&item, recorded_at));

        self.discard_redo();
        self.log
            .push_back(HistoryEntry::new(item, label, recorded_at));
        self.cursor = Some(self.log.len() - 1);
        debug!(size = self.log.len(), "recorded history entry");

        self.evict_overflow();
    }

    fn discard_redo(&mut self) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.log.len() {
            debug!(discarded = self.log.len() - keep, "discarded redo history");
            self.log.truncate(keep);
        }
    }

    /// Drops the oldest entries while over capacity, never past the cursor.
    fn evict_overflow(&mut self) {
        let Some(limit) = self.capacity else {
            return;
        };

        let mut evicted = 0;
        while self.log.len() > limit.get() {
            match self.cursor {
                Some(cursor) if cursor > 0 => {
                    self.log.pop_front();
                    self.cursor = Some(cursor - 1);
                    evicted += 1;
                }
                _ => break,
            }
        }

        if evicted > 0 {
            debug!(evicted, capacity = limit.get(), "evicted oldest history entries");
        }
    }

    /// Steps back one entry.
    ///
    /// Returns `Ok(false)` without touching anything when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns the target's error; the cursor is left where it was.
    pub fn undo(&mut self, target: &mut S::Target) -> Result<bool, S::Error> {
        let Some(from) = self.cursor.filter(|_| self.can_undo()) else {
            return Ok(false);
        };

        let to = from.checked_sub(1);
        self.strategy.backward(&mut self.log, from, to, target)?;
        self.cursor = to;
        trace!(from, to = ?to, "undo");

        Ok(true)
    }

    /// Steps forward one entry.
    ///
    /// Returns `Ok(false)` without touching anything when there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns the target's error; the cursor is left where it was.
    pub fn redo(&mut self, target: &mut S::Target) -> Result<bool, S::Error> {
        if !self.can_redo() {
            return Ok(false);
        }

        let from = self.cursor;
        let to = from.map_or(0, |cursor| cursor + 1);
        self.strategy.forward(&mut self.log, from, to, target)?;
        self.cursor = Some(to);
        trace!(from = ?from, to, "redo");

        Ok(true)
    }

    /// Moves straight to `index`, as if by repeated undo or redo.
    ///
    /// Returns `Ok(false)` without touching anything when `index` is not in
    /// the log.
    ///
    /// # Errors
    ///
    /// Returns the target's error; the cursor is left where it was.
    pub fn jump_to(&mut self, index: usize, target: &mut S::Target) -> Result<bool, S::Error> {
        if index >= self.log.len() {
            return Ok(false);
        }

        match self.cursor {
            Some(cursor) if cursor == index => return Ok(true),
            Some(cursor) if index < cursor => {
                self.strategy
                    .backward(&mut self.log, cursor, Some(index), target)?;
            }
            from => self.strategy.forward(&mut self.log, from, index, target)?,
        }

        trace!(from = ?self.cursor, to = index, "jump");
        self.cursor = Some(index);

        Ok(true)
    }

    /// Empties the log and resets the cursor. The target is left as it is.
    pub fn clear(&mut self) {
        if !self.log.is_empty() {
            debug!(size = self.log.len(), "cleared history");
        }

        self.log.clear();
        self.cursor = None;
    }

    /// Changes the capacity, dropping entries that no longer fit.
    ///
    /// The oldest entries before the cursor go first; if the log is still too
    /// long, the newest redo entries are dropped. The entry at the cursor is
    /// always kept.
    pub fn set_capacity(&mut self, capacity: NonZeroUsize) {
        self.capacity = Some(capacity);
        self.evict_overflow();

        if self.log.len() > capacity.get() {
            debug!(
                discarded = self.log.len() - capacity.get(),
                "discarded redo history over capacity"
            );
            self.log.truncate(capacity.get());
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Index of the current entry, or `None` before the first one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some() && self.cursor > self.strategy.floor(self.log.len())
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |cursor| cursor + 1) < self.log.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry<S::Item>> {
        self.log.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &HistoryLog<S::Item> {
        &self.log
    }

    /// Label of the entry at the cursor.
    #[must_use]
    pub fn current_label(&self) -> Option<&str> {
        self.cursor
            .and_then(|cursor| self.log.get(cursor))
            .map(HistoryEntry::label)
    }

    /// Labels and timestamps of every entry, oldest first.
    #[must_use]
    pub fn list_history(&self) -> Vec<EntryInfo> {
        self.log
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryInfo {
                index,
                label: entry.label().to_string(),
                recorded_at: entry.recorded_at(),
                is_current: self.cursor == Some(index),
            })
            .collect()
    }

    /// Entries at or before the cursor, nearest first.
    #[must_use]
    pub fn undo_history(&self) -> Option<Vec<&HistoryEntry<S::Item>>> {
        let cursor = self.cursor?;
        Some(self.log.iter().take(cursor + 1).rev().collect())
    }

    /// Entries after the cursor, nearest first.
    #[must_use]
    pub fn redo_history(&self) -> Option<Vec<&HistoryEntry<S::Item>>> {
        let skip = self.cursor.map_or(0, |cursor| cursor + 1);
        if skip >= self.log.len() {
            return None;
        }

        Some(self.log.iter().skip(skip).collect())
    }
}

impl<S: Strategy + Default> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::from_config(HistoryConfig::default())
    }
}

impl<S: Strategy> fmt::Debug for HistoryManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("size", &self.log.len())
            .field("position", &self.cursor)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
