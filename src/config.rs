use std::num::NonZeroUsize;

use crate::error::{HistoryError, HistoryResult};

/// Capacity used by [`HistoryConfig::default`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Construction-time settings for a [`HistoryManager`](crate::history_manager::HistoryManager).
///
/// # Examples
///
/// ```
/// use versioned_history::config::HistoryConfig;
///
/// let config = HistoryConfig::with_capacity(5).unwrap();
/// assert_eq!(config.capacity().map(|c| c.get()), Some(5));
///
/// assert!(HistoryConfig::with_capacity(0).is_err());
/// assert!(HistoryConfig::unbounded().capacity().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    capacity: Option<NonZeroUsize>,
}

impl HistoryConfig {
    /// A configuration bounded at `capacity` entries.
    #[must_use]
    pub const fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }

    /// A configuration with no bound on the number of entries.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { capacity: None }
    }

    /// A configuration bounded at `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> HistoryResult<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(HistoryError::InvalidCapacity(capacity))
    }

    #[must_use]
    pub const fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(DEFAULT_CAPACITY),
        }
    }
}
