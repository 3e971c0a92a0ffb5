#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::correctness)]
#![warn(clippy::complexity)]
#![warn(clippy::suspicious)]
#![warn(clippy::cargo)]

pub mod action_strategy;
pub mod composite_action;
pub mod config;
pub mod error;
pub mod history_log;
pub mod history_manager;
pub mod shared_history;
pub mod snapshot_strategy;
pub mod text;
pub mod traits;

pub mod prelude {
	pub use crate::action_strategy::{ActionHistory, ActionStrategy};
	pub use crate::composite_action::CompositeAction;
	pub use crate::config::HistoryConfig;
	pub use crate::error::{HistoryError, HistoryResult, Rejected};
	pub use crate::history_log::{EntryInfo, HistoryEntry, HistoryLog};
	pub use crate::history_manager::HistoryManager;
	pub use crate::shared_history::SharedHistory;
	pub use crate::snapshot_strategy::{SnapshotHistory, SnapshotStrategy};
	pub use crate::traits::action::Action;
	pub use crate::traits::snapshot::Snapshotable;
	pub use crate::traits::strategy::Strategy;
}
