//! Aggregates - Consistency boundaries over the character document

mod history_log;

pub use history_log::{HistoryEntry, HistoryError, HistoryLog, DEFAULT_HISTORY_LIMIT};
