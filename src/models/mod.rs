//! Data transfer objects (DTOs) for API requests and responses.
//!
//! - `history`: HistoryQuery, HistoryEntry

pub mod history;

pub use history::*;
