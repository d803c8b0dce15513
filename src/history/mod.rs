//! Search history: the bounded list of past queries and relative time display.

mod list;
mod time_ago;

pub use list::{HistoryEntry, SearchHistory};
pub use time_ago::{time_ago, TimeAgo};
