//! Fluent builder APIs for test histories.
//!
//! The [`HistoryBuilder`] provides a convenient way to construct a complete,
//! date-ordered running history for analysis tests.

mod history;

pub use history::HistoryBuilder;
