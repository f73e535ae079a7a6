//! In-memory tabular data engine
//!
//! Holds a collection of rows with a configurable column layout and derives
//! the visible page (search, sort, pagination, column projection) from raw
//! state on every read. Rows can be edited inline, added, deleted, and moved
//! in and out as CSV.

pub mod error;
pub mod exchange;
pub mod model;
pub mod query;
pub mod store;

pub use store::TableConfig;
pub use store::TableStore;
