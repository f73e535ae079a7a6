//! CSV import and export.
//!
//! Import turns a CSV document into fresh rows ([`parse_csv`]); export writes
//! rows through the visible columns ([`write_csv`]). Both are pure over their
//! inputs; [`TableStore`](crate::store::TableStore) decides which rows and
//! columns take part.

mod export;
mod import;

pub use export::ExportScope;
pub use export::export_file_name;
pub use export::export_file_name_today;
pub use export::export_to_string;
pub use export::write_csv;
pub use import::leading_int;
pub use import::parse_csv;
