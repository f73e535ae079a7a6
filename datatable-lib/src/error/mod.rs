//! Error types

mod column;
mod export;
mod field;
mod import;

pub use column::*;
pub use export::*;
pub use field::*;
pub use import::*;
