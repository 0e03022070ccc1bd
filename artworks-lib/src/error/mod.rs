//! Error types

mod fetch;
mod selection;

pub use fetch::*;
pub use selection::*;
