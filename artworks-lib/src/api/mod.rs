//! Page fetching

mod fetch;
mod page;
mod pages;
mod source;

pub use page::*;
pub use pages::*;
pub use source::*;
