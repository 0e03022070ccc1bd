//! Selection state and cross-page bulk selection

mod config;
mod controller;
mod set;

pub use config::*;
pub use controller::*;
pub use set::*;
