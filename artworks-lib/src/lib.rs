//! Artworks browser library
//!
//! An async client for the Art Institute of Chicago artworks collection, plus
//! the pagination-aware selection state that a table front end drives.

pub mod api;
pub mod error;
pub mod model;
pub mod selection;

mod browser;
mod client;

pub use browser::*;
pub use client::*;
