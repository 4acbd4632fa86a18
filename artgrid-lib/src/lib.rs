//! Paged listing controller with persistent row selection
//!
//! Browses a remotely paginated record set one page at a time while keeping a
//! selection that survives page changes. Ships an HTTP source for the Art
//! Institute of Chicago artworks listing.

pub mod api;
pub mod controller;
pub mod error;
pub mod model;
pub mod pager;
pub mod selection;

mod client;
mod retry;

pub use client::*;
pub use controller::GridController;
pub use retry::RetryConfig;
