//! Estate - API server for a real-estate marketing site
//!
//! Property listings, region guide and page copy, inquiry funnel and an
//! admin surface, all persisted as flat JSON files.

pub mod cli;
pub mod core;
pub mod listing;
pub mod model;
pub mod store;
pub mod units;
pub mod web;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
