//! HTTP API
//!
//! JSON endpoints under `/api` consumed by the site front-end and the
//! admin panel.

pub mod admin;
pub mod content;
pub mod error;
pub mod pages;
pub mod properties;
pub mod server;
pub mod submissions;

pub use server::{router, AppState};
