//! Adapter for the Fantasy Premier League web API.

pub mod auth;
pub mod client;
pub mod wire;

pub use auth::AuthStrategy;
pub use client::{FplClient, FplConfig, RetryPolicy};
