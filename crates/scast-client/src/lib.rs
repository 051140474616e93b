//! Typed HTTP client for the StarCast job API.

pub mod client;
pub mod error;

pub use client::{ApiClient, ClientConfig};
pub use error::{ClientError, ClientResult};
