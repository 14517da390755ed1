//! Lumen Core - Shared foundations for the Lumen content pipeline
//!
//! This crate provides the error type every other Lumen crate reports through:
//! - `LumenError` - Failures raised while registering or resolving assets
//! - `Result` - Crate-wide result alias

mod error;

pub use error::{LumenError, Result};
