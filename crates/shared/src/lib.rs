//! # Rollcall Shared
//!
//! Role model, error taxonomy and configuration shared by all Rollcall crates.

pub mod error;
pub mod role;
pub mod config;

// Re-exports
pub use error::*;
pub use role::*;
pub use config::*;
