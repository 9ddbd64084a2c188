//! Configuration module for the SEO Spider broker
//!
//! This module provides the `BrokerConfig` struct and its type-safe builder.
//! The Tool executable path is the only required value; every limit has a
//! default from `utils::constants`.

// Sub-modules
pub mod builder;
pub mod env;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{BrokerConfigBuilder, WithToolPath};
pub use env::prepare_export_root;
pub use types::BrokerConfig;
