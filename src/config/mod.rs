//! Configuration module for catalog audits
//!
//! This module provides the `AuditConfig` struct and its type-safe builder
//! for configuring audit runs with validation and sensible defaults.

pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

pub use builder::{AuditConfigBuilder, Complete, WithConsoleUrl};
pub use types::AuditConfig;
