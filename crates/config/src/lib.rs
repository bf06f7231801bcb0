//! Configuration management for jlforge
//!
//! This crate handles:
//! - Configuration file loading and defaults
//! - XDG directory lookup
//! - Global git identity discovery
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod identity;
pub mod logging;

// Re-export error types from core
pub use jlforge_core::{Error, Result};

// Re-export main types
pub use config::{Config, GitDefaults};
