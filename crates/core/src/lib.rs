//! Core types and utilities for jlforge
//!
//! This is the foundation crate (Layer 0) that all other jlforge crates
//! depend on. It provides:
//! - Base error types
//! - Platform detection
//! - Core behavioral traits (Renderer, CommandRunner)
//!
//! This crate has no dependencies on other jlforge crates.

pub mod error;
pub mod platform;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{CommandRunner, Renderer};
