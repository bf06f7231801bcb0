//! Base error types for jlforge
//!
//! This module provides the foundation error types that all crates can use.

use std::io;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A plugin precondition was not met; raised during validation, before
    /// any filesystem mutation happens
    #[error("configuration error in plugin '{plugin}': {reason}")]
    Configuration {
        /// Name of the offending plugin
        plugin: String,
        /// The violated precondition
        reason: String,
    },

    /// A plugin failed while one of its hooks was running; the generation
    /// run is aborted and whatever was already written stays on disk
    #[error("plugin '{plugin}' failed during {phase}: {source}")]
    Phase {
        /// Name of the failing plugin
        plugin: String,
        /// Hook phase the plugin was executing
        phase: &'static str,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// An external command-line tool invocation failed
    #[error("external tool failed: {command}: {reason}")]
    ExternalTool {
        /// The command line that was attempted
        command: String,
        /// Failure detail reported by the runner
        reason: String,
    },

    /// Version-control operation error
    #[error("git error: {0}")]
    Vcs(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
