//! Scaffolding engine for jlforge
//!
//! This crate holds the plugin orchestration machinery and the plugins
//! themselves:
//! - The [`Plugin`] contract and the hook-order resolver
//! - The [`Template`] aggregate driving the phased generation pipeline
//! - The [`GitPlugin`] and the auxiliary file-writing plugins
//! - Abstractions over version control (git2) and external processes (duct)

pub mod deps;
pub mod exec;
pub mod git;
pub mod git_plugin;
pub mod plugin;
pub mod plugins;
pub mod render;
pub mod template;

pub use git_plugin::GitPlugin;
pub use plugin::{HookStage, Plugin, execution_order};
pub use plugins::{Documenter, ProjectTests, Readme};
pub use template::{Template, TemplateBuilder};

/// Version of this tool, used to annotate the final commit message
///
/// Best-effort: `None` must never fail the caller.
#[must_use]
pub fn version() -> Option<&'static str> {
    option_env!("CARGO_PKG_VERSION")
}
