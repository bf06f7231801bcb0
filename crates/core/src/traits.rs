//! Core behavioral traits for jlforge components
//!
//! This module defines abstract interfaces that decouple high-level modules
//! from concrete implementations, following the Dependency Inversion Principle.
//!
//! By depending on these traits instead of concrete types, plugins can be
//! exercised in tests with fakes for the version-control layer and for
//! external command execution, without touching the orchestration logic.

use crate::Result;
use indexmap::IndexMap;
use std::path::Path;

/// Text substitution interface for auxiliary generated files
///
/// Rendering is a pure string concern: replace `{{KEY}}` placeholders with
/// values from the variable map. Plugins that emit documentation or readme
/// files depend on this trait rather than on a concrete engine.
///
/// # Examples
///
/// ```ignore
/// let mut vars = IndexMap::new();
/// vars.insert("PKG".to_string(), "Foo".to_string());
/// let out = renderer.render("module {{PKG}}", &vars);
/// assert_eq!(out, "module Foo");
/// ```
pub trait Renderer {
    /// Substitute `{{KEY}}` placeholders in `input` with values from `vars`
    ///
    /// Unknown placeholders are left untouched.
    fn render(&self, input: &str, vars: &IndexMap<String, String>) -> String;
}

/// External command execution interface
///
/// Abstracts process spawning so that callers (e.g. the signed-commit path
/// of the Git plugin, or the dependency updater) can be tested with a fake
/// runner that records invocations instead of spawning anything.
pub trait CommandRunner {
    /// Run `program` with `args`, optionally in `dir`, suppressing stdout
    ///
    /// A non-zero exit status is an error.
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<()>;

    /// Check whether `program` is present on the PATH
    fn is_available(&self, program: &str) -> bool;
}
