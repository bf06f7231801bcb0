//! Dependency resolution collaborator
//!
//! The Git plugin needs exactly one package-manager operation: "update
//! dependencies for the project at this path", used to populate a manifest
//! before it is committed. [`JuliaDeps`] shells out to `julia` through the
//! command runner; tests substitute a fake updater.

use jlforge_core::{CommandRunner, Result};
use std::path::Path;

use crate::exec::Shell;

/// Dependency-resolution interface
pub trait DepUpdater {
    /// Resolve and update dependencies for the project at `project_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying tool invocation fails
    fn update(&self, project_dir: &Path) -> Result<()>;
}

/// [`DepUpdater`] that drives Julia's package manager
pub struct JuliaDeps {
    runner: Box<dyn CommandRunner>,
}

impl JuliaDeps {
    /// Create an updater backed by the production shell runner
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: Box::new(Shell),
        }
    }

    /// Create an updater with a custom runner
    #[must_use]
    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Default for JuliaDeps {
    fn default() -> Self {
        Self::new()
    }
}

impl DepUpdater for JuliaDeps {
    fn update(&self, project_dir: &Path) -> Result<()> {
        let project = format!("--project={}", project_dir.display());
        self.runner.run(
            "julia",
            &[project.as_str(), "-e", "using Pkg; Pkg.update()"],
            None,
        )
    }
}
