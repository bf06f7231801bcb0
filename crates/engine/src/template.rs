//! Template aggregate and generation pipeline
//!
//! A [`Template`] is the full configuration for one scaffold run: target
//! package, owning user and host, and the ordered plugin sequence. Its
//! `generate` method drives the phased pipeline:
//!
//! validate → create skeleton → prehooks → hooks → posthooks
//!
//! Each phase fully completes before the next begins. Validation is the only
//! phase guaranteed side-effect-free on failure; a failure in any later
//! phase aborts the run and leaves the partially generated directory on disk
//! for the caller to inspect or remove.

use crate::plugin::{HookStage, Plugin, execution_order};
use jlforge_core::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Full configuration for one scaffold run
///
/// Immutable once generation begins; plugins receive `&Template` and may not
/// mutate it. Plugin declaration order is the default tie-break for
/// same-priority hooks.
pub struct Template {
    package: String,
    user: String,
    host: String,
    authors: Vec<String>,
    dir: PathBuf,
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("package", &self.package)
            .field("user", &self.user)
            .field("host", &self.host)
            .field("authors", &self.authors)
            .field("dir", &self.dir)
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Template {
    /// Start building a template
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Target package name, without the `.jl` suffix
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Hosting-service user owning the package
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Hosting-service domain (e.g. `github.com`)
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Authors written into Project.toml
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Directory root under which the package directory is created
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Plugins in declaration order
    #[must_use]
    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    /// Run the generation pipeline and return the package directory
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a plugin's validation fails
    /// (before anything is written), and [`Error::Phase`] naming the plugin
    /// and phase when a later hook fails. Partially generated directories
    /// are not rolled back.
    #[tracing::instrument(skip(self), fields(package = %self.package))]
    pub fn generate(&self) -> Result<PathBuf> {
        // Validating: runs for every plugin before any filesystem mutation.
        for idx in execution_order(&self.plugins, HookStage::Validate) {
            debug!(plugin = self.plugins[idx].name(), "Validating plugin");
            self.plugins[idx].validate(self)?;
        }

        let pkg_dir = self.dir.join(&self.package);
        if pkg_dir.exists() {
            return Err(Error::Message(format!(
                "Target directory already exists: {}",
                pkg_dir.display()
            )));
        }

        // Creating: fixed pipeline-owned step, not a plugin hook.
        self.create_skeleton(&pkg_dir)?;
        info!(path = %pkg_dir.display(), "Created package skeleton");

        for stage in [HookStage::PreHook, HookStage::Hook, HookStage::PostHook] {
            self.run_stage(stage, &pkg_dir)?;
        }

        info!(path = %pkg_dir.display(), "Package generated");
        Ok(pkg_dir)
    }

    /// Run all hooks for a single stage in resolved order
    fn run_stage(&self, stage: HookStage, pkg_dir: &Path) -> Result<()> {
        let order = execution_order(&self.plugins, stage);
        debug!(stage = stage.name(), count = order.len(), "Running stage");

        for idx in order {
            let plugin = &self.plugins[idx];
            debug!(
                plugin = plugin.name(),
                stage = stage.name(),
                "Running plugin hook"
            );

            let result = match stage {
                HookStage::PreHook => plugin.prehook(self, pkg_dir),
                HookStage::Hook => plugin.hook(self, pkg_dir),
                HookStage::PostHook => plugin.posthook(self, pkg_dir),
                HookStage::Validate => {
                    unreachable!("validation runs before any filesystem mutation")
                }
            };

            result.map_err(|e| Error::Phase {
                plugin: plugin.name().to_string(),
                phase: stage.name(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }

    /// Write the fixed package skeleton: Project.toml and the module stub
    fn create_skeleton(&self, pkg_dir: &Path) -> Result<()> {
        fs::create_dir_all(pkg_dir.join("src"))?;

        let project = ProjectFile {
            name: &self.package,
            uuid: Uuid::new_v4().to_string(),
            authors: &self.authors,
            version: "0.1.0",
        };
        let rendered = toml::to_string(&project)
            .map_err(|e| Error::Message(format!("Failed to serialize Project.toml: {e}")))?;
        fs::write(pkg_dir.join("Project.toml"), rendered)?;

        let module = format!(
            "module {}\n\n# Write your package code here.\n\nend\n",
            self.package
        );
        fs::write(
            pkg_dir.join("src").join(format!("{}.jl", self.package)),
            module,
        )?;

        Ok(())
    }
}

/// Julia Project.toml front matter
#[derive(Serialize)]
struct ProjectFile<'a> {
    name: &'a str,
    uuid: String,
    authors: &'a [String],
    version: &'a str,
}

/// Builder for [`Template`]
///
/// Only the package name is required; host defaults to `github.com` and the
/// directory root to the current directory. The user may stay empty, in
/// which case plugins that need one fail validation.
#[derive(Default)]
pub struct TemplateBuilder {
    package: Option<String>,
    user: Option<String>,
    host: Option<String>,
    authors: Vec<String>,
    dir: Option<PathBuf>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl TemplateBuilder {
    /// Set the target package name
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Set the hosting-service user
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the hosting-service domain
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the Project.toml authors
    #[must_use]
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    /// Set the directory root under which the package is created
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Append a plugin; declaration order is preserved
    #[must_use]
    pub fn plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Consume the builder and construct a [`Template`]
    ///
    /// # Errors
    ///
    /// Returns an error if the package name is missing, empty, contains a
    /// path separator, or carries the `.jl` suffix.
    pub fn build(self) -> Result<Template> {
        let package = self
            .package
            .ok_or_else(|| Error::Message("Package name is required".to_string()))?;

        if package.is_empty() {
            return Err(Error::Message("Package name cannot be empty".to_string()));
        }
        if package.contains('/') || package.contains('\\') {
            return Err(Error::Message(format!(
                "Package name cannot contain a path separator: {package}"
            )));
        }
        if package.ends_with(".jl") {
            return Err(Error::Message(format!(
                "Package name should not include the .jl suffix: {package}"
            )));
        }

        Ok(Template {
            package,
            user: self.user.unwrap_or_default(),
            host: self.host.unwrap_or_else(|| "github.com".to_string()),
            authors: self.authors,
            dir: self.dir.unwrap_or_else(|| PathBuf::from(".")),
            plugins: self.plugins,
        })
    }
}
