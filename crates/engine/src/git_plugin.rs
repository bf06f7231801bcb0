//! The Git plugin
//!
//! The canonical, most involved plugin: it initializes a repository for the
//! generated package and frames the scaffold with two commits (an empty
//! "Initial commit" from its prehook, and a final commit of all generated
//! files from its posthook). In between, its hook aggregates ignore
//! patterns contributed by every plugin in the template into a single
//! `.gitignore`.
//!
//! The posthook carries the highest priority in the tool so that it runs
//! after every other plugin has finished writing files.

use crate::deps::{DepUpdater, JuliaDeps};
use crate::exec::Shell;
use crate::git::{Git2Ops, VcsOps};
use crate::plugin::{DEFAULT_PRIORITY, HookStage, Plugin};
use crate::template::Template;
use jlforge_core::platform::CURRENT_PLATFORM;
use jlforge_core::{CommandRunner, Error, Result};
use std::fs;
use std::path::Path;

/// Pattern that keeps the package manifest out of version control
const MANIFEST_PATTERN: &str = "/Manifest.toml";

/// Message of the framing initial commit
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Posthook priority; every other plugin's posthook must run first so the
/// final commit sees the complete file tree
const POSTHOOK_PRIORITY: i32 = 5;

/// Repository setup for generated packages
///
/// Configuration covers the remote (ssh/https, `.jl` name suffix), the
/// default branch, the commit identity, manifest handling, and GPG signing.
/// The version-control and process layers are injected so tests can run
/// against fakes.
pub struct GitPlugin {
    ignore: Vec<String>,
    name: Option<String>,
    email: Option<String>,
    branch: Option<String>,
    ssh: bool,
    jl: bool,
    manifest: bool,
    gpgsign: bool,
    vcs: Box<dyn VcsOps>,
    runner: Box<dyn CommandRunner>,
    deps: Box<dyn DepUpdater>,
}

impl GitPlugin {
    /// Start building a Git plugin
    pub fn builder() -> GitPluginBuilder {
        GitPluginBuilder::default()
    }

    /// Remote URL for the package repository
    ///
    /// `git@{host}:{user}/{pkg}{suffix}.git` over SSH,
    /// `https://{host}/{user}/{pkg}{suffix}` otherwise, where `suffix` is
    /// `.jl` when the naming-suffix flag is set.
    fn remote_url(&self, template: &Template) -> String {
        let suffix = if self.jl { ".jl" } else { "" };
        if self.ssh {
            format!(
                "git@{}:{}/{}{}.git",
                template.host(),
                template.user(),
                template.package(),
                suffix
            )
        } else {
            format!(
                "https://{}/{}/{}{}",
                template.host(),
                template.user(),
                template.package(),
                suffix
            )
        }
    }

    /// Commit primitive shared by prehook and posthook
    ///
    /// With `gpgsign`, shells out to the git command-line tool (libgit2 has
    /// no signing support); otherwise commits in-process.
    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        if self.gpgsign {
            let dir_str = dir.to_string_lossy();
            self.runner.run(
                "git",
                &[
                    "-C",
                    dir_str.as_ref(),
                    "commit",
                    "--quiet",
                    "--allow-empty",
                    "-S",
                    "-m",
                    message,
                ],
                None,
            )
        } else {
            self.vcs.commit(dir, message)
        }
    }
}

impl Plugin for GitPlugin {
    fn name(&self) -> &'static str {
        "git"
    }

    fn implements(&self, _stage: HookStage) -> bool {
        true
    }

    fn priority(&self, stage: HookStage) -> i32 {
        match stage {
            HookStage::PostHook => POSTHOOK_PRIORITY,
            _ => DEFAULT_PRIORITY,
        }
    }

    fn validate(&self, template: &Template) -> Result<()> {
        if self.gpgsign && !self.runner.is_available("gpg") {
            return Err(Error::Configuration {
                plugin: self.name().to_string(),
                reason: "gpgsign is set but no gpg executable was found on the PATH".to_string(),
            });
        }

        let explicit = self.name.is_some() && self.email.is_some();
        let needed = template.plugins().iter().any(|p| p.needs_identity());
        if needed && !explicit && self.vcs.global_identity().is_none() {
            return Err(Error::Configuration {
                plugin: self.name().to_string(),
                reason: "no commit identity: configure git user.name and user.email, \
                         or set an explicit name and email on the plugin"
                    .to_string(),
            });
        }

        Ok(())
    }

    fn prehook(&self, template: &Template, dir: &Path) -> Result<()> {
        self.vcs.init(dir)?;

        if let (Some(name), Some(email)) = (&self.name, &self.email) {
            self.vcs.set_identity(dir, name, email)?;
        }

        self.commit(dir, INITIAL_COMMIT_MESSAGE)?;

        let url = self.remote_url(template);

        // The branch must be settled before the remote is attached, so the
        // old default branch never gains remote tracking state.
        if let Some(branch) = &self.branch {
            let current = self.vcs.current_branch(dir)?;
            if &current != branch {
                self.vcs.rename_branch(dir, branch)?;
            }
        }

        self.vcs.add_remote(dir, "origin", &url)?;

        Ok(())
    }

    fn hook(&self, template: &Template, dir: &Path) -> Result<()> {
        let mut patterns: Vec<String> = Vec::new();
        for plugin in template.plugins() {
            patterns.extend(plugin.gitignore().iter().cloned());
        }

        // The manifest is ignored unless it is being committed or the user
        // already listed it themselves.
        if !self.manifest && !patterns.iter().any(|p| p == MANIFEST_PATTERN) {
            patterns.push(MANIFEST_PATTERN.to_string());
        }

        // Repeated runs over the same template must produce byte-identical
        // output.
        patterns.sort();
        patterns.dedup();

        let mut content = patterns.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(dir.join(".gitignore"), content)?;

        Ok(())
    }

    fn posthook(&self, _template: &Template, dir: &Path) -> Result<()> {
        clean_stale_locks(dir);

        let manifest = dir.join("Manifest.toml");
        if self.manifest && !manifest.exists() {
            fs::write(&manifest, "")?;
            self.deps.update(dir)?;
        }

        self.vcs.stage_all(dir)?;

        let mut message = String::from("Files generated by jlforge");
        if let Some(version) = crate::version() {
            message.push_str(&format!("\n\njlforge version: {version}"));
        }
        self.commit(dir, &message)?;

        Ok(())
    }

    fn gitignore(&self) -> &[String] {
        &self.ignore
    }

    fn needs_identity(&self) -> bool {
        true
    }
}

/// Remove stray lock files libgit2 leaves under `.git` on Windows
///
/// Best-effort: failures here must never fail the final commit.
fn clean_stale_locks(dir: &Path) {
    if CURRENT_PLATFORM.os != "windows" {
        return;
    }

    if let Ok(entries) = fs::read_dir(dir.join(".git")) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "lock") {
                let _ = fs::remove_file(path);
            }
        }
    }
}

/// Builder for [`GitPlugin`]
///
/// All settings are optional; `build` falls back to the production git2,
/// shell, and Julia implementations for anything not overridden.
#[derive(Default)]
pub struct GitPluginBuilder {
    ignore: Vec<String>,
    name: Option<String>,
    email: Option<String>,
    branch: Option<String>,
    ssh: bool,
    jl: Option<bool>,
    manifest: bool,
    gpgsign: bool,
    vcs: Option<Box<dyn VcsOps>>,
    runner: Option<Box<dyn CommandRunner>>,
    deps: Option<Box<dyn DepUpdater>>,
}

impl GitPluginBuilder {
    /// Extra ignore patterns contributed by this plugin
    #[must_use]
    pub fn ignore(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    /// Explicit commit identity, written into the repository-local config
    #[must_use]
    pub fn identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.email = Some(email.into());
        self
    }

    /// Rename the default branch after the initial commit
    #[must_use]
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Use an SSH remote URL instead of HTTPS
    #[must_use]
    pub fn ssh(mut self, ssh: bool) -> Self {
        self.ssh = ssh;
        self
    }

    /// Append the `.jl` suffix to the remote repository name (default true)
    #[must_use]
    pub fn jl_suffix(mut self, jl: bool) -> Self {
        self.jl = Some(jl);
        self
    }

    /// Commit the package manifest instead of ignoring it
    #[must_use]
    pub fn manifest(mut self, manifest: bool) -> Self {
        self.manifest = manifest;
        self
    }

    /// Sign commits with GPG (shells out to the git command-line tool)
    #[must_use]
    pub fn gpgsign(mut self, gpgsign: bool) -> Self {
        self.gpgsign = gpgsign;
        self
    }

    /// Substitute the version-control implementation
    #[must_use]
    pub fn vcs(mut self, vcs: Box<dyn VcsOps>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    /// Substitute the command runner
    #[must_use]
    pub fn runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Substitute the dependency updater
    #[must_use]
    pub fn deps(mut self, deps: Box<dyn DepUpdater>) -> Self {
        self.deps = Some(deps);
        self
    }

    /// Build the plugin
    #[must_use]
    pub fn build(self) -> GitPlugin {
        GitPlugin {
            ignore: self.ignore,
            name: self.name,
            email: self.email,
            branch: self.branch,
            ssh: self.ssh,
            jl: self.jl.unwrap_or(true),
            manifest: self.manifest,
            gpgsign: self.gpgsign,
            vcs: self.vcs.unwrap_or_else(|| Box::new(Git2Ops)),
            runner: self.runner.unwrap_or_else(|| Box::new(Shell)),
            deps: self.deps.unwrap_or_else(|| Box::new(JuliaDeps::new())),
        }
    }
}
