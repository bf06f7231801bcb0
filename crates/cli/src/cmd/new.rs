//! New command implementation
//!
//! Builds a [`Template`] from flags, the config file, and git-discovered
//! defaults, then runs the generation pipeline.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use jlforge_config::Config;
use jlforge_engine::{Documenter, GitPlugin, ProjectTests, Readme, Template};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::debug;

/// Generate a new Julia package
#[derive(Args)]
pub struct NewCommand {
    /// Package name (without the .jl suffix)
    pub package: String,

    /// Hosting-service user owning the package
    ///
    /// Falls back to the config file and then to git's github.user.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Hosting-service domain (default: github.com)
    #[arg(long)]
    pub host: Option<String>,

    /// Directory to create the package in (default: current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Use an SSH remote URL instead of HTTPS
    #[arg(long)]
    pub ssh: bool,

    /// Rename the default branch after the initial commit
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Sign commits with GPG
    #[arg(long)]
    pub gpgsign: bool,

    /// Commit the package manifest instead of ignoring it
    #[arg(long)]
    pub manifest: bool,

    /// Skip README.md generation
    #[arg(long)]
    pub no_readme: bool,

    /// Skip the test stub
    #[arg(long)]
    pub no_tests: bool,

    /// Skip the Documenter setup
    #[arg(long)]
    pub no_docs: bool,
}

impl NewCommand {
    /// Execute the command against the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no hosting user can be determined or generation
    /// fails.
    pub fn execute(&self, config: &Config) -> Result<()> {
        let user = self
            .user
            .clone()
            .or_else(|| config.user.clone())
            .or_else(jlforge_config::identity::default_user)
            .ok_or_else(|| {
                anyhow!(
                    "Could not determine a hosting user. Pass --user, set it in the \
                     config file, or configure github.user in git."
                )
            })?;

        let host = self
            .host
            .clone()
            .or_else(|| config.host.clone())
            .unwrap_or_else(|| "github.com".to_string());

        let dir = self
            .dir
            .clone()
            .or_else(|| config.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let authors = if config.authors.is_empty() {
            jlforge_config::identity::default_authors()
        } else {
            config.authors.clone()
        };

        debug!(package = %self.package, %user, %host, "Building template");

        let mut git = GitPlugin::builder()
            .ssh(self.ssh || config.git.ssh)
            .jl_suffix(config.git.jl)
            .manifest(self.manifest || config.git.manifest)
            .gpgsign(self.gpgsign || config.git.gpgsign);
        if let Some(branch) = self.branch.clone().or_else(|| config.git.branch.clone()) {
            git = git.branch(branch);
        }

        let mut builder = Template::builder()
            .package(&self.package)
            .user(user)
            .host(host)
            .dir(dir)
            .authors(authors)
            .plugin(Box::new(git.build()));
        if !self.no_readme {
            builder = builder.plugin(Box::new(Readme::new()));
        }
        if !self.no_tests {
            builder = builder.plugin(Box::new(ProjectTests::new()));
        }
        if !self.no_docs {
            builder = builder.plugin(Box::new(Documenter::new()));
        }

        let template = builder.build().context("Invalid template configuration")?;
        let pkg_dir = template
            .generate()
            .with_context(|| format!("Failed to generate package {}", self.package))?;

        println!("{} {}", "Created".green().bold(), pkg_dir.display());
        println!("\nNext steps:");
        println!("  1. cd {}", pkg_dir.display());
        println!("  2. julia --project -e 'using Pkg; Pkg.instantiate()'");

        Ok(())
    }
}
