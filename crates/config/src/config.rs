//! Configuration file loading
//!
//! User-wide defaults live in `~/.config/jlforge/config.toml` and are merged
//! with command-line flags by the CLI. Every field is optional; a missing
//! file yields the built-in defaults.
//!
//! Example:
//! ```toml
//! user = "bob"
//! host = "example.com"
//! dir = "~/code"
//! authors = ["Bob <bob@example.com>"]
//!
//! [git]
//! ssh = true
//! branch = "main"
//! ```

use crate::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// User-wide scaffolding defaults
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Hosting-service user owning new packages
    #[serde(default)]
    pub user: Option<String>,

    /// Hosting-service domain (default: github.com)
    #[serde(default)]
    pub host: Option<String>,

    /// Directory under which new packages are created
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Authors written into each generated Project.toml
    #[serde(default)]
    pub authors: Vec<String>,

    /// Defaults for the Git plugin
    #[serde(default)]
    pub git: GitDefaults,
}

/// Git plugin defaults from the `[git]` table
#[derive(Debug, Deserialize)]
pub struct GitDefaults {
    /// Use an SSH remote URL instead of HTTPS
    #[serde(default)]
    pub ssh: bool,

    /// Default branch name (None keeps the repository default)
    #[serde(default)]
    pub branch: Option<String>,

    /// Sign commits with GPG
    #[serde(default)]
    pub gpgsign: bool,

    /// Commit the package manifest instead of ignoring it
    #[serde(default)]
    pub manifest: bool,

    /// Append the `.jl` suffix to the remote repository name
    #[serde(default = "default_jl")]
    pub jl: bool,
}

impl Default for GitDefaults {
    fn default() -> Self {
        Self {
            ssh: false,
            branch: None,
            gpgsign: false,
            manifest: false,
            jl: true,
        }
    }
}

fn default_jl() -> bool {
    true
}

impl Config {
    /// Load configuration from an explicit path or the default location
    ///
    /// A missing file is not an error; the built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or TOML parsing fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match crate::dirs::config_file() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            jlforge_core::Error::Message(format!(
                "Failed to read {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            jlforge_core::Error::Message(format!(
                "Failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(config)
    }
}
