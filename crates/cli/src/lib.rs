//! jlforge CLI library
//!
//! This library contains all the CLI logic for jlforge, making it reusable
//! for testing and integration with other tools.

pub mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jlforge - scaffold Julia packages from composable plugins
#[derive(Parser)]
#[command(name = "jlforge")]
#[command(about = "Scaffold Julia packages from composable plugins")]
#[command(version)]
#[command(long_about = "Scaffold Julia packages from composable plugins

A new package gets a Project.toml, a module stub, a git repository with two
framing commits, an aggregated .gitignore, and optional readme, test, and
Documenter files.

Defaults come from ~/.config/jlforge/config.toml and from your global git
configuration (user.name, user.email, github.user).")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, env = "JLFORGE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "JLFORGE_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the jlforge CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new package
    New(cmd::new::NewCommand),
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - Configuration loading fails
/// - Package generation fails
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging based on verbosity
    jlforge_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Load user-wide defaults
    let config = jlforge_config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::New(new_cmd) => new_cmd.execute(&config),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_command() {
        let cli = Cli::try_parse_from([
            "jlforge", "new", "Foo", "--user", "bob", "--ssh", "--branch", "main",
        ])
        .unwrap();

        let Commands::New(new_cmd) = cli.command;
        assert_eq!(new_cmd.package, "Foo");
        assert_eq!(new_cmd.user.as_deref(), Some("bob"));
        assert!(new_cmd.ssh);
        assert_eq!(new_cmd.branch.as_deref(), Some("main"));
    }
}
