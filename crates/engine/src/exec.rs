//! External command execution
//!
//! [`Shell`] is the production [`CommandRunner`]: it spawns processes via
//! duct with stdout suppressed (scaffolding output should come from jlforge,
//! not from the tools it drives) and probes the PATH with `which`.

use jlforge_core::{CommandRunner, Error, Result};
use std::path::Path;

/// Command runner backed by duct
#[derive(Debug, Default, Clone, Copy)]
pub struct Shell;

impl CommandRunner for Shell {
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<()> {
        tracing::debug!(program, ?args, "Executing command");

        let expr = duct::cmd(program, args.iter().map(|s| (*s).to_string())).stdout_null();
        let expr = match dir {
            Some(d) => expr.dir(d),
            None => expr,
        };

        expr.run().map(|_| ()).map_err(|e| Error::ExternalTool {
            command: format!("{program} {}", args.join(" ")),
            reason: e.to_string(),
        })
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_failed_command_reports_command_line() {
        let result = Shell.run("false", &[], None);

        match result {
            Err(Error::ExternalTool { command, .. }) => assert!(command.starts_with("false")),
            other => panic!("expected external tool error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        assert!(!Shell.is_available("definitely-not-a-real-program-xyz"));
    }

    #[test]
    fn test_successful_command() {
        assert!(Shell.run("true", &[], None).is_ok());
    }
}
