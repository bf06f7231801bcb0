//! Git operations abstraction layer
//!
//! This module provides the version-control interface the Git plugin builds
//! on, implemented in-process via git2 (libgit2). The abstraction exists so
//! that plugin logic can be exercised in tests with a fake implementation.
//!
//! Every operation opens the repository, performs its work, and drops the
//! handle on return; no repository handle is held across pipeline phases.

use jlforge_core::{Error, Result};
use std::path::Path;

/// Helper function to convert git2 errors to `jlforge_core` errors
#[inline]
#[allow(clippy::needless_pass_by_value)]
fn git_err(e: git2::Error) -> Error {
    Error::Vcs(e.to_string())
}

/// Version-control operations needed by the Git plugin
pub trait VcsOps {
    /// Initialize a repository at the given directory
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails (e.g. the path is not
    /// writable)
    fn init(&self, dir: &Path) -> Result<()>;

    /// Write `user.name`/`user.email` into the repository-local config
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or its configuration cannot be
    /// opened
    fn set_identity(&self, dir: &Path, name: &str, email: &str) -> Result<()>;

    /// Commit identity from the global configuration, if discoverable
    fn global_identity(&self) -> Option<(String, String)>;

    /// Name of the branch HEAD currently points at
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD is
    /// detached or unborn
    fn current_branch(&self, dir: &Path) -> Result<String>;

    /// Rename the current branch, dropping the old ref
    ///
    /// # Errors
    ///
    /// Returns an error if the current branch cannot be resolved or the
    /// rename fails
    fn rename_branch(&self, dir: &Path, to: &str) -> Result<()>;

    /// Attach a named remote with the given URL
    ///
    /// # Errors
    ///
    /// Returns an error if a remote with that name already exists or the URL
    /// is rejected
    fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()>;

    /// Stage every non-ignored change under the working tree
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be updated
    fn stage_all(&self, dir: &Path) -> Result<()>;

    /// Commit the index; works on an empty index and an unborn HEAD
    ///
    /// # Errors
    ///
    /// Returns an error if no commit identity is configured or the commit
    /// fails
    fn commit(&self, dir: &Path, message: &str) -> Result<()>;
}

/// [`VcsOps`] implementation using git2 (libgit2)
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Ops;

impl VcsOps for Git2Ops {
    fn init(&self, dir: &Path) -> Result<()> {
        git2::Repository::init(dir).map_err(git_err)?;
        Ok(())
    }

    fn set_identity(&self, dir: &Path, name: &str, email: &str) -> Result<()> {
        let repo = git2::Repository::open(dir).map_err(git_err)?;
        let mut config = repo.config().map_err(git_err)?;
        config.set_str("user.name", name).map_err(git_err)?;
        config.set_str("user.email", email).map_err(git_err)?;
        Ok(())
    }

    fn global_identity(&self) -> Option<(String, String)> {
        jlforge_config::identity::global_identity()
    }

    fn current_branch(&self, dir: &Path) -> Result<String> {
        let repo = git2::Repository::open(dir).map_err(git_err)?;
        let head = repo.head().map_err(git_err)?;
        let branch = head
            .shorthand()
            .ok_or_else(|| Error::Vcs("Not on a branch (detached HEAD)".to_string()))?
            .to_string();
        Ok(branch)
    }

    fn rename_branch(&self, dir: &Path, to: &str) -> Result<()> {
        let repo = git2::Repository::open(dir).map_err(git_err)?;

        let current = {
            let head = repo.head().map_err(git_err)?;
            head.shorthand()
                .ok_or_else(|| Error::Vcs("Not on a branch (detached HEAD)".to_string()))?
                .to_string()
        };

        if current == to {
            return Ok(());
        }

        let mut branch = repo
            .find_branch(&current, git2::BranchType::Local)
            .map_err(git_err)?;
        branch.rename(to, false).map_err(git_err)?;
        repo.set_head(&format!("refs/heads/{to}")).map_err(git_err)?;

        Ok(())
    }

    fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()> {
        let repo = git2::Repository::open(dir).map_err(git_err)?;
        repo.remote(name, url).map_err(git_err)?;
        Ok(())
    }

    fn stage_all(&self, dir: &Path) -> Result<()> {
        let repo = git2::Repository::open(dir).map_err(git_err)?;
        let mut index = repo.index().map_err(git_err)?;
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .map_err(git_err)?;
        index.write().map_err(git_err)?;
        Ok(())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        let repo = git2::Repository::open(dir).map_err(git_err)?;
        let signature = repo.signature().map_err(git_err)?;

        let tree_id = {
            let mut index = repo.index().map_err(git_err)?;
            index.write_tree().map_err(git_err)?
        };
        let tree = repo.find_tree(tree_id).map_err(git_err)?;

        // HEAD is unborn for the framing initial commit.
        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(git_err)?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )
        .map_err(git_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn init_with_identity(dir: &Path) {
        let ops = Git2Ops;
        ops.init(dir).unwrap();
        ops.set_identity(dir, "Test", "test@example.com").unwrap();
    }

    #[test]
    fn test_init_creates_repository() {
        let temp = TempDir::new().unwrap();

        Git2Ops.init(temp.path()).unwrap();

        assert!(temp.path().join(".git").exists());
    }

    #[test]
    fn test_set_identity_is_local() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());

        let repo = git2::Repository::open(temp.path()).unwrap();
        let config = repo.config().unwrap().snapshot().unwrap();
        assert_eq!(config.get_str("user.name").unwrap(), "Test");
        assert_eq!(config.get_str("user.email").unwrap(), "test@example.com");
    }

    #[test]
    fn test_commit_on_unborn_head() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());

        Git2Ops.commit(temp.path(), "Initial commit").unwrap();

        let repo = git2::Repository::open(temp.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message(), Some("Initial commit"));
        assert_eq!(head.parent_count(), 0);
    }

    #[test]
    fn test_commit_chains_parents() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());

        Git2Ops.commit(temp.path(), "first").unwrap();
        Git2Ops.commit(temp.path(), "second").unwrap();

        let repo = git2::Repository::open(temp.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message(), Some("second"));
        assert_eq!(head.parent_count(), 1);
    }

    #[test]
    fn test_rename_branch_drops_old_ref() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());
        Git2Ops.commit(temp.path(), "Initial commit").unwrap();

        let original = Git2Ops.current_branch(temp.path()).unwrap();
        Git2Ops.rename_branch(temp.path(), "trunk").unwrap();

        assert_eq!(Git2Ops.current_branch(temp.path()).unwrap(), "trunk");
        let repo = git2::Repository::open(temp.path()).unwrap();
        assert!(
            repo.find_branch(&original, git2::BranchType::Local)
                .is_err()
        );
    }

    #[test]
    fn test_rename_branch_to_same_name_is_noop() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());
        Git2Ops.commit(temp.path(), "Initial commit").unwrap();

        let current = Git2Ops.current_branch(temp.path()).unwrap();
        Git2Ops.rename_branch(temp.path(), &current).unwrap();

        assert_eq!(Git2Ops.current_branch(temp.path()).unwrap(), current);
    }

    #[test]
    fn test_add_remote() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());

        Git2Ops
            .add_remote(temp.path(), "origin", "https://example.com/bob/Foo.jl")
            .unwrap();

        let repo = git2::Repository::open(temp.path()).unwrap();
        let remote = repo.find_remote("origin").unwrap();
        assert_eq!(remote.url(), Some("https://example.com/bob/Foo.jl"));
    }

    #[test]
    fn test_stage_all_respects_gitignore() {
        let temp = TempDir::new().unwrap();
        init_with_identity(temp.path());
        std::fs::write(temp.path().join(".gitignore"), "ignored.txt\n").unwrap();
        std::fs::write(temp.path().join("tracked.txt"), "hello").unwrap();
        std::fs::write(temp.path().join("ignored.txt"), "hidden").unwrap();

        Git2Ops.stage_all(temp.path()).unwrap();

        let repo = git2::Repository::open(temp.path()).unwrap();
        let index = repo.index().unwrap();
        assert!(index.get_path(Path::new("tracked.txt"), 0).is_some());
        assert!(index.get_path(Path::new("ignored.txt"), 0).is_none());
        assert!(index.get_path(Path::new(".gitignore"), 0).is_some());
    }
}
