//! End-to-end generation tests against real temporary repositories

#![allow(clippy::unwrap_used, clippy::panic)]

use jlforge_core::{CommandRunner, Error, Result};
use jlforge_engine::plugin::{HookStage, Plugin};
use jlforge_engine::{Documenter, GitPlugin, ProjectTests, Readme, Template};
use std::path::Path;
use tempfile::TempDir;

/// Runner that pretends no external tool exists
struct NoTools;

impl CommandRunner for NoTools {
    fn run(&self, program: &str, _args: &[&str], _dir: Option<&Path>) -> Result<()> {
        panic!("unexpected invocation of {program}");
    }

    fn is_available(&self, _program: &str) -> bool {
        false
    }
}

/// Plugin that only contributes an ignore pattern
struct LogIgnore {
    patterns: Vec<String>,
}

impl Plugin for LogIgnore {
    fn name(&self) -> &'static str {
        "log-ignore"
    }

    fn implements(&self, _stage: HookStage) -> bool {
        false
    }

    fn gitignore(&self) -> &[String] {
        &self.patterns
    }
}

fn scenario_template(root: &Path) -> Template {
    Template::builder()
        .package("Foo")
        .user("bob")
        .host("example.com")
        .dir(root)
        .plugin(Box::new(
            GitPlugin::builder()
                .identity("A", "a@x.com")
                .branch("main")
                .build(),
        ))
        .plugin(Box::new(Readme::new()))
        .plugin(Box::new(ProjectTests::new()))
        .plugin(Box::new(Documenter::new()))
        .build()
        .unwrap()
}

#[test]
fn test_generate_full_scenario() {
    let temp = TempDir::new().unwrap();
    let template = scenario_template(temp.path());

    let pkg_dir = template.generate().unwrap();

    // Skeleton and plugin files all exist.
    assert!(pkg_dir.join("Project.toml").exists());
    assert!(pkg_dir.join("src").join("Foo.jl").exists());
    assert!(pkg_dir.join("README.md").exists());
    assert!(pkg_dir.join("test").join("runtests.jl").exists());
    assert!(pkg_dir.join("docs").join("make.jl").exists());

    let repo = git2::Repository::open(&pkg_dir).unwrap();

    // Remote wired to the https URL with the .jl suffix.
    let remote = repo.find_remote("origin").unwrap();
    assert_eq!(remote.url(), Some("https://example.com/bob/Foo.jl"));

    // Default branch renamed before the remote was attached.
    assert_eq!(repo.head().unwrap().shorthand(), Some("main"));

    // Exactly two commits framing the scaffold.
    let mut walk = repo.revwalk().unwrap();
    walk.push_head().unwrap();
    let commits: Vec<_> = walk.map(|id| repo.find_commit(id.unwrap()).unwrap()).collect();
    assert_eq!(commits.len(), 2);
    assert!(
        commits[0]
            .message()
            .unwrap()
            .starts_with("Files generated by jlforge")
    );
    assert_eq!(commits[1].message(), Some("Initial commit"));
    assert_eq!(commits[0].author().name(), Some("A"));

    // Aggregated ignore file covers the manifest and the docs contributions.
    let gitignore = std::fs::read_to_string(pkg_dir.join(".gitignore")).unwrap();
    let lines: Vec<&str> = gitignore.lines().collect();
    assert!(lines.contains(&"/Manifest.toml"));
    assert!(lines.contains(&"/docs/build/"));
    assert!(lines.contains(&"/docs/Manifest.toml"));
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted);
}

#[test]
fn test_generated_tree_is_fully_committed() {
    let temp = TempDir::new().unwrap();
    let template = scenario_template(temp.path());

    let pkg_dir = template.generate().unwrap();

    let repo = git2::Repository::open(&pkg_dir).unwrap();
    let statuses = repo.statuses(None).unwrap();
    let dirty: Vec<_> = statuses
        .iter()
        .filter_map(|s| s.path().map(str::to_string))
        .collect();
    assert!(dirty.is_empty(), "uncommitted paths: {dirty:?}");
}

#[test]
fn test_gpgsign_without_tool_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let template = Template::builder()
        .package("Foo")
        .user("bob")
        .host("example.com")
        .dir(temp.path())
        .plugin(Box::new(
            GitPlugin::builder()
                .identity("A", "a@x.com")
                .gpgsign(true)
                .runner(Box::new(NoTools))
                .build(),
        ))
        .build()
        .unwrap();

    let result = template.generate();

    assert!(matches!(result, Err(Error::Configuration { .. })));
    assert!(!temp.path().join("Foo").exists());
}

#[test]
fn test_duplicate_ignore_contributions_collapse() {
    let temp = TempDir::new().unwrap();
    let template = Template::builder()
        .package("Foo")
        .user("bob")
        .host("example.com")
        .dir(temp.path())
        .plugin(Box::new(
            GitPlugin::builder()
                .identity("A", "a@x.com")
                .ignore(vec!["*.log".to_string()])
                .build(),
        ))
        .plugin(Box::new(LogIgnore {
            patterns: vec!["*.log".to_string()],
        }))
        .build()
        .unwrap();

    let pkg_dir = template.generate().unwrap();

    let gitignore = std::fs::read_to_string(pkg_dir.join(".gitignore")).unwrap();
    assert_eq!(gitignore.lines().filter(|l| *l == "*.log").count(), 1);
}

#[test]
fn test_ssh_remote_url() {
    let temp = TempDir::new().unwrap();
    let template = Template::builder()
        .package("Foo")
        .user("bob")
        .host("example.com")
        .dir(temp.path())
        .plugin(Box::new(
            GitPlugin::builder()
                .identity("A", "a@x.com")
                .ssh(true)
                .build(),
        ))
        .build()
        .unwrap();

    let pkg_dir = template.generate().unwrap();

    let repo = git2::Repository::open(&pkg_dir).unwrap();
    let remote = repo.find_remote("origin").unwrap();
    assert_eq!(remote.url(), Some("git@example.com:bob/Foo.jl.git"));
}
