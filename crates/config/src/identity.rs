//! Global git identity discovery
//!
//! New packages are attributed to whoever git already knows about. These
//! lookups are best-effort: a missing or unreadable global configuration is
//! reported as `None`, never as an error.

/// Commit identity from the global git configuration
///
/// Returns `Some((name, email))` only when both `user.name` and `user.email`
/// are configured.
#[must_use]
pub fn global_identity() -> Option<(String, String)> {
    let config = git2::Config::open_default().ok()?;
    let name = config.get_string("user.name").ok()?;
    let email = config.get_string("user.email").ok()?;
    Some((name, email))
}

/// Hosting-service user from the global `github.user` configuration key
#[must_use]
pub fn default_user() -> Option<String> {
    git2::Config::open_default()
        .ok()?
        .get_string("github.user")
        .ok()
}

/// Default authors line derived from the global identity
///
/// Formats as `Name <email>`, the convention Julia's package manager uses in
/// Project.toml.
#[must_use]
pub fn default_authors() -> Vec<String> {
    match global_identity() {
        Some((name, email)) => vec![format!("{name} <{email}>")],
        None => Vec::new(),
    }
}
