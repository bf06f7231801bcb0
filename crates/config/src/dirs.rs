//! XDG directory lookup for jlforge

use std::path::PathBuf;

/// Path to the user configuration file (`~/.config/jlforge/config.toml`)
///
/// Returns `None` when the platform config directory cannot be determined.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jlforge").join("config.toml"))
}
