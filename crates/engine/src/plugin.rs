//! Plugin contract and hook ordering
//!
//! A plugin is a self-contained scaffolding extension that participates in a
//! subset of the four hook stages. Plugins declare their capabilities up
//! front; the resolver filters on capability instead of probing methods at
//! run time.

use crate::template::Template;
use jlforge_core::Result;
use std::path::Path;

/// Default hook priority; lower values run earlier within a stage
pub const DEFAULT_PRIORITY: i32 = 0;

/// Named extension points of the generation pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Precondition checks; the only stage guaranteed side-effect-free
    Validate,
    /// Before file generation (e.g. repository initialization)
    PreHook,
    /// Primary file generation
    Hook,
    /// Finalization that must see the complete file tree
    PostHook,
}

impl HookStage {
    /// Get the string name of this hook stage
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HookStage::Validate => "validate",
            HookStage::PreHook => "prehook",
            HookStage::Hook => "hook",
            HookStage::PostHook => "posthook",
        }
    }
}

/// A composable scaffolding extension
///
/// Instances hold only their own configuration and live for a single
/// [`Template`] generation run. Plugins never call each other directly;
/// cross-plugin data flows only through the declared aggregation points
/// ([`Plugin::gitignore`] and [`Plugin::needs_identity`]).
pub trait Plugin {
    /// Stable plugin name, used in error reporting and logs
    fn name(&self) -> &'static str;

    /// Whether this plugin participates in the given stage
    ///
    /// Plugins that do not implement a stage are excluded from that stage's
    /// execution order entirely.
    fn implements(&self, stage: HookStage) -> bool;

    /// Intra-stage ordering; lower runs earlier, ties break by declaration
    /// order in the template
    fn priority(&self, _stage: HookStage) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Check preconditions; must not touch the filesystem
    fn validate(&self, _template: &Template) -> Result<()> {
        Ok(())
    }

    /// Runs before any file generation
    fn prehook(&self, _template: &Template, _dir: &Path) -> Result<()> {
        Ok(())
    }

    /// Primary file generation
    fn hook(&self, _template: &Template, _dir: &Path) -> Result<()> {
        Ok(())
    }

    /// Runs after all file generation has finished
    fn posthook(&self, _template: &Template, _dir: &Path) -> Result<()> {
        Ok(())
    }

    /// Ignore patterns this plugin contributes to the aggregated ignore file
    fn gitignore(&self) -> &[String] {
        &[]
    }

    /// Whether this plugin requires a commit identity to be discoverable
    fn needs_identity(&self) -> bool {
        false
    }
}

/// Compute the execution order for one stage
///
/// Returns indices into `plugins`, restricted to plugins that implement
/// `stage`, stable-sorted by `(priority, declaration index)` ascending. The
/// same input always yields the same order.
#[must_use]
pub fn execution_order(plugins: &[Box<dyn Plugin>], stage: HookStage) -> Vec<usize> {
    let mut order: Vec<usize> = (0..plugins.len())
        .filter(|&idx| plugins[idx].implements(stage))
        .collect();
    order.sort_by_key(|&idx| (plugins[idx].priority(stage), idx));
    order
}
