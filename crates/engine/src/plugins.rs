//! Auxiliary plugins
//!
//! Small file-writing plugins that round out a generated package: a readme,
//! a test harness stub, and Documenter configuration. Each renders its
//! files through the [`Renderer`] collaborator and participates only in the
//! stages it declares.

use crate::plugin::{HookStage, Plugin};
use crate::render::Subst;
use crate::template::Template;
use indexmap::IndexMap;
use jlforge_core::{Error, Renderer, Result};
use std::fs;
use std::path::Path;

/// UUID of the Documenter package in Julia's General registry
const DOCUMENTER_UUID: &str = "e30172f5-a6a5-5a46-863b-614d45cd2de4";

const README_TEMPLATE: &str = r"# {{PKG}}

A new Julia package. Development happens at
https://{{HOST}}/{{USER}}/{{PKG}}.jl.
";

const RUNTESTS_TEMPLATE: &str = r#"using {{PKG}}
using Test

@testset "{{PKG}}.jl" begin
    # Write your tests here.
end
"#;

const MAKE_TEMPLATE: &str = r#"using {{PKG}}
using Documenter

makedocs(;
    modules=[{{PKG}}],
    sitename="{{PKG}}.jl",
    pages=["Home" => "index.md"],
)
"#;

const INDEX_TEMPLATE: &str = r"# {{PKG}}

Documentation for {{PKG}}.jl.
";

/// Substitution variables shared by the auxiliary plugins
fn template_vars(template: &Template) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();
    vars.insert("PKG".to_string(), template.package().to_string());
    vars.insert("USER".to_string(), template.user().to_string());
    vars.insert("HOST".to_string(), template.host().to_string());
    vars
}

fn require_user(plugin: &'static str, template: &Template) -> Result<()> {
    if template.user().is_empty() {
        return Err(Error::Configuration {
            plugin: plugin.to_string(),
            reason: "a hosting user is required to build the repository link".to_string(),
        });
    }
    Ok(())
}

/// Writes a `README.md` linking to the hosted repository
pub struct Readme {
    renderer: Box<dyn Renderer>,
}

impl Readme {
    /// Create the plugin with the default substitution renderer
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Box::new(Subst),
        }
    }
}

impl Default for Readme {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for Readme {
    fn name(&self) -> &'static str {
        "readme"
    }

    fn implements(&self, stage: HookStage) -> bool {
        matches!(stage, HookStage::Validate | HookStage::Hook)
    }

    fn validate(&self, template: &Template) -> Result<()> {
        require_user(self.name(), template)
    }

    fn hook(&self, template: &Template, dir: &Path) -> Result<()> {
        let content = self.renderer.render(README_TEMPLATE, &template_vars(template));
        fs::write(dir.join("README.md"), content)?;
        Ok(())
    }
}

/// Writes the `test/runtests.jl` stub
pub struct ProjectTests {
    renderer: Box<dyn Renderer>,
}

impl ProjectTests {
    /// Create the plugin with the default substitution renderer
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Box::new(Subst),
        }
    }
}

impl Default for ProjectTests {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ProjectTests {
    fn name(&self) -> &'static str {
        "tests"
    }

    fn implements(&self, stage: HookStage) -> bool {
        stage == HookStage::Hook
    }

    fn hook(&self, template: &Template, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir.join("test"))?;
        let content = self
            .renderer
            .render(RUNTESTS_TEMPLATE, &template_vars(template));
        fs::write(dir.join("test").join("runtests.jl"), content)?;
        Ok(())
    }
}

/// Writes Documenter configuration under `docs/`
///
/// Contributes the documentation build tree and manifest to the aggregated
/// ignore set.
pub struct Documenter {
    renderer: Box<dyn Renderer>,
    ignore: Vec<String>,
}

impl Documenter {
    /// Create the plugin with the default substitution renderer
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Box::new(Subst),
            ignore: vec!["/docs/Manifest.toml".to_string(), "/docs/build/".to_string()],
        }
    }
}

impl Default for Documenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for Documenter {
    fn name(&self) -> &'static str {
        "documenter"
    }

    fn implements(&self, stage: HookStage) -> bool {
        matches!(stage, HookStage::Validate | HookStage::Hook)
    }

    fn validate(&self, template: &Template) -> Result<()> {
        require_user(self.name(), template)
    }

    fn hook(&self, template: &Template, dir: &Path) -> Result<()> {
        let docs = dir.join("docs");
        fs::create_dir_all(docs.join("src"))?;

        let vars = template_vars(template);
        fs::write(
            docs.join("make.jl"),
            self.renderer.render(MAKE_TEMPLATE, &vars),
        )?;
        fs::write(
            docs.join("Project.toml"),
            format!("[deps]\nDocumenter = \"{DOCUMENTER_UUID}\"\n"),
        )?;
        fs::write(
            docs.join("src").join("index.md"),
            self.renderer.render(INDEX_TEMPLATE, &vars),
        )?;

        Ok(())
    }

    fn gitignore(&self) -> &[String] {
        &self.ignore
    }
}
