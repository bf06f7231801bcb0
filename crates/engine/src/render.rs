//! Placeholder substitution
//!
//! The auxiliary files some plugins emit (readme, documentation config) are
//! plain text with `{{KEY}}` placeholders. [`Subst`] is the single-pass
//! replacement renderer behind the [`Renderer`] trait; there is deliberately
//! no template engine here.

use indexmap::IndexMap;
use jlforge_core::Renderer;

/// `{{KEY}}` substitution renderer
#[derive(Debug, Default, Clone, Copy)]
pub struct Subst;

impl Renderer for Subst {
    fn render(&self, input: &str, vars: &IndexMap<String, String>) -> String {
        let mut result = input.to_string();

        for (key, value) in vars {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}
