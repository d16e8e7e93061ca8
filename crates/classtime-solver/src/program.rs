//! Assembly of the full program text handed to the solver.
//!
//! A program is a sequence of named sections: the lowered input facts,
//! the base rule files, and the constraint specification text. Sections
//! are separated by `% --- NAME ---` comment headers so a saved program
//! stays readable.

use classtime_config::{ConfigError, ConstraintSpecification, FileTree};

/// Base rule files every program includes, in load order.
const BASE_RULES: [&str; 2] = ["aliases", "base"];

/// Builds solver program text section by section.
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    sections: Vec<(String, String)>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary named section.
    pub fn section(mut self, name: &str, text: impl Into<String>) -> Self {
        self.sections.push((name.to_uppercase(), text.into()));
        self
    }

    /// Adds the lowered input facts.
    pub fn inputs(self, asp: impl Into<String>) -> Self {
        self.section("inputs", asp)
    }

    /// Adds the base rule files (`asp/aliases.lp`, `asp/base.lp`).
    pub fn base_model(self, tree: &FileTree) -> Result<Self, ConfigError> {
        let mut text = String::new();
        for name in BASE_RULES {
            let path = tree.base_rules(name);
            text.push_str(&tree.read_rules("base model", &path)?);
            text.push('\n');
        }
        Ok(self.section("base model", text))
    }

    /// Adds the enabled constraints with their weight/priority consts.
    pub fn constraints(
        self,
        spec: &ConstraintSpecification,
        tree: &FileTree,
    ) -> Result<Self, ConfigError> {
        let text = spec.to_asp(tree)?;
        Ok(self.section("constraints", text))
    }

    /// Renders the assembled program.
    pub fn build(self) -> String {
        let mut program = String::new();
        for (name, text) in self.sections {
            program.push_str(&format!("\n% --- {name} ---\n"));
            program.push_str(&text);
            if !text.ends_with('\n') {
                program.push('\n');
            }
        }
        program
    }
}
