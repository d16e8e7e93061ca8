//! Configuration system for the classtime timetabler.
//!
//! Load scheduling presets from TOML files to control solver options
//! and the active hard/soft constraints without code changes.
//!
//! # Examples
//!
//! Parse a preset from a TOML string:
//!
//! ```
//! use classtime_config::Preset;
//! use std::time::Duration;
//!
//! let preset = Preset::from_toml_str(r#"
//!     [options]
//!     num_models = 5
//!     time_limit = 60
//!     threads = 4
//!
//!     [[constraints.hard]]
//!     name = "no_teacher_conflict"
//!
//!     [[constraints.soft]]
//!     name = "prefer_ideal_semester"
//!     weight = 10
//!     priority = 1
//! "#).unwrap();
//!
//! assert_eq!(preset.options.num_models, 5);
//! assert_eq!(preset.options.time_limit(), Duration::from_secs(60));
//! assert_eq!(preset.constraints.soft[0].name, "prefer_ideal_semester");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use classtime_core::error::FileTreeError;


/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML error in preset '{name}': {source}")]
    Toml {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to find preset '{name}' (looked at '{}')", path.display())]
    MissingPreset { name: String, path: PathBuf },

    #[error(transparent)]
    ConstraintFile(#[from] FileTreeError),

    #[error("soft constraint '{0}' has zero weight, it would never fire")]
    ZeroWeight(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Directory layout every scheduler run reads from.
///
/// Rooted at a single directory, resolved by role:
/// rule files under `asp/` (`asp/hard/`, `asp/soft/` for constraints),
/// input tables under `config/inputs/`, presets under `config/presets/`.
/// Passed by reference wherever files are resolved; there is no
/// process-wide layout state.
#[derive(Debug, Clone)]
pub struct FileTree {
    root: PathBuf,
}

impl FileTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the four tabular input files.
    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join("config/inputs")
    }

    /// Path of a base rule file, e.g. `base` → `asp/base.lp`.
    pub fn base_rules(&self, name: &str) -> PathBuf {
        self.root.join("asp").join(name).with_extension("lp")
    }

    /// Path of a hard constraint rule file.
    pub fn hard_constraint(&self, name: &str) -> PathBuf {
        self.root.join("asp/hard").join(name).with_extension("lp")
    }

    /// Path of a soft constraint rule file.
    pub fn soft_constraint(&self, name: &str) -> PathBuf {
        self.root.join("asp/soft").join(name).with_extension("lp")
    }

    /// Path of a preset document.
    pub fn preset(&self, name: &str) -> PathBuf {
        self.root
            .join("config/presets")
            .join(name)
            .with_extension("toml")
    }

    /// Reads a rule file, mapping I/O failures to an error naming the
    /// file's role and path.
    pub fn read_rules(&self, role: &'static str, path: &Path) -> Result<String, FileTreeError> {
        fs::read_to_string(path).map_err(|source| FileTreeError {
            role,
            path: path.to_path_buf(),
            source,
        })
    }
}

fn default_num_models() -> u32 {
    1
}

fn default_time_limit() -> u64 {
    30
}

fn default_threads() -> u32 {
    1
}

/// Options handed to the underlying solver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SolverOptions {
    /// How many models to search for (and to keep buffered).
    #[serde(default = "default_num_models")]
    pub num_models: u32,

    /// Wall-clock search budget, in seconds.
    #[serde(default = "default_time_limit", rename = "time_limit")]
    pub time_limit_secs: u64,

    /// Number of solving threads.
    #[serde(default = "default_threads")]
    pub threads: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            num_models: default_num_models(),
            time_limit_secs: default_time_limit(),
            threads: default_threads(),
        }
    }
}

impl SolverOptions {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.num_models == 0 {
            return Err(ConfigError::Invalid(
                "options.num_models must be at least 1".into(),
            ));
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::Invalid(
                "options.time_limit must be positive".into(),
            ));
        }
        if self.threads == 0 {
            return Err(ConfigError::Invalid(
                "options.threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// One enabled hard constraint, resolved by name to a rule file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HardConstraint {
    pub name: String,
}

/// One enabled soft constraint with its optimization weight and
/// priority level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SoftConstraint {
    pub name: String,
    pub weight: i64,
    pub priority: i64,
}

/// The ordered hard and soft constraint lists of a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintSpecification {
    #[serde(default)]
    pub hard: Vec<HardConstraint>,
    #[serde(default)]
    pub soft: Vec<SoftConstraint>,
}

impl ConstraintSpecification {
    fn validate(&self) -> Result<(), ConfigError> {
        for constraint in &self.hard {
            if constraint.name.is_empty() {
                return Err(ConfigError::Invalid(
                    "hard constraint with empty name".into(),
                ));
            }
        }
        for constraint in &self.soft {
            if constraint.name.is_empty() {
                return Err(ConfigError::Invalid(
                    "soft constraint with empty name".into(),
                ));
            }
            if constraint.weight == 0 {
                return Err(ConfigError::ZeroWeight(constraint.name.clone()));
            }
        }
        Ok(())
    }

    /// Concatenates every enabled rule file, then emits the weight and
    /// priority constants of the soft constraints:
    /// `#const weight_<name> = W.` / `#const priority_<name> = P.`.
    pub fn to_asp(&self, tree: &FileTree) -> Result<String, ConfigError> {
        let mut out = String::new();
        for constraint in &self.hard {
            let path = tree.hard_constraint(&constraint.name);
            out.push_str(&tree.read_rules("hard constraint", &path)?);
            out.push('\n');
        }
        for constraint in &self.soft {
            let path = tree.soft_constraint(&constraint.name);
            out.push_str(&tree.read_rules("soft constraint", &path)?);
            out.push('\n');
        }
        for constraint in &self.soft {
            out.push_str(&format!(
                "#const weight_{} = {}.\n#const priority_{} = {}.\n",
                constraint.name, constraint.weight, constraint.name, constraint.priority
            ));
        }
        Ok(out)
    }
}

/// A named scheduling preset: solver options plus the constraint lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    #[serde(default)]
    pub options: SolverOptions,
    #[serde(default)]
    pub constraints: ConstraintSpecification,
}

impl Preset {
    /// Parses and validates a preset from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::from_named_toml_str("<inline>", s)
    }

    fn from_named_toml_str(name: &str, s: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(s).map_err(|source| ConfigError::Toml {
            name: name.to_string(),
            source,
        })?;
        preset.validate()?;
        Ok(preset)
    }

    /// Loads a preset by name from the file tree's preset directory.
    pub fn load(tree: &FileTree, name: &str) -> Result<Self, ConfigError> {
        let path = tree.preset(name);
        let contents = fs::read_to_string(&path).map_err(|_| ConfigError::MissingPreset {
            name: name.to_string(),
            path: path.clone(),
        })?;
        Self::from_named_toml_str(name, &contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.options.validate()?;
        self.constraints.validate()
    }

    /// Applies command-line style overrides on top of the preset.
    /// `None` keeps the preset's value.
    pub fn override_options(
        &mut self,
        num_models: Option<u32>,
        time_limit: Option<u64>,
        threads: Option<u32>,
    ) -> Result<(), ConfigError> {
        if let Some(num_models) = num_models {
            self.options.num_models = num_models;
        }
        if let Some(time_limit) = time_limit {
            self.options.time_limit_secs = time_limit;
        }
        if let Some(threads) = threads {
            self.options.threads = threads;
        }
        self.options.validate()
    }

    /// Logs the effective solver options at load time.
    pub fn log_summary(&self) {
        info!("number of models: {}", self.options.num_models);
        info!("time limit (s): {}", self.options.time_limit_secs);
        if self.options.threads == 1 {
            warn!("using only one solving thread, performance might be low");
        } else {
            info!("number of threads: {}", self.options.threads);
        }
    }
}
