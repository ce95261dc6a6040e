//! User configuration loaded from `config.toml`.
//!
//! The file can add named numeric constants and remove default functions.
//! It cannot add callables, so the allow-list only ever grows by numbers.
//!
//! ```toml
//! format = "json"
//! disabled_functions = ["tan"]
//!
//! [constants]
//! g = 9.81
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::{EvaluationConfig, default_config, is_reserved_word};

/// How results are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One formatted result per input line.
    #[default]
    Text,
    /// A JSON array with the expression, value and display string per line.
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extra named constants; may shadow the built-in ones.
    pub constants: BTreeMap<String, f64>,
    /// Default functions to remove from the allow-list.
    pub disabled_functions: Vec<String>,
    /// Default output format when `--format` is not given.
    pub format: OutputFormat,
}

impl Config {
    /// `$XDG_CONFIG_HOME/mb-calc/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mb-calc").join("config.toml"))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for name in self.constants.keys() {
            if !is_identifier(name) {
                bail!("Constant name {:?} is not a valid identifier", name);
            }
            if is_reserved_word(name) {
                bail!("Constant name {:?} is a reserved word", name);
            }
        }
        Ok(())
    }

    /// Build the evaluation allow-list: defaults plus this file's changes.
    pub fn evaluation_config(&self) -> EvaluationConfig {
        let base = default_config();
        let mut builder = base.to_builder();

        for (name, value) in &self.constants {
            if base.constant(name).is_some() {
                debug!(name = %name, "constant shadows a built-in");
            }
            builder = builder.constant(name.as_str(), *value);
        }

        for name in &self.disabled_functions {
            if base.function(name).is_none() {
                warn!(name = %name, "cannot disable unknown function");
            }
            builder = builder.without_function(name);
        }

        builder.build()
    }
}

/// Same shape the lexer accepts: a letter or `_`, then letters, digits, `_`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
