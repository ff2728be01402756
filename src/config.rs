//! Configuration for unusedsym analysis runs.

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::Mode;

/// Configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for front-end fact exports
    pub fact_root: PathBuf,

    /// Package identifiers to analyze when none are given on the command
    /// line
    pub packages: Vec<String>,

    /// Which symbol kinds to check
    pub check: CheckConfig,

    /// Report configuration
    pub report: ReportConfig,

    /// Surface front-end diagnostics
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub constants: bool,
    pub fields: bool,
    pub functions: bool,
    pub types: bool,
    pub variables: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// Output file (json format)
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fact_root: PathBuf::from("."),
            packages: vec![],
            check: CheckConfig::default(),
            report: ReportConfig::default(),
            verbose: false,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            constants: true,
            fields: true,
            functions: true,
            types: true,
            variables: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            output: None,
        }
    }
}

impl Config {
    /// Load configuration from a file (TOML or JSON)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "json" => serde_json::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse JSON config"),
            _ => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        let default_names = [".unusedsym.toml", "unusedsym.toml", ".unusedsym.json"];

        for name in &default_names {
            let path = root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// The kind-selection mask configured here
    pub fn mode(&self) -> Mode {
        let mut mode = Mode::empty();
        if self.check.constants {
            mode |= Mode::CONSTANTS;
        }
        if self.check.fields {
            mode |= Mode::FIELDS;
        }
        if self.check.functions {
            mode |= Mode::FUNCTIONS;
        }
        if self.check.types {
            mode |= Mode::TYPES;
        }
        if self.check.variables {
            mode |= Mode::VARIABLES;
        }
        mode
    }
}
