//! 実行設定
//!
//! 優先順位 (低 → 高): デフォルト値 → `DLCONSULT_CONFIG` の JSON ファイル → 環境変数

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_VAR: &str = "DLCONSULT_CONFIG";
pub const EXIT_CODES_VAR: &str = "DLCONSULT_EXIT_CODES";
pub const MAX_BINDINGS_VAR: &str = "DLCONSULT_MAX_BINDINGS";
pub const PRECOMPUTE_VAR: &str = "DLCONSULT_PRECOMPUTE";

/// Consultation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultConfig {
    /// How failures are reflected in the process exit status
    pub exit_codes: ExitCodePolicy,

    /// Upper bound on intermediate bindings explored by the evaluator
    pub max_bindings: usize,

    /// Precompute the fixed inference categories after loading
    pub precompute: bool,
}

impl Default for ConsultConfig {
    fn default() -> Self {
        Self {
            exit_codes: ExitCodePolicy::Parity,
            max_bindings: 1_000_000,
            precompute: true,
        }
    }
}

/// Exit status policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitCodePolicy {
    /// Always exit with 0, failures are only reported on stdout
    Parity,
    /// One sysexits-style code per failure category
    Strict,
}

impl std::str::FromStr for ExitCodePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parity" => Ok(ExitCodePolicy::Parity),
            "strict" => Ok(ExitCodePolicy::Strict),
            other => bail!("unknown exit code policy '{}', expected 'parity' or 'strict'", other),
        }
    }
}

impl ConsultConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve environment variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match lookup(CONFIG_FILE_VAR) {
            Some(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.with_overrides(lookup)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(EXIT_CODES_VAR) {
            self.exit_codes = value.parse().with_context(|| format!("invalid {}", EXIT_CODES_VAR))?;
        }
        if let Some(value) = lookup(MAX_BINDINGS_VAR) {
            self.max_bindings = value
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: '{}'", MAX_BINDINGS_VAR, value))?;
        }
        if let Some(value) = lookup(PRECOMPUTE_VAR) {
            self.precompute = parse_flag(&value).with_context(|| format!("invalid {}", PRECOMPUTE_VAR))?;
        }
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}
