//! Configuration module
//!
//! The CLI configuration file carries the library sections of
//! [`PinmergeConfig`] at the top level plus `[performance]` and `[output]`.

use std::path::Path;

use anyhow::{Context, Result};
use pinmerge_core::PinmergeConfig;
use pinmerge_engine::{EngineConfig, ExecutionMode};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Normalization, corrections, alignment and repetition sections
    #[serde(flatten)]
    pub core: PinmergeConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PerformanceConfig {
    /// sequential, parallel or adaptive
    #[serde(default)]
    pub execution_mode: ExecutionMode,

    /// Batch size in lines at which adaptive mode goes parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Number of worker threads (0 = auto)
    #[serde(default)]
    pub worker_threads: usize,
}

fn default_parallel_threshold() -> usize {
    pinmerge_engine::config::DEFAULT_PARALLEL_THRESHOLD
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            parallel_threshold: default_parallel_threshold(),
            worker_threads: 0,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Separator placed between tokens in text output
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Pretty print JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

fn default_separator() -> String {
    "|".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(text).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Load `path` if given, the built-in defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.core
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        if self.performance.parallel_threshold == 0 {
            return Err(
                CliError::ConfigError("parallel_threshold must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Engine settings from the performance section
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            execution_mode: self.performance.execution_mode,
            threads: match self.performance.worker_threads {
                0 => None,
                n => Some(n),
            },
            parallel_threshold: self.performance.parallel_threshold,
            policy: self.core.alignment.policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmerge_core::ReconciliationPolicy;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.output.separator, "|");
        assert_eq!(config.performance.execution_mode, ExecutionMode::Adaptive);
        assert_eq!(config.engine_config().threads, None);
    }

    #[test]
    fn test_flattened_sections() {
        let config = CliConfig::from_toml_str(
            r#"
            [alignment]
            policy = "batch"

            [performance]
            execution_mode = "parallel"
            worker_threads = 2

            [output]
            separator = " "
            "#,
        )
        .unwrap();

        assert_eq!(config.core.alignment.policy, ReconciliationPolicy::Batch);
        let engine = config.engine_config();
        assert_eq!(engine.execution_mode, ExecutionMode::Parallel);
        assert_eq!(engine.threads, Some(2));
        assert_eq!(engine.policy, ReconciliationPolicy::Batch);
        assert_eq!(config.output.separator, " ");
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_invalid_core_section() {
        let result = CliConfig::from_toml_str("[repetition]\nwindow = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/pinmerge.toml")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
