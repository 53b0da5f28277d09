//! Configuration structures and validation
//!
//! This module defines the TOML schema shared by the engine and the CLI.
//! The embedded default lives in `configs/default.toml`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::align::ReconciliationPolicy;
use crate::error::{CoreError, Result};
use crate::normalize::{NormalizationRules, PunctuationMap, ReadingCorrections};
use crate::repetition::{RepetitionFilter, DEFAULT_TOLERANCE, DEFAULT_WINDOW};
use crate::token::is_tone3_style;

/// Embedded default configuration text
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../configs/default.toml");

static DEFAULT_CONFIG: OnceLock<PinmergeConfig> = OnceLock::new();

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinmergeConfig {
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub corrections: CorrectionsConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub repetition: RepetitionConfig,
}

/// Input punctuation replacements
///
/// A missing section keeps the built-in map; an empty table disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Single-character keys mapped to replacement text
    #[serde(default = "default_punctuation")]
    pub punctuation: HashMap<String, String>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            punctuation: default_punctuation(),
        }
    }
}

/// Sentence-level reading corrections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionsConfig {
    #[serde(default = "default_readings")]
    pub readings: HashMap<String, String>,
}

impl Default for CorrectionsConfig {
    fn default() -> Self {
        Self {
            readings: default_readings(),
        }
    }
}

fn default_punctuation() -> HashMap<String, String> {
    [
        (";", ","),
        ("\u{201C}", "\""),
        ("\u{201D}", "\""),
        ("\u{2018}", "'"),
        ("\u{2019}", "'"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

fn default_readings() -> HashMap<String, String> {
    HashMap::from([("shei2".to_string(), "shui2".to_string())])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default)]
    pub policy: ReconciliationPolicy,
    /// Whole-segment romanization for pure East-Asian segments
    #[serde(default = "default_true")]
    pub polyphone: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            policy: ReconciliationPolicy::default(),
            polyphone: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionConfig {
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: usize,
}

impl Default for RepetitionConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_tolerance() -> usize {
    DEFAULT_TOLERANCE
}

impl PinmergeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PinmergeConfig =
            toml::from_str(text).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check constraints the schema cannot express
    pub fn validate(&self) -> Result<()> {
        for key in self.normalization.punctuation.keys() {
            if key.chars().count() != 1 {
                return Err(CoreError::Config(format!(
                    "punctuation key {key:?} must be exactly one character"
                )));
            }
        }

        for (from, to) in &self.corrections.readings {
            if !is_tone3_style(from) || !is_tone3_style(to) {
                return Err(CoreError::Config(format!(
                    "correction {from:?} -> {to:?} is not a TONE3 reading"
                )));
            }
        }

        if self.repetition.window == 0 {
            return Err(CoreError::Config(
                "repetition window must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Normalization tables built from this configuration
    pub fn rules(&self) -> NormalizationRules {
        let punctuation = self
            .normalization
            .punctuation
            .iter()
            .filter_map(|(key, value)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some((ch, value.clone())),
                    _ => None,
                }
            })
            .collect();

        NormalizationRules {
            punctuation: PunctuationMap::new(punctuation),
            corrections: ReadingCorrections::new(self.corrections.readings.clone()),
        }
    }

    /// Repetition gate built from this configuration
    pub fn repetition_filter(&self) -> RepetitionFilter {
        RepetitionFilter::new(self.repetition.window, self.repetition.tolerance)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))
    }
}

/// The embedded default configuration, parsed on first use
pub fn default_config() -> &'static PinmergeConfig {
    DEFAULT_CONFIG.get_or_init(|| match PinmergeConfig::from_toml_str(DEFAULT_CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("embedded default configuration is invalid: {e}");
            PinmergeConfig::default()
        }
    })
}
