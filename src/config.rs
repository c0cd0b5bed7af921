//! Parse options and configuration file support
//!
//! [`ParseOptions`] controls a single parse call. [`MaveHgvsConfig`] is loaded
//! from a `.mavehgvs.toml` file and converts into parse options and a batch
//! configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! [parsing]
//! relaxed-ordering = true
//! target-sequence = "ACGT"
//!
//! [batch]
//! expected-prefix = "c"
//! progress-interval = 500
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.mavehgvs.toml` in current directory
//! 2. `~/.config/mavehgvs/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::batch::BatchConfig;
use crate::error::MaveHgvsError;
use crate::variant::Prefix;

/// Options for a single parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept reversed ranges and out-of-order alleles, reordering them
    pub relaxed_ordering: bool,
    /// Check coordinates and reference symbols against this sequence
    pub target_sequence: Option<String>,
}

impl ParseOptions {
    /// Strict ordering, no target sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Set relaxed ordering.
    pub fn relaxed_ordering(mut self, relaxed: bool) -> Self {
        self.relaxed_ordering = relaxed;
        self
    }

    /// Set the target sequence.
    ///
    /// DNA and protein sequences are expected in uppercase, RNA in lowercase.
    pub fn target_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.target_sequence = Some(sequence.into());
        self
    }
}

/// Parsed configuration from a .mavehgvs.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaveHgvsConfig {
    /// `[parsing]` section.
    pub parsing: ParsingConfig,
    /// `[batch]` section.
    pub batch: BatchSection,
}

/// Parsing section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ParsingConfig {
    pub relaxed_ordering: bool,
    pub target_sequence: Option<String>,
}

/// Batch section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BatchSection {
    /// Single-letter prefix every batch item must have.
    pub expected_prefix: Option<String>,
    /// Call the progress callback every N items.
    pub progress_interval: Option<usize>,
}

impl MaveHgvsConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.mavehgvs.toml` in current directory
    /// 2. `~/.config/mavehgvs/config.toml`
    ///
    /// A file that exists but fails to load is skipped with a warning.
    pub fn load() -> Option<Self> {
        let mut candidates = vec![PathBuf::from(".mavehgvs.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("mavehgvs").join("config.toml"));
        }

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_path(path) {
                Ok(config) => {
                    debug!("Loaded configuration from {}", path.display());
                    return Some(config);
                }
                Err(e) => warn!("Ignoring configuration {}: {}", path.display(), e),
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, MaveHgvsError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, MaveHgvsError> {
        let config: MaveHgvsConfig = toml::from_str(content)?;
        config.expected_prefix()?;
        if config.batch.progress_interval == Some(0) {
            return Err(MaveHgvsError::Config {
                msg: "progress-interval must be at least 1".to_string(),
            });
        }
        Ok(config)
    }

    /// The validated `expected-prefix`, if set.
    pub fn expected_prefix(&self) -> Result<Option<Prefix>, MaveHgvsError> {
        let Some(value) = self.batch.expected_prefix.as_deref() else {
            return Ok(None);
        };
        let mut chars = value.chars();
        match (chars.next().and_then(Prefix::from_char), chars.next()) {
            (Some(prefix), None) => Ok(Some(prefix)),
            _ => Err(MaveHgvsError::Config {
                msg: format!("invalid expected prefix '{}'", value),
            }),
        }
    }

    /// Convert this config to parse options.
    pub fn to_parse_options(&self) -> ParseOptions {
        ParseOptions {
            relaxed_ordering: self.parsing.relaxed_ordering,
            target_sequence: self.parsing.target_sequence.clone(),
        }
    }

    /// Convert this config to a batch configuration.
    pub fn to_batch_config(&self) -> Result<BatchConfig, MaveHgvsError> {
        let mut config = BatchConfig::new().options(self.to_parse_options());
        if let Some(prefix) = self.expected_prefix()? {
            config = config.expected_prefix(prefix);
        }
        if let Some(interval) = self.batch.progress_interval {
            config = config.progress_interval(interval);
        }
        Ok(config)
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = MaveHgvsConfig::parse("").unwrap();
        assert_eq!(config, MaveHgvsConfig::default());
        assert_eq!(config.to_parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
# shared by all screens in this run
[parsing]
relaxed-ordering = true
target-sequence = "ACGT"

[batch]
expected-prefix = "c"
progress-interval = 25
"#;
        let config = MaveHgvsConfig::parse(content).unwrap();
        assert!(config.parsing.relaxed_ordering);
        assert_eq!(config.parsing.target_sequence.as_deref(), Some("ACGT"));
        assert_eq!(config.expected_prefix().unwrap(), Some(Prefix::Coding));

        let batch = config.to_batch_config().unwrap();
        assert_eq!(batch.expected_prefix, Some(Prefix::Coding));
        assert_eq!(batch.progress_interval, 25);
        assert!(batch.options.relaxed_ordering);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = MaveHgvsConfig::parse("[parsing]\nrelaxed = true\n").unwrap_err();
        assert!(matches!(err, MaveHgvsError::Config { .. }));

        let err = MaveHgvsConfig::parse("[output]\nformat = \"json\"\n").unwrap_err();
        assert!(matches!(err, MaveHgvsError::Config { .. }));
    }

    #[test]
    fn test_invalid_expected_prefix() {
        for bad in ["C", "x", "cg", ""] {
            let content = format!("[batch]\nexpected-prefix = \"{}\"\n", bad);
            assert!(MaveHgvsConfig::parse(&content).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_zero_progress_interval_rejected() {
        assert!(MaveHgvsConfig::parse("[batch]\nprogress-interval = 0\n").is_err());
    }

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .relaxed_ordering(true)
            .target_sequence("RCQY");
        assert!(options.relaxed_ordering);
        assert_eq!(options.target_sequence.as_deref(), Some("RCQY"));
    }
}
