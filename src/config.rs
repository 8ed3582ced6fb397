//! YAML configuration file support for tfst-locate.
//!
//! Lets callers define the matcher profile (selection policy, ambiguous
//! output handling, search limit) in a YAML file and load it at runtime.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # tfst-locate configuration
//! version: "1.0"
//! name: "noun phrases, longest match"
//!
//! matcher:
//!   policy: longest
//!   ambiguous_outputs: forbid
//!   search_limit: 200
//! ```
//!
//! `search_limit` is either a positive integer or the keyword `unbounded`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use selector::{AmbiguousOutputPolicy, MatchPolicy, SearchLimit};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LocateConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Matcher profile
    #[serde(default)]
    pub matcher: MatcherYamlConfig,
}

impl LocateConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: LocateConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.matcher.validate()?;
        Ok(())
    }
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatcherYamlConfig::default(),
        }
    }
}

/// Matcher profile YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherYamlConfig {
    #[serde(default)]
    pub policy: MatchPolicy,

    #[serde(default)]
    pub ambiguous_outputs: AmbiguousOutputPolicy,

    #[serde(default)]
    pub search_limit: SearchLimitYaml,
}

impl MatcherYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match &self.search_limit {
            SearchLimitYaml::Bounded(0) => Err(ConfigLoadError::Validation(
                "matcher.search_limit must be >= 1".to_string(),
            )),
            SearchLimitYaml::Bounded(_) => Ok(()),
            SearchLimitYaml::Keyword(word) if word == "unbounded" => Ok(()),
            SearchLimitYaml::Keyword(word) => Err(ConfigLoadError::Validation(format!(
                "matcher.search_limit must be a positive integer or \"unbounded\", got \"{word}\""
            ))),
        }
    }

    /// The configured limit as the engine consumes it.
    pub fn search_limit(&self) -> SearchLimit {
        match &self.search_limit {
            SearchLimitYaml::Bounded(n) => SearchLimit::AtMost(*n as usize),
            SearchLimitYaml::Keyword(_) => SearchLimit::Unbounded,
        }
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            ambiguous_outputs: AmbiguousOutputPolicy::default(),
            search_limit: SearchLimitYaml::default(),
        }
    }
}

/// A search limit as written in YAML: a count or the keyword `unbounded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchLimitYaml {
    Bounded(u64),
    Keyword(String),
}

impl Default for SearchLimitYaml {
    fn default() -> Self {
        SearchLimitYaml::Keyword("unbounded".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_parse_from_a_minimal_document() {
        let cfg = LocateConfig::from_yaml("version: \"1.0\"\n").expect("minimal config parses");
        assert!(cfg.name.is_none());
        assert_eq!(cfg.matcher.policy, MatchPolicy::Longest);
        assert_eq!(
            cfg.matcher.ambiguous_outputs,
            AmbiguousOutputPolicy::Forbid
        );
        assert_eq!(cfg.matcher.search_limit(), SearchLimit::Unbounded);
    }

    #[test]
    fn full_profile_round_trips() {
        let yaml = r#"
version: "1.0"
name: "shortest, ambiguous"
matcher:
  policy: shortest
  ambiguous_outputs: allow
  search_limit: 50
"#;
        let cfg = LocateConfig::from_yaml(yaml).expect("config parses");
        assert_eq!(cfg.name.as_deref(), Some("shortest, ambiguous"));
        assert_eq!(cfg.matcher.policy, MatchPolicy::Shortest);
        assert_eq!(cfg.matcher.ambiguous_outputs, AmbiguousOutputPolicy::Allow);
        assert_eq!(cfg.matcher.search_limit(), SearchLimit::AtMost(50));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let result = LocateConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(_))));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let yaml = "version: \"1.0\"\nmatcher:\n  search_limit: 0\n";
        let result = LocateConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn unknown_limit_keyword_is_rejected() {
        let yaml = "version: \"1.0\"\nmatcher:\n  search_limit: none\n";
        let result = LocateConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "version: \"1\"\nmatcher:\n  policy: all\n  search_limit: unbounded\n"
        )
        .expect("write temp config");

        let cfg = LocateConfig::from_file(file.path()).expect("config loads");
        assert_eq!(cfg.matcher.policy, MatchPolicy::All);
        assert_eq!(cfg.matcher.search_limit(), SearchLimit::Unbounded);
    }

    #[test]
    fn missing_file_surfaces_the_io_error() {
        let result = LocateConfig::from_file("/nonexistent/tfst-locate.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }
}
