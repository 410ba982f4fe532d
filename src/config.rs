//! Policy files
//!
//! A policy can be described in TOML instead of code:
//!
//! ```toml
//! required_score = 1
//! deny_list = "/etc/pwd-policy/denylist.txt"
//!
//! [[rules]]
//! kind = "min-length"
//! min_length = 14
//!
//! [[rules]]
//! kind = "contains-digit"
//! ```
//!
//! Without `rules` the seven standard rules are used.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::denylist::{DenyList, DenyListError};
use crate::policy::{DEFAULT_REQUIRED_SCORE, Policy, PolicyError};
use crate::rules::{
    ContainsDigit, ContainsLower, ContainsSymbol, ContainsUpper, MinLength, NoTripleRepeat,
    NotCommon, Rule,
};

/// Environment variable naming the policy file used by the command line tool.
pub const POLICY_CONFIG_ENV: &str = "PWD_POLICY_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid policy file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    DenyList(#[from] DenyListError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// One entry of the `rules` array.
///
/// Options are only accepted on the rule that uses them; a stray or
/// misspelled key is a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRuleSpec")]
pub enum RuleSpec {
    MinLength { min_length: usize },
    ContainsLower,
    ContainsUpper,
    ContainsDigit,
    ContainsSymbol,
    NotCommon,
    NoTripleRepeat,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum RuleKind {
    MinLength,
    ContainsLower,
    ContainsUpper,
    ContainsDigit,
    ContainsSymbol,
    NotCommon,
    NoTripleRepeat,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRuleSpec {
    kind: RuleKind,
    min_length: Option<usize>,
}

impl TryFrom<RawRuleSpec> for RuleSpec {
    type Error = String;

    fn try_from(raw: RawRuleSpec) -> Result<Self, Self::Error> {
        let spec = match raw.kind {
            RuleKind::MinLength => RuleSpec::MinLength {
                min_length: raw.min_length.unwrap_or(MinLength::DEFAULT),
            },
            RuleKind::ContainsLower => RuleSpec::ContainsLower,
            RuleKind::ContainsUpper => RuleSpec::ContainsUpper,
            RuleKind::ContainsDigit => RuleSpec::ContainsDigit,
            RuleKind::ContainsSymbol => RuleSpec::ContainsSymbol,
            RuleKind::NotCommon => RuleSpec::NotCommon,
            RuleKind::NoTripleRepeat => RuleSpec::NoTripleRepeat,
        };
        if raw.min_length.is_some() && !matches!(spec, RuleSpec::MinLength { .. }) {
            return Err("`min_length` is only valid for kind = \"min-length\"".to_string());
        }
        Ok(spec)
    }
}

impl RuleSpec {
    fn to_rule(&self, deny_list: &Arc<DenyList>) -> Box<dyn Rule> {
        match self {
            RuleSpec::MinLength { min_length } => Box::new(MinLength::new(*min_length)),
            RuleSpec::ContainsLower => Box::new(ContainsLower),
            RuleSpec::ContainsUpper => Box::new(ContainsUpper),
            RuleSpec::ContainsDigit => Box::new(ContainsDigit),
            RuleSpec::ContainsSymbol => Box::new(ContainsSymbol),
            RuleSpec::NotCommon => Box::new(NotCommon::with_deny_list(Arc::clone(deny_list))),
            RuleSpec::NoTripleRepeat => Box::new(NoTripleRepeat),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Rules that must pass.
    pub required_score: Option<usize>,
    /// Replacement for the built-in deny-list.
    pub deny_list: Option<PathBuf>,
    pub rules: Option<Vec<RuleSpec>>,
}

impl PolicyConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;

        #[cfg(feature = "tracing")]
        tracing::info!("Policy file loaded from {:?}", path);

        Ok(config)
    }

    /// Resolves the deny-list and validates the threshold.
    pub fn build(&self) -> Result<Policy, ConfigError> {
        let deny_list = match &self.deny_list {
            Some(path) => Arc::new(DenyList::from_path(path)?),
            None => DenyList::builtin(),
        };

        let (rules, required_score) = match &self.rules {
            Some(specs) => {
                let rules: Vec<_> = specs.iter().map(|s| s.to_rule(&deny_list)).collect();
                let required = self.required_score.unwrap_or(rules.len());
                (rules, required)
            }
            None => (
                Self::standard_specs()
                    .iter()
                    .map(|s| s.to_rule(&deny_list))
                    .collect(),
                self.required_score.unwrap_or(DEFAULT_REQUIRED_SCORE),
            ),
        };

        Ok(Policy::new(rules, required_score)?)
    }

    fn standard_specs() -> [RuleSpec; 7] {
        [
            RuleSpec::MinLength {
                min_length: MinLength::DEFAULT,
            },
            RuleSpec::ContainsLower,
            RuleSpec::ContainsUpper,
            RuleSpec::ContainsDigit,
            RuleSpec::ContainsSymbol,
            RuleSpec::NotCommon,
            RuleSpec::NoTripleRepeat,
        ]
    }
}

/// Returns the policy file path from `PWD_POLICY_CONFIG`, if set and non-empty.
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(POLICY_CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
