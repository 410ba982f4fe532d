//! Password policy rules
//!
//! Each rule checks exactly one property of a password and knows nothing
//! about the other rules.

mod common;
mod length;
mod pattern;
mod variety;

use std::fmt::Debug;

pub use common::NotCommon;
pub use length::MinLength;
pub use pattern::NoTripleRepeat;
pub use variety::{ContainsDigit, ContainsLower, ContainsSymbol, ContainsUpper};

/// Result of a single rule check.
/// - `passed == true` - the message is empty
/// - `passed == false` - the message tells the user how to fix the password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    passed: bool,
    message: String,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A stateless predicate over a password.
///
/// `check` must be deterministic and total: every string, including the
/// empty one, yields an outcome.
pub trait Rule: Debug + Send + Sync {
    /// Stable kebab-case identifier, also used as the `kind` in policy files.
    fn name(&self) -> &'static str;

    fn check(&self, password: &str) -> RuleOutcome;
}
