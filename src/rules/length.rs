//! Length rule - checks password minimum length.

use super::{Rule, RuleOutcome};

/// Passes when the password has at least `min_length` characters.
///
/// Length is counted in `char`s, so `"héllo"` is five characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength {
    min_length: usize,
}

impl MinLength {
    pub const DEFAULT: usize = 12;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for MinLength {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Rule for MinLength {
    fn name(&self) -> &'static str {
        "min-length"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        if password.chars().count() < self.min_length {
            return RuleOutcome::fail(format!(
                "Use at least {} characters.",
                self.min_length
            ));
        }
        RuleOutcome::pass()
    }
}
