//! Pattern rule - detects runs of the same character.

use super::{Rule, RuleOutcome};

const MAX_RUN: usize = 2;

/// Fails when any character appears three or more times in a row.
///
/// Characters are compared exactly, so `"aAa"` is not a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTripleRepeat;

impl Rule for NoTripleRepeat {
    fn name(&self) -> &'static str {
        "no-triple-repeat"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        let mut chars = password.chars();
        let Some(mut previous) = chars.next() else {
            return RuleOutcome::pass();
        };

        let mut run = 1;
        for c in chars {
            if c == previous {
                run += 1;
                if run > MAX_RUN {
                    return RuleOutcome::fail("Avoid repeating a character 3+ times.");
                }
            } else {
                previous = c;
                run = 1;
            }
        }
        RuleOutcome::pass()
    }
}
