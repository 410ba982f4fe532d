//! Password policy - runs every rule and aggregates the outcomes.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::rules::{
    ContainsDigit, ContainsLower, ContainsSymbol, ContainsUpper, MinLength, NoTripleRepeat,
    NotCommon, Rule, RuleOutcome,
};

/// Rules that must pass under [`Policy::default_policy`].
pub const DEFAULT_REQUIRED_SCORE: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("required score {required} exceeds the number of rules ({rules})")]
    RequiredScoreOutOfRange { required: usize, rules: usize },
}

/// Aggregated result of evaluating a [`Policy`] against one password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReport {
    /// Number of rules that passed.
    pub score: usize,
    /// Total number of rules.
    pub max_score: usize,
    /// `score >= required_score`.
    pub passed: bool,
    /// Messages of failed rules, in rule order.
    pub messages: Vec<String>,
}

impl PolicyReport {
    fn from_outcomes(outcomes: Vec<RuleOutcome>, required_score: usize) -> Self {
        let max_score = outcomes.len();
        let score = outcomes.iter().filter(|o| o.passed()).count();
        let messages = outcomes
            .into_iter()
            .filter(|o| !o.passed() && !o.message().is_empty())
            .map(|o| o.message().to_string())
            .collect();

        Self {
            score,
            max_score,
            passed: score >= required_score,
            messages,
        }
    }
}

/// An ordered set of rules plus the number of them a password must pass.
///
/// A built policy is immutable and `Send + Sync`, so it can be shared
/// between threads behind an `Arc` without locking.
#[derive(Debug)]
pub struct Policy {
    rules: Vec<Box<dyn Rule>>,
    required_score: usize,
}

impl Policy {
    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::RequiredScoreOutOfRange`] when `required_score`
    /// is greater than the number of rules, since such a policy could never pass.
    pub fn new(rules: Vec<Box<dyn Rule>>, required_score: usize) -> Result<Self, PolicyError> {
        if required_score > rules.len() {
            return Err(PolicyError::RequiredScoreOutOfRange {
                required: required_score,
                rules: rules.len(),
            });
        }
        Ok(Self {
            rules,
            required_score,
        })
    }

    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// The seven standard rules in their standard order.
    pub fn standard_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(MinLength::default()),
            Box::new(ContainsLower),
            Box::new(ContainsUpper),
            Box::new(ContainsDigit),
            Box::new(ContainsSymbol),
            Box::new(NotCommon::new()),
            Box::new(NoTripleRepeat),
        ]
    }

    /// Standard rules, five of seven required.
    pub fn default_policy() -> Self {
        Self {
            rules: Self::standard_rules(),
            required_score: DEFAULT_REQUIRED_SCORE,
        }
    }

    /// Standard rules, all required.
    pub fn strict_policy() -> Self {
        let rules = Self::standard_rules();
        let required_score = rules.len();
        Self {
            rules,
            required_score,
        }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn required_score(&self) -> usize {
        self.required_score
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against `password` and returns the aggregated report.
    ///
    /// The password is used exactly as given: no trimming, no normalization.
    pub fn evaluate(&self, password: &str) -> PolicyReport {
        let outcomes = self
            .rules
            .iter()
            .map(|rule| self.check_rule(rule.as_ref(), password))
            .collect();
        PolicyReport::from_outcomes(outcomes, self.required_score)
    }

    pub fn evaluate_secret(&self, password: &SecretString) -> PolicyReport {
        self.evaluate(password.expose_secret())
    }

    /// Like [`evaluate`](Self::evaluate), but checks `token` before each rule.
    ///
    /// Returns `None` if the evaluation was cancelled.
    #[cfg(feature = "async")]
    pub fn evaluate_cancellable(
        &self,
        password: &str,
        token: &CancellationToken,
    ) -> Option<PolicyReport> {
        let mut outcomes = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if token.is_cancelled() {
                #[cfg(feature = "tracing")]
                tracing::debug!(before = rule.name(), "policy evaluation cancelled");
                return None;
            }
            outcomes.push(self.check_rule(rule.as_ref(), password));
        }
        Some(PolicyReport::from_outcomes(outcomes, self.required_score))
    }

    fn check_rule(&self, rule: &dyn Rule, password: &str) -> RuleOutcome {
        let outcome = rule.check(password);
        #[cfg(feature = "tracing")]
        tracing::debug!(rule = rule.name(), passed = outcome.passed(), "rule checked");
        outcome
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::default_policy()
    }
}

/// Collects rules one by one before validating the threshold.
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    rules: Vec<Box<dyn Rule>>,
    required_score: Option<usize>,
}

impl PolicyBuilder {
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn boxed_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Defaults to the number of rules (every rule must pass).
    pub fn required_score(mut self, required_score: usize) -> Self {
        self.required_score = Some(required_score);
        self
    }

    pub fn build(self) -> Result<Policy, PolicyError> {
        let required_score = self.required_score.unwrap_or(self.rules.len());
        Policy::new(self.rules, required_score)
    }
}

/// Delay before an async evaluation starts, so rapid keystrokes can cancel it.
#[cfg(feature = "async")]
pub const EVALUATION_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Async version that sends the report via channel.
///
/// Nothing is sent if `token` is cancelled before evaluation completes.
#[cfg(feature = "async")]
pub async fn evaluate_tx(
    policy: &Policy,
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PolicyReport>,
) {
    #[cfg(feature = "tracing")]
    tracing::debug!("policy evaluation is about to start...");

    tokio::select! {
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(EVALUATION_DEBOUNCE) => {}
    }

    let Some(report) = policy.evaluate_cancellable(password.expose_secret(), &token) else {
        return;
    };

    if let Err(e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send policy report: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}
