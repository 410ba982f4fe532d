//! Password policy evaluation library
//!
//! A [`Policy`] is an ordered list of independent [`Rule`]s plus the number
//! of them a password must satisfy. Evaluating a password yields a
//! [`PolicyReport`] with the score, the verdict and the suggestions of every
//! failed rule.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable evaluation and channel delivery
//! - `tracing`: Enables logging via tracing crate
//! - `cli` (default): Builds the `pwd-policy` command line tool
//!
//! # Environment Variables
//!
//! - `PWD_DENYLIST_PATH`: Replacement deny-list file used by the command line tool
//! - `PWD_POLICY_CONFIG`: Policy file used by the command line tool
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{ContainsDigit, MinLength, NotCommon, Policy, Verdict};
//!
//! let policy = Policy::builder()
//!     .rule(MinLength::new(10))
//!     .rule(ContainsDigit)
//!     .rule(NotCommon::new())
//!     .required_score(2)
//!     .build()
//!     .expect("threshold within rule count");
//!
//! let report = policy.evaluate("letmein");
//! assert!(!report.passed);
//! assert_eq!(
//!     report.messages,
//!     vec!["Use at least 10 characters.", "Add digits.", "Avoid common passwords."]
//! );
//!
//! println!("{}", Verdict::for_report(&report, policy.required_score()));
//! ```
//!
//! The ASCII-only letter and digit classes are a deliberate scope choice:
//! `é` is neither lowercase nor a symbol for these rules.

mod config;
mod denylist;
mod policy;
mod rules;
mod verdict;

// Public API
pub use config::{ConfigError, POLICY_CONFIG_ENV, PolicyConfig, RuleSpec, config_path_from_env};
pub use denylist::{DENYLIST_PATH_ENV, DenyList, DenyListError, denylist_path_from_env};
pub use policy::{DEFAULT_REQUIRED_SCORE, Policy, PolicyBuilder, PolicyError, PolicyReport};
pub use rules::{
    ContainsDigit, ContainsLower, ContainsSymbol, ContainsUpper, MinLength, NoTripleRepeat,
    NotCommon, Rule, RuleOutcome,
};
pub use verdict::Verdict;

#[cfg(feature = "async")]
pub use policy::{EVALUATION_DEBOUNCE, evaluate_tx};
