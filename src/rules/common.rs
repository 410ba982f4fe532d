//! Deny-list rule - checks if password is a well known common password.

use std::sync::Arc;

use super::{Rule, RuleOutcome};
use crate::denylist::DenyList;

/// Fails when the whole password, ignoring case, is on the deny-list.
#[derive(Debug, Clone)]
pub struct NotCommon {
    deny_list: Arc<DenyList>,
}

impl NotCommon {
    /// Uses the built-in deny-list.
    pub fn new() -> Self {
        Self::with_deny_list(DenyList::builtin())
    }

    pub fn with_deny_list(deny_list: Arc<DenyList>) -> Self {
        Self { deny_list }
    }

    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }
}

impl Default for NotCommon {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NotCommon {
    fn name(&self) -> &'static str {
        "not-common"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        if self.deny_list.contains(password) {
            return RuleOutcome::fail("Avoid common passwords.");
        }
        RuleOutcome::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_password_rejected() {
        let outcome = NotCommon::new().check("password");
        assert_eq!(outcome, RuleOutcome::fail("Avoid common passwords."));
    }

    #[test]
    fn test_common_password_any_case() {
        assert!(!NotCommon::new().check("QWERTY").passed());
    }

    #[test]
    fn test_uncommon_password_accepted() {
        assert!(NotCommon::new().check("CorrectHorseBatteryStaple!123").passed());
    }

    #[test]
    fn test_substring_is_not_a_match() {
        assert!(NotCommon::new().check("password!").passed());
    }

    #[test]
    fn test_empty_password_is_not_common() {
        assert!(NotCommon::new().check("").passed());
    }

    #[test]
    fn test_custom_deny_list_replaces_builtin() {
        let rule = NotCommon::with_deny_list(Arc::new(DenyList::from_entries(["hunter2"])));
        assert!(!rule.check("Hunter2").passed());
        assert!(rule.check("password").passed());
    }
}
