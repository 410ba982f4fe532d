//! Character variety rules - lowercase, uppercase, digits, symbols.
//!
//! Letter and digit classes are ASCII only. A symbol is any character that is
//! neither alphanumeric nor whitespace in the Unicode sense, so `_` and `€`
//! count as symbols while `é` does not.

use super::{Rule, RuleOutcome};

fn contains(password: &str, class: impl Fn(char) -> bool, message: &str) -> RuleOutcome {
    if password.chars().any(class) {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail(message)
    }
}

fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsLower;

impl Rule for ContainsLower {
    fn name(&self) -> &'static str {
        "contains-lower"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        contains(password, |c| c.is_ascii_lowercase(), "Add lowercase letters.")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsUpper;

impl Rule for ContainsUpper {
    fn name(&self) -> &'static str {
        "contains-upper"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        contains(password, |c| c.is_ascii_uppercase(), "Add uppercase letters.")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsDigit;

impl Rule for ContainsDigit {
    fn name(&self) -> &'static str {
        "contains-digit"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        contains(password, |c| c.is_ascii_digit(), "Add digits.")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsSymbol;

impl Rule for ContainsSymbol {
    fn name(&self) -> &'static str {
        "contains-symbol"
    }

    fn check(&self, password: &str) -> RuleOutcome {
        contains(password, is_symbol, "Add symbols (e.g., !@#$).")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_missing_lowercase() {
        let outcome = ContainsLower.check("UPPERCASE123!");
        assert_eq!(outcome, RuleOutcome::fail("Add lowercase letters."));
    }

    #[test]
    fn test_variety_missing_uppercase() {
        let outcome = ContainsUpper.check("lowercase123!");
        assert_eq!(outcome, RuleOutcome::fail("Add uppercase letters."));
    }

    #[test]
    fn test_variety_missing_digits() {
        let outcome = ContainsDigit.check("NoNumbers!");
        assert_eq!(outcome, RuleOutcome::fail("Add digits."));
    }

    #[test]
    fn test_variety_missing_symbols() {
        let outcome = ContainsSymbol.check("NoSymbol123");
        assert_eq!(outcome, RuleOutcome::fail("Add symbols (e.g., !@#$)."));
    }

    #[test]
    fn test_variety_all_categories() {
        let pwd = "HasAll123!@#";
        assert!(ContainsLower.check(pwd).passed());
        assert!(ContainsUpper.check(pwd).passed());
        assert!(ContainsDigit.check(pwd).passed());
        assert!(ContainsSymbol.check(pwd).passed());
    }

    #[test]
    fn test_variety_letter_classes_are_ascii_only() {
        assert!(!ContainsLower.check("éàü").passed());
        assert!(!ContainsUpper.check("ÉÀÜ").passed());
        assert!(!ContainsDigit.check("٣").passed());
    }

    #[test]
    fn test_symbol_excludes_whitespace_and_letters() {
        assert!(!ContainsSymbol.check("with spaces\tand\ttabs").passed());
        assert!(!ContainsSymbol.check("héllo").passed());
    }

    #[test]
    fn test_symbol_includes_underscore_and_unicode_punctuation() {
        assert!(ContainsSymbol.check("snake_case").passed());
        assert!(ContainsSymbol.check("price€").passed());
        assert!(ContainsSymbol.check("«quoted»").passed());
    }

    #[test]
    fn test_variety_empty_password_fails_all() {
        assert!(!ContainsLower.check("").passed());
        assert!(!ContainsUpper.check("").passed());
        assert!(!ContainsDigit.check("").passed());
        assert!(!ContainsSymbol.check("").passed());
    }
}
