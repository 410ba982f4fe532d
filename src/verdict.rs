//! Human-readable verdict labels for a policy report.

use std::fmt;

use crate::policy::PolicyReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    VeryWeak,
    Weak,
    Ok,
    Good,
    Strong,
    VeryStrong,
}

impl Verdict {
    /// Every verdict, weakest first.
    pub const SCALE: [Verdict; 6] = [
        Verdict::VeryWeak,
        Verdict::Weak,
        Verdict::Ok,
        Verdict::Good,
        Verdict::Strong,
        Verdict::VeryStrong,
    ];

    /// Maps `min(score, required) / required` onto the six-point scale,
    /// rounding half to even.
    ///
    /// A zero threshold is satisfied by every password and yields `VeryStrong`.
    pub fn from_score(score: usize, required: usize) -> Self {
        if required == 0 {
            return Verdict::VeryStrong;
        }
        let top = Self::SCALE.len() - 1;
        let ratio = score.min(required) as f64 / required as f64;
        let index = (ratio * top as f64).round_ties_even() as usize;
        Self::SCALE[index.min(top)]
    }

    pub fn for_report(report: &PolicyReport, required: usize) -> Self {
        Self::from_score(report.score, required)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::VeryWeak => "Very weak",
            Verdict::Weak => "Weak",
            Verdict::Ok => "OK",
            Verdict::Good => "Good",
            Verdict::Strong => "Strong",
            Verdict::VeryStrong => "Very strong",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Policy;

    #[test]
    fn test_one_step_per_point_at_threshold_five() {
        let labels: Vec<_> = (0..=5).map(|s| Verdict::from_score(s, 5)).collect();
        assert_eq!(labels, Verdict::SCALE.to_vec());
    }

    #[test]
    fn test_score_clamped_to_required() {
        assert_eq!(Verdict::from_score(7, 5), Verdict::VeryStrong);
    }

    #[test]
    fn test_half_rounds_to_even() {
        // 1/2 * 5 = 2.5 -> 2
        assert_eq!(Verdict::from_score(1, 2), Verdict::Ok);
        // 3/4 * 5 = 3.75 -> 4
        assert_eq!(Verdict::from_score(3, 4), Verdict::Strong);
    }

    #[test]
    fn test_zero_required_is_very_strong() {
        assert_eq!(Verdict::from_score(0, 0), Verdict::VeryStrong);
    }

    #[test]
    fn test_monotonic() {
        for required in 1..=10 {
            let verdicts: Vec<_> = (0..=required + 2)
                .map(|s| Verdict::from_score(s, required))
                .collect();
            assert!(verdicts.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(verdicts[0], Verdict::VeryWeak);
            assert_eq!(verdicts[required], Verdict::VeryStrong);
        }
    }

    #[test]
    fn test_for_report() {
        let policy = Policy::default_policy();
        let report = policy.evaluate("password");
        // "password": lower, not-triple pass -> 2/5
        assert_eq!(
            Verdict::for_report(&report, policy.required_score()),
            Verdict::Ok
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(Verdict::VeryWeak.to_string(), "Very weak");
        assert_eq!(Verdict::Ok.to_string(), "OK");
        assert_eq!(Verdict::VeryStrong.to_string(), "Very strong");
    }
}
