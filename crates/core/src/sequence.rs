use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MIN_SEQUENCE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SequenceType {
    Arithmetic,
    Geometric,
    Increasing,
    Decreasing,
    Odd,
    Even,
    Fibonacci,
}

impl SequenceType {
    pub const ALL: [SequenceType; 7] = [
        SequenceType::Arithmetic,
        SequenceType::Geometric,
        SequenceType::Increasing,
        SequenceType::Decreasing,
        SequenceType::Odd,
        SequenceType::Even,
        SequenceType::Fibonacci,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SequenceType::Arithmetic => "arithmetic",
            SequenceType::Geometric => "geometric",
            SequenceType::Increasing => "increasing",
            SequenceType::Decreasing => "decreasing",
            SequenceType::Odd => "odd",
            SequenceType::Even => "even",
            SequenceType::Fibonacci => "fibonacci",
        }
    }

    fn matches(self, ranks: &[i64]) -> bool {
        match self {
            SequenceType::Arithmetic => is_arithmetic(ranks),
            SequenceType::Geometric => is_geometric(ranks),
            SequenceType::Increasing => ranks.windows(2).all(|w| w[1] > w[0]),
            SequenceType::Decreasing => ranks.windows(2).all(|w| w[1] < w[0]),
            SequenceType::Odd => ranks.iter().all(|n| n % 2 != 0),
            SequenceType::Even => ranks.iter().all(|n| n % 2 == 0),
            SequenceType::Fibonacci => ranks.windows(3).all(|w| w[2] == w[0] + w[1]),
        }
    }
}

pub type SequenceSet = BTreeSet<SequenceType>;

/// Every category the ordered ranks satisfy. Fewer than three ranks satisfy
/// nothing.
pub fn evaluate(ranks: &[i32]) -> SequenceSet {
    if ranks.len() < MIN_SEQUENCE_LEN {
        return SequenceSet::new();
    }
    let wide: Vec<i64> = ranks.iter().map(|&n| i64::from(n)).collect();
    SequenceType::ALL
        .into_iter()
        .filter(|kind| kind.matches(&wide))
        .collect()
}

fn is_arithmetic(ranks: &[i64]) -> bool {
    let diff = ranks[1] - ranks[0];
    ranks.windows(2).all(|w| w[1] - w[0] == diff)
}

fn is_geometric(ranks: &[i64]) -> bool {
    if ranks[0] == 0 || ranks[1] % ranks[0] != 0 {
        return false;
    }
    let ratio = ranks[1] / ranks[0];
    ranks
        .windows(2)
        .all(|w| w[0] != 0 && w[1] % w[0] == 0 && w[1] / w[0] == ratio)
}

/// Reward level of an accepted play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Base,
    Medium,
    Highest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edition {
    Regular,
    Polychrome,
    Negative,
}

impl Edition {
    pub fn key(self) -> &'static str {
        match self {
            Edition::Regular => "REGULAR",
            Edition::Polychrome => "POLYCHROME",
            Edition::Negative => "NEGATIVE",
        }
    }
}

impl Tier {
    /// Fibonacci wins outright; otherwise `medium_threshold` or more other
    /// categories earn the medium tier.
    pub fn classify(categories: &SequenceSet, medium_threshold: usize) -> Tier {
        if categories.contains(&SequenceType::Fibonacci) {
            return Tier::Highest;
        }
        let others = categories
            .iter()
            .filter(|kind| **kind != SequenceType::Fibonacci)
            .count();
        if others >= medium_threshold {
            Tier::Medium
        } else {
            Tier::Base
        }
    }

    pub fn edition(self) -> Edition {
        match self {
            Tier::Base => Edition::Regular,
            Tier::Medium => Edition::Polychrome,
            Tier::Highest => Edition::Negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(kinds: &[SequenceType]) -> SequenceSet {
        kinds.iter().copied().collect()
    }

    #[test]
    fn geometric_requires_nonzero_start() {
        assert!(!evaluate(&[0, 0, 0]).contains(&SequenceType::Geometric));
        assert!(evaluate(&[0, 0, 0]).contains(&SequenceType::Arithmetic));
    }

    #[test]
    fn geometric_rejects_fractional_ratio() {
        assert!(!evaluate(&[4, 6, 9]).contains(&SequenceType::Geometric));
        assert!(!evaluate(&[8, 4, 2]).contains(&SequenceType::Geometric));
    }

    #[test]
    fn geometric_handles_zero_mid_sequence() {
        assert!(!evaluate(&[3, 0, 0]).contains(&SequenceType::Geometric));
    }

    #[test]
    fn constant_run_is_arithmetic_and_geometric() {
        let result = evaluate(&[7, 7, 7]);
        assert!(result.contains(&SequenceType::Arithmetic));
        assert!(result.contains(&SequenceType::Geometric));
        assert!(result.contains(&SequenceType::Odd));
        assert!(!result.contains(&SequenceType::Increasing));
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let result = evaluate(&[i32::MAX, i32::MIN, i32::MAX]);
        assert!(!result.contains(&SequenceType::Fibonacci));
        assert!(!result.contains(&SequenceType::Arithmetic));
    }

    #[test]
    fn tier_prefers_fibonacci() {
        let fib = set(&[SequenceType::Fibonacci, SequenceType::Increasing]);
        assert_eq!(Tier::classify(&fib, 3), Tier::Highest);
        let many = set(&[
            SequenceType::Arithmetic,
            SequenceType::Increasing,
            SequenceType::Even,
        ]);
        assert_eq!(Tier::classify(&many, 3), Tier::Medium);
        let few = set(&[SequenceType::Arithmetic, SequenceType::Increasing]);
        assert_eq!(Tier::classify(&few, 3), Tier::Base);
    }

    #[test]
    fn tier_maps_to_edition_keys() {
        assert_eq!(Tier::Base.edition().key(), "REGULAR");
        assert_eq!(Tier::Medium.edition().key(), "POLYCHROME");
        assert_eq!(Tier::Highest.edition().key(), "NEGATIVE");
    }
}
