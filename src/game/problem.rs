//! Problem generation and the difficulty table
//!
//! A problem is an immutable (operandA, operandB, operator) triple, replaced
//! wholesale every round. Generation draws from an injected RNG so tests and
//! replays are deterministic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL, MIN_GAP};

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    /// Display symbol for the problem line
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
        }
    }
}

/// A single arithmetic problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub a: i32,
    pub b: i32,
    pub op: Op,
}

impl Problem {
    /// The expected answer
    pub fn expected(&self) -> i32 {
        match self.op {
            Op::Add => self.a + self.b,
            Op::Sub => self.a - self.b,
        }
    }
}

/// Operand bounds for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub min: i32,
    pub max: i32,
}

/// Difficulty table, levels 1-4. Out-of-range levels clamp.
pub fn tier_for_level(level: u8) -> Tier {
    match level.clamp(1, MAX_LEVEL) {
        1 => Tier { min: 1, max: 20 },
        2 => Tier { min: 10, max: 30 },
        3 => Tier { min: 20, max: 50 },
        _ => Tier { min: 30, max: 100 },
    }
}

/// Generate a problem for the given level.
///
/// Addition keeps `a + b <= tier.max` by drawing `a` with at least `min` of
/// headroom left. Subtraction keeps `a - b >= MIN_GAP`. Collapsed ranges
/// (single possible value) are fine and just produce that value.
pub fn generate_problem(level: u8, rng: &mut impl Rng) -> Problem {
    let tier = tier_for_level(level);
    let op = if rng.random_bool(0.5) { Op::Add } else { Op::Sub };

    match op {
        Op::Add => {
            let a = rng.random_range(tier.min..=tier.max - tier.min);
            let b = rng.random_range(tier.min..=tier.max - a);
            Problem { a, b, op }
        }
        Op::Sub => {
            let a = rng.random_range(tier.min + MIN_GAP..=tier.max);
            let b = rng.random_range(tier.min..=a - MIN_GAP);
            Problem { a, b, op }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tier_clamps() {
        assert_eq!(tier_for_level(0), tier_for_level(1));
        assert_eq!(tier_for_level(1), Tier { min: 1, max: 20 });
        assert_eq!(tier_for_level(4), Tier { min: 30, max: 100 });
        assert_eq!(tier_for_level(9), tier_for_level(4));
    }

    #[test]
    fn test_expected_answer() {
        let p = Problem { a: 7, b: 3, op: Op::Sub };
        assert_eq!(p.expected(), 4);
        let p = Problem { a: 10, b: 15, op: Op::Add };
        assert_eq!(p.expected(), 25);
    }

    #[test]
    fn test_operands_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        for level in 1..=4u8 {
            let tier = tier_for_level(level);
            for _ in 0..500 {
                let p = generate_problem(level, &mut rng);
                assert!(p.a >= tier.min && p.a <= tier.max, "{p:?} at level {level}");
                assert!(p.b >= tier.min, "{p:?} at level {level}");
                match p.op {
                    Op::Add => assert!(p.a + p.b <= tier.max, "{p:?} at level {level}"),
                    Op::Sub => assert!(p.a - p.b >= MIN_GAP, "{p:?} at level {level}"),
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_addition_stays_under_tier_max(seed in any::<u64>(), level in 0u8..=8) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let tier = tier_for_level(level);
            let p = generate_problem(level, &mut rng);
            if p.op == Op::Add {
                prop_assert!(p.a + p.b <= tier.max);
                prop_assert!(p.a >= tier.min && p.b >= tier.min);
            }
        }

        #[test]
        fn prop_subtraction_keeps_min_gap(seed in any::<u64>(), level in 0u8..=8) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let tier = tier_for_level(level);
            let p = generate_problem(level, &mut rng);
            if p.op == Op::Sub {
                prop_assert!(p.a - p.b >= MIN_GAP);
                prop_assert!(p.a <= tier.max && p.b >= tier.min);
            }
        }
    }
}
