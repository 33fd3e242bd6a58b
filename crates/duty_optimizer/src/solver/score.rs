use std::{
    cmp::Ordering,
    iter,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use fxhash::FxHashMap;
use serde::Serialize;

use super::score_level::ScoreLevel;

/// Weighted penalty split into its hard and soft totals.
///
/// Scores are compared on their scalar [`Score::total`], the hard part breaking ties.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Score {
    pub hard_score: i64,
    pub soft_score: i64,
}

impl Score {
    pub const ZERO: Score = Score {
        hard_score: 0,
        soft_score: 0,
    };

    pub fn new(hard_score: i64, soft_score: i64) -> Self {
        Score {
            hard_score,
            soft_score,
        }
    }

    pub fn of(level: ScoreLevel, score: i64) -> Self {
        match level {
            ScoreLevel::Hard => Score::hard(score),
            ScoreLevel::Soft => Score::soft(score),
        }
    }

    pub fn hard(hard_score: i64) -> Self {
        Score {
            hard_score,
            soft_score: 0,
        }
    }

    pub fn soft(soft_score: i64) -> Self {
        Score {
            hard_score: 0,
            soft_score,
        }
    }

    pub fn zero() -> Self {
        Score::ZERO
    }

    /// Scalar objective, `hard + soft`.
    #[inline]
    pub fn total(&self) -> i64 {
        self.hard_score + self.soft_score
    }

    pub fn is_failure(&self) -> bool {
        self.hard_score > 0
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total()
            .cmp(&other.total())
            .then_with(|| self.hard_score.cmp(&other.hard_score))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, score| acc + score)
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score + other.hard_score,
            soft_score: self.soft_score + other.soft_score,
        }
    }
}

impl AddAssign<Score> for Score {
    fn add_assign(&mut self, other: Score) {
        self.hard_score += other.hard_score;
        self.soft_score += other.soft_score;
    }
}

impl Sub<Score> for Score {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score - other.hard_score,
            soft_score: self.soft_score - other.soft_score,
        }
    }
}

impl SubAssign<Score> for Score {
    fn sub_assign(&mut self, other: Score) {
        self.hard_score -= other.hard_score;
        self.soft_score -= other.soft_score;
    }
}

impl Neg for Score {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Score {
            hard_score: -self.hard_score,
            soft_score: -self.soft_score,
        }
    }
}

/// Weighted score per penalty term, summed over all employees.
#[derive(Default, Clone, Debug, Serialize)]
pub struct ScoreAnalysis {
    pub scores: FxHashMap<&'static str, Score>,
}

impl ScoreAnalysis {
    pub fn add(&mut self, name: &'static str, score: Score) {
        *self.scores.entry(name).or_default() += score;
    }

    pub fn total_score(&self) -> Score {
        self.scores.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_addition() {
        let result = Score::hard(10) + Score::soft(5);
        assert_eq!(result.hard_score, 10);
        assert_eq!(result.soft_score, 5);
        assert_eq!(result.total(), 15);
    }

    #[test]
    fn test_score_subtraction() {
        let result = Score::hard(10) - Score::soft(5);
        assert_eq!(result.hard_score, 10);
        assert_eq!(result.soft_score, -5);
        assert_eq!(-result, Score::new(-10, 5));
    }

    #[test]
    fn test_score_sum() {
        let total: Score = vec![Score::hard(10), Score::soft(5), Score::hard(-3)]
            .into_iter()
            .sum();
        assert_eq!(total, Score::new(7, 5));
    }

    #[test]
    fn test_score_cmp_uses_total() {
        assert!(Score::new(1000, 0) > Score::soft(999));
        assert!(Score::new(0, 1200) > Score::hard(1000));
        assert!(Score::new(1000, 200) > Score::new(200, 1000));
        assert_eq!(
            Score::new(20, 10).cmp(&Score::new(25, 100)),
            Ordering::Less
        );
        assert!(Score::hard(1).is_failure());
        assert!(!Score::soft(1).is_failure());
    }

    #[test]
    fn test_score_analysis_accumulates_per_name() {
        let mut analysis = ScoreAnalysis::default();
        analysis.add("ride_time", Score::soft(12));
        analysis.add("ride_time", Score::soft(8));
        analysis.add("max_span", Score::hard(1000));

        assert_eq!(analysis.scores["ride_time"], Score::soft(20));
        assert_eq!(analysis.total_score(), Score::new(1000, 20));
    }
}
