//! Synthetic idea evaluation.
//!
//! There is no real model behind the "AI rating": the score is drawn uniformly
//! from `[MIN_RATING, MAX_RATING]` and the feedback from a fixed pool. The idea
//! text is never inspected.

use crate::models::NewIdea;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Lowest rating an idea can receive.
pub const MIN_RATING: u8 = 60;
/// Highest rating an idea can receive.
pub const MAX_RATING: u8 = 100;

/// Canned feedback sentences: ten enthusiastic, five mildly constructive.
pub const FEEDBACK_POOL: [&str; 15] = [
    "Revolutionary concept! This could disrupt the entire industry.",
    "Solid execution potential with strong market validation.",
    "Innovative approach to a common problem. Great thinking!",
    "Strong value proposition with clear monetization path.",
    "Creative solution with significant scalability potential.",
    "Well-thought-out concept with excellent market timing.",
    "Impressive innovation with strong competitive advantages.",
    "Outstanding vision with clear execution roadmap.",
    "Brilliant idea with massive market opportunity.",
    "Exceptional concept with strong investor appeal.",
    "Interesting angle, but needs more market research.",
    "Good foundation, consider expanding the target market.",
    "Nice concept, could benefit from clearer differentiation.",
    "Promising start, focus on unique value proposition.",
    "Creative idea, validate with potential customers first.",
];

/// A rating and feedback pair assigned to a new idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Score in `[MIN_RATING, MAX_RATING]`
    pub rating: u8,
    /// One entry of [`FEEDBACK_POOL`]
    pub feedback: &'static str,
}

/// Produces evaluations from an owned randomness source.
#[derive(Debug, Clone)]
pub struct Evaluator<R = StdRng> {
    rng: R,
}

impl Evaluator<StdRng> {
    /// Evaluator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Evaluator with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Evaluator<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a fresh evaluation. `_idea` is accepted for call-site clarity only.
    pub fn evaluate(&mut self, _idea: &NewIdea) -> Evaluation {
        let rating = self.rng.gen_range(MIN_RATING..=MAX_RATING);
        let feedback = FEEDBACK_POOL[self.rng.gen_range(0..FEEDBACK_POOL.len())];
        Evaluation { rating, feedback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample() -> NewIdea {
        NewIdea::new("Foo", "Bar", "Baz")
    }

    #[test]
    fn test_ratings_stay_in_range_and_cover_both_ends() {
        let mut evaluator = Evaluator::seeded(42);
        let ratings: HashSet<u8> = (0..5_000).map(|_| evaluator.evaluate(&sample()).rating).collect();

        assert!(ratings.iter().all(|r| (MIN_RATING..=MAX_RATING).contains(r)));
        assert!(ratings.contains(&MIN_RATING));
        assert!(ratings.contains(&MAX_RATING));
    }

    #[test]
    fn test_feedback_comes_from_pool_and_covers_it() {
        let mut evaluator = Evaluator::seeded(7);
        let seen: HashSet<&str> = (0..2_000).map(|_| evaluator.evaluate(&sample()).feedback).collect();

        assert!(seen.iter().all(|f| FEEDBACK_POOL.contains(f)));
        assert_eq!(seen.len(), FEEDBACK_POOL.len());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Evaluator::seeded(99);
        let mut b = Evaluator::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.evaluate(&sample()), b.evaluate(&sample()));
        }
    }

    #[test]
    fn test_content_does_not_matter() {
        let mut a = Evaluator::seeded(3);
        let mut b = Evaluator::seeded(3);
        let other = NewIdea::new("Completely", "Different", "Text");
        assert_eq!(a.evaluate(&sample()), b.evaluate(&other));
    }

    #[test]
    fn test_pool_has_no_duplicates() {
        let unique: HashSet<&str> = FEEDBACK_POOL.iter().copied().collect();
        assert_eq!(unique.len(), FEEDBACK_POOL.len());
    }
}
