//! Derived views over the idea list: sorted listings, leaderboards and totals.
//!
//! All functions are pure and borrow the store's idea slice, so any front end
//! can recompute them after each store event.

use crate::models::Idea;
use std::cmp::Reverse;

/// Number of entries shown per leaderboard unless configured otherwise.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

/// Ordering for the idea listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently submitted first
    #[default]
    Newest,
    /// Highest rating first
    Rating,
    /// Most votes first
    Votes,
}

/// Which metric a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardKind {
    #[default]
    Votes,
    Rating,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedIdea<'a> {
    /// 1-based position
    pub rank: usize,
    pub idea: &'a Idea,
}

/// Totals shown under the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdeaStats {
    pub total_ideas: usize,
    pub total_votes: u64,
    /// Mean rating rounded to the nearest integer; `None` with no ideas
    pub average_rating: Option<u8>,
}

/// Returns the ideas in the requested order. Ties keep their stored order.
#[must_use]
pub fn sorted_ideas(ideas: &[Idea], order: SortOrder) -> Vec<&Idea> {
    let mut sorted: Vec<&Idea> = ideas.iter().collect();
    match order {
        SortOrder::Newest => sorted.sort_by_key(|idea| Reverse(idea.created_at)),
        SortOrder::Rating => sorted.sort_by_key(|idea| Reverse(idea.rating)),
        SortOrder::Votes => sorted.sort_by_key(|idea| Reverse(idea.votes)),
    }
    sorted
}

/// Top `limit` ideas by votes or rating.
#[must_use]
pub fn leaderboard(ideas: &[Idea], kind: LeaderboardKind, limit: usize) -> Vec<RankedIdea<'_>> {
    let order = match kind {
        LeaderboardKind::Votes => SortOrder::Votes,
        LeaderboardKind::Rating => SortOrder::Rating,
    };
    sorted_ideas(ideas, order)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, idea)| RankedIdea { rank: i + 1, idea })
        .collect()
}

/// Aggregate counts over all ideas.
#[must_use]
pub fn stats(ideas: &[Idea]) -> IdeaStats {
    let total_votes = ideas.iter().map(|idea| u64::from(idea.votes)).sum();
    let average_rating = if ideas.is_empty() {
        None
    } else {
        let sum: u64 = ideas.iter().map(|idea| u64::from(idea.rating)).sum();
        let count = ideas.len() as u64;
        // Round half up, ratings are never negative
        u8::try_from((sum * 2 + count) / (count * 2)).ok()
    };

    IdeaStats {
        total_ideas: ideas.len(),
        total_votes,
        average_rating,
    }
}

/// Human-readable band for a rating.
#[must_use]
pub const fn rating_label(rating: u8) -> &'static str {
    match rating {
        90..=u8::MAX => "Excellent",
        80..=89 => "Very Good",
        70..=79 => "Good",
        _ => "Needs Work",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::idea_fixture;

    fn ids<'a>(ideas: impl IntoIterator<Item = &'a Idea>) -> Vec<&'a str> {
        ideas.into_iter().map(|idea| idea.id.as_str()).collect()
    }

    fn fixtures() -> Vec<Idea> {
        // Stored newest first
        vec![
            idea_fixture("4", 75, 2, 400),
            idea_fixture("3", 92, 0, 300),
            idea_fixture("2", 61, 7, 200),
            idea_fixture("1", 88, 2, 100),
        ]
    }

    #[test]
    fn test_sorted_ideas_by_each_order() {
        let ideas = fixtures();
        assert_eq!(ids(sorted_ideas(&ideas, SortOrder::Newest)), ["4", "3", "2", "1"]);
        assert_eq!(ids(sorted_ideas(&ideas, SortOrder::Rating)), ["3", "1", "4", "2"]);
        // "4" and "1" tie on votes and keep stored order
        assert_eq!(ids(sorted_ideas(&ideas, SortOrder::Votes)), ["2", "4", "1", "3"]);
    }

    #[test]
    fn test_newest_uses_timestamp_not_position() {
        let ideas = vec![idea_fixture("old", 70, 0, 10), idea_fixture("new", 70, 0, 20)];
        assert_eq!(ids(sorted_ideas(&ideas, SortOrder::Newest)), ["new", "old"]);
    }

    #[test]
    fn test_leaderboard_ranks_and_limits() {
        let ideas = fixtures();
        let board = leaderboard(&ideas, LeaderboardKind::Rating, 2);

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].idea.id.as_str(), "3");
        assert_eq!(board[1].rank, 2);
        assert_eq!(board[1].idea.id.as_str(), "1");

        let board = leaderboard(&ideas, LeaderboardKind::Votes, DEFAULT_LEADERBOARD_SIZE);
        assert_eq!(board.len(), 4);
        assert_eq!(board[0].idea.id.as_str(), "2");
    }

    #[test]
    fn test_stats() {
        let s = stats(&fixtures());
        assert_eq!(s.total_ideas, 4);
        assert_eq!(s.total_votes, 11);
        // (75 + 92 + 61 + 88) / 4 = 79
        assert_eq!(s.average_rating, Some(79));

        let ideas = vec![idea_fixture("a", 60, 0, 1), idea_fixture("b", 61, 0, 2)];
        // 60.5 rounds up
        assert_eq!(stats(&ideas).average_rating, Some(61));
    }

    #[test]
    fn test_stats_empty() {
        let s = stats(&[]);
        assert_eq!(s.total_ideas, 0);
        assert_eq!(s.total_votes, 0);
        assert_eq!(s.average_rating, None);
    }

    #[test]
    fn test_rating_label_bands() {
        assert_eq!(rating_label(100), "Excellent");
        assert_eq!(rating_label(90), "Excellent");
        assert_eq!(rating_label(89), "Very Good");
        assert_eq!(rating_label(80), "Very Good");
        assert_eq!(rating_label(79), "Good");
        assert_eq!(rating_label(70), "Good");
        assert_eq!(rating_label(69), "Needs Work");
        assert_eq!(rating_label(60), "Needs Work");
    }
}
