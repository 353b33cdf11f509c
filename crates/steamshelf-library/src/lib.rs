//! Owned-games library for steamshelf
//!
//! Holds the game record model, the gateway abstraction over the remote data
//! sources, filter evaluation, sorting, and the enrichment pipeline that ties
//! them together.

mod enrich;
mod filter;
mod game;
mod gateway;
mod query;
mod sort;

pub use enrich::{DEFAULT_REQUEST_DELAY, EnrichSpec, Enricher, Progress};
pub use filter::{
    FilterError, FilterSpec, PlaytimeFilter, matches, parse_compat_filter, parse_review_bound,
    parse_review_filter,
};
pub use game::{DeckCompat, Enrichment, GameRecord, GenreTags, ReviewCategory, ReviewSummary};
pub use gateway::StoreGateway;
pub use query::{DisplayOptions, LibraryQuery, QueryPlan};
pub use sort::{SortKey, sort_games};

/// Library-wide statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub total: usize,
    pub played: usize,
    /// Total playtime in minutes
    pub playtime: u64,
}

impl LibraryStats {
    pub fn from_games(games: &[GameRecord]) -> Self {
        Self {
            total: games.len(),
            played: games.iter().filter(|g| g.playtime > 0).count(),
            playtime: games.iter().map(|g| u64::from(g.playtime)).sum(),
        }
    }

    pub fn unplayed(&self) -> usize {
        self.total - self.played
    }

    /// Share of played games, rounded to a whole percent
    pub fn played_percent(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.played as f64 / self.total as f64) * 100.0).round() as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_stats() {
        let games = vec![
            GameRecord::new(1, "A", 0),
            GameRecord::new(2, "B", 90),
            GameRecord::new(3, "C", 30),
        ];
        let stats = LibraryStats::from_games(&games);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.played, 2);
        assert_eq!(stats.unplayed(), 1);
        assert_eq!(stats.playtime, 120);
        assert_eq!(stats.played_percent(), 67);
    }

    #[test]
    fn test_empty_stats() {
        let stats = LibraryStats::from_games(&[]);
        assert_eq!(stats.played_percent(), 0);
    }
}
