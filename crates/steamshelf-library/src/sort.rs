//! Ordering of game records

use crate::{FilterError, GameRecord};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order for library output.
///
/// `Name` is ascending; every numeric key is descending with missing values
/// ranked lowest. Ties always fall back to name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Playtime,
    DeckPlaytime,
    ReviewScore,
    DeckCompat,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Playtime => "playtime",
            SortKey::DeckPlaytime => "deck",
            SortKey::ReviewScore => "reviews",
            SortKey::DeckCompat => "compat",
        }
    }

    /// Compare two records under this key
    pub fn compare(&self, a: &GameRecord, b: &GameRecord) -> Ordering {
        let primary = match self {
            SortKey::Name => Ordering::Equal,
            SortKey::Playtime => b.playtime.cmp(&a.playtime),
            SortKey::DeckPlaytime => b.deck_minutes().cmp(&a.deck_minutes()),
            SortKey::ReviewScore => review_rank(b).cmp(&review_rank(a)),
            SortKey::DeckCompat => compat_rank(b).cmp(&compat_rank(a)),
        };
        primary.then_with(|| compare_names(a, b))
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "playtime" => Ok(SortKey::Playtime),
            "deck" | "deck-playtime" => Ok(SortKey::DeckPlaytime),
            "reviews" | "review-score" => Ok(SortKey::ReviewScore),
            "compat" | "deck-compat" => Ok(SortKey::DeckCompat),
            _ => Err(FilterError::InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unscored or unfetched reviews rank below the worst score
fn review_rank(game: &GameRecord) -> u8 {
    game.review_score().map_or(0, |s| s.score())
}

// Unfetched compatibility ranks below `Unknown`
fn compat_rank(game: &GameRecord) -> i8 {
    game.deck_compat.map_or(-1, |c| c.tier() as i8)
}

fn compare_names(a: &GameRecord, b: &GameRecord) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Return a sorted copy of `games`. The sort is stable.
pub fn sort_games(games: &[GameRecord], key: SortKey) -> Vec<GameRecord> {
    let mut sorted = games.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}
