//! Owned-game records and the metadata groups merged into them

use std::fmt;

/// A game from the user's owned-games listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameRecord {
    pub app_id: u32,
    pub name: String,
    /// Total playtime in minutes
    pub playtime: u32,
    /// Playtime over the last two weeks in minutes
    pub playtime_recent: Option<u32>,
    /// Playtime on Steam Deck in minutes
    pub playtime_deck: Option<u32>,
    pub icon_url: Option<String>,
    pub logo_url: Option<String>,

    pub reviews: Option<ReviewSummary>,
    pub deck_compat: Option<DeckCompat>,
    pub genre_tags: Option<GenreTags>,
}

impl GameRecord {
    /// Create a record with only the base listing fields set
    pub fn new(app_id: u32, name: impl Into<String>, playtime: u32) -> Self {
        Self {
            app_id,
            name: name.into(),
            playtime,
            ..Default::default()
        }
    }

    pub fn with_deck_playtime(mut self, minutes: u32) -> Self {
        self.playtime_deck = Some(minutes);
        self
    }

    /// Ordinal review score, if reviews were fetched and the game has a score
    pub fn review_score(&self) -> Option<ReviewCategory> {
        self.reviews.as_ref().and_then(|r| r.score)
    }

    pub fn deck_minutes(&self) -> u32 {
        self.playtime_deck.unwrap_or(0)
    }

    /// Merge fetched metadata. Groups that came back empty are left untouched.
    pub fn merge(&mut self, fetched: Enrichment) {
        let Enrichment {
            reviews,
            deck_compat,
            genre_tags,
        } = fetched;

        if let Some(reviews) = reviews {
            self.reviews = Some(reviews);
        }
        if let Some(compat) = deck_compat {
            self.deck_compat = Some(compat);
        }
        if let Some(genre_tags) = genre_tags {
            self.genre_tags = Some(genre_tags);
        }
    }
}

/// Metadata fetched for one game in one enrichment step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub reviews: Option<ReviewSummary>,
    pub deck_compat: Option<DeckCompat>,
    pub genre_tags: Option<GenreTags>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_none() && self.deck_compat.is_none() && self.genre_tags.is_none()
    }
}

/// Store review aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    /// `None` when the store has too few reviews to score the game
    pub score: Option<ReviewCategory>,
    /// Store-provided description, e.g. "Very Positive" or "No Reviews"
    pub label: String,
    pub positive: u32,
    pub negative: u32,
}

/// Store review category, ordered from worst (1) to best (9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReviewCategory {
    OverwhelminglyNegative = 1,
    VeryNegative = 2,
    Negative = 3,
    MostlyNegative = 4,
    Mixed = 5,
    MostlyPositive = 6,
    Positive = 7,
    VeryPositive = 8,
    OverwhelminglyPositive = 9,
}

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 9] = [
        ReviewCategory::OverwhelminglyNegative,
        ReviewCategory::VeryNegative,
        ReviewCategory::Negative,
        ReviewCategory::MostlyNegative,
        ReviewCategory::Mixed,
        ReviewCategory::MostlyPositive,
        ReviewCategory::Positive,
        ReviewCategory::VeryPositive,
        ReviewCategory::OverwhelminglyPositive,
    ];

    /// Map a store score (1-9) to its category
    pub fn from_score(score: u8) -> Option<Self> {
        Self::ALL.get(usize::from(score).checked_sub(1)?).copied()
    }

    pub fn score(self) -> u8 {
        self as u8
    }

    /// Filter token for this category
    pub fn slug(self) -> &'static str {
        match self {
            ReviewCategory::OverwhelminglyNegative => "overwhelmingly-negative",
            ReviewCategory::VeryNegative => "very-negative",
            ReviewCategory::Negative => "negative",
            ReviewCategory::MostlyNegative => "mostly-negative",
            ReviewCategory::Mixed => "mixed",
            ReviewCategory::MostlyPositive => "mostly-positive",
            ReviewCategory::Positive => "positive",
            ReviewCategory::VeryPositive => "very-positive",
            ReviewCategory::OverwhelminglyPositive => "overwhelmingly-positive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewCategory::OverwhelminglyNegative => "Overwhelmingly Negative",
            ReviewCategory::VeryNegative => "Very Negative",
            ReviewCategory::Negative => "Negative",
            ReviewCategory::MostlyNegative => "Mostly Negative",
            ReviewCategory::Mixed => "Mixed",
            ReviewCategory::MostlyPositive => "Mostly Positive",
            ReviewCategory::Positive => "Positive",
            ReviewCategory::VeryPositive => "Very Positive",
            ReviewCategory::OverwhelminglyPositive => "Overwhelmingly Positive",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Steam Deck compatibility tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeckCompat {
    Unknown = 0,
    Unsupported = 1,
    Playable = 2,
    Verified = 3,
}

impl DeckCompat {
    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            0 => Some(DeckCompat::Unknown),
            1 => Some(DeckCompat::Unsupported),
            2 => Some(DeckCompat::Playable),
            3 => Some(DeckCompat::Verified),
            _ => None,
        }
    }

    pub fn tier(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            DeckCompat::Unknown => "Unknown",
            DeckCompat::Unsupported => "Unsupported",
            DeckCompat::Playable => "Playable",
            DeckCompat::Verified => "Verified",
        }
    }
}

impl fmt::Display for DeckCompat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Genre and user-tag classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreTags {
    pub genres: Vec<String>,
    /// Ordered by vote count, most voted first
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unfetched_groups() {
        let mut game = GameRecord::new(10, "Counter-Strike", 300);
        game.merge(Enrichment {
            deck_compat: Some(DeckCompat::Verified),
            ..Default::default()
        });

        assert_eq!(game.deck_compat, Some(DeckCompat::Verified));
        assert!(game.reviews.is_none());
        assert!(game.genre_tags.is_none());
    }

    #[test]
    fn test_empty_merge_is_noop() {
        let mut game = GameRecord::new(10, "Counter-Strike", 300);
        let before = game.clone();
        let nothing = Enrichment::default();
        assert!(nothing.is_empty());

        game.merge(nothing);
        assert_eq!(game, before);
    }

    #[test]
    fn test_review_category_from_score() {
        assert_eq!(ReviewCategory::from_score(0), None);
        assert_eq!(
            ReviewCategory::from_score(1),
            Some(ReviewCategory::OverwhelminglyNegative)
        );
        assert_eq!(
            ReviewCategory::from_score(8),
            Some(ReviewCategory::VeryPositive)
        );
        assert_eq!(ReviewCategory::from_score(10), None);

        for category in ReviewCategory::ALL {
            assert_eq!(ReviewCategory::from_score(category.score()), Some(category));
        }
    }

    #[test]
    fn test_review_score_requires_score() {
        let mut game = GameRecord::new(1, "Quiet Game", 0);
        game.reviews = Some(ReviewSummary {
            score: None,
            label: "No Reviews".into(),
            positive: 0,
            negative: 0,
        });
        assert_eq!(game.review_score(), None);
    }

    #[test]
    fn test_deck_compat_ordering() {
        assert!(DeckCompat::Verified > DeckCompat::Playable);
        assert!(DeckCompat::Unsupported > DeckCompat::Unknown);
        assert_eq!(DeckCompat::from_tier(4), None);
        assert_eq!(DeckCompat::from_tier(2).map(DeckCompat::label), Some("Playable"));
    }
}
