//! Filter evaluation and filter argument parsing

use crate::{DeckCompat, GameRecord, ReviewCategory};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error(
        "Invalid review filter: {0}. Use category name (e.g., \"very-positive\", \"mixed\") or score 1-9."
    )]
    InvalidReviewFilter(String),

    #[error(
        "Invalid deck compat filter: {0}. Use: verified, playable, unsupported, unknown, ok (playable+verified), any"
    )]
    InvalidCompatFilter(String),

    #[error("Review score out of range: {0} (expected 1-9)")]
    ScoreOutOfRange(i64),

    #[error("Invalid sort key: {0}. Use: name, playtime, deck, reviews, compat")]
    InvalidSortKey(String),
}

/// Metadata constraints on enriched records. All present clauses must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub review_scores: Option<BTreeSet<ReviewCategory>>,
    pub min_review_score: Option<u8>,
    pub max_review_score: Option<u8>,
    pub deck_compat: Option<BTreeSet<DeckCompat>>,
    /// Case-insensitive substrings; any one matching any genre passes
    pub genres: Option<Vec<String>>,
    /// Case-insensitive substrings; any one matching any tag passes
    pub tags: Option<Vec<String>>,
}

impl FilterSpec {
    /// True when no clause is set
    pub fn is_empty(&self) -> bool {
        self.review_scores.is_none()
            && self.min_review_score.is_none()
            && self.max_review_score.is_none()
            && self.deck_compat.is_none()
            && self.genres.is_none()
            && self.tags.is_none()
    }

    pub fn has_review_clause(&self) -> bool {
        self.review_scores.is_some()
            || self.min_review_score.is_some()
            || self.max_review_score.is_some()
    }

    pub fn has_genre_tag_clause(&self) -> bool {
        self.genres.is_some() || self.tags.is_some()
    }

    /// Evaluate every present clause against `game`
    pub fn matches(&self, game: &GameRecord) -> bool {
        let score = game.review_score();

        if let Some(allowed) = &self.review_scores
            && !score.is_some_and(|s| allowed.contains(&s))
        {
            return false;
        }

        if let Some(min) = self.min_review_score
            && !score.is_some_and(|s| s.score() >= min)
        {
            return false;
        }

        if let Some(max) = self.max_review_score
            && !score.is_some_and(|s| s.score() <= max)
        {
            return false;
        }

        if let Some(allowed) = &self.deck_compat
            && !game.deck_compat.is_some_and(|c| allowed.contains(&c))
        {
            return false;
        }

        if let Some(terms) = &self.genres {
            let genres = game.genre_tags.as_ref().map(|gt| gt.genres.as_slice());
            if !any_term_matches(terms, genres) {
                return false;
            }
        }

        if let Some(terms) = &self.tags {
            let tags = game.genre_tags.as_ref().map(|gt| gt.tags.as_slice());
            if !any_term_matches(terms, tags) {
                return false;
            }
        }

        true
    }
}

/// Free-function form of [`FilterSpec::matches`]
pub fn matches(game: &GameRecord, filter: &FilterSpec) -> bool {
    filter.matches(game)
}

fn any_term_matches(terms: &[String], values: Option<&[String]>) -> bool {
    let Some(values) = values else {
        return false;
    };

    let values: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
    terms.iter().any(|term| {
        let term = term.to_lowercase();
        values.iter().any(|v| v.contains(&term))
    })
}

/// Filters on the base listing that need no network access
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaytimeFilter {
    /// Only games never played
    pub unplayed: bool,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
    /// Only games with Steam Deck playtime
    pub deck_only: bool,
}

impl PlaytimeFilter {
    pub fn matches(&self, game: &GameRecord) -> bool {
        let minutes = f64::from(game.playtime);

        if self.unplayed && game.playtime != 0 {
            return false;
        }
        if let Some(min) = self.min_hours
            && minutes < min * 60.0
        {
            return false;
        }
        if let Some(max) = self.max_hours
            && minutes > max * 60.0
        {
            return false;
        }
        if self.deck_only && game.deck_minutes() == 0 {
            return false;
        }

        true
    }

    pub fn apply(&self, games: Vec<GameRecord>) -> Vec<GameRecord> {
        games.into_iter().filter(|g| self.matches(g)).collect()
    }
}

/// Parse a review filter argument into the set of accepted categories.
///
/// Accepts a category slug (`very-positive`, `Very Positive`), one of the
/// group names (`positive+`, `positive-any`, `negative-any`) or a bare score.
pub fn parse_review_filter(value: &str) -> Result<BTreeSet<ReviewCategory>, FilterError> {
    let normalized = value
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    if let Some(category) = ReviewCategory::ALL
        .into_iter()
        .find(|c| c.slug() == normalized)
    {
        return Ok(BTreeSet::from([category]));
    }

    let group: &[u8] = match normalized.as_str() {
        "positive+" | "positive-or-better" => &[7, 8, 9],
        "positive-any" | "any-positive" => &[6, 7, 8, 9],
        "negative-any" | "any-negative" => &[1, 2, 3, 4],
        _ => &[],
    };
    if !group.is_empty() {
        return Ok(group
            .iter()
            .filter_map(|&s| ReviewCategory::from_score(s))
            .collect());
    }

    normalized
        .parse::<u8>()
        .ok()
        .and_then(ReviewCategory::from_score)
        .map(|c| BTreeSet::from([c]))
        .ok_or_else(|| FilterError::InvalidReviewFilter(value.to_string()))
}

/// Parse a deck compatibility filter argument into the set of accepted tiers
pub fn parse_compat_filter(value: &str) -> Result<BTreeSet<DeckCompat>, FilterError> {
    let normalized = value.trim().to_lowercase();

    let tiers: &[DeckCompat] = match normalized.as_str() {
        "verified" => &[DeckCompat::Verified],
        "playable" => &[DeckCompat::Playable],
        "unsupported" => &[DeckCompat::Unsupported],
        "unknown" => &[DeckCompat::Unknown],
        "ok" => &[DeckCompat::Playable, DeckCompat::Verified],
        "any" => &[
            DeckCompat::Unsupported,
            DeckCompat::Playable,
            DeckCompat::Verified,
        ],
        _ => {
            return normalized
                .parse::<u8>()
                .ok()
                .and_then(DeckCompat::from_tier)
                .map(|c| BTreeSet::from([c]))
                .ok_or_else(|| FilterError::InvalidCompatFilter(value.to_string()));
        }
    };

    Ok(tiers.iter().copied().collect())
}

/// Validate a `--min-reviews` / `--max-reviews` bound
pub fn parse_review_bound(value: i64) -> Result<u8, FilterError> {
    u8::try_from(value)
        .ok()
        .filter(|s| (1..=9).contains(s))
        .ok_or(FilterError::ScoreOutOfRange(value))
}
