//! Integration tests for the enrich-filter pipeline against a recording gateway

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use steamshelf_library::{
    DeckCompat, DisplayOptions, EnrichSpec, Enricher, FilterSpec, GameRecord, GenreTags,
    LibraryQuery, Progress, ReviewCategory, ReviewSummary, SortKey, StoreGateway,
    parse_compat_filter, parse_review_filter,
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Reviews,
    DeckCompat,
    GenreTags,
}

/// Gateway serving canned metadata and recording every lookup
#[derive(Default)]
struct MockGateway {
    reviews: HashMap<u32, ReviewSummary>,
    compat: HashMap<u32, DeckCompat>,
    genre_tags: HashMap<u32, GenreTags>,
    calls: Mutex<Vec<(Lookup, u32)>>,
    cancel_on: Option<(u32, CancellationToken)>,
}

impl MockGateway {
    fn with_compat(mut self, app_id: u32, compat: DeckCompat) -> Self {
        self.compat.insert(app_id, compat);
        self
    }

    fn with_score(mut self, app_id: u32, score: u8) -> Self {
        let category = ReviewCategory::from_score(score);
        self.reviews.insert(
            app_id,
            ReviewSummary {
                score: category,
                label: category.map_or("No Reviews", |c| c.label()).to_string(),
                positive: 100,
                negative: 10,
            },
        );
        self
    }

    fn with_tags(mut self, app_id: u32, genres: &[&str], tags: &[&str]) -> Self {
        self.genre_tags.insert(
            app_id,
            GenreTags {
                genres: genres.iter().map(|s| s.to_string()).collect(),
                tags: tags.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    fn cancel_when_fetching(mut self, app_id: u32, token: CancellationToken) -> Self {
        self.cancel_on = Some((app_id, token));
        self
    }

    fn record(&self, lookup: Lookup, app_id: u32) {
        self.calls.lock().unwrap().push((lookup, app_id));
        if let Some((trigger, token)) = &self.cancel_on
            && *trigger == app_id
        {
            token.cancel();
        }
    }

    fn calls(&self) -> Vec<(Lookup, u32)> {
        self.calls.lock().unwrap().clone()
    }

    fn fetched_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.calls().into_iter().map(|(_, id)| id).collect();
        ids.dedup();
        ids
    }
}

impl StoreGateway for MockGateway {
    type Error = std::io::Error;

    async fn owned_games(&self, _steam_id: &str) -> Result<Vec<GameRecord>, Self::Error> {
        Ok(three_games())
    }

    async fn reviews(&self, app_id: u32) -> Option<ReviewSummary> {
        self.record(Lookup::Reviews, app_id);
        self.reviews.get(&app_id).cloned()
    }

    async fn deck_compat(&self, app_id: u32) -> Option<DeckCompat> {
        self.record(Lookup::DeckCompat, app_id);
        self.compat.get(&app_id).copied()
    }

    async fn genre_tags(&self, app_id: u32) -> Option<GenreTags> {
        self.record(Lookup::GenreTags, app_id);
        self.genre_tags.get(&app_id).cloned()
    }
}

fn three_games() -> Vec<GameRecord> {
    vec![
        GameRecord::new(1, "B", 120),
        GameRecord::new(2, "A", 0),
        GameRecord::new(3, "C", 600),
    ]
}

fn ids(games: &[GameRecord]) -> Vec<u32> {
    games.iter().map(|g| g.app_id).collect()
}

const COMPAT_ONLY: EnrichSpec = EnrichSpec {
    reviews: false,
    deck_compat: true,
    genre_tags: false,
};

const EVERYTHING: EnrichSpec = EnrichSpec {
    reviews: true,
    deck_compat: true,
    genre_tags: true,
};

fn enricher(gateway: &MockGateway) -> Enricher<'_, MockGateway> {
    Enricher::new(gateway).with_request_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_empty_filter_passes_everything_in_order() {
    let gateway = MockGateway::default()
        .with_compat(1, DeckCompat::Verified)
        .with_compat(3, DeckCompat::Playable);

    let result = enricher(&gateway)
        .run(three_games(), COMPAT_ONLY, &FilterSpec::default(), None, |_| {})
        .await;

    assert_eq!(ids(&result), vec![1, 2, 3]);
    assert_eq!(result[0].deck_compat, Some(DeckCompat::Verified));
    assert_eq!(result[1].deck_compat, None);
    assert_eq!(result[2].deck_compat, Some(DeckCompat::Playable));
    assert!(result.iter().all(|g| g.reviews.is_none()));
}

#[tokio::test]
async fn test_only_requested_lookups_are_issued() {
    let gateway = MockGateway::default();

    enricher(&gateway)
        .run(three_games(), COMPAT_ONLY, &FilterSpec::default(), None, |_| {})
        .await;

    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(lookup, _)| *lookup == Lookup::DeckCompat));
}

#[tokio::test]
async fn test_all_lookups_joined_per_game() {
    let gateway = MockGateway::default()
        .with_score(1, 9)
        .with_compat(1, DeckCompat::Verified)
        .with_tags(1, &["Action"], &["Shooter"]);

    let result = enricher(&gateway)
        .run(vec![GameRecord::new(1, "B", 0)], EVERYTHING, &FilterSpec::default(), None, |_| {})
        .await;

    assert_eq!(gateway.calls().len(), 3);
    let game = &result[0];
    assert_eq!(game.review_score(), Some(ReviewCategory::OverwhelminglyPositive));
    assert_eq!(game.deck_compat, Some(DeckCompat::Verified));
    assert_eq!(game.genre_tags.as_ref().unwrap().tags, vec!["Shooter".to_string()]);
}

#[tokio::test]
async fn test_verified_with_limit_one_stops_after_first_game() {
    let gateway = MockGateway::default()
        .with_compat(1, DeckCompat::Verified)
        .with_compat(2, DeckCompat::Unsupported)
        .with_compat(3, DeckCompat::Verified);
    let filter = FilterSpec {
        deck_compat: Some(parse_compat_filter("verified").unwrap()),
        ..Default::default()
    };

    let result = enricher(&gateway)
        .run(three_games(), COMPAT_ONLY, &filter, Some(1), |_| {})
        .await;

    assert_eq!(ids(&result), vec![1]);
    assert_eq!(result[0].deck_compat, Some(DeckCompat::Verified));
    assert_eq!(gateway.calls(), vec![(Lookup::DeckCompat, 1)]);
}

#[tokio::test]
async fn test_limit_caps_fetches_when_everything_matches() {
    let gateway = MockGateway::default();
    let games: Vec<GameRecord> = (1..=20)
        .map(|id| GameRecord::new(id, format!("Game {id:02}"), id * 10))
        .collect();
    let filter = FilterSpec {
        deck_compat: Some(parse_compat_filter("any").unwrap()),
        ..Default::default()
    };
    let gateway = (1..=20).fold(gateway, |g, id| g.with_compat(id, DeckCompat::Playable));

    let result = enricher(&gateway)
        .run(games, COMPAT_ONLY, &filter, Some(4), |_| {})
        .await;

    assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    assert_eq!(gateway.fetched_ids(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_limit_zero_fetches_nothing() {
    let gateway = MockGateway::default();
    let filter = FilterSpec {
        min_review_score: Some(1),
        ..Default::default()
    };

    let result = enricher(&gateway)
        .run(three_games(), EVERYTHING, &filter, Some(0), |_| {})
        .await;

    assert!(result.is_empty());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_missing_metadata_only_fails_its_clause() {
    // game 2 has no review data at all
    let gateway = MockGateway::default()
        .with_score(1, 8)
        .with_score(3, 8)
        .with_tags(1, &["Indie"], &[])
        .with_tags(2, &["Indie"], &[])
        .with_tags(3, &["Indie"], &[]);

    let genre_only = FilterSpec {
        genres: Some(vec!["indie".into()]),
        ..Default::default()
    };
    let spec = EnrichSpec {
        reviews: true,
        deck_compat: false,
        genre_tags: true,
    };
    let result = enricher(&gateway)
        .run(three_games(), spec, &genre_only, None, |_| {})
        .await;
    assert_eq!(ids(&result), vec![1, 2, 3]);
    assert!(result[1].reviews.is_none());

    let with_reviews = FilterSpec {
        review_scores: Some(parse_review_filter("very-positive").unwrap()),
        ..genre_only
    };
    let result = enricher(&gateway)
        .run(three_games(), spec, &with_reviews, None, |_| {})
        .await;
    assert_eq!(ids(&result), vec![1, 3]);
}

#[tokio::test]
async fn test_very_positive_excludes_positive() {
    let gateway = MockGateway::default()
        .with_score(1, 7)
        .with_score(2, 8)
        .with_score(3, 9);
    let filter = FilterSpec {
        review_scores: Some(parse_review_filter("very-positive").unwrap()),
        ..Default::default()
    };
    let spec = EnrichSpec {
        reviews: true,
        ..Default::default()
    };

    let result = enricher(&gateway)
        .run(three_games(), spec, &filter, None, |_| {})
        .await;

    assert_eq!(ids(&result), vec![2]);
}

#[tokio::test]
async fn test_progress_fires_once_per_game_in_order() {
    let gateway = MockGateway::default()
        .with_compat(1, DeckCompat::Verified)
        .with_compat(3, DeckCompat::Verified);
    let filter = FilterSpec {
        deck_compat: Some(parse_compat_filter("verified").unwrap()),
        ..Default::default()
    };

    let mut seen = Vec::new();
    enricher(&gateway)
        .run(three_games(), COMPAT_ONLY, &filter, None, |p| seen.push(p))
        .await;

    assert_eq!(
        seen,
        vec![
            Progress { processed: 1, matched: 1, total: 3 },
            Progress { processed: 2, matched: 1, total: 3 },
            Progress { processed: 3, matched: 2, total: 3 },
        ]
    );
}

#[tokio::test]
async fn test_cancellation_returns_collected_matches() {
    let token = CancellationToken::new();
    let gateway = MockGateway::default().cancel_when_fetching(2, token.clone());

    let mut progress = Vec::new();
    let result = enricher(&gateway)
        .with_cancellation(token)
        .run(three_games(), COMPAT_ONLY, &FilterSpec::default(), None, |p| {
            progress.push(p.processed)
        })
        .await;

    // the in-flight game completes, nothing after it is fetched
    assert_eq!(ids(&result), vec![1, 2]);
    assert_eq!(gateway.fetched_ids(), vec![1, 2]);
    assert_eq!(progress, vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_delay_only_between_games() {
    let gateway = MockGateway::default();
    let enricher = Enricher::new(&gateway).with_request_delay(Duration::from_secs(1));

    let start = tokio::time::Instant::now();
    enricher
        .run(three_games(), COMPAT_ONLY, &FilterSpec::default(), None, |_| {})
        .await;
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_no_delay_once_limit_is_met() {
    let gateway = MockGateway::default().with_compat(1, DeckCompat::Verified);
    let enricher = Enricher::new(&gateway).with_request_delay(Duration::from_secs(1));
    let filter = FilterSpec {
        deck_compat: Some(parse_compat_filter("verified").unwrap()),
        ..Default::default()
    };

    let start = tokio::time::Instant::now();
    let result = enricher
        .run(three_games(), COMPAT_ONLY, &filter, Some(1), |_| {})
        .await;
    assert_eq!(ids(&result), vec![1]);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_query_without_metadata_makes_no_calls() {
    let gateway = MockGateway::default();
    let query = LibraryQuery {
        sort: SortKey::Name,
        ..Default::default()
    };

    let result = query.run(three_games(), &enricher(&gateway), |_| {}).await;

    let names: Vec<&str> = result.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_query_presorts_before_capped_enrichment() {
    // by playtime: C(3), B(1), A(2)
    let gateway = MockGateway::default()
        .with_score(1, 8)
        .with_score(2, 8)
        .with_score(3, 8);
    let query = LibraryQuery {
        filter: FilterSpec {
            min_review_score: Some(8),
            ..Default::default()
        },
        sort: SortKey::Playtime,
        limit: Some(2),
        ..Default::default()
    };

    let result = query.run(three_games(), &enricher(&gateway), |_| {}).await;

    assert_eq!(ids(&result), vec![3, 1]);
    assert_eq!(gateway.fetched_ids(), vec![3, 1]);
}

#[tokio::test]
async fn test_query_display_only_enriches_all_then_truncates() {
    let gateway = MockGateway::default()
        .with_score(1, 5)
        .with_score(2, 9)
        .with_score(3, 7);
    let query = LibraryQuery {
        sort: SortKey::ReviewScore,
        limit: Some(2),
        display: DisplayOptions {
            reviews: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let result = query.run(three_games(), &enricher(&gateway), |_| {}).await;

    assert_eq!(ids(&result), vec![2, 3]);
    assert_eq!(gateway.fetched_ids().len(), 3);
}
