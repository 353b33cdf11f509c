//! Enrichment pipeline
//!
//! Walks the candidate games in order, fetches the metadata each one needs,
//! applies the filter and stops as soon as enough matches are collected. Games
//! are processed one at a time; the (up to three) lookups for a single game run
//! concurrently and are joined before the loop moves on, so every record is
//! merged from one complete set of results.

use crate::{Enrichment, FilterSpec, GameRecord, StoreGateway};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Pause between games when none is configured
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(50);

/// Which metadata groups to fetch for each game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSpec {
    pub reviews: bool,
    pub deck_compat: bool,
    pub genre_tags: bool,
}

impl EnrichSpec {
    pub fn any(&self) -> bool {
        self.reviews || self.deck_compat || self.genre_tags
    }

    /// Human-readable list of the groups being fetched, e.g. "reviews + tags"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.reviews {
            parts.push("reviews");
        }
        if self.deck_compat {
            parts.push("deck compat");
        }
        if self.genre_tags {
            parts.push("tags");
        }
        parts.join(" + ")
    }
}

/// Progress after each visited game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Games visited so far, including the current one
    pub processed: usize,
    /// Games that passed the filter so far
    pub matched: usize,
    /// Candidate games in the input
    pub total: usize,
}

/// Runs the enrich-filter loop against a gateway
pub struct Enricher<'a, G> {
    gateway: &'a G,
    request_delay: Duration,
    cancel: CancellationToken,
}

impl<'a, G: StoreGateway> Enricher<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self {
            gateway,
            request_delay: DEFAULT_REQUEST_DELAY,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the pause between games
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Stop early when `token` is cancelled, returning what was collected
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Enrich and filter `games` in input order.
    ///
    /// With `limit` set, no game is fetched once `limit` matches have been
    /// collected. `on_progress` fires exactly once per visited game, after the
    /// game has been merged and evaluated. The result keeps input order.
    pub async fn run(
        &self,
        games: Vec<GameRecord>,
        spec: EnrichSpec,
        filter: &FilterSpec,
        limit: Option<usize>,
        mut on_progress: impl FnMut(Progress),
    ) -> Vec<GameRecord> {
        let total = games.len();
        let mut matched = Vec::new();
        let limit_reached = |found: usize| limit.is_some_and(|k| found >= k);

        debug!(
            total,
            ?limit,
            fetching = %spec.describe(),
            "Starting enrichment"
        );

        for (index, mut game) in games.into_iter().enumerate() {
            if limit_reached(matched.len()) {
                debug!(skipped = total - index, "Limit reached, stopping early");
                break;
            }

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    info!(processed = index, matched = matched.len(), "Enrichment cancelled");
                    return matched;
                }
                fetched = self.fetch(game.app_id, spec) => fetched,
            };
            if spec.any() && fetched.is_empty() {
                debug!(app_id = game.app_id, "No metadata returned");
            }
            game.merge(fetched);

            if filter.matches(&game) {
                matched.push(game);
            }

            on_progress(Progress {
                processed: index + 1,
                matched: matched.len(),
                total,
            });

            let more_work = index + 1 < total && !limit_reached(matched.len());
            if more_work && spec.any() && !self.request_delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        info!(processed = index + 1, matched = matched.len(), "Enrichment cancelled");
                        return matched;
                    }
                    _ = tokio::time::sleep(self.request_delay) => {}
                }
            }
        }

        info!(total, matched = matched.len(), "Enrichment finished");
        matched
    }

    /// Issue the requested lookups for one game concurrently
    async fn fetch(&self, app_id: u32, spec: EnrichSpec) -> Enrichment {
        let gateway = self.gateway;

        let (reviews, deck_compat, genre_tags) = tokio::join!(
            async {
                if spec.reviews {
                    gateway.reviews(app_id).await
                } else {
                    None
                }
            },
            async {
                if spec.deck_compat {
                    gateway.deck_compat(app_id).await
                } else {
                    None
                }
            },
            async {
                if spec.genre_tags {
                    gateway.genre_tags(app_id).await
                } else {
                    None
                }
            },
        );

        Enrichment {
            reviews,
            deck_compat,
            genre_tags,
        }
    }
}
