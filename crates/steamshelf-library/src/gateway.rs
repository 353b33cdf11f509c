//! Remote data sources the pipeline depends on

use crate::{DeckCompat, GameRecord, GenreTags, ReviewSummary};
use std::future::Future;

/// Access to the owned-games listing and the per-game metadata sources.
///
/// The per-game lookups never fail: network errors, timeouts, bad statuses and
/// malformed payloads all come back as `None` so one game's missing metadata
/// cannot abort a run over the whole library. Only the primary listing returns
/// an error, since nothing can be shown without it.
pub trait StoreGateway: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Owned games for a user, in listing order
    fn owned_games(
        &self,
        steam_id: &str,
    ) -> impl Future<Output = Result<Vec<GameRecord>, Self::Error>> + Send;

    fn reviews(&self, app_id: u32) -> impl Future<Output = Option<ReviewSummary>> + Send;

    fn deck_compat(&self, app_id: u32) -> impl Future<Output = Option<DeckCompat>> + Send;

    fn genre_tags(&self, app_id: u32) -> impl Future<Output = Option<GenreTags>> + Send;
}
