//! Library query planning
//!
//! Turns the user's options into a concrete plan: which metadata groups must
//! be fetched, whether the enrichment loop may stop early, and when sorting
//! and truncation happen relative to enrichment.

use crate::enrich::{EnrichSpec, Enricher, Progress};
use crate::filter::{FilterSpec, PlaytimeFilter};
use crate::sort::{SortKey, sort_games};
use crate::{GameRecord, StoreGateway};

/// Optional output columns. Showing a metadata column requires fetching it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub deck_hours: bool,
    pub reviews: bool,
    pub deck_compat: bool,
    pub tags: bool,
}

/// A complete library query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryQuery {
    pub playtime: PlaytimeFilter,
    pub filter: FilterSpec,
    pub sort: SortKey,
    pub limit: Option<usize>,
    pub display: DisplayOptions,
}

/// How a query will be executed over a candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPlan {
    pub enrich: EnrichSpec,
    /// Games left after the local playtime filters
    pub candidates: usize,
    /// Limit handed to the enrichment loop, when early termination is armed
    pub stop_after: Option<usize>,
    /// Candidates are sorted before enrichment instead of after
    pub presort: bool,
}

impl QueryPlan {
    pub fn needs_enrichment(&self) -> bool {
        self.enrich.any()
    }
}

impl LibraryQuery {
    /// Metadata groups implied by the active filters, sort key and columns
    pub fn enrich_spec(&self) -> EnrichSpec {
        EnrichSpec {
            reviews: self.filter.has_review_clause()
                || self.display.reviews
                || self.sort == SortKey::ReviewScore,
            deck_compat: self.filter.deck_compat.is_some()
                || self.display.deck_compat
                || self.sort == SortKey::DeckCompat,
            genre_tags: self.filter.has_genre_tag_clause() || self.display.tags,
        }
    }

    /// Apply the filters that need no network access
    pub fn apply_local(&self, games: Vec<GameRecord>) -> Vec<GameRecord> {
        self.playtime.apply(games)
    }

    /// Plan execution over `candidates` games.
    ///
    /// Early termination is only armed when metadata filters are present: the
    /// candidates are then sorted first so that "the first K matches" follows
    /// the requested order. When the sort key itself depends on fetched
    /// metadata this ordering is approximate, since unfetched values rank
    /// lowest during the pre-sort.
    pub fn plan(&self, candidates: usize) -> QueryPlan {
        let enrich = self.enrich_spec();
        let early_stop = enrich.any() && !self.filter.is_empty() && self.limit.is_some();

        QueryPlan {
            enrich,
            candidates,
            stop_after: if early_stop { self.limit } else { None },
            presort: early_stop,
        }
    }

    /// Run the query over locally filtered candidates.
    ///
    /// Without any metadata needs this is a sort and truncate with zero
    /// gateway calls.
    pub async fn run<G: StoreGateway>(
        &self,
        candidates: Vec<GameRecord>,
        enricher: &Enricher<'_, G>,
        on_progress: impl FnMut(Progress),
    ) -> Vec<GameRecord> {
        let plan = self.plan(candidates.len());

        if !plan.needs_enrichment() {
            return self.truncate(sort_games(&candidates, self.sort));
        }

        let candidates = if plan.presort {
            sort_games(&candidates, self.sort)
        } else {
            candidates
        };

        let enriched = enricher
            .run(
                candidates,
                plan.enrich,
                &self.filter,
                plan.stop_after,
                on_progress,
            )
            .await;

        if plan.presort {
            enriched
        } else {
            self.truncate(sort_games(&enriched, self.sort))
        }
    }

    fn truncate(&self, mut games: Vec<GameRecord>) -> Vec<GameRecord> {
        if let Some(limit) = self.limit {
            games.truncate(limit);
        }
        games
    }
}
