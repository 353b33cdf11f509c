//! Steam storefront endpoints

use crate::{SteamStore, StoreError};
use serde::Deserialize;
use serde_json::Value;
use steamshelf_library::{DeckCompat, ReviewCategory, ReviewSummary};

/// Store genre IDs that are software categories rather than game genres
pub const NON_GAME_GENRES: &[&str] = &[
    "Accounting",
    "Audio Production",
    "Education",
    "Photo Editing",
    "Software Training",
    "Utilities",
    "Video Production",
    "Web Publishing",
    "Mac OS X",
    "Linux",
    "Controller support",
    "genre_demos",
];

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    query_summary: Option<QuerySummary>,
}

#[derive(Debug, Deserialize)]
struct QuerySummary {
    #[serde(default)]
    review_score: u8,
    review_score_desc: Option<String>,
    #[serde(default)]
    total_positive: u32,
    #[serde(default)]
    total_negative: u32,
}

/// Decode an `appreviews` body. No `query_summary` means no data.
pub fn parse_reviews(body: &str) -> Result<Option<ReviewSummary>, StoreError> {
    let response: ReviewsResponse =
        serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;

    Ok(response.query_summary.map(|summary| ReviewSummary {
        score: ReviewCategory::from_score(summary.review_score),
        label: summary
            .review_score_desc
            .unwrap_or_else(|| "No Reviews".to_string()),
        positive: summary.total_positive,
        negative: summary.total_negative,
    }))
}

/// Decode a Deck compatibility report into its resolved tier
pub fn parse_deck_compat(body: &str) -> Result<Option<DeckCompat>, StoreError> {
    let report: Value = serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;

    // `results` is an empty array for apps without a report
    Ok(report
        .pointer("/results/resolved_category")
        .and_then(Value::as_u64)
        .and_then(|tier| u8::try_from(tier).ok())
        .and_then(DeckCompat::from_tier))
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<StoreGenre>,
}

#[derive(Debug, Deserialize)]
struct StoreGenre {
    id: String,
    name: String,
}

/// Decode the store genre catalogue into sorted game-genre names
pub fn parse_genre_list(body: &str) -> Result<Vec<String>, StoreError> {
    let list: GenreList = serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;

    let mut names: Vec<String> = list
        .genres
        .into_iter()
        .filter(|g| !NON_GAME_GENRES.contains(&g.id.as_str()))
        .map(|g| g.name)
        .collect();
    sort_names(&mut names);
    Ok(names)
}

#[derive(Debug, Deserialize)]
struct PopularTag {
    name: String,
}

/// Decode the popular-tags catalogue into sorted tag names
pub fn parse_tag_list(body: &str) -> Result<Vec<String>, StoreError> {
    let tags: Vec<PopularTag> =
        serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;

    let mut names: Vec<String> = tags.into_iter().map(|t| t.name).collect();
    sort_names(&mut names);
    Ok(names)
}

fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

impl SteamStore {
    pub async fn fetch_reviews(&self, app_id: u32) -> Result<Option<ReviewSummary>, StoreError> {
        let url = format!("{}/appreviews/{}", self.endpoints.store, app_id);
        let body = self
            .get_body(
                &url,
                &[
                    ("json", "1"),
                    ("language", "all"),
                    ("purchase_type", "all"),
                    ("num_per_page", "0"),
                ],
            )
            .await?;
        parse_reviews(&body)
    }

    pub async fn fetch_deck_compat(&self, app_id: u32) -> Result<Option<DeckCompat>, StoreError> {
        let url = format!(
            "{}/saleaction/ajaxgetdeckappcompatibilityreport",
            self.endpoints.store
        );
        let app_id = app_id.to_string();
        let body = self.get_body(&url, &[("nAppID", app_id.as_str())]).await?;
        parse_deck_compat(&body)
    }

    /// Store genre catalogue, game genres only
    pub async fn genre_list(&self) -> Result<Vec<String>, StoreError> {
        let url = format!("{}/api/getgenrelist", self.endpoints.store);
        let body = self.get_body(&url, &[]).await?;
        parse_genre_list(&body)
    }

    /// Popular user tags
    pub async fn tag_list(&self) -> Result<Vec<String>, StoreError> {
        let url = format!("{}/tagdata/populartags/english", self.endpoints.store);
        let body = self.get_body(&url, &[]).await?;
        parse_tag_list(&body)
    }
}
