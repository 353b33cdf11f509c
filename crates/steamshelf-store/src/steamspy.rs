//! SteamSpy per-game genres and user tags

use crate::{SteamStore, StoreError};
use serde_json::Value;
use steamshelf_library::GenreTags;

/// Decode a SteamSpy `appdetails` body.
///
/// SteamSpy answers unknown apps with a record whose `name` is null; that is
/// treated as no data. Tags come back as `{name: votes}` (or `[]` when there
/// are none) and are returned most-voted first.
pub fn parse_genre_tags(body: &str) -> Result<Option<GenreTags>, StoreError> {
    let details: Value = serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;

    if details.get("name").is_none_or(Value::is_null) {
        return Ok(None);
    }

    let genres = details
        .get("genre")
        .and_then(Value::as_str)
        .map(|g| {
            g.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut voted: Vec<(String, u64)> = details
        .get("tags")
        .and_then(Value::as_object)
        .map(|tags| {
            tags.iter()
                .map(|(name, votes)| (name.clone(), votes.as_u64().unwrap_or(0)))
                .collect()
        })
        .unwrap_or_default();
    voted.sort_by(|(a_name, a_votes), (b_name, b_votes)| {
        b_votes.cmp(a_votes).then_with(|| a_name.cmp(b_name))
    });

    Ok(Some(GenreTags {
        genres,
        tags: voted.into_iter().map(|(name, _)| name).collect(),
    }))
}

impl SteamStore {
    pub async fn fetch_genre_tags(&self, app_id: u32) -> Result<Option<GenreTags>, StoreError> {
        let url = format!("{}/api.php", self.endpoints.steamspy);
        let app_id = app_id.to_string();
        let body = self
            .get_body(&url, &[("request", "appdetails"), ("appid", app_id.as_str())])
            .await?;
        parse_genre_tags(&body)
    }
}
