//! Steam Web API: owned games, vanity names and player summaries

use crate::{SteamStore, StoreError};
use serde::{Deserialize, Serialize};
use steamshelf_library::GameRecord;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGames {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Debug, Deserialize)]
struct OwnedGame {
    appid: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    playtime_forever: u32,
    playtime_2weeks: Option<u32>,
    playtime_deck_forever: Option<u32>,
    img_icon_url: Option<String>,
    img_logo_url: Option<String>,
}

impl From<OwnedGame> for GameRecord {
    fn from(game: OwnedGame) -> Self {
        GameRecord {
            app_id: game.appid,
            name: game.name,
            playtime: game.playtime_forever,
            playtime_recent: game.playtime_2weeks,
            playtime_deck: game.playtime_deck_forever,
            icon_url: game.img_icon_url.filter(|s| !s.is_empty()),
            logo_url: game.img_logo_url.filter(|s| !s.is_empty()),
            ..Default::default()
        }
    }
}

/// Decode a `GetOwnedGames` body. A private profile yields an empty list.
pub fn parse_owned_games(body: &str) -> Result<Vec<GameRecord>, StoreError> {
    let envelope: Envelope<OwnedGames> =
        serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;
    Ok(envelope.response.games.into_iter().map(GameRecord::from).collect())
}

#[derive(Debug, Deserialize)]
struct VanityResolution {
    success: u8,
    steamid: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Players {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

/// Public profile information for a Steam user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,
    pub personaname: String,
    pub profileurl: String,
    #[serde(default)]
    pub avatar: String,
    pub realname: Option<String>,
    /// Unix timestamp of account creation
    pub timecreated: Option<i64>,
    /// Unix timestamp of last logoff
    pub lastlogoff: Option<i64>,
    #[serde(default)]
    pub personastate: u8,
}

impl PlayerSummary {
    pub fn status(&self) -> &'static str {
        match self.personastate {
            0 => "Offline",
            1 => "Online",
            2 => "Busy",
            3 => "Away",
            4 => "Snooze",
            5 => "Looking to trade",
            6 => "Looking to play",
            _ => "Unknown",
        }
    }
}

impl SteamStore {
    /// Fetch the owned-games listing for `steam_id`
    pub async fn fetch_owned_games(&self, steam_id: &str) -> Result<Vec<GameRecord>, StoreError> {
        let url = format!("{}/IPlayerService/GetOwnedGames/v1/", self.endpoints.web_api);

        let body = self
            .get_body(
                &url,
                &[
                    ("key", self.api_key.as_str()),
                    ("steamid", steam_id),
                    ("include_appinfo", "1"),
                    ("include_played_free_games", "1"),
                    ("format", "json"),
                ],
            )
            .await?;

        let games = parse_owned_games(&body)?;
        tracing::info!(steam_id, count = games.len(), "Fetched owned games");
        Ok(games)
    }

    /// Resolve a vanity name or numeric ID to a 64-bit Steam ID
    pub async fn resolve_user(&self, name_or_id: &str) -> Result<String, StoreError> {
        let name_or_id = name_or_id.trim();
        if !name_or_id.is_empty() && name_or_id.chars().all(|c| c.is_ascii_digit()) {
            return Ok(name_or_id.to_string());
        }

        let url = format!("{}/ISteamUser/ResolveVanityURL/v1/", self.endpoints.web_api);
        let envelope: Envelope<VanityResolution> = self
            .get_json(
                &url,
                &[("key", self.api_key.as_str()), ("vanityurl", name_or_id)],
            )
            .await?;

        match envelope.response {
            VanityResolution {
                success: 1,
                steamid: Some(id),
                ..
            } => Ok(id),
            VanityResolution { message, .. } => {
                tracing::debug!(?message, "Vanity name not resolved");
                Err(StoreError::InvalidUser(name_or_id.to_string()))
            }
        }
    }

    /// Fetch the public profile of `steam_id`
    pub async fn player_summary(&self, steam_id: &str) -> Result<PlayerSummary, StoreError> {
        let url = format!("{}/ISteamUser/GetPlayerSummaries/v2/", self.endpoints.web_api);
        let envelope: Envelope<Players> = self
            .get_json(
                &url,
                &[("key", self.api_key.as_str()), ("steamids", steam_id)],
            )
            .await?;

        envelope
            .response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::PlayerNotFound(steam_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owned_games() {
        let body = r#"{
            "response": {
                "game_count": 2,
                "games": [
                    {
                        "appid": 620,
                        "name": "Portal 2",
                        "playtime_forever": 754,
                        "playtime_2weeks": 30,
                        "playtime_deck_forever": 120,
                        "img_icon_url": "2e478fc6874d06ae5baf0d147f6f21203291aa02",
                        "img_logo_url": ""
                    },
                    { "appid": 70, "name": "Half-Life", "playtime_forever": 0 }
                ]
            }
        }"#;

        let games = parse_owned_games(body).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].app_id, 620);
        assert_eq!(games[0].playtime, 754);
        assert_eq!(games[0].playtime_recent, Some(30));
        assert_eq!(games[0].playtime_deck, Some(120));
        assert!(games[0].icon_url.is_some());
        assert!(games[0].logo_url.is_none());
        assert_eq!(games[1].playtime_deck, None);
        assert!(games[1].reviews.is_none());
    }

    #[test]
    fn test_private_profile_is_empty() {
        assert!(parse_owned_games(r#"{"response":{}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_listing_is_an_error() {
        assert!(matches!(
            parse_owned_games("<html>"),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_player_status() {
        let body = r#"{
            "steamid": "76561197960287930",
            "personaname": "Rabscuttle",
            "profileurl": "https://steamcommunity.com/id/gabelogannewell/",
            "personastate": 1
        }"#;
        let player: PlayerSummary = serde_json::from_str(body).unwrap();
        assert_eq!(player.status(), "Online");
        assert!(player.realname.is_none());

        let away = PlayerSummary {
            personastate: 9,
            ..player
        };
        assert_eq!(away.status(), "Unknown");
    }

    #[tokio::test]
    async fn test_numeric_id_resolves_without_request() {
        let store = SteamStore::new(crate::StoreConfig::new("KEY")).unwrap();
        assert_eq!(
            store.resolve_user("76561197960287930").await.unwrap(),
            "76561197960287930"
        );
    }
}
