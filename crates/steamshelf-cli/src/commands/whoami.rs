use crate::display::{Painter, gray};
use anyhow::{Context, Result};
use owo_colors::Style;
use serde::Serialize;
use std::fmt::Write as _;
use steamshelf_config::ShelfConfig;
use steamshelf_library::LibraryStats;
use steamshelf_store::PlayerSummary;

/// Lifetime playtime as `N hours`, or `N.Nk hours` from a thousand hours up
pub fn format_hours(minutes: u64) -> String {
    let hours = minutes / 60;
    if hours < 1000 {
        format!("{hours} hours")
    } else {
        format!("{:.1}k hours", hours as f64 / 1000.0)
    }
}

/// Unix timestamp as a long date, e.g. `September 12, 2003`
pub fn format_date(timestamp: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%B %-d, %Y").to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileJson<'a> {
    steam_id: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    real_name: Option<&'a str>,
    profile_url: &'a str,
    status: &'static str,
    member_since: Option<String>,
    last_online: Option<String>,
    games: GameCounts,
    total_playtime: TotalPlaytime,
}

#[derive(Debug, Serialize)]
struct GameCounts {
    total: usize,
    played: usize,
    unplayed: usize,
}

#[derive(Debug, Serialize)]
struct TotalPlaytime {
    minutes: u64,
    hours: u64,
    formatted: String,
}

fn profile_json<'a>(player: &'a PlayerSummary, stats: &LibraryStats) -> ProfileJson<'a> {
    ProfileJson {
        steam_id: &player.steamid,
        display_name: &player.personaname,
        real_name: player.realname.as_deref(),
        profile_url: &player.profileurl,
        status: player.status(),
        member_since: player.timecreated.and_then(format_date),
        last_online: player.lastlogoff.and_then(format_date),
        games: GameCounts {
            total: stats.total,
            played: stats.played,
            unplayed: stats.unplayed(),
        },
        total_playtime: TotalPlaytime {
            minutes: stats.playtime,
            hours: stats.playtime / 60,
            formatted: format_hours(stats.playtime),
        },
    }
}

fn render_profile(player: &PlayerSummary, stats: &LibraryStats, painter: &Painter) -> String {
    let rule = painter.paint("─".repeat(40), gray());
    let mut out = String::new();

    let _ = writeln!(out);
    let real_name = player
        .realname
        .as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| painter.paint(format!(" ({n})"), gray()))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{}{}",
        painter.paint(&player.personaname, Style::new().bold().cyan()),
        real_name
    );
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Steam ID:      {}", player.steamid);
    let _ = writeln!(out, "Status:        {}", player.status());
    let _ = writeln!(out, "Profile:       {}", player.profileurl);
    if let Some(since) = player.timecreated.and_then(format_date) {
        let _ = writeln!(out, "Member since:  {since}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", painter.paint("Library", Style::new().bold()));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total games:   {}", stats.total);
    let _ = writeln!(
        out,
        "Played:        {} ({}%)",
        stats.played,
        stats.played_percent()
    );
    let _ = writeln!(out, "Unplayed:      {}", stats.unplayed());
    let _ = writeln!(out, "Total time:    {}", format_hours(stats.playtime));

    out
}

pub async fn run(json: bool) -> Result<()> {
    let config = ShelfConfig::resolve_default()?;
    let store = super::open_store(&config)?;
    let steam_id = config.require_steam_id()?;

    if !json {
        eprintln!(
            "{}",
            Painter::stderr().paint("Fetching profile...", Style::new().blue())
        );
    }

    let (player, games) = tokio::join!(
        store.player_summary(steam_id),
        store.fetch_owned_games(steam_id)
    );
    let player = player.context("Could not fetch player info")?;
    let games = games.context("Failed to fetch owned games")?;
    let stats = LibraryStats::from_games(&games);

    if json {
        println!("{}", serde_json::to_string_pretty(&profile_json(&player, &stats))?);
    } else {
        print!("{}", render_profile(&player, &stats, &Painter::stdout()));
    }

    Ok(())
}
