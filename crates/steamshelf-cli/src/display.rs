//! Terminal and JSON rendering of game lists

use is_terminal::IsTerminal;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::fmt::Write as _;
use steamshelf_library::{DisplayOptions, GameRecord, ReviewCategory};

/// Applies colour only when the target stream is a terminal
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn stdout() -> Self {
        Self {
            enabled: std::io::stdout().is_terminal(),
        }
    }

    pub fn stderr() -> Self {
        Self {
            enabled: std::io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, text: impl std::fmt::Display, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn gray() -> Style {
    Style::new().bright_black()
}

/// Minutes as `Never played`, `45m`, `3h` or `3h 20m`
pub fn format_playtime(minutes: u32) -> String {
    if minutes == 0 {
        return "Never played".to_string();
    }

    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub fn review_style(score: ReviewCategory) -> Style {
    match score.score() {
        9 => Style::new().bright_green(),
        7 | 8 => Style::new().green(),
        5 | 6 => Style::new().yellow(),
        3 | 4 => Style::new().red(),
        _ => Style::new().bright_red(),
    }
}

fn review_cell(game: &GameRecord) -> (String, Style) {
    match &game.reviews {
        Some(summary) if !summary.label.is_empty() => match summary.score {
            Some(score) => (summary.label.clone(), review_style(score)),
            None => ("No reviews".to_string(), gray()),
        },
        _ => ("No reviews".to_string(), gray()),
    }
}

fn compat_cell(game: &GameRecord) -> String {
    game.deck_compat
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn tags_cell(game: &GameRecord) -> String {
    match &game.genre_tags {
        Some(gt) if !gt.tags.is_empty() => gt.tags.join(", "),
        _ => "-".to_string(),
    }
}

fn display_name(game: &GameRecord) -> &str {
    if game.name.is_empty() {
        "(Unknown)"
    } else {
        &game.name
    }
}

/// Fit `text` into a column of `width` characters, truncating with `…` and
/// leaving at least one trailing space as the column gap.
pub fn fit(text: &str, width: usize) -> String {
    let max = width.saturating_sub(1);
    let shown: String = if text.chars().count() > max {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    };

    let pad = width.saturating_sub(shown.chars().count());
    format!("{shown}{}", " ".repeat(pad))
}

struct Cell {
    text: String,
    style: Option<Style>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

fn columns(display: &DisplayOptions) -> Vec<(&'static str, usize)> {
    let mut columns = vec![("Name", 40), ("Playtime", 15)];
    if display.deck_hours {
        columns.push(("Deck Time", 15));
    }
    if display.reviews {
        columns.push(("Reviews", 25));
    }
    if display.deck_compat {
        columns.push(("Deck", 12));
    }
    if display.tags {
        columns.push(("Tags", 30));
    }
    columns.push(("App ID", 12));
    columns
}

fn playtime_cell(minutes: u32) -> Cell {
    if minutes == 0 {
        Cell::styled(format_playtime(0), gray())
    } else {
        Cell::plain(format_playtime(minutes))
    }
}

fn row(game: &GameRecord, display: &DisplayOptions) -> Vec<Cell> {
    let mut cells = vec![
        Cell::plain(display_name(game)),
        playtime_cell(game.playtime),
    ];
    if display.deck_hours {
        cells.push(playtime_cell(game.deck_minutes()));
    }
    if display.reviews {
        let (text, style) = review_cell(game);
        cells.push(Cell::styled(text, style));
    }
    if display.deck_compat {
        cells.push(Cell::plain(compat_cell(game)));
    }
    if display.tags {
        cells.push(Cell::plain(tags_cell(game)));
    }
    cells.push(Cell::plain(game.app_id.to_string()));
    cells
}

/// Render `games` as a fixed-width table
pub fn render_table(games: &[GameRecord], display: &DisplayOptions, painter: &Painter) -> String {
    let columns = columns(display);
    let total_width: usize = columns.iter().map(|(_, w)| w).sum();
    let mut out = String::new();

    let header: String = columns
        .iter()
        .map(|(title, width)| painter.paint(fit(title, *width), Style::new().cyan()))
        .collect();
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", painter.paint("─".repeat(total_width), gray()));

    for game in games {
        let line: String = row(game, display)
            .into_iter()
            .zip(&columns)
            .map(|(cell, (_, width))| {
                let fitted = fit(&cell.text, *width);
                match cell.style {
                    Some(style) => painter.paint(fitted, style),
                    None => fitted,
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}

/// Render `games` one per line
pub fn render_list(games: &[GameRecord], display: &DisplayOptions, painter: &Painter) -> String {
    let mut out = String::new();

    for game in games {
        let playtime = if game.playtime == 0 {
            painter.paint(format_playtime(0), gray())
        } else {
            format_playtime(game.playtime)
        };
        let mut line = format!(
            "{} - {}",
            painter.paint(display_name(game), Style::new().bold()),
            playtime
        );

        if display.deck_hours && game.deck_minutes() > 0 {
            let deck = format!("[Deck: {}]", format_playtime(game.deck_minutes()));
            let _ = write!(line, " {}", painter.paint(deck, Style::new().green()));
        }
        if display.reviews {
            let (text, style) = review_cell(game);
            let _ = write!(line, " [{}]", painter.paint(text, style));
        }
        if display.deck_compat {
            let _ = write!(line, " [{}]", compat_cell(game));
        }
        if display.tags
            && let Some(gt) = &game.genre_tags
            && !gt.tags.is_empty()
        {
            let _ = write!(line, " [{}]", gt.tags.join(", "));
        }

        let _ = writeln!(line, " ({})", painter.paint(game.app_id, gray()));
        out.push_str(&line);
    }

    out
}

/// JSON view of a game record. Metadata that was not fetched is omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameJson<'a> {
    pub app_id: u32,
    pub name: &'a str,
    pub playtime: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_last_two_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_deck: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_icon_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_logo_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_score_desc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_positive: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_negative: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_compat: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_compat_desc: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

impl<'a> From<&'a GameRecord> for GameJson<'a> {
    fn from(game: &'a GameRecord) -> Self {
        let reviews = game.reviews.as_ref();
        let genre_tags = game.genre_tags.as_ref();

        Self {
            app_id: game.app_id,
            name: &game.name,
            playtime: game.playtime,
            playtime_last_two_weeks: game.playtime_recent,
            playtime_deck: game.playtime_deck,
            img_icon_url: game.icon_url.as_deref(),
            img_logo_url: game.logo_url.as_deref(),
            review_score: reviews.and_then(|r| r.score).map(ReviewCategory::score),
            review_score_desc: reviews.map(|r| r.label.as_str()),
            review_positive: reviews.map(|r| r.positive),
            review_negative: reviews.map(|r| r.negative),
            deck_compat: game.deck_compat.map(|c| c.tier()),
            deck_compat_desc: game.deck_compat.map(|c| c.label()),
            genres: genre_tags.map(|gt| gt.genres.as_slice()),
            tags: genre_tags.map(|gt| gt.tags.as_slice()),
        }
    }
}

/// Pretty-printed JSON array of `games`
pub fn render_json(games: &[GameRecord]) -> serde_json::Result<String> {
    let view: Vec<GameJson<'_>> = games.iter().map(GameJson::from).collect();
    serde_json::to_string_pretty(&view)
}
