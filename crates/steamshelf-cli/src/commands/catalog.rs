//! Store-wide genre and tag catalogues

use crate::display::Painter;
use anyhow::Result;
use owo_colors::Style;
use std::fmt::Write as _;
use steamshelf_config::ShelfConfig;

const TAG_COLUMNS: usize = 3;
const TAG_COLUMN_WIDTH: usize = 30;

pub async fn genres(json: bool) -> Result<()> {
    let config = ShelfConfig::resolve_default()?;
    let store = super::open_catalog(&config)?;

    if !json {
        eprintln!(
            "{}",
            Painter::stderr().paint("Fetching Steam genres...", Style::new().blue())
        );
    }

    let names = store.genre_list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        print!("{}", render_genres(&names, &Painter::stdout()));
    }
    Ok(())
}

pub async fn tags(json: bool) -> Result<()> {
    let config = ShelfConfig::resolve_default()?;
    let store = super::open_catalog(&config)?;

    if !json {
        eprintln!(
            "{}",
            Painter::stderr().paint("Fetching Steam tags...", Style::new().blue())
        );
    }

    let names = store.tag_list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        print!("{}", render_tags(&names, &Painter::stdout()));
    }
    Ok(())
}

fn render_genres(names: &[String], painter: &Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{}\n",
        painter.paint(format!("{} genres available:", names.len()), Style::new().bold())
    );
    for name in names {
        let _ = writeln!(out, "  {}", painter.paint(name, Style::new().cyan()));
    }
    out
}

fn render_tags(names: &[String], painter: &Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{}\n",
        painter.paint(format!("{} tags available:", names.len()), Style::new().bold())
    );
    for row in names.chunks(TAG_COLUMNS) {
        let line: String = row
            .iter()
            .map(|name| format!("{name:<TAG_COLUMN_WIDTH$}"))
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_genres() {
        let out = render_genres(&names(&["Action", "RPG"]), &Painter::plain());
        assert!(out.contains("2 genres available:"));
        assert!(out.contains("  Action\n  RPG\n"));
    }

    #[test]
    fn test_render_tags_in_columns() {
        let tags = names(&["Action", "Co-op", "Indie", "Puzzle"]);
        let out = render_tags(&tags, &Painter::plain());
        let rows: Vec<&str> = out.lines().skip(3).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2 * TAG_COLUMN_WIDTH + "Indie".len());
        assert!(rows[0].starts_with("Action"));
        assert_eq!(&rows[0][TAG_COLUMN_WIDTH..TAG_COLUMN_WIDTH + 5], "Co-op");
        assert_eq!(rows[1], "Puzzle");
    }
}
