use crate::args::ConfigCommand;
use crate::display::{Painter, gray};
use anyhow::{Context, Result};
use owo_colors::Style;
use std::fmt::Write as _;
use std::path::Path;
use steamshelf_config::ShelfConfig;

pub async fn run(command: &ConfigCommand) -> Result<()> {
    let path = ShelfConfig::default_path()?;
    let painter = Painter::stdout();

    match command {
        ConfigCommand::SetKey { api_key } => {
            set_key(&path, api_key)?;
            println!("{}", painter.paint("✓ API key saved successfully", Style::new().green()));
        }
        ConfigCommand::SetUser { username } => {
            let steam_id = set_user(&path, username).await?;
            println!(
                "{}",
                painter.paint(
                    format!("✓ User set to: {username} ({steam_id})"),
                    Style::new().green()
                )
            );
        }
        ConfigCommand::Show => {
            let stored = ShelfConfig::load(&path)?;
            let effective = ShelfConfig::resolve(&path)?;
            print!("{}", render_show(&stored, &effective, &path, &painter));
        }
    }

    Ok(())
}

/// Persist `api_key`, keeping the rest of the stored record
pub fn set_key(path: &Path, api_key: &str) -> Result<()> {
    let mut config = ShelfConfig::load(path)?;
    config.api_key = Some(api_key.trim().to_string());
    config.save(path)?;
    Ok(())
}

/// Resolve `username` to a Steam ID and persist both
async fn set_user(path: &Path, username: &str) -> Result<String> {
    let effective = ShelfConfig::resolve(path)?;
    let store = super::open_store(&effective)?;
    let steam_id = store
        .resolve_user(username)
        .await
        .with_context(|| format!("Failed to resolve user {username}"))?;

    let mut stored = ShelfConfig::load(path)?;
    stored.steam_id = Some(steam_id.clone());
    stored.username = Some(username.to_string());
    stored.save(path)?;

    Ok(steam_id)
}

fn render_show(stored: &ShelfConfig, effective: &ShelfConfig, path: &Path, painter: &Painter) -> String {
    let not_set = || painter.paint("Not set", gray());
    let mut out = String::new();

    let _ = writeln!(out, "{}", painter.paint("Current configuration:", Style::new().bold()));

    let key = match (&effective.api_key, &stored.api_key) {
        (Some(_), Some(_)) => painter.paint("Set", Style::new().green()),
        (Some(_), None) => painter.paint("Set (environment)", Style::new().green()),
        (None, _) => painter.paint("Not set", Style::new().red()),
    };
    let _ = writeln!(out, "  API Key: {key}");
    let _ = writeln!(
        out,
        "  Username: {}",
        effective.username.clone().unwrap_or_else(not_set)
    );
    let _ = writeln!(
        out,
        "  Steam ID: {}",
        effective.steam_id.clone().unwrap_or_else(not_set)
    );
    let _ = writeln!(
        out,
        "  Request delay: {}ms",
        effective.network.request_delay_ms
    );
    let _ = writeln!(out, "  Timeout: {}s", effective.network.timeout().as_secs());
    let _ = writeln!(out, "  Config file: {}", path.display());

    out
}
