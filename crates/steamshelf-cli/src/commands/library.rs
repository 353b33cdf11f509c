use crate::args::LibraryArgs;
use crate::display::{self, Painter};
use crate::progress::ProgressLine;
use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use owo_colors::Style;
use steamshelf_config::ShelfConfig;
use steamshelf_library::{
    DisplayOptions, Enricher, FilterError, FilterSpec, LibraryQuery, PlaytimeFilter,
    parse_compat_filter, parse_review_bound, parse_review_filter,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Translate command-line options into a query. Fails before any network
/// access when a filter argument is malformed.
pub fn build_query(args: &LibraryArgs) -> Result<LibraryQuery, FilterError> {
    let filter = FilterSpec {
        review_scores: args.reviews.as_deref().map(parse_review_filter).transpose()?,
        min_review_score: args.min_reviews.map(parse_review_bound).transpose()?,
        max_review_score: args.max_reviews.map(parse_review_bound).transpose()?,
        deck_compat: args.deck_compat.as_deref().map(parse_compat_filter).transpose()?,
        genres: args.genre.clone().map(|g| vec![g]),
        tags: args.tag.clone().map(|t| vec![t]),
    };

    Ok(LibraryQuery {
        playtime: PlaytimeFilter {
            unplayed: args.unplayed,
            min_hours: args.min_hours,
            max_hours: args.max_hours,
            deck_only: args.deck,
        },
        filter,
        sort: args.sort.parse()?,
        limit: args.limit,
        display: DisplayOptions {
            deck_hours: args.deck_hours,
            reviews: args.show_reviews,
            deck_compat: args.show_compat,
            tags: args.show_tags,
        },
    })
}

/// Cancel `token` on Ctrl-C so a long enrichment returns what it has
fn cancel_on_interrupt(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, keeping results collected so far");
            token.cancel();
        }
    })
}

pub async fn run(args: &LibraryArgs) -> Result<()> {
    let query = build_query(args)?;

    let config = ShelfConfig::resolve_default()?;
    let store = super::open_store(&config)?;
    let steam_id = config.require_steam_id()?;

    let status = Painter::stderr();
    if !args.json {
        eprintln!(
            "{}",
            status.paint("Fetching your Steam library...", Style::new().blue())
        );
    }

    let games = store
        .fetch_owned_games(steam_id)
        .await
        .context("Failed to fetch owned games")?;
    let owned = games.len();

    let candidates = query.apply_local(games);
    let plan = query.plan(candidates.len());

    if plan.needs_enrichment() && !args.json {
        let note = plan
            .stop_after
            .map(|k| format!(" (stopping at {k})"))
            .unwrap_or_default();
        eprintln!(
            "{}",
            status.paint(
                format!(
                    "Fetching {} for {} games{}...",
                    plan.enrich.describe(),
                    plan.candidates,
                    note
                ),
                Style::new().blue()
            )
        );
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel_on_interrupt(cancel.clone());
    let enricher = Enricher::new(&store)
        .with_request_delay(config.network.request_delay())
        .with_cancellation(cancel);

    let mut progress = ProgressLine::new(
        !args.json && std::io::stderr().is_terminal(),
        plan.stop_after,
    );
    let games = query
        .run(candidates, &enricher, |p| progress.update(p))
        .await;
    progress.finish();
    interrupt.abort();

    info!(owned, shown = games.len(), "Library query complete");

    if args.json {
        println!("{}", display::render_json(&games)?);
        return Ok(());
    }

    eprintln!(
        "\n{}\n",
        status.paint(format!("Found {} games:", games.len()), Style::new().bold())
    );

    let painter = Painter::stdout();
    let rendered = if args.plain {
        display::render_list(&games, &query.display, &painter)
    } else {
        display::render_table(&games, &query.display, &painter)
    };
    print!("{rendered}");

    Ok(())
}
