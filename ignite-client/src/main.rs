//! ignite-client - conference schedule CLI
//!
//! Thin consumer of the library pipeline: aggregates one day's sessions
//! (cached unless `--refresh`), groups them by start time and prints the
//! sections. Stands in for the list UI the library was built to feed.

use anyhow::Result;
use clap::Parser;
use ignite_client::services::{
    fetch_day_sessions, group_sessions, ResponseCache, SearchApiClient, SessionsApi,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "ignite-client", about = "MS Ignite NZ schedule viewer")]
struct Args {
    /// Conference day identifier (the API's Dates filter value)
    #[arg(long)]
    day: i64,

    /// Force a live fetch, ignoring cached pages (they are still refreshed)
    #[arg(long)]
    refresh: bool,

    /// Override the response cache directory (IGNITE_CACHE_DIR also works)
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Starting ignite-client");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let cache_dir = ignite_common::config::resolve_cache_dir(args.cache_dir.as_deref());
    ignite_common::config::ensure_cache_dir(&cache_dir)?;
    info!("Cache directory: {}", cache_dir.display());

    let cache = ResponseCache::open(cache_dir);
    let api = SessionsApi::new(SearchApiClient::new()?, cache);

    let day = fetch_day_sessions(&api, args.day, args.refresh).await?;
    info!(
        day_id = day.day_id,
        total = day.sessions.len(),
        origin = ?day.origin,
        "aggregation complete"
    );

    for section in group_sessions(day.sessions) {
        // prefer the server's preformatted header when it has one
        let header = section
            .sessions
            .first()
            .map(|s| s.schedule.formatted_start_date.clone())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| section.start_time.format("%a %-d %b, %H:%M").to_string());

        println!("{header}");
        for session in &section.sessions {
            let speaker = session
                .speakers
                .first()
                .map(|s| s.name.as_str())
                .unwrap_or("");
            println!(
                "  {} | {} | {}",
                session.name, speaker, session.schedule.formatted_venue_string
            );
        }
        println!();
    }

    Ok(())
}
