use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reelflix::config::Config;
use reelflix::navigation::{Route, resolve_player};
use reelflix::player::{
    ContinuationOverlay, ContinuationPolicy, PlayerOutput, PlayerSession,
    PlayerView, SimulatedFullscreen, SimulatedMedia, format_time,
};
use reelflix::{CatalogCache, MediaItem};

#[derive(Parser)]
#[command(name = "reelflix")]
#[command(about = "Streaming catalog player engine")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file, overriding the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every title in the catalog
    Catalog,

    /// Play a route on a simulated transport, following continuation like the router would
    Simulate {
        /// Player route, e.g. /player/3/serie/31 or /player/7/movie
        route: String,

        /// What happens at the end of an episode
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Seconds of media played per step
        #[arg(long, default_value = "30")]
        step: f64,

        /// Stop after this many mounts
        #[arg(long, default_value = "5")]
        max_titles: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    AutoAdvance,
    PreviewOnly,
}

impl From<PolicyArg> for ContinuationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AutoAdvance => ContinuationPolicy::AutoAdvance,
            PolicyArg::PreviewOnly => ContinuationPolicy::PreviewOnly,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelflix=debug")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }
    let Some(catalog_path) = config.catalog.path.clone() else {
        bail!("No catalog configured; pass --catalog <file>");
    };
    let cache = CatalogCache::new(catalog_path, config.catalog.cache_ttl());

    match cli.command {
        Commands::Catalog => cmd_catalog(&cache).await,
        Commands::Simulate {
            route,
            policy,
            step,
            max_titles,
        } => {
            if let Some(policy) = policy {
                config.player.continuation_policy = policy.into();
            }
            let route: Route = route.parse()?;
            cmd_simulate(&config, &cache, route, step, max_titles).await
        }
    }
}

async fn cmd_catalog(cache: &CatalogCache) -> Result<()> {
    let catalog = cache.get().await.context("Failed to load catalog")?;

    for item in catalog.items() {
        let extra = match item {
            MediaItem::Movie(movie) => format!("{} min", movie.duration),
            MediaItem::Series(series) => format!(
                "{} seasons, {} episodes",
                series.season_count,
                series.episodes.len()
            ),
        };
        println!(
            "{:<7} {:>4}  {:<32} {:<24} {}",
            item.kind(),
            item.id(),
            item.title(),
            item.genres().join(", "),
            extra
        );
    }
    Ok(())
}

async fn cmd_simulate(
    config: &Config,
    cache: &CatalogCache,
    mut route: Route,
    step: f64,
    max_titles: usize,
) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        bail!("--step must be a positive number of seconds");
    }

    for _ in 0..max_titles {
        let catalog = cache.get().await?;
        let props = resolve_player(&catalog, route)?;
        let current = props.media.clone();
        let minutes = props
            .current_episode
            .as_ref()
            .map(|episode| episode.duration)
            .unwrap_or(match &current {
                MediaItem::Movie(movie) => movie.duration,
                MediaItem::Series(series) => series.duration,
            });
        let length = if minutes > 0 { f64::from(minutes) * 60.0 } else { 60.0 };

        info!("Mounting {}", route);
        let media = Arc::new(SimulatedMedia::new());
        let (tx, mut outputs) = mpsc::unbounded_channel();
        let mut session = PlayerSession::mount(
            props,
            media.clone(),
            Arc::new(SimulatedFullscreen::new()),
            config.player.clone(),
            tx,
        )
        .await;
        session.complete_intro();
        media.load_metadata(length);
        session.settle().await;
        if !session.playback().is_playing {
            session.play().await;
        }
        info!("Playing {}", session.source().unwrap_or("<none>"));

        let mut overlay = session.ui_state().continuation;
        let next = loop {
            if let Ok(output) = outputs.try_recv() {
                info!("Player output: {}", summarize(&output));
                break Some(Route::after_output(&current, &output));
            }
            if let PlayerView::Error(error) = session.view() {
                warn!("{}", error.message);
                break None;
            }

            media.advance(step);
            session.settle().await;

            let now = session.ui_state().continuation;
            if now != overlay {
                info!(
                    "[{}] overlay {:?} -> {:?}",
                    format_time(session.playback().current_time),
                    overlay,
                    now
                );
                overlay = now;
            }

            if !session.playback().is_playing && outputs.is_empty() {
                // Content is over; act like a viewer accepting whatever is offered
                match now {
                    ContinuationOverlay::Suggestion => {
                        session.play_next_suggestion();
                    }
                    ContinuationOverlay::EpisodePreview { .. } => {
                        session.play_next_episode().await;
                    }
                    ContinuationOverlay::Hidden => {
                        info!("Nothing left to play");
                        break None;
                    }
                }
            }
        };

        session.unmount();
        match next {
            Some(next_route) => route = next_route,
            None => return Ok(()),
        }
    }

    info!("Stopped after {} titles", max_titles);
    Ok(())
}

fn summarize(output: &PlayerOutput) -> String {
    match output {
        PlayerOutput::EpisodeChanged(episode) => format!("episode {} '{}'", episode.tag(), episode.title),
        PlayerOutput::Close => "close".to_string(),
        PlayerOutput::PlayNextSuggestion(item) => format!("suggestion '{}'", item.title()),
    }
}
