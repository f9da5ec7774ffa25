//! Router side of the player: which page a path names, how a player route
//! resolves to mount props, and where each player output leads.

use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{EpisodeId, MediaId, MediaItem, MediaKind};
use crate::player::{PlayerOutput, PlayerProps};
use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Detail page of a title
    Media { kind: MediaKind, id: MediaId },
    PlayMovie { id: MediaId },
    PlayEpisode { series: MediaId, episode: EpisodeId },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Media { kind, id } => write!(f, "/media/{}/{}", kind.path_segment(), id),
            Route::PlayMovie { id } => write!(f, "/player/{}/movie", id),
            Route::PlayEpisode { series, episode } => {
                write!(f, "/player/{}/serie/{}", series, episode)
            }
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidRoute(path.to_string());
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let id = |raw: &str| raw.parse::<u64>().map_err(|_| invalid());

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["media", kind, raw_id] => {
                let kind = match *kind {
                    "movie" => MediaKind::Movie,
                    "serie" => MediaKind::Series,
                    _ => return Err(invalid()),
                };
                Ok(Route::Media {
                    kind,
                    id: MediaId::new(id(*raw_id)?),
                })
            }
            ["player", raw_id, "movie"] => Ok(Route::PlayMovie {
                id: MediaId::new(id(*raw_id)?),
            }),
            ["player", raw_id, "serie", raw_episode] => Ok(Route::PlayEpisode {
                series: MediaId::new(id(*raw_id)?),
                episode: EpisodeId::new(id(*raw_episode)?),
            }),
            _ => Err(invalid()),
        }
    }
}

impl Route {
    /// Route that starts playing `item`; a series starts at its first episode
    pub fn play(item: &MediaItem) -> Route {
        match item {
            MediaItem::Movie(movie) => Route::PlayMovie { id: movie.id },
            MediaItem::Series(series) => match series.first_episode() {
                Some(first) => Route::PlayEpisode {
                    series: series.id,
                    episode: first.id,
                },
                None => Route::Media {
                    kind: MediaKind::Series,
                    id: series.id,
                },
            },
        }
    }

    /// Where the router goes when the player mounted for `current` emits `output`
    pub fn after_output(current: &MediaItem, output: &PlayerOutput) -> Route {
        match output {
            PlayerOutput::EpisodeChanged(episode) => Route::PlayEpisode {
                series: current.id(),
                episode: episode.id,
            },
            PlayerOutput::Close => Route::Media {
                kind: current.kind(),
                id: current.id(),
            },
            PlayerOutput::PlayNextSuggestion(suggestion) => Route::play(suggestion),
        }
    }
}

/// Build the props for mounting a player at `route`, with the catalog's
/// suggestion for what to offer at the end.
pub fn resolve_player(catalog: &Catalog, route: Route) -> Result<PlayerProps, AppError> {
    let (media, episode) = match route {
        Route::PlayMovie { id } => (catalog.get(MediaKind::Movie, id)?, None),
        Route::PlayEpisode { series, episode } => {
            let media = catalog.get(MediaKind::Series, series)?;
            let episode = media
                .episodes()
                .iter()
                .find(|candidate| candidate.id == episode)
                .ok_or_else(|| {
                    AppError::EpisodeNotFound(format!("{} in '{}'", episode, media.title()))
                })?;
            (media, Some(episode.clone()))
        }
        Route::Home | Route::Media { .. } => {
            return Err(AppError::InvalidRoute(format!("{} is not a player route", route)));
        }
    };

    let mut props = PlayerProps::new(media.clone());
    props.current_episode = episode;
    props.next_suggestion = catalog.suggest_next(media).cloned();
    debug!(
        "Resolved {} to '{}' (suggestion: {:?})",
        route,
        media.title(),
        props.next_suggestion.as_ref().map(|item| item.title())
    );
    Ok(props)
}
