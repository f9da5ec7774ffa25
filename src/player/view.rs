//! Render-ready snapshot of a mounted player.
//!
//! Each interactive element carries a stable handle so hosts and tests can
//! address it without knowing the layout.

use super::continuation::ContinuationOverlay;
use super::controls_visibility::UiVisibilityState;
use super::episode_navigation::EpisodeNavigator;
use super::format_time;
use super::types::PlaybackState;
use crate::models::{Episode, EpisodeId, MediaId, MediaItem, MediaKind};

pub mod handles {
    use crate::models::EpisodeId;

    pub const PLAYER_CONTAINER: &str = "player-container";
    pub const VIDEO_PLAYER: &str = "video-player";
    pub const PLAY_BUTTON: &str = "play-button";
    pub const REWIND_BUTTON: &str = "rewind-button";
    pub const FORWARD_BUTTON: &str = "forward-button";
    pub const MUTE_BUTTON: &str = "mute-button";
    pub const VOLUME_SLIDER: &str = "volume-slider";
    pub const PROGRESS_BAR: &str = "progress-bar";
    pub const TIME_DISPLAY: &str = "time-display";
    pub const DURATION_DISPLAY: &str = "duration-display";
    pub const EPISODES_BUTTON: &str = "episodes-button";
    pub const FULLSCREEN_BUTTON: &str = "fullscreen-button";
    pub const EPISODE_LIST: &str = "episode-list";

    pub fn episode_item(id: EpisodeId) -> String {
        format!("episode-item-{}", id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerView {
    Playback(Box<PlaybackView>),
    /// Replaces the whole player after a terminal failure
    Error(ErrorView),
}

impl PlayerView {
    pub fn as_playback(&self) -> Option<&PlaybackView> {
        match self {
            PlayerView::Playback(view) => Some(view),
            PlayerView::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PlayerView::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub heading: &'static str,
    pub message: String,
    pub close_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackView {
    pub container: &'static str,
    pub video_surface: &'static str,
    pub source: Option<String>,
    /// Series title line, e.g. `T1 E2 • Dark Waters`
    pub series_info: Option<String>,
    pub title: String,
    pub play_icon: PlayIcon,
    pub time_display: String,
    pub duration_display: String,
    pub progress: f64,
    pub buffered: f64,
    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    pub controls_visible: bool,
    pub center_button_visible: bool,
    pub intro_visible: bool,
    pub media_info: Option<MediaInfoView>,
    /// Whether the episodes button is offered at all
    pub has_episodes: bool,
    pub episode_list: Option<Vec<EpisodeRow>>,
    pub next_episode_preview: Option<EpisodePreviewView>,
    pub next_suggestion: Option<SuggestionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfoView {
    pub title: String,
    pub synopsis: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRow {
    pub handle: String,
    pub id: EpisodeId,
    pub tag: String,
    pub title: String,
    pub synopsis: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodePreviewView {
    pub id: EpisodeId,
    pub tag: String,
    pub title: String,
    pub thumbnail: String,
    pub remaining_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionView {
    pub id: MediaId,
    pub kind: MediaKind,
    pub title: String,
    pub thumbnail: String,
    pub rating: f32,
}

pub(crate) struct ViewParts<'a> {
    pub media: &'a MediaItem,
    pub source: Option<&'a str>,
    pub playback: &'a PlaybackState,
    pub ui: &'a UiVisibilityState,
    pub navigator: &'a EpisodeNavigator,
    pub suggestion: Option<&'a MediaItem>,
}

pub(crate) fn render(parts: ViewParts<'_>) -> PlayerView {
    let ViewParts {
        media,
        source,
        playback,
        ui,
        navigator,
        suggestion,
    } = parts;

    if let Some(error) = playback.last_error.as_ref().filter(|error| error.is_terminal()) {
        return PlayerView::Error(ErrorView {
            heading: "Error playing video",
            message: error.to_string(),
            close_label: "Close",
        });
    }

    let current = navigator.current_episode();
    let episodes = navigator.episodes();

    let episode_list = (ui.show_episode_list && !episodes.is_empty()).then(|| {
        episodes
            .iter()
            .map(|episode| episode_row(episode, current))
            .collect()
    });

    let next_episode_preview = match (ui.continuation, navigator.next_episode()) {
        (ContinuationOverlay::EpisodePreview { remaining_secs }, Some(next)) => {
            Some(EpisodePreviewView {
                id: next.id,
                tag: next.tag(),
                title: next.title.clone(),
                thumbnail: next.thumbnail.clone(),
                remaining_secs,
            })
        }
        _ => None,
    };

    let next_suggestion = match (ui.continuation, suggestion) {
        (ContinuationOverlay::Suggestion, Some(item)) => Some(SuggestionView {
            id: item.id(),
            kind: item.kind(),
            title: item.title().to_string(),
            thumbnail: item.thumbnail().to_string(),
            rating: item.rating(),
        }),
        _ => None,
    };

    let media_info = ui.show_media_info.then(|| MediaInfoView {
        title: current.map_or_else(|| media.title().to_string(), |ep| ep.title.clone()),
        synopsis: current
            .map(|ep| ep.synopsis.as_str())
            .filter(|synopsis| !synopsis.is_empty())
            .unwrap_or_else(|| media.synopsis())
            .to_string(),
    });

    PlayerView::Playback(Box::new(PlaybackView {
        container: handles::PLAYER_CONTAINER,
        video_surface: handles::VIDEO_PLAYER,
        source: source.map(str::to_string),
        series_info: current.map(|ep| format!("{} • {}", ep.tag(), media.title())),
        title: current.map_or_else(|| media.title().to_string(), |ep| ep.title.clone()),
        play_icon: if playback.is_playing { PlayIcon::Pause } else { PlayIcon::Play },
        time_display: format_time(playback.current_time),
        duration_display: format_time(playback.duration.unwrap_or(0.0)),
        progress: playback.progress_fraction(),
        buffered: playback.buffered_fraction(),
        volume: playback.volume,
        is_muted: playback.is_muted,
        is_fullscreen: playback.is_fullscreen,
        controls_visible: ui.show_controls,
        center_button_visible: ui.show_center_button,
        intro_visible: ui.show_intro,
        media_info,
        has_episodes: !episodes.is_empty(),
        episode_list,
        next_episode_preview,
        next_suggestion,
    }))
}

fn episode_row(episode: &Episode, current: Option<&Episode>) -> EpisodeRow {
    EpisodeRow {
        handle: handles::episode_item(episode.id),
        id: episode.id,
        tag: episode.tag(),
        title: episode.title.clone(),
        synopsis: episode.synopsis.clone(),
        is_current: current.is_some_and(|current| current.id == episode.id),
    }
}
