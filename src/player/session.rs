use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::continuation::{ContinuationInput, ContinuationOrchestrator, ContinuationOverlay};
use super::controls_visibility::{UiVisibilityController, UiVisibilityState};
use super::engine::PlaybackEngine;
use super::episode_navigation::EpisodeNavigator;
use super::keyboard::KeyAction;
use super::listeners::ListenerHandle;
use super::timers::TimerTick;
use super::traits::{FullscreenHost, MediaElement};
use super::types::{InteractionKind, MediaEvent, PlaybackState};
use super::view::{self, PlayerView, ViewParts};
use crate::config::PlayerConfig;
use crate::models::{Episode, EpisodeId, MediaItem};
use crate::utils::PlaybackError;

/// What the router hands the player when mounting it
#[derive(Debug, Clone)]
pub struct PlayerProps {
    pub media: MediaItem,
    pub current_episode: Option<Episode>,
    pub next_suggestion: Option<MediaItem>,
}

impl PlayerProps {
    pub fn new(media: MediaItem) -> Self {
        Self {
            media,
            current_episode: None,
            next_suggestion: None,
        }
    }

    pub fn with_episode(mut self, episode: Episode) -> Self {
        self.current_episode = Some(episode);
        self
    }

    pub fn with_suggestion(mut self, suggestion: MediaItem) -> Self {
        self.next_suggestion = Some(suggestion);
        self
    }
}

/// Notifications for whoever mounted the player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerOutput {
    EpisodeChanged(Episode),
    Close,
    PlayNextSuggestion(MediaItem),
}

/// Messages posted into the session's own inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Timer(TimerTick),
}

impl From<TimerTick> for PlayerInput {
    fn from(tick: TimerTick) -> Self {
        PlayerInput::Timer(tick)
    }
}

/// One mounted player: the engine, the visibility controller, episode
/// navigation and continuation wired together.
///
/// Transport notifications and timer ticks queue up in channels and are
/// applied by [`PlayerSession::settle`]. Every public operation settles
/// before returning, so the state read afterwards is consistent.
pub struct PlayerSession {
    id: Uuid,
    media: MediaItem,
    next_suggestion: Option<MediaItem>,
    config: PlayerConfig,
    engine: PlaybackEngine,
    ui: UiVisibilityController<PlayerInput>,
    navigator: EpisodeNavigator,
    orchestrator: ContinuationOrchestrator,
    inbox: mpsc::UnboundedReceiver<PlayerInput>,
    media_events: mpsc::UnboundedReceiver<MediaEvent>,
    listener: Option<ListenerHandle>,
    output: mpsc::UnboundedSender<PlayerOutput>,
    source: Option<String>,
    was_playing: bool,
}

impl PlayerSession {
    pub async fn mount(
        props: PlayerProps,
        element: Arc<dyn MediaElement>,
        fullscreen: Arc<dyn FullscreenHost>,
        config: PlayerConfig,
        output: mpsc::UnboundedSender<PlayerOutput>,
    ) -> Self {
        let (inbox_tx, inbox) = mpsc::unbounded_channel();
        let (event_tx, media_events) = mpsc::unbounded_channel();
        let listener = element.add_listener(event_tx);

        let PlayerProps {
            media,
            current_episode,
            next_suggestion,
        } = props;

        let navigator = EpisodeNavigator::new(media.episodes().to_vec(), current_episode);
        let orchestrator =
            ContinuationOrchestrator::new(config.continuation_policy, config.preview_window_secs);

        let mut session = Self {
            id: Uuid::new_v4(),
            media,
            next_suggestion,
            engine: PlaybackEngine::new(element, fullscreen),
            ui: UiVisibilityController::new(&config, inbox_tx),
            navigator,
            orchestrator,
            config,
            inbox,
            media_events,
            listener: Some(listener),
            output,
            source: None,
            was_playing: false,
        };

        info!(
            session = %session.id,
            "Mounting player for {} '{}' ({:?})",
            session.media.kind(),
            session.media.title(),
            session.orchestrator.policy()
        );

        session.ui.mount(session.config.intro_total(), false);
        session.load_source().await;
        session.settle().await;
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn media(&self) -> &MediaItem {
        &self.media
    }

    pub fn playback(&self) -> &PlaybackState {
        self.engine.state()
    }

    pub fn ui_state(&self) -> &UiVisibilityState {
        self.ui.state()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.navigator.current_episode()
    }

    pub fn next_episode(&self) -> Option<&Episode> {
        self.navigator.next_episode()
    }

    pub fn is_last_episode(&self) -> bool {
        self.navigator.is_last_episode()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn view(&self) -> PlayerView {
        view::render(ViewParts {
            media: &self.media,
            source: self.source.as_deref(),
            playback: self.engine.state(),
            ui: self.ui.state(),
            navigator: &self.navigator,
            suggestion: self.next_suggestion.as_ref(),
        })
    }

    /// Apply every queued transport notification and timer tick
    pub async fn settle(&mut self) {
        loop {
            let mut progressed = false;

            while let Ok(event) = self.media_events.try_recv() {
                progressed = true;
                let ended = event == MediaEvent::Ended;
                let timing_changed = self.engine.handle_event(event);
                self.sync_play_state();
                if timing_changed || ended {
                    self.update_continuation().await;
                }
            }

            while let Ok(input) = self.inbox.try_recv() {
                progressed = true;
                match input {
                    PlayerInput::Timer(tick) => {
                        self.ui.handle_timer(tick, self.engine.is_playing());
                    }
                }
            }

            if !progressed {
                break;
            }
        }
    }

    pub async fn play(&mut self) {
        self.engine.play().await;
        self.sync_play_state();
        self.settle().await;
    }

    pub async fn pause(&mut self) {
        self.engine.pause();
        self.sync_play_state();
        self.settle().await;
    }

    pub async fn toggle_play(&mut self) {
        self.engine.toggle_play().await;
        self.sync_play_state();
        self.settle().await;
    }

    pub async fn seek(&mut self, seconds: f64) {
        self.engine.seek(seconds);
        self.update_continuation().await;
        self.settle().await;
    }

    pub async fn seek_relative(&mut self, offset: f64) {
        self.engine.seek_relative(offset);
        self.update_continuation().await;
        self.settle().await;
    }

    pub async fn rewind(&mut self) {
        self.seek_relative(-self.config.seek_step_secs).await;
    }

    pub async fn forward(&mut self) {
        self.seek_relative(self.config.seek_step_secs).await;
    }

    /// Click on the progress bar at `fraction` of its width
    pub async fn click_progress_bar(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let duration = self.engine.state().duration.unwrap_or(0.0);
        self.seek(fraction.clamp(0.0, 1.0) * duration).await;
    }

    pub fn begin_scrub(&mut self) {
        self.ui.begin_scrub();
    }

    pub async fn scrub_to(&mut self, fraction: f64) {
        self.click_progress_bar(fraction).await;
    }

    pub fn end_scrub(&mut self) {
        self.ui.end_scrub(self.engine.is_playing());
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.engine.set_volume(volume);
    }

    pub fn volume_up(&mut self) {
        self.engine.volume_up(self.config.volume_step);
    }

    pub fn volume_down(&mut self) {
        self.engine.volume_down(self.config.volume_step);
    }

    pub fn toggle_mute(&mut self) {
        self.engine.toggle_mute();
    }

    pub async fn toggle_fullscreen(&mut self) {
        self.engine.toggle_fullscreen().await;
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.engine.set_playback_rate(rate);
    }

    pub fn interact(&mut self, kind: InteractionKind) {
        self.ui.handle_interaction(kind, self.engine.is_playing());
    }

    pub fn toggle_episode_list(&mut self) {
        self.ui.toggle_episode_list();
    }

    /// The host finished playing the intro animation before its timer did
    pub fn complete_intro(&mut self) {
        self.ui.complete_intro();
    }

    /// Handle a key press. Returns false for keys without a binding.
    pub async fn handle_key(&mut self, key: &str) -> bool {
        let Some(action) = KeyAction::from_key(key) else {
            return false;
        };
        self.interact(InteractionKind::Key);

        match action {
            KeyAction::TogglePlay => self.toggle_play().await,
            KeyAction::SeekBackward => self.rewind().await,
            KeyAction::SeekForward => self.forward().await,
            KeyAction::VolumeUp => self.volume_up(),
            KeyAction::VolumeDown => self.volume_down(),
            KeyAction::ToggleMute => self.toggle_mute(),
            KeyAction::ToggleFullscreen => self.toggle_fullscreen().await,
            KeyAction::NextEpisode => {
                self.play_next_episode().await;
            }
            KeyAction::ToggleEpisodeList => {
                if !self.navigator.episodes().is_empty() {
                    self.toggle_episode_list();
                }
            }
            KeyAction::Escape => {
                if self.engine.state().is_fullscreen {
                    self.toggle_fullscreen().await;
                } else {
                    self.close();
                }
            }
        }
        true
    }

    /// Pick an episode from the list. Unknown ids are ignored.
    pub async fn select_episode(&mut self, id: EpisodeId) -> bool {
        let Some(episode) = self
            .navigator
            .episodes()
            .iter()
            .find(|episode| episode.id == id)
            .cloned()
        else {
            warn!(session = %self.id, "Episode {} is not part of '{}'", id, self.media.title());
            return false;
        };

        let selected = self.navigator.select(episode).clone();
        self.emit(PlayerOutput::EpisodeChanged(selected));
        self.sync_source().await;
        self.settle().await;
        true
    }

    /// Move to the next episode, if there is one
    pub async fn play_next_episode(&mut self) -> bool {
        let advanced = self.advance_episode().await;
        self.settle().await;
        advanced
    }

    pub async fn play_previous_episode(&mut self) -> bool {
        let Some(previous) = self.navigator.go_back().cloned() else {
            debug!(session = %self.id, "No previous episode");
            return false;
        };
        self.emit(PlayerOutput::EpisodeChanged(previous));
        self.sync_source().await;
        self.settle().await;
        true
    }

    /// Accept the offered suggestion. Returns false when none was supplied.
    pub fn play_next_suggestion(&mut self) -> bool {
        let Some(suggestion) = self.next_suggestion.clone() else {
            return false;
        };
        info!(session = %self.id, "Playing suggestion '{}'", suggestion.title());
        self.emit(PlayerOutput::PlayNextSuggestion(suggestion));
        true
    }

    pub fn close(&mut self) {
        info!(session = %self.id, "Close requested");
        self.emit(PlayerOutput::Close);
    }

    /// The mounting side changed which episode is current
    pub async fn set_current_episode_override(&mut self, episode: Option<Episode>) {
        self.navigator.set_override(episode);
        self.sync_source().await;
        self.update_continuation().await;
        self.settle().await;
    }

    pub async fn set_next_suggestion(&mut self, suggestion: Option<MediaItem>) {
        self.next_suggestion = suggestion;
        self.update_continuation().await;
        self.settle().await;
    }

    /// Tear the player down: timers are cancelled and the transport listener
    /// is detached before the session is dropped.
    pub fn unmount(mut self) {
        info!(session = %self.id, "Unmounting player");
        self.ui.teardown();
        if let Some(listener) = self.listener.take() {
            listener.remove();
        }
        self.engine.pause();
    }

    fn emit(&self, output: PlayerOutput) {
        if self.output.send(output).is_err() {
            debug!(session = %self.id, "Player output receiver dropped");
        }
    }

    fn sync_play_state(&mut self) {
        let playing = self.engine.is_playing();
        if playing != self.was_playing {
            self.was_playing = playing;
            debug!(session = %self.id, "Playback {}", if playing { "started" } else { "paused" });
            self.ui.on_play_state_changed(playing);
        }
    }

    fn resolve_source(&self) -> Option<String> {
        self.media
            .video_source(self.navigator.current_episode())
            .map(str::to_string)
    }

    async fn sync_source(&mut self) {
        if self.resolve_source() != self.source {
            self.load_source().await;
        }
    }

    /// Attach whatever source the current episode resolves to. Overlays and
    /// queued notifications belong to the previous source and are dropped.
    async fn load_source(&mut self) {
        let source = self.resolve_source();

        // Notifications still queued belong to the old source
        while self.media_events.try_recv().is_ok() {}
        self.ui.set_continuation_overlay(ContinuationOverlay::Hidden);

        match source.as_deref() {
            Some(url) => {
                self.engine.attach_source(url);
                self.sync_play_state();
                if self.config.autoplay {
                    self.engine.play().await;
                    self.sync_play_state();
                }
            }
            None => {
                warn!(session = %self.id, "'{}' has no playable source", self.media.title());
                self.engine.fail(PlaybackError::NoSource);
                self.sync_play_state();
            }
        }
        self.source = source;
    }

    async fn advance_episode(&mut self) -> bool {
        let Some(next) = self.navigator.advance().cloned() else {
            debug!(session = %self.id, "No next episode to advance to");
            return false;
        };
        info!(session = %self.id, "Advancing to {} '{}'", next.tag(), next.title);
        self.emit(PlayerOutput::EpisodeChanged(next));
        self.load_source().await;
        true
    }

    async fn update_continuation(&mut self) {
        let state = self.engine.state();
        let input = ContinuationInput {
            current_time: state.current_time,
            duration: state.duration,
            has_next_episode: self.navigator.next_episode().is_some(),
            has_next_suggestion: self.next_suggestion.is_some(),
        };
        let decision = self.orchestrator.evaluate(&input);

        let previous = self.ui.state().continuation;
        if previous != decision.overlay {
            debug!(session = %self.id, "Continuation overlay {:?} -> {:?}", previous, decision.overlay);
            self.ui.set_continuation_overlay(decision.overlay);
        }

        // The new source starts with an unknown duration, so this fires once
        if decision.advance && self.source.is_some() {
            self.advance_episode().await;
        }
    }
}
