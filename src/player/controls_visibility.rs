use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use super::continuation::ContinuationOverlay;
use super::timers::{TimerKind, TimerSlots, TimerTick};
use super::types::InteractionKind;
use crate::config::PlayerConfig;

/// Transient chrome and overlay visibility of the player
#[derive(Debug, Clone, PartialEq)]
pub struct UiVisibilityState {
    pub show_controls: bool,
    pub show_episode_list: bool,
    pub show_center_button: bool,
    pub show_media_info: bool,
    pub show_intro: bool,
    /// End-of-content overlay. A single slot, so the episode preview and the
    /// next suggestion can never be visible together.
    pub continuation: ContinuationOverlay,
}

impl Default for UiVisibilityState {
    fn default() -> Self {
        Self {
            show_controls: true,
            show_episode_list: false,
            show_center_button: true,
            show_media_info: false,
            show_intro: true,
            continuation: ContinuationOverlay::Hidden,
        }
    }
}

impl UiVisibilityState {
    pub fn show_next_episode_preview(&self) -> bool {
        matches!(self.continuation, ContinuationOverlay::EpisodePreview { .. })
    }

    pub fn show_next_suggestion(&self) -> bool {
        matches!(self.continuation, ContinuationOverlay::Suggestion)
    }
}

/// Control visibility state machine.
///
/// Decisions that depend on playback always take the caller's current
/// `is_playing`, never a value captured when a timer was armed.
pub struct UiVisibilityController<M> {
    state: UiVisibilityState,
    user_interacting: bool,
    scrubbing: bool,
    controls_timeout: Duration,
    touch_controls_timeout: Duration,
    media_info_delay: Duration,
    timers: TimerSlots<M>,
}

impl<M> UiVisibilityController<M>
where
    M: From<TimerTick> + Send + 'static,
{
    pub fn new(config: &PlayerConfig, sender: mpsc::UnboundedSender<M>) -> Self {
        Self {
            state: UiVisibilityState::default(),
            user_interacting: false,
            scrubbing: false,
            controls_timeout: config.controls_timeout(),
            touch_controls_timeout: config.touch_controls_timeout(),
            media_info_delay: config.media_info_delay(),
            timers: TimerSlots::new(sender),
        }
    }

    /// Start the intro and sync with the initial play state
    pub fn mount(&mut self, intro: Duration, is_playing: bool) {
        self.timers.schedule(TimerKind::Intro, intro);
        self.on_play_state_changed(is_playing);
    }

    pub fn state(&self) -> &UiVisibilityState {
        &self.state
    }

    pub fn is_user_interacting(&self) -> bool {
        self.user_interacting
    }

    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }

    /// Pointer, touch or key activity over the player
    pub fn handle_interaction(&mut self, kind: InteractionKind, is_playing: bool) {
        self.timers.cancel(TimerKind::HideControls);
        self.user_interacting = true;
        self.state.show_controls = true;

        if is_playing && !self.state.show_episode_list && !self.scrubbing {
            let timeout = match kind {
                InteractionKind::Touch => self.touch_controls_timeout,
                InteractionKind::PointerMove | InteractionKind::Key => self.controls_timeout,
            };
            self.timers.schedule(TimerKind::HideControls, timeout);
        }
    }

    /// React to a play/pause transition of the engine
    pub fn on_play_state_changed(&mut self, is_playing: bool) {
        if is_playing {
            self.timers.cancel(TimerKind::MediaInfo);
            self.state.show_media_info = false;
            if !self.state.show_episode_list {
                self.handle_interaction(InteractionKind::PointerMove, true);
            }
        } else {
            self.timers.cancel(TimerKind::HideControls);
            self.state.show_controls = true;
            self.user_interacting = true;
            self.timers.schedule(TimerKind::MediaInfo, self.media_info_delay);
        }
    }

    /// Apply an elapsed timer. Returns true if the tick was current.
    pub fn handle_timer(&mut self, tick: TimerTick, is_playing: bool) -> bool {
        if !self.timers.claim(tick) {
            return false;
        }

        match tick.kind {
            TimerKind::HideControls => {
                if is_playing && !self.state.show_episode_list && !self.scrubbing {
                    debug!("Inactivity timeout, hiding controls");
                    self.state.show_controls = false;
                    self.user_interacting = false;
                }
            }
            TimerKind::MediaInfo => {
                if !is_playing {
                    debug!("Paused long enough, showing media info");
                    self.state.show_media_info = true;
                }
            }
            TimerKind::Intro => self.complete_intro(),
        }
        true
    }

    /// End the intro. Happens at most once per mount.
    pub fn complete_intro(&mut self) {
        if !self.state.show_intro {
            return;
        }
        self.timers.cancel(TimerKind::Intro);
        self.state.show_intro = false;
        self.state.show_center_button = false;
        self.state.show_media_info = false;
    }

    pub fn toggle_episode_list(&mut self) {
        self.state.show_episode_list = !self.state.show_episode_list;
        if self.state.show_episode_list {
            self.user_interacting = true;
            self.state.show_controls = true;
            self.timers.cancel(TimerKind::HideControls);
        }
    }

    /// Progress-bar drag started; controls stay up until it ends
    pub fn begin_scrub(&mut self) {
        self.scrubbing = true;
        self.state.show_controls = true;
        self.timers.cancel(TimerKind::HideControls);
    }

    pub fn end_scrub(&mut self, is_playing: bool) {
        self.scrubbing = false;
        self.handle_interaction(InteractionKind::PointerMove, is_playing);
    }

    pub fn set_continuation_overlay(&mut self, overlay: ContinuationOverlay) {
        if self.state.continuation != overlay {
            self.state.continuation = overlay;
        }
    }

    /// Cancel every pending timer
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }
}
