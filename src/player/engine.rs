use std::sync::Arc;
use tracing::{debug, info, warn};

use super::traits::{FullscreenHost, MediaElement};
use super::types::{FullscreenApi, MediaEvent, PlaybackState, known_duration};
use crate::utils::PlaybackError;

/// Single source of truth for the transport state of one media element.
///
/// Every mutation goes through the element first and mirrors the result into
/// [`PlaybackState`]; progress reported by the element arrives through
/// [`PlaybackEngine::handle_event`].
pub struct PlaybackEngine {
    element: Arc<dyn MediaElement>,
    fullscreen: Arc<dyn FullscreenHost>,
    state: PlaybackState,
    /// Last non-zero volume, restored when un-muting
    remembered_volume: f64,
}

impl PlaybackEngine {
    pub fn new(element: Arc<dyn MediaElement>, fullscreen: Arc<dyn FullscreenHost>) -> Self {
        let volume = element.volume().clamp(0.0, 1.0);
        let state = PlaybackState {
            volume,
            is_muted: volume == 0.0,
            is_fullscreen: fullscreen.is_active(),
            ..PlaybackState::default()
        };

        Self {
            element,
            fullscreen,
            state,
            remembered_volume: if volume > 0.0 { volume } else { 1.0 },
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn element(&self) -> &Arc<dyn MediaElement> {
        &self.element
    }

    /// Point the element at a new source. Time, duration, buffering and errors
    /// start over; output preferences are re-applied to the element.
    pub fn attach_source(&mut self, url: &str) {
        info!("Attaching source {}", url);
        self.element.pause();
        self.element.set_source(url);
        self.state = self.state.for_new_source();
        self.element.set_volume(self.state.effective_volume());
        self.element.set_playback_rate(self.state.playback_rate);
    }

    /// Ask the element to start. A rejection is recorded as a recoverable
    /// error; the resulting play state is read back from the element.
    pub async fn play(&mut self) {
        if let Some(error) = &self.state.last_error
            && error.is_terminal()
        {
            debug!("Ignoring play request, source failed: {}", error);
            return;
        }

        match self.element.play().await {
            Ok(()) => {
                self.state.is_playing = !self.element.is_paused();
                if matches!(
                    self.state.last_error,
                    Some(PlaybackError::StartRejected(_)) | Some(PlaybackError::Fullscreen(_))
                ) {
                    self.state.last_error = None;
                }
            }
            Err(reason) => {
                warn!("Playback start rejected: {}", reason);
                self.state.is_playing = false;
                self.state.last_error = Some(PlaybackError::StartRejected(reason));
            }
        }
    }

    pub fn pause(&mut self) {
        self.element.pause();
        self.state.is_playing = false;
    }

    pub async fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play().await;
        }
    }

    /// Jump to `seconds`, clamped to the known length of the source
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let upper = self.state.duration.unwrap_or(0.0);
        let target = seconds.min(upper).max(0.0);
        debug!("Seeking to {:.2}s", target);
        self.element.set_current_time(target);
        self.state.current_time = target;
    }

    pub fn seek_relative(&mut self, offset: f64) {
        let position = self.element.current_time();
        self.seek(position + offset);
    }

    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.element.set_volume(volume);
        if volume > 0.0 {
            self.remembered_volume = volume;
        }
        self.state.volume = volume;
        self.state.is_muted = volume == 0.0;
    }

    /// Raise the volume by `step`, capped at 100%
    pub fn volume_up(&mut self, step: f64) {
        let base = if self.state.is_muted { 0.0 } else { self.state.volume };
        self.set_volume(base + step);
    }

    /// Lower the volume by `step`, floored at 0%
    pub fn volume_down(&mut self, step: f64) {
        self.set_volume(self.state.volume - step);
    }

    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            let restored = self.remembered_volume;
            self.element.set_volume(restored);
            self.state.volume = restored;
            self.state.is_muted = false;
        } else {
            if self.state.volume > 0.0 {
                self.remembered_volume = self.state.volume;
            }
            self.element.set_volume(0.0);
            self.state.volume = 0.0;
            self.state.is_muted = true;
        }
    }

    /// Enter or leave fullscreen, walking the vendor entry points until one
    /// succeeds. Only a failure of all of them is reported.
    pub async fn toggle_fullscreen(&mut self) {
        let leaving = self.fullscreen.is_active();
        let mut last_failure = String::new();

        for api in FullscreenApi::FALLBACK_ORDER {
            let result = if leaving {
                self.fullscreen.exit(api).await
            } else {
                self.fullscreen.request(api).await
            };

            match result {
                Ok(()) => {
                    debug!("Fullscreen {} via {:?}", if leaving { "exited" } else { "entered" }, api);
                    self.state.is_fullscreen = !leaving;
                    return;
                }
                Err(reason) => {
                    debug!("Fullscreen via {:?} failed: {}", api, reason);
                    last_failure = reason;
                }
            }
        }

        let message = if leaving {
            format!("Error leaving fullscreen: {}", last_failure)
        } else {
            format!("Error entering fullscreen: {}", last_failure)
        };
        warn!("{}", message);
        // A failed source stays failed
        if self.state.last_error.as_ref().is_some_and(PlaybackError::is_terminal) {
            return;
        }
        self.state.last_error = Some(PlaybackError::Fullscreen(message));
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
        self.state.playback_rate = rate;
    }

    /// Record a failure that did not come from the transport itself
    pub fn fail(&mut self, error: PlaybackError) {
        self.element.pause();
        self.state.is_playing = false;
        self.state.last_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.state.last_error = None;
    }

    /// Apply a transport notification. Returns true when time or duration
    /// changed, i.e. when continuation needs re-evaluating.
    pub fn handle_event(&mut self, event: MediaEvent) -> bool {
        match event {
            MediaEvent::TimeUpdate(position) => {
                self.state.current_time = if position.is_finite() { position.max(0.0) } else { 0.0 };
                true
            }
            MediaEvent::DurationChange(duration) => {
                self.state.duration = known_duration(duration);
                debug!("Duration now {:?}", self.state.duration);
                true
            }
            MediaEvent::Progress(ranges) => {
                self.state.buffered = ranges.last().map(|range| range.end).unwrap_or(0.0);
                false
            }
            MediaEvent::Playing => {
                self.state.is_playing = true;
                false
            }
            MediaEvent::Paused => {
                self.state.is_playing = false;
                false
            }
            MediaEvent::Error(message) => {
                warn!("Transport error: {}", message);
                self.state.is_playing = false;
                self.state.last_error = Some(PlaybackError::Transport(message));
                false
            }
            MediaEvent::Ended => {
                debug!("Source ended");
                self.state.is_playing = false;
                false
            }
        }
    }
}
