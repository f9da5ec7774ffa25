//! In-memory media transport.
//!
//! Drives the player without a real decoder: the caller advances the clock
//! and the element reports progress to its listeners like a browser video
//! element would. Used by the `simulate` command and by tests.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::trace;

use super::listeners::{ListenerHandle, ListenerRegistry};
use super::traits::{FullscreenHost, MediaElement};
use super::types::{FullscreenApi, MediaEvent, TimeRange};

/// Seconds of media buffered ahead of the play head
const READ_AHEAD_SECS: f64 = 30.0;

struct MediaInner {
    source: Option<String>,
    current_time: f64,
    duration: f64,
    paused: bool,
    volume: f64,
    playback_rate: f64,
    buffered_end: f64,
    autoplay_blocked: bool,
}

pub struct SimulatedMedia {
    inner: Mutex<MediaInner>,
    listeners: ListenerRegistry,
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MediaInner {
                source: None,
                current_time: 0.0,
                duration: f64::NAN,
                paused: true,
                volume: 1.0,
                playback_rate: 1.0,
                buffered_end: 0.0,
                autoplay_blocked: false,
            }),
            listeners: ListenerRegistry::new(),
        }
    }

    fn inner(&self) -> MutexGuard<'_, MediaInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Report the source length, as a `durationchange` would
    pub fn load_metadata(&self, duration: f64) {
        self.inner().duration = duration;
        self.listeners.emit(MediaEvent::DurationChange(duration));
    }

    /// Make subsequent `play()` calls fail like an autoplay policy would
    pub fn block_autoplay(&self, blocked: bool) {
        self.inner().autoplay_blocked = blocked;
    }

    /// Move the play head forward by `seconds` of wall time. Returns true when
    /// the source reached its end during this step.
    pub fn advance(&self, seconds: f64) -> bool {
        let (position, buffered_end, ended) = {
            let mut inner = self.inner();
            if inner.paused || inner.source.is_none() {
                return false;
            }
            let end = if inner.duration.is_finite() { inner.duration } else { f64::MAX };
            inner.current_time = (inner.current_time + seconds * inner.playback_rate).min(end);
            inner.buffered_end = (inner.current_time + READ_AHEAD_SECS).min(end).max(inner.buffered_end);
            let ended = inner.current_time >= end;
            if ended {
                inner.paused = true;
            }
            (inner.current_time, inner.buffered_end, ended)
        };

        trace!("Simulated play head at {:.2}s", position);
        self.listeners.emit(MediaEvent::TimeUpdate(position));
        self.listeners
            .emit(MediaEvent::Progress(vec![TimeRange::new(0.0, buffered_end)]));
        if ended {
            self.listeners.emit(MediaEvent::Ended);
        }
        ended
    }

    /// Fail the current source, as a decode or network error would
    pub fn fail(&self, message: &str) {
        self.inner().paused = true;
        self.listeners.emit(MediaEvent::Error(message.to_string()));
    }

    pub fn playback_rate(&self) -> f64 {
        self.inner().playback_rate
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait]
impl MediaElement for SimulatedMedia {
    fn set_source(&self, url: &str) {
        let mut inner = self.inner();
        inner.source = Some(url.to_string());
        inner.current_time = 0.0;
        inner.duration = f64::NAN;
        inner.buffered_end = 0.0;
        inner.paused = true;
    }

    fn source(&self) -> Option<String> {
        self.inner().source.clone()
    }

    async fn play(&self) -> Result<(), String> {
        {
            let mut inner = self.inner();
            if inner.autoplay_blocked {
                return Err("play() was blocked by the autoplay policy".to_string());
            }
            if inner.source.is_none() {
                return Err("no source loaded".to_string());
            }
            inner.paused = false;
        }
        self.listeners.emit(MediaEvent::Playing);
        Ok(())
    }

    fn pause(&self) {
        let was_playing = {
            let mut inner = self.inner();
            let was_playing = !inner.paused;
            inner.paused = true;
            was_playing
        };
        if was_playing {
            self.listeners.emit(MediaEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.inner().paused
    }

    fn current_time(&self) -> f64 {
        self.inner().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.inner().current_time = seconds;
        self.listeners.emit(MediaEvent::TimeUpdate(seconds));
    }

    fn duration(&self) -> f64 {
        self.inner().duration
    }

    fn volume(&self) -> f64 {
        self.inner().volume
    }

    fn set_volume(&self, volume: f64) {
        self.inner().volume = volume;
    }

    fn set_playback_rate(&self, rate: f64) {
        self.inner().playback_rate = rate;
    }

    fn buffered(&self) -> Vec<TimeRange> {
        let end = self.inner().buffered_end;
        if end > 0.0 { vec![TimeRange::new(0.0, end)] } else { Vec::new() }
    }

    fn add_listener(&self, sender: mpsc::UnboundedSender<MediaEvent>) -> ListenerHandle {
        self.listeners.add(sender)
    }
}

/// Fullscreen host that only honours the listed entry points
pub struct SimulatedFullscreen {
    supported: Vec<FullscreenApi>,
    active: Mutex<bool>,
    attempts: Mutex<Vec<FullscreenApi>>,
}

impl Default for SimulatedFullscreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedFullscreen {
    pub fn new() -> Self {
        Self::with_supported(&FullscreenApi::FALLBACK_ORDER)
    }

    pub fn with_supported(supported: &[FullscreenApi]) -> Self {
        Self {
            supported: supported.to_vec(),
            active: Mutex::new(false),
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every entry point tried so far, in order
    pub fn attempts(&self) -> Vec<FullscreenApi> {
        self.attempts
            .lock()
            .map(|attempts| attempts.clone())
            .unwrap_or_default()
    }

    fn attempt(&self, api: FullscreenApi, enter: bool) -> Result<(), String> {
        if let Ok(mut attempts) = self.attempts.lock() {
            attempts.push(api);
        }
        if !self.supported.contains(&api) {
            return Err(format!("{:?} fullscreen API not available", api));
        }
        if let Ok(mut active) = self.active.lock() {
            *active = enter;
        }
        Ok(())
    }
}

#[async_trait]
impl FullscreenHost for SimulatedFullscreen {
    fn is_active(&self) -> bool {
        self.active.lock().map(|active| *active).unwrap_or(false)
    }

    async fn request(&self, api: FullscreenApi) -> Result<(), String> {
        self.attempt(api, true)
    }

    async fn exit(&self, api: FullscreenApi) -> Result<(), String> {
        self.attempt(api, false)
    }
}
