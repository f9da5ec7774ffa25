/// Common types shared by the playback engine and its transports
use crate::utils::PlaybackError;

/// Transport state of the active source
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Seconds into the active source
    pub current_time: f64,
    /// `None` until the transport reports metadata
    pub duration: Option<f64>,
    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    /// End of the furthest buffered range, in seconds
    pub buffered: f64,
    pub playback_rate: f64,
    pub last_error: Option<PlaybackError>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
            buffered: 0.0,
            playback_rate: 1.0,
            last_error: None,
        }
    }
}

impl PlaybackState {
    /// State for a newly attached source. User preferences (volume, mute,
    /// fullscreen, rate) carry over; everything tied to the old source does not.
    pub fn for_new_source(&self) -> Self {
        Self {
            volume: self.volume,
            is_muted: self.is_muted,
            is_fullscreen: self.is_fullscreen,
            playback_rate: self.playback_rate,
            ..Self::default()
        }
    }

    /// Volume actually sent to the output
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Seconds left in the active source, if its length is known
    pub fn remaining(&self) -> Option<f64> {
        self.duration.map(|duration| duration - self.current_time)
    }

    pub fn progress_fraction(&self) -> f64 {
        fraction_of(self.current_time, self.duration)
    }

    pub fn buffered_fraction(&self) -> f64 {
        fraction_of(self.buffered, self.duration)
    }
}

fn fraction_of(value: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(duration) if duration > 0.0 => (value / duration).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Normalise a transport-reported duration: NaN, infinite and non-positive
/// values all mean "not known yet".
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

/// A contiguous buffered span reported by the transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Notifications pushed by a media transport to its listeners
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate(f64),
    DurationChange(f64),
    Progress(Vec<TimeRange>),
    Playing,
    Paused,
    Error(String),
    Ended,
}

/// Fullscreen entry points, tried in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenApi {
    pub const FALLBACK_ORDER: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Moz,
        FullscreenApi::Ms,
    ];
}

/// Raw user activity over the player surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    PointerMove,
    Touch,
    Key,
}
