use async_trait::async_trait;
use tokio::sync::mpsc;

use super::listeners::ListenerHandle;
use super::types::{FullscreenApi, MediaEvent, TimeRange};

/// The platform media element the engine drives. Implementations report
/// progress through listeners rather than being polled.
#[async_trait]
pub trait MediaElement: Send + Sync {
    fn set_source(&self, url: &str);
    fn source(&self) -> Option<String>;
    /// Resolves once the transport has accepted the request; rejection carries
    /// the transport's reason.
    async fn play(&self) -> Result<(), String>;
    fn pause(&self);
    fn is_paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// NaN until metadata is available
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn set_playback_rate(&self, rate: f64);
    fn buffered(&self) -> Vec<TimeRange>;
    fn add_listener(&self, sender: mpsc::UnboundedSender<MediaEvent>) -> ListenerHandle;
}

/// Fullscreen support of the container hosting the video surface
#[async_trait]
pub trait FullscreenHost: Send + Sync {
    /// Whether some element currently owns fullscreen
    fn is_active(&self) -> bool;
    async fn request(&self, api: FullscreenApi) -> Result<(), String>;
    async fn exit(&self, api: FullscreenApi) -> Result<(), String>;
}
