pub mod continuation;
pub mod controls_visibility;
pub mod engine;
pub mod episode_navigation;
pub mod keyboard;
pub mod listeners;
pub mod session;
pub mod simulated;
pub mod timers;
pub mod traits;
pub mod types;
pub mod view;

pub use continuation::{
    ContinuationDecision, ContinuationInput, ContinuationOrchestrator, ContinuationOverlay,
    ContinuationPolicy,
};
pub use controls_visibility::{UiVisibilityController, UiVisibilityState};
pub use engine::PlaybackEngine;
pub use episode_navigation::EpisodeNavigator;
pub use keyboard::KeyAction;
pub use listeners::{ListenerHandle, ListenerRegistry};
pub use session::{PlayerInput, PlayerOutput, PlayerProps, PlayerSession};
pub use simulated::{SimulatedFullscreen, SimulatedMedia};
pub use timers::{TimerKind, TimerSlots, TimerTick};
pub use traits::{FullscreenHost, MediaElement};
pub use types::{FullscreenApi, InteractionKind, MediaEvent, PlaybackState, TimeRange};
pub use view::PlayerView;

/// Clock label for a position in seconds: `H:MM:SS` from one hour up,
/// `M:SS` below. Fractions are truncated; unknown values read `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total_secs = seconds.trunc() as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
