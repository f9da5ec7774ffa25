use serde::{Deserialize, Serialize};

/// What happens when a series episode plays to its end and a next episode exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContinuationPolicy {
    /// Start the next episode on its own
    #[default]
    AutoAdvance,
    /// Keep the preview up until the user picks the next episode
    PreviewOnly,
}

/// End-of-content overlay. At most one is visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContinuationOverlay {
    #[default]
    Hidden,
    /// Next episode countdown, in whole seconds left of the current one
    EpisodePreview { remaining_secs: u64 },
    /// Another title is offered after the content ended
    Suggestion,
}

/// Everything a continuation decision depends on, sampled at one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuationInput {
    pub current_time: f64,
    pub duration: Option<f64>,
    pub has_next_episode: bool,
    pub has_next_suggestion: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContinuationDecision {
    pub overlay: ContinuationOverlay,
    /// The next episode should start now
    pub advance: bool,
}

impl ContinuationDecision {
    fn overlay(overlay: ContinuationOverlay) -> Self {
        Self {
            overlay,
            advance: false,
        }
    }
}

/// Decides end-of-content overlays from a single timing sample.
///
/// Holds no state between ticks, so seeking backwards out of the window
/// simply yields a hidden overlay on the next sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuationOrchestrator {
    policy: ContinuationPolicy,
    preview_window: f64,
}

impl ContinuationOrchestrator {
    pub fn new(policy: ContinuationPolicy, preview_window_secs: f64) -> Self {
        Self {
            policy,
            preview_window: preview_window_secs,
        }
    }

    pub fn policy(&self) -> ContinuationPolicy {
        self.policy
    }

    pub fn evaluate(&self, input: &ContinuationInput) -> ContinuationDecision {
        let Some(duration) = input.duration.filter(|d| d.is_finite() && *d > 0.0) else {
            return ContinuationDecision::default();
        };

        let remaining = duration - input.current_time;

        if input.has_next_episode {
            if remaining > 0.0 && remaining <= self.preview_window {
                return ContinuationDecision::overlay(ContinuationOverlay::EpisodePreview {
                    remaining_secs: remaining.floor() as u64,
                });
            }
            if remaining <= 0.0 {
                return ContinuationDecision {
                    overlay: ContinuationOverlay::EpisodePreview { remaining_secs: 0 },
                    advance: self.policy == ContinuationPolicy::AutoAdvance,
                };
            }
            return ContinuationDecision::default();
        }

        if remaining <= 0.0 && input.current_time > 0.0 && input.has_next_suggestion {
            return ContinuationDecision::overlay(ContinuationOverlay::Suggestion);
        }

        ContinuationDecision::default()
    }
}
