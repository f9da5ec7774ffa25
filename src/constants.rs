// Player timing defaults. Config values override these; see config.rs.

/// Inactivity before the playback controls hide (desktop pointer)
pub const CONTROLS_TIMEOUT_MS: u64 = 3000;
/// Inactivity before the playback controls hide (touch devices)
pub const TOUCH_CONTROLS_TIMEOUT_MS: u64 = 3000;
/// Pause duration before the synopsis overlay appears
pub const MEDIA_INFO_DELAY_MS: u64 = 6000;
/// Branding animation length, followed by its fade-out
pub const INTRO_DURATION_MS: u64 = 2500;
pub const INTRO_FADE_MS: u64 = 500;

/// Remaining seconds at which the next-episode preview appears
pub const PREVIEW_WINDOW_SECS: f64 = 15.0;

pub const SEEK_STEP_SECS: f64 = 10.0;
pub const VOLUME_STEP: f64 = 0.1;

pub const CATALOG_CACHE_TTL_SECS: u64 = 300;
pub const SIMILAR_MEDIA_LIMIT: usize = 10;
