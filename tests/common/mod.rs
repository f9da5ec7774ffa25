pub mod builders;
pub mod fixtures;

use reelflix::config::PlayerConfig;
use reelflix::player::{
    ContinuationPolicy, PlayerOutput, PlayerProps, PlayerSession, SimulatedFullscreen,
    SimulatedMedia,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A mounted player on the simulated transport, plus everything a test
/// needs to drive and observe it
pub struct TestPlayer {
    pub session: PlayerSession,
    pub media: Arc<SimulatedMedia>,
    pub fullscreen: Arc<SimulatedFullscreen>,
    pub outputs: mpsc::UnboundedReceiver<PlayerOutput>,
}

impl TestPlayer {
    pub async fn mount(props: PlayerProps) -> Self {
        Self::mount_with(props, PlayerConfig::default()).await
    }

    pub async fn mount_with_policy(props: PlayerProps, policy: ContinuationPolicy) -> Self {
        let config = PlayerConfig {
            continuation_policy: policy,
            ..PlayerConfig::default()
        };
        Self::mount_with(props, config).await
    }

    pub async fn mount_with(props: PlayerProps, config: PlayerConfig) -> Self {
        let media = Arc::new(SimulatedMedia::new());
        let fullscreen = Arc::new(SimulatedFullscreen::new());
        let (tx, outputs) = mpsc::unbounded_channel();
        let session =
            PlayerSession::mount(props, media.clone(), fullscreen.clone(), config, tx).await;

        Self {
            session,
            media,
            fullscreen,
            outputs,
        }
    }

    /// Report metadata for the current source and apply it
    pub async fn load(&mut self, duration: f64) {
        self.media.load_metadata(duration);
        self.session.settle().await;
    }

    /// Play `seconds` further and apply the resulting notifications
    pub async fn play_for(&mut self, seconds: f64) {
        self.media.advance(seconds);
        self.session.settle().await;
    }

    pub fn drain_outputs(&mut self) -> Vec<PlayerOutput> {
        std::iter::from_fn(|| self.outputs.try_recv().ok()).collect()
    }
}
