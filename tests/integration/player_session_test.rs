#[cfg(test)]
mod player_session_tests {
    use crate::common::TestPlayer;
    use crate::common::fixtures::Fixtures;
    use reelflix::models::EpisodeId;
    use reelflix::navigation::Route;
    use reelflix::player::view::{PlayIcon, handles};
    use reelflix::player::{
        ContinuationOverlay, ContinuationPolicy, InteractionKind, PlayerOutput, PlayerProps,
        PlayerView,
    };
    use std::time::Duration;

    fn series_at(episode_id: u64) -> PlayerProps {
        let series = Fixtures::two_season_series();
        let episode = Fixtures::episode(&series, episode_id);
        PlayerProps::new(series)
            .with_episode(episode)
            .with_suggestion(Fixtures::other_series())
    }

    #[tokio::test]
    async fn test_preview_then_auto_advance_then_suggestion() {
        let mut player = TestPlayer::mount(series_at(102)).await;
        player.load(100.0).await;

        player.play_for(90.0).await;
        let view = player.session.view();
        let playback = view.as_playback().unwrap();
        let preview = playback.next_episode_preview.as_ref().unwrap();
        assert_eq!(preview.tag, "T2 E1");
        assert_eq!(preview.remaining_secs, 10);
        assert!(playback.next_suggestion.is_none());

        player.play_for(10.0).await;
        let outputs = player.drain_outputs();
        assert_eq!(outputs.len(), 1);
        assert!(matches!(
            &outputs[0],
            PlayerOutput::EpisodeChanged(episode) if episode.id == EpisodeId::new(201)
        ));
        assert_eq!(player.session.source(), Some("https://cdn.test/ep201.mp4"));
        assert_eq!(player.session.ui_state().continuation, ContinuationOverlay::Hidden);
        assert_eq!(player.session.playback().current_time, 0.0);
        assert!(player.session.playback().is_playing);

        // Last episode: the suggestion takes over
        player.load(100.0).await;
        player.play_for(100.0).await;
        let view = player.session.view();
        let playback = view.as_playback().unwrap();
        assert!(playback.next_episode_preview.is_none());
        assert_eq!(
            playback.next_suggestion.as_ref().map(|s| s.title.as_str()),
            Some("Tidewater")
        );
        assert!(player.session.is_last_episode());

        assert!(player.session.play_next_suggestion());
        let outputs = player.drain_outputs();
        let route = Route::after_output(player.session.media(), &outputs[0]);
        assert_eq!(route.to_string(), "/player/11/serie/301");
    }

    #[tokio::test]
    async fn test_auto_advance_fires_once_per_episode() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.load(100.0).await;
        player.play_for(100.0).await;

        // The next source has no metadata yet, so its end is unknown
        player.session.settle().await;
        player.play_for(50.0).await;

        let outputs = player.drain_outputs();
        assert!(matches!(
            &outputs[..],
            [PlayerOutput::EpisodeChanged(episode)] if episode.id == EpisodeId::new(102)
        ));
        assert_eq!(player.session.source(), Some("https://cdn.test/ep102.mp4"));
        assert_eq!(player.session.ui_state().continuation, ContinuationOverlay::Hidden);
    }

    #[tokio::test]
    async fn test_preview_only_waits_for_viewer() {
        let mut player =
            TestPlayer::mount_with_policy(series_at(101), ContinuationPolicy::PreviewOnly).await;
        player.load(100.0).await;
        player.play_for(100.0).await;

        assert!(player.drain_outputs().is_empty());
        assert!(!player.session.playback().is_playing);
        assert_eq!(
            player.session.ui_state().continuation,
            ContinuationOverlay::EpisodePreview { remaining_secs: 0 }
        );
        // A pending next episode outranks the suggestion
        let view = player.session.view();
        let playback = view.as_playback().unwrap();
        assert_eq!(playback.next_episode_preview.as_ref().map(|p| p.remaining_secs), Some(0));
        assert!(playback.next_suggestion.is_none());
        assert!(!player.session.ui_state().show_next_suggestion());

        assert!(player.session.play_next_episode().await);
        let outputs = player.drain_outputs();
        assert!(matches!(
            &outputs[..],
            [PlayerOutput::EpisodeChanged(episode)] if episode.id == EpisodeId::new(102)
        ));
        assert_eq!(player.session.ui_state().continuation, ContinuationOverlay::Hidden);
    }

    #[tokio::test]
    async fn test_seeking_out_of_window_hides_preview() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.load(100.0).await;
        player.play_for(95.0).await;
        assert!(player.session.ui_state().show_next_episode_preview());

        player.session.seek(10.0).await;
        assert_eq!(player.session.ui_state().continuation, ContinuationOverlay::Hidden);

        player.session.click_progress_bar(0.9).await;
        assert!(player.session.ui_state().show_next_episode_preview());
    }

    #[tokio::test]
    async fn test_overlays_never_overlap() {
        let mut player = TestPlayer::mount(series_at(201)).await;
        player.load(60.0).await;

        for _ in 0..20 {
            player.play_for(4.0).await;
            let state = player.session.ui_state();
            assert!(!(state.show_next_episode_preview() && state.show_next_suggestion()));
        }
        assert!(player.session.ui_state().show_next_suggestion());
    }

    #[tokio::test]
    async fn test_movie_without_suggestion_ends_quietly() {
        let mut player = TestPlayer::mount(PlayerProps::new(Fixtures::movie())).await;
        player.load(30.0).await;
        player.play_for(30.0).await;

        assert_eq!(player.session.ui_state().continuation, ContinuationOverlay::Hidden);
        assert!(player.drain_outputs().is_empty());
        assert!(!player.session.play_next_suggestion());
    }

    #[tokio::test]
    async fn test_progress_bar_and_time_displays() {
        let mut player = TestPlayer::mount(PlayerProps::new(Fixtures::movie())).await;
        player.load(200.0).await;
        player.session.click_progress_bar(0.25).await;

        let view = player.session.view();
        let playback = view.as_playback().unwrap();
        assert_eq!(playback.time_display, "0:50");
        assert_eq!(playback.duration_display, "3:20");
        assert_eq!(playback.progress, 0.25);
        assert_eq!(playback.play_icon, PlayIcon::Pause);
        assert_eq!(playback.container, handles::PLAYER_CONTAINER);

        player.session.click_progress_bar(1.5).await;
        assert_eq!(player.session.playback().current_time, 200.0);
    }

    #[tokio::test]
    async fn test_episode_selection_and_override() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.load(100.0).await;
        player.play_for(90.0).await;

        assert!(player.session.select_episode(EpisodeId::new(201)).await);
        assert_eq!(player.session.source(), Some("https://cdn.test/ep201.mp4"));
        assert_eq!(player.session.ui_state().continuation, ContinuationOverlay::Hidden);
        assert!(player.session.next_episode().is_none());
        assert!(matches!(
            &player.drain_outputs()[..],
            [PlayerOutput::EpisodeChanged(episode)] if episode.id == EpisodeId::new(201)
        ));

        let series = Fixtures::two_season_series();
        player
            .session
            .set_current_episode_override(Some(Fixtures::episode(&series, 102)))
            .await;
        assert_eq!(player.session.source(), Some("https://cdn.test/ep102.mp4"));
        assert_eq!(
            player.session.next_episode().map(|episode| episode.id),
            Some(EpisodeId::new(201))
        );
        assert!(player.drain_outputs().is_empty());

        assert!(!player.session.select_episode(EpisodeId::new(999)).await);
    }

    #[tokio::test]
    async fn test_preferences_survive_episode_change() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.session.set_volume(0.3);
        player.session.toggle_fullscreen().await;
        player.session.set_playback_rate(1.25);

        player.session.play_next_episode().await;
        let playback = player.session.playback();
        assert_eq!(playback.volume, 0.3);
        assert!(!playback.is_muted);
        assert!(playback.is_fullscreen);
        assert_eq!(playback.playback_rate, 1.25);
        assert_eq!(player.media.playback_rate(), 1.25);
        assert!(!player.fullscreen.attempts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_controls_auto_hide_while_playing() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.load(1000.0).await;

        tokio::time::sleep(Duration::from_millis(3100)).await;
        player.session.settle().await;
        assert!(!player.session.ui_state().show_controls);
        assert!(!player.session.ui_state().show_intro);
        assert!(!player.session.ui_state().show_center_button);

        player.session.interact(InteractionKind::PointerMove);
        assert!(player.session.ui_state().show_controls);

        player.session.toggle_episode_list();
        tokio::time::sleep(Duration::from_secs(10)).await;
        player.session.settle().await;
        assert!(player.session.ui_state().show_controls);

        let view = player.session.view();
        let rows = view.as_playback().unwrap().episode_list.clone().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].handle, "episode-item-101");
        assert_eq!(rows[0].tag, "T1 E1");
        assert!(rows[0].is_current);
        assert!(!rows[2].is_current);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_shows_media_info_after_delay() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.load(1000.0).await;
        player.session.pause().await;

        tokio::time::sleep(Duration::from_millis(5900)).await;
        player.session.settle().await;
        assert!(player.session.ui_state().show_controls);
        assert!(!player.session.ui_state().show_media_info);

        tokio::time::sleep(Duration::from_millis(200)).await;
        player.session.settle().await;
        let view = player.session.view();
        let info = view.as_playback().unwrap().media_info.clone().unwrap();
        assert_eq!(info.title, "Arrival");
        assert_eq!(info.synopsis, "The keeper arrives");

        player.session.play().await;
        assert!(!player.session.ui_state().show_media_info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scrubbing_keeps_controls_visible() {
        let mut player = TestPlayer::mount(PlayerProps::new(Fixtures::movie())).await;
        player.load(600.0).await;

        player.session.begin_scrub();
        player.session.scrub_to(0.5).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        player.session.settle().await;
        assert!(player.session.ui_state().show_controls);

        player.session.end_scrub();
        tokio::time::sleep(Duration::from_millis(3100)).await;
        player.session.settle().await;
        assert!(!player.session.ui_state().show_controls);
        assert_eq!(player.session.playback().current_time, 300.0);
    }

    #[tokio::test]
    async fn test_transport_error_and_close() {
        let mut player = TestPlayer::mount(series_at(101)).await;
        player.load(100.0).await;
        player.media.fail("segment 4 missing");
        player.session.settle().await;

        let PlayerView::Error(error) = player.session.view() else {
            panic!("expected the error view");
        };
        assert_eq!(error.heading, "Error playing video");
        assert!(error.message.contains("segment 4 missing"));

        player.session.close();
        let outputs = player.drain_outputs();
        assert_eq!(outputs, vec![PlayerOutput::Close]);
        let route = Route::after_output(player.session.media(), &outputs[0]);
        assert_eq!(route.to_string(), "/media/serie/10");
    }

    #[tokio::test]
    async fn test_unmount_releases_transport() {
        let player = TestPlayer::mount(series_at(101)).await;
        assert_eq!(player.media.listener_count(), 1);
        let media = player.media.clone();
        player.session.unmount();
        assert_eq!(media.listener_count(), 0);
    }
}
