#[cfg(test)]
mod catalog_routing_tests {
    use crate::common::TestPlayer;
    use crate::common::fixtures::Fixtures;
    use reelflix::catalog::{Catalog, CatalogCache};
    use reelflix::constants::SIMILAR_MEDIA_LIMIT;
    use reelflix::models::{MediaId, MediaKind};
    use reelflix::navigation::{Route, resolve_player};
    use reelflix::player::PlayerOutput;
    use std::time::Duration;

    #[tokio::test]
    async fn test_route_to_mounted_player_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, Fixtures::catalog_json()).unwrap();

        let cache = CatalogCache::new(&path, Duration::from_secs(300));
        let catalog = cache.get().await.unwrap();
        assert_eq!(catalog.len(), 4);

        let route: Route = "/player/10/serie/102".parse().unwrap();
        let props = resolve_player(&catalog, route).unwrap();
        assert_eq!(
            props.next_suggestion.as_ref().map(|item| item.id()),
            Some(MediaId::new(11))
        );

        let mut player = TestPlayer::mount(props).await;
        player.load(50.0).await;
        player.play_for(50.0).await;

        let outputs = player.drain_outputs();
        assert_eq!(outputs.len(), 1);
        let next = Route::after_output(player.session.media(), &outputs[0]);
        assert_eq!(next.to_string(), "/player/10/serie/201");

        // The router remounts on the new route
        let props = resolve_player(&catalog, next).unwrap();
        assert_eq!(props.current_episode.map(|episode| episode.title), Some("Return".into()));
    }

    #[test]
    fn test_similar_media_is_limited_and_same_kind() {
        let catalog = Catalog::from_json(&Fixtures::catalog_json()).unwrap();
        let movie = catalog.find(MediaKind::Movie, MediaId::new(1)).unwrap();

        let similar = catalog.similar_media(movie, SIMILAR_MEDIA_LIMIT);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].title(), "Dawn Run");
        assert!(catalog.similar_media(movie, 0).is_empty());
    }

    #[tokio::test]
    async fn test_movie_close_returns_to_detail_page() {
        let catalog = Catalog::from_json(&Fixtures::catalog_json()).unwrap();
        let props = resolve_player(&catalog, Route::PlayMovie { id: MediaId::new(2) }).unwrap();

        let mut player = TestPlayer::mount(props).await;
        assert!(player.session.handle_key("Escape").await);
        let outputs = player.drain_outputs();
        assert_eq!(outputs, vec![PlayerOutput::Close]);
        assert_eq!(
            Route::after_output(player.session.media(), &outputs[0]).to_string(),
            "/media/movie/2"
        );
    }
}
