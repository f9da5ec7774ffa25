use super::builders::*;
use reelflix::models::*;

pub struct Fixtures;

impl Fixtures {
    /// (S1,E1), (S1,E2), (S2,E1)
    pub fn two_season_series() -> MediaItem {
        MediaItemBuilder::series(10, "Lighthouse")
            .with_genres(&["Drama", "Mystery"])
            .with_episode(
                EpisodeBuilder::new(101, 1, 1)
                    .with_title("Arrival")
                    .with_synopsis("The keeper arrives")
                    .build(),
            )
            .with_episode(EpisodeBuilder::new(102, 1, 2).with_title("Fog").build())
            .with_episode(EpisodeBuilder::new(201, 2, 1).with_title("Return").build())
            .build()
    }

    pub fn other_series() -> MediaItem {
        MediaItemBuilder::series(11, "Tidewater")
            .with_genres(&["Mystery"])
            .with_rating(4.6)
            .with_episode(EpisodeBuilder::new(301, 1, 1).with_title("Low Tide").build())
            .build()
    }

    pub fn movie() -> MediaItem {
        MediaItemBuilder::movie(1, "Night Drive")
            .with_genres(&["Thriller"])
            .build()
    }

    pub fn other_movie() -> MediaItem {
        MediaItemBuilder::movie(2, "Dawn Run")
            .with_genres(&["Thriller"])
            .with_rating(4.4)
            .build()
    }

    pub fn episode(series: &MediaItem, id: u64) -> Episode {
        series
            .episodes()
            .iter()
            .find(|episode| episode.id == EpisodeId::new(id))
            .cloned()
            .unwrap_or_else(|| panic!("fixture has no episode {}", id))
    }

    pub fn catalog_json() -> String {
        let movies: Vec<Movie> = [Self::movie(), Self::other_movie()]
            .into_iter()
            .filter_map(|item| match item {
                MediaItem::Movie(movie) => Some(movie),
                MediaItem::Series(_) => None,
            })
            .collect();
        let series: Vec<Series> = [Self::two_season_series(), Self::other_series()]
            .into_iter()
            .filter_map(|item| match item {
                MediaItem::Series(series) => Some(series),
                MediaItem::Movie(_) => None,
            })
            .collect();

        serde_json::to_string_pretty(&reelflix::catalog::CatalogFile { movies, series })
            .unwrap_or_default()
    }
}
