mod identifiers;

pub use identifiers::{EpisodeId, MediaId};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the catalog a title belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Path segment used by the router (`/media/movie/3`, `/media/serie/7`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "serie",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Series => write!(f, "Series"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MediaId,
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
    /// Runtime in minutes
    #[serde(default)]
    pub duration: u32,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesStatus {
    #[serde(rename = "in-progress", alias = "Em andamento")]
    InProgress,
    #[serde(rename = "finished", alias = "Finalizada")]
    Finished,
    #[serde(rename = "cancelled", alias = "Cancelada")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: MediaId,
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
    /// Typical episode runtime in minutes
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub featured: bool,
    /// Episodes in (season, episode) order
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default, rename = "numberOfSeasons")]
    pub season_count: u32,
    pub status: SeriesStatus,
    #[serde(default, rename = "nextEpisodeDate")]
    pub next_episode_date: Option<NaiveDate>,
}

impl Series {
    /// Whether the episode list already follows (season, episode) order
    pub fn episodes_in_order(&self) -> bool {
        self.episodes
            .windows(2)
            .all(|pair| pair[0].order_key() <= pair[1].order_key())
    }

    pub fn first_episode(&self) -> Option<&Episode> {
        self.episodes.first()
    }

    pub fn episode(&self, id: EpisodeId) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
    /// Runtime in minutes
    #[serde(default)]
    pub duration: u32,
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub thumbnail: String,
    pub video_url: String,
}

impl Episode {
    pub fn order_key(&self) -> (u32, u32) {
        (self.season_number, self.episode_number)
    }

    /// Same (season, episode) slot, regardless of identifier
    pub fn same_slot(&self, other: &Episode) -> bool {
        self.order_key() == other.order_key()
    }

    /// Short label shown in the episode list, e.g. `T2 E5`
    pub fn tag(&self) -> String {
        format!("T{} E{}", self.season_number, self.episode_number)
    }
}

/// A catalog title: either a movie or a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MediaItem {
    #[serde(rename = "movie")]
    Movie(Movie),
    #[serde(rename = "serie", alias = "series")]
    Series(Series),
}

impl MediaItem {
    pub fn id(&self) -> MediaId {
        match self {
            MediaItem::Movie(movie) => movie.id,
            MediaItem::Series(series) => series.id,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Movie(_) => MediaKind::Movie,
            MediaItem::Series(_) => MediaKind::Series,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Movie(movie) => &movie.title,
            MediaItem::Series(series) => &series.title,
        }
    }

    pub fn synopsis(&self) -> &str {
        match self {
            MediaItem::Movie(movie) => &movie.synopsis,
            MediaItem::Series(series) => &series.synopsis,
        }
    }

    pub fn genres(&self) -> &[String] {
        match self {
            MediaItem::Movie(movie) => &movie.genres,
            MediaItem::Series(series) => &series.genres,
        }
    }

    pub fn rating(&self) -> f32 {
        match self {
            MediaItem::Movie(movie) => movie.rating,
            MediaItem::Series(series) => series.rating,
        }
    }

    pub fn release_year(&self) -> Option<u32> {
        match self {
            MediaItem::Movie(movie) => movie.release_year,
            MediaItem::Series(series) => series.release_year,
        }
    }

    pub fn thumbnail(&self) -> &str {
        match self {
            MediaItem::Movie(movie) => &movie.thumbnail,
            MediaItem::Series(series) => &series.thumbnail,
        }
    }

    pub fn background(&self) -> &str {
        match self {
            MediaItem::Movie(movie) => &movie.background,
            MediaItem::Series(series) => &series.background,
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            MediaItem::Series(series) => Some(series),
            MediaItem::Movie(_) => None,
        }
    }

    pub fn episodes(&self) -> &[Episode] {
        match self {
            MediaItem::Series(series) => &series.episodes,
            MediaItem::Movie(_) => &[],
        }
    }

    pub fn shares_genre_with(&self, other: &MediaItem) -> bool {
        self.genres()
            .iter()
            .any(|genre| other.genres().contains(genre))
    }

    /// Resolve the URI the player should load: the episode's source when one is
    /// selected, otherwise the movie's own source.
    pub fn video_source<'a>(&'a self, episode: Option<&'a Episode>) -> Option<&'a str> {
        if let Some(episode) = episode {
            return Some(episode.video_url.as_str());
        }
        match self {
            MediaItem::Movie(movie) => Some(movie.video_url.as_str()),
            MediaItem::Series(_) => None,
        }
    }
}

impl From<Movie> for MediaItem {
    fn from(movie: Movie) -> Self {
        MediaItem::Movie(movie)
    }
}

impl From<Series> for MediaItem {
    fn from(series: Series) -> Self {
        MediaItem::Series(series)
    }
}
