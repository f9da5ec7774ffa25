use reelflix::models::*;

pub struct EpisodeBuilder {
    id: u64,
    title: String,
    season: u32,
    number: u32,
    duration: u32,
    synopsis: String,
}

impl EpisodeBuilder {
    pub fn new(id: u64, season: u32, number: u32) -> Self {
        Self {
            id,
            title: format!("Episode {}", number),
            season,
            number,
            duration: 45,
            synopsis: String::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_synopsis(mut self, synopsis: &str) -> Self {
        self.synopsis = synopsis.to_string();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn build(self) -> Episode {
        Episode {
            id: EpisodeId::new(self.id),
            title: self.title,
            synopsis: self.synopsis,
            duration: self.duration,
            season_number: self.season,
            episode_number: self.number,
            release_date: None,
            thumbnail: format!("https://img.test/ep{}.jpg", self.id),
            video_url: format!("https://cdn.test/ep{}.mp4", self.id),
        }
    }
}

pub struct MediaItemBuilder {
    id: u64,
    title: String,
    genres: Vec<String>,
    rating: f32,
    synopsis: String,
    episodes: Vec<Episode>,
    kind: MediaKind,
}

impl MediaItemBuilder {
    pub fn movie(id: u64, title: &str) -> Self {
        Self::new(id, title, MediaKind::Movie)
    }

    pub fn series(id: u64, title: &str) -> Self {
        Self::new(id, title, MediaKind::Series)
    }

    fn new(id: u64, title: &str, kind: MediaKind) -> Self {
        Self {
            id,
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            rating: 4.0,
            synopsis: format!("About {}", title),
            episodes: Vec::new(),
            kind,
        }
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|genre| genre.to_string()).collect();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_episode(mut self, episode: Episode) -> Self {
        self.episodes.push(episode);
        self
    }

    pub fn build(self) -> MediaItem {
        match self.kind {
            MediaKind::Movie => MediaItem::Movie(Movie {
                id: MediaId::new(self.id),
                title: self.title,
                synopsis: self.synopsis,
                duration: 100,
                video_url: format!("https://cdn.test/movie{}.mp4", self.id),
                thumbnail: String::new(),
                background: String::new(),
                genres: self.genres,
                rating: self.rating,
                release_year: Some(2024),
                age_group: "12+".to_string(),
                featured: false,
            }),
            MediaKind::Series => {
                let season_count = self
                    .episodes
                    .iter()
                    .map(|episode| episode.season_number)
                    .max()
                    .unwrap_or(0);
                MediaItem::Series(Series {
                    id: MediaId::new(self.id),
                    title: self.title,
                    synopsis: self.synopsis,
                    duration: 45,
                    thumbnail: String::new(),
                    background: String::new(),
                    genres: self.genres,
                    rating: self.rating,
                    release_year: Some(2024),
                    age_group: "14+".to_string(),
                    featured: false,
                    episodes: self.episodes,
                    season_count,
                    status: SeriesStatus::InProgress,
                    next_episode_date: None,
                })
            }
        }
    }
}
