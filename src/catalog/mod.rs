mod cache;

pub use cache::CatalogCache;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::{MediaId, MediaItem, MediaKind, Movie, Series};
use crate::utils::AppError;

/// On-disk catalog layout: movies and series in separate lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub series: Vec<Series>,
}

/// Every title the player can be mounted with.
///
/// Movies and series have separate id spaces, so lookups take the kind.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MediaItem>,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(items.len());

        for mut item in items {
            if !seen.insert((item.kind(), item.id())) {
                return Err(AppError::Catalog(format!(
                    "duplicate {} id {}",
                    item.kind(),
                    item.id()
                )));
            }
            normalize(&mut item);
            normalized.push(item);
        }

        Ok(Self { items: normalized })
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, AppError> {
        let items = file
            .movies
            .into_iter()
            .map(MediaItem::from)
            .chain(file.series.into_iter().map(MediaItem::from))
            .collect();
        Self::new(items)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub async fn load(path: &Path) -> Result<Self, AppError> {
        debug!("Loading catalog from {:?}", path);
        let contents = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&contents)?;
        info!("Loaded catalog with {} titles", catalog.len());
        Ok(catalog)
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, kind: MediaKind, id: MediaId) -> Option<&MediaItem> {
        self.items
            .iter()
            .find(|item| item.kind() == kind && item.id() == id)
    }

    pub fn get(&self, kind: MediaKind, id: MediaId) -> Result<&MediaItem, AppError> {
        self.find(kind, id)
            .ok_or_else(|| AppError::MediaNotFound(format!("{} {}", kind, id)))
    }

    /// Titles of the same kind sharing at least one genre with `item`, in
    /// catalog order
    pub fn similar_media(&self, item: &MediaItem, limit: usize) -> Vec<&MediaItem> {
        self.similar(item).take(limit).collect()
    }

    /// The title offered once `item` has played to its end: the best rated
    /// similar title, lowest id on ties.
    pub fn suggest_next(&self, item: &MediaItem) -> Option<&MediaItem> {
        self.similar(item).min_by(|a, b| {
            b.rating()
                .total_cmp(&a.rating())
                .then_with(|| a.id().cmp(&b.id()))
        })
    }

    fn similar<'a, 'b>(&'a self, item: &'b MediaItem) -> impl Iterator<Item = &'a MediaItem> {
        self.items.iter().filter(move |candidate| {
            candidate.kind() == item.kind()
                && candidate.id() != item.id()
                && candidate.shares_genre_with(item)
        })
    }
}

fn normalize(item: &mut MediaItem) {
    let mut seen = HashSet::new();
    match item {
        MediaItem::Movie(movie) => {
            movie.genres.retain(|genre| seen.insert(genre.clone()));
            check_source(&movie.title, &movie.video_url);
        }
        MediaItem::Series(series) => {
            series.genres.retain(|genre| seen.insert(genre.clone()));
            if !series.episodes_in_order() {
                warn!("Episodes of '{}' are out of order, sorting", series.title);
                series.episodes.sort_by_key(|episode| episode.order_key());
            }
            for episode in &series.episodes {
                check_source(&series.title, &episode.video_url);
            }
        }
    }
}

fn check_source(title: &str, source: &str) {
    if Url::parse(source).is_err() {
        warn!("'{}' has a video source that is not an absolute URL: {}", title, source);
    }
}
