pub mod catalog;
pub mod config;
pub mod constants;
pub mod models;
pub mod navigation;
pub mod player;
pub mod utils;

pub use catalog::{Catalog, CatalogCache};
pub use config::Config;
pub use models::{Episode, EpisodeId, MediaId, MediaItem, MediaKind};
pub use navigation::Route;
pub use utils::{AppError, PlaybackError};
