use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use super::Catalog;
use crate::utils::AppError;

struct CachedCatalog {
    catalog: Arc<Catalog>,
    loaded_at: Instant,
}

/// Catalog loaded from disk and reused until its TTL runs out.
///
/// Owned by whoever needs it and handed around by reference; there is no
/// process-wide instance.
pub struct CatalogCache {
    path: PathBuf,
    ttl: Duration,
    entry: RwLock<Option<CachedCatalog>>,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Current catalog, re-read from disk when missing or expired
    pub async fn get(&self) -> Result<Arc<Catalog>, AppError> {
        {
            let entry = self.entry.read().await;
            if let Some(cached) = entry.as_ref()
                && cached.loaded_at.elapsed() < self.ttl
            {
                return Ok(cached.catalog.clone());
            }
        }

        let mut entry = self.entry.write().await;
        // Another caller may have refreshed it while we waited
        if let Some(cached) = entry.as_ref()
            && cached.loaded_at.elapsed() < self.ttl
        {
            return Ok(cached.catalog.clone());
        }

        debug!("Catalog cache miss for {:?}", self.path);
        let catalog = Arc::new(Catalog::load(&self.path).await?);
        *entry = Some(CachedCatalog {
            catalog: catalog.clone(),
            loaded_at: Instant::now(),
        });
        Ok(catalog)
    }

    pub async fn is_fresh(&self) -> bool {
        self.entry
            .read()
            .await
            .as_ref()
            .is_some_and(|cached| cached.loaded_at.elapsed() < self.ttl)
    }

    pub async fn invalidate(&self) {
        if self.entry.write().await.take().is_some() {
            info!("Catalog cache invalidated");
        }
    }
}
