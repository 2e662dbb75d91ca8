use crate::catalog::traits::CatalogSource;
use crate::error::CatalogError;
use crate::models::Property;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Immutable view of the catalog at one point in time
pub type CatalogSnapshot = Arc<Vec<Property>>;

/// Holds the live catalog snapshot.
///
/// Readers clone the `Arc` under a read lock held only for the clone, and a
/// reload builds the whole replacement before swapping the pointer, so no
/// reader ever sees a half-applied catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    snapshot: RwLock<CatalogSnapshot>,
}

impl CatalogStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from a listing set, checking catalog invariants
    pub fn from_properties(properties: Vec<Property>) -> Result<Self, CatalogError> {
        let prepared = prepare(properties)?;
        Ok(Self {
            snapshot: RwLock::new(Arc::new(prepared)),
        })
    }

    /// Load the current snapshot. Callers share it read-only.
    pub fn load(&self) -> CatalogSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new listing set. On error the old snapshot stays live.
    pub fn replace(&self, properties: Vec<Property>) -> Result<usize, CatalogError> {
        let prepared = Arc::new(prepare(properties)?);
        let count = prepared.len();
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = prepared;
        Ok(count)
    }

    /// Fetch a full listing set from `source` and swap it in
    pub async fn reload(&self, source: &dyn CatalogSource) -> Result<usize> {
        let properties = source
            .fetch()
            .await
            .with_context(|| format!("Failed to fetch catalog from {}", source.source_name()))?;

        let count = self
            .replace(properties)
            .with_context(|| format!("Catalog from {} is invalid", source.source_name()))?;

        info!("Loaded {} properties from {}", count, source.source_name());
        Ok(count)
    }

    /// Periodically reload from `source`. Failed reloads keep serving the
    /// previous snapshot.
    pub fn spawn_refresher(
        self: Arc<Self>,
        source: Arc<dyn CatalogSource>,
        every: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick fires immediately and the catalog was just loaded.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                debug!("Refreshing catalog from {}", source.source_name());
                if let Err(e) = self.reload(source.as_ref()).await {
                    warn!("Catalog refresh failed, keeping previous snapshot: {e:#}");
                }
            }
        })
    }
}

fn prepare(mut properties: Vec<Property>) -> Result<Vec<Property>, CatalogError> {
    let mut slugs = HashSet::with_capacity(properties.len());

    for property in &mut properties {
        if !slugs.insert(property.slug.clone()) {
            return Err(CatalogError::DuplicateSlug(property.slug.clone()));
        }

        if !valid_bathrooms(property.bathrooms) {
            return Err(CatalogError::InvalidBathrooms(property.slug.clone()));
        }

        if let Some(image) = property.images.iter().find(|i| i.property_id != property.id) {
            return Err(CatalogError::ImageOwnerMismatch {
                slug: property.slug.clone(),
                image_id: image.id,
                owner: image.property_id,
            });
        }

        // Stable, so equal display orders keep insertion order
        property.images.sort_by_key(|image| image.display_order);
    }

    Ok(properties)
}

fn valid_bathrooms(bathrooms: f32) -> bool {
    bathrooms >= 0.0 && (bathrooms * 2.0).fract() == 0.0
}
