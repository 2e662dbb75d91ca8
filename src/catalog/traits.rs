use crate::models::Property;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can produce a full catalog snapshot.
/// The store only ever sees complete listing sets, so a source swap
/// (sample data, JSON file, remote feed, database) never touches queries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every property, in catalog order
    async fn fetch(&self) -> Result<Vec<Property>>;

    /// Get the name of the catalog source
    fn source_name(&self) -> &'static str;
}
