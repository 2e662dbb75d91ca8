pub mod file;
pub mod query;
pub mod remote;
pub mod rotation;
pub mod sample;
pub mod store;
pub mod traits;
pub mod types;

pub use file::JsonFileCatalog;
pub use remote::RemoteCatalog;
pub use rotation::{Rotation, RotationCursor};
pub use sample::SampleCatalog;
pub use store::{CatalogSnapshot, CatalogStore};
pub use traits::CatalogSource;
pub use types::{Direction, FilterCriteria, FilterParams};
