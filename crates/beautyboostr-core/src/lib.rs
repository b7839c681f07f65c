//! Ingredient catalog tooling: load and search the catalog, and draft new
//! records for manual insertion into it.

pub mod builder;
pub mod catalog;
pub mod error;
pub mod model;
pub mod search;

pub use builder::RecordBuilder;
pub use catalog::schema::SchemaVariant;
pub use catalog::{load_catalog, Catalog, DEFAULT_CATALOG_PATH};
pub use search::{BrowseView, SearchOutcome};
