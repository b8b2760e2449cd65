//! Loading for the Platewise recommender: the catalog CSV, the fitted
//! vocabulary artifact, and the store that keeps the current snapshot.

pub mod catalog_csv;
pub mod manager;
pub mod vocabulary;

pub use catalog_csv::{load_catalog, read_catalog, REQUIRED_COLUMNS};
pub use manager::{CatalogStore, StoreConfig};
pub use vocabulary::{load_encoder, parse_encoder};
