//! # Platewise
//!
//! A content-based restaurant recommender.
//!
//! Platewise encodes every restaurant in a cleaned catalog against a fixed
//! category vocabulary, then answers two kinds of requests:
//!
//! - **Similarity**: restaurants at the requested location ranked by cosine
//!   similarity to the user's profile, paged four at a time, deduplicated by
//!   name and ordered by votes
//! - **Filter**: restaurants at the location within a cost ceiling, optionally
//!   narrowed by cuisine and dining-type substrings
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! platewise --catalog cleaned_data.csv --vocabulary vocabulary.json --http-port 5500
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use platewise::prelude::*;
//! use std::sync::Arc;
//!
//! let encoder = Arc::new(
//!     EncoderBuilder::new()
//!         .categories(CategoricalAttribute::Location, ["BTM", "HSR"])
//!         .build()
//!         .unwrap(),
//! );
//! let catalog = Catalog::new(vec![
//!     RestaurantRecord::new("Meghana Foods", "BTM", 600.0, 4401),
//!     RestaurantRecord::new("Empire", "HSR", 700.0, 3120),
//! ]);
//! let snapshot = CatalogSnapshot::encode(catalog, &encoder);
//!
//! let recommender = Recommender::new(encoder);
//! let page = recommender
//!     .recommend_by_similarity(&snapshot, &QueryProfile::new("BTM", 500.0))
//!     .unwrap();
//! assert_eq!(page.items.len(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! - [`platewise-core`](https://docs.rs/platewise-core) - Records, catalog views, feature vectors, filters
//! - [`platewise-schema`](https://docs.rs/platewise-schema) - Vocabulary, feature schema, one-hot encoder
//! - [`platewise-similarity`](https://docs.rs/platewise-similarity) - Ranking, pagination, both recommendation flows
//! - [`platewise-storage`](https://docs.rs/platewise-storage) - CSV catalog, vocabulary artifact, reloadable store
//! - [`platewise-api`](https://docs.rs/platewise-api) - REST API

// Re-export core types
pub use platewise_core::{
    Catalog, CatalogView, CategoricalAttribute, ContinuousField, Error, FeatureVector, Filter,
    FilterCondition, QueryProfile, RecordFilter, RestaurantRecord, Result,
};

// Re-export schema
pub use platewise_schema::{
    CategoryVocabulary, EncoderBuilder, FeatureEncoder, FeatureSchema, SchemaError,
    VocabularyArtifact,
};

// Re-export ranking
pub use platewise_similarity::{CatalogSnapshot, Page, Ranker, Recommender, DEFAULT_PAGE_SIZE};

// Re-export storage
pub use platewise_storage::{CatalogStore, StoreConfig};

// Re-export API
pub use platewise_api::{ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiState, Catalog, CatalogSnapshot, CatalogStore, CategoricalAttribute, ContinuousField,
        EncoderBuilder, Error, FeatureEncoder, FeatureVector, Page, QueryProfile, Recommender,
        RestApi, RestaurantRecord, Result, StoreConfig,
    };
}
