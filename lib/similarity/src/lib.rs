//! # Platewise Similarity
//!
//! Ranking and filtering over an encoded restaurant catalog.
//!
//! ## Features
//!
//! - **Catalog snapshot**: records paired with feature rows encoded at load time
//! - **Cosine ranking**: full, stable ordering of a location view
//! - **Pagination & dedup**: similarity picks the page, votes order it
//! - **Hard filter**: exact location, cost ceiling, case-insensitive substrings
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::{Catalog, CategoricalAttribute, QueryProfile, RestaurantRecord};
//! use platewise_schema::EncoderBuilder;
//! use platewise_similarity::{CatalogSnapshot, Recommender};
//! use std::sync::Arc;
//!
//! let encoder = Arc::new(
//!     EncoderBuilder::new()
//!         .categories(CategoricalAttribute::Location, ["BTM"])
//!         .build()
//!         .unwrap(),
//! );
//! let catalog = Catalog::new(vec![RestaurantRecord::new("Meghana Foods", "BTM", 600.0, 4401)]);
//! let snapshot = CatalogSnapshot::encode(catalog, &encoder);
//!
//! let recommender = Recommender::new(encoder);
//! let page = recommender
//!     .recommend_by_similarity(&snapshot, &QueryProfile::new("BTM", 500.0))
//!     .unwrap();
//! assert_eq!(page.items[0].name, "Meghana Foods");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Catalog    │────>│    View     │────>│   Ranker    │
//! │ (snapshot)  │     │ (location)  │     │  (cosine)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │    Page     │
//!                                         │(dedup/votes)│
//!                                         └─────────────┘
//! ```

pub mod page;
pub mod rank;
pub mod recommend;
pub mod snapshot;

pub use page::{dedup_and_sort, paginate, Page, DEFAULT_PAGE_SIZE};
pub use rank::{Ranked, Ranker, DEFAULT_PARALLEL_THRESHOLD};
pub use recommend::{filter_condition, Recommender};
pub use snapshot::CatalogSnapshot;
