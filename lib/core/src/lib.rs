//! # Platewise Core
//!
//! Core data structures for the Platewise restaurant recommender.
//!
//! - [`RestaurantRecord`] - One catalog row
//! - [`Catalog`] / [`CatalogView`] - The catalog and filtered, ordered slices of it
//! - [`FeatureVector`] - Dense feature row with cosine similarity
//! - [`QueryProfile`] - A user's submitted preferences
//! - [`RecordFilter`] - Composable predicates over records
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::{Catalog, RestaurantRecord};
//!
//! let catalog = Catalog::new(vec![
//!     RestaurantRecord::new("Meghana Foods", "BTM", 600.0, 4401),
//!     RestaurantRecord::new("New Stall", "BTM", 200.0, 0),
//! ]);
//!
//! let view = catalog.build_view("BTM").restrict_popularity();
//! assert_eq!(view.len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod query;
pub mod record;
pub mod vector;

pub use catalog::{Catalog, CatalogView};
pub use error::{Error, Result};
pub use filter::{Filter, FilterCondition, RecordFilter};
pub use query::QueryProfile;
pub use record::{CategoricalAttribute, ContinuousField, RestaurantRecord};
pub use vector::FeatureVector;
